use serde::{Deserialize, Serialize};

/// Address values from a previous submission, replayed once at startup.
/// Any field may be absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefill {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl Prefill {
    pub fn new(country: &str, province: &str, city: &str) -> Self {
        Self {
            country: Some(country.to_string()),
            province: Some(province.to_string()),
            city: Some(city.to_string()),
        }
    }

    /// Parses the server-injected snapshot. Unknown keys (the rest of the
    /// submitted form) are ignored.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn country(&self) -> Option<&str> {
        non_empty(&self.country)
    }

    pub fn province(&self) -> Option<&str> {
        non_empty(&self.province)
    }

    pub fn city(&self) -> Option<&str> {
        non_empty(&self.city)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
