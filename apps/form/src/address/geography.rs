use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub name: String,
    #[serde(default)]
    pub cities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    #[serde(default)]
    pub provinces: Vec<Province>,
}

/// Read-only country → province → city hierarchy, in stored order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceTree {
    countries: Vec<Country>,
}

impl ReferenceTree {
    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Exact name match; the first match wins.
    pub fn country(&self, name: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.name == name)
    }

    pub fn province(&self, country: &str, province: &str) -> Option<&Province> {
        self.country(country)?
            .provinces
            .iter()
            .find(|p| p.name == province)
    }

    /// Province names of `country`, empty when the country is unknown.
    pub fn province_names(&self, country: &str) -> Vec<&str> {
        self.country(country)
            .map(|c| c.provinces.iter().map(|p| p.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// City names of `province` within `country`, empty on any miss.
    pub fn city_names(&self, country: &str, province: &str) -> Vec<&str> {
        self.province(country, province)
            .map(|p| p.cities.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"name": "Philippines", "provinces": [
            {"name": "Cebu", "cities": ["Cebu City", "Mandaue"]},
            {"name": "Bohol", "cities": ["Tagbilaran"]}
        ]},
        {"name": "Japan", "provinces": [{"name": "Osaka", "cities": ["Osaka"]}]},
        {"name": "Philippines", "provinces": []}
    ]"#;

    #[test]
    fn test_parses_dataset() {
        let tree = ReferenceTree::from_json(SAMPLE).unwrap();
        assert_eq!(tree.countries().len(), 3);
        assert_eq!(tree.province_names("Philippines"), vec!["Cebu", "Bohol"]);
    }

    #[test]
    fn test_first_country_match_wins() {
        let tree = ReferenceTree::from_json(SAMPLE).unwrap();
        assert_eq!(tree.country("Philippines").unwrap().provinces.len(), 2);
    }

    #[test]
    fn test_lookups_are_exact() {
        let tree = ReferenceTree::from_json(SAMPLE).unwrap();
        assert!(tree.country("philippines").is_none());
        assert!(tree.province_names("Phil").is_empty());
    }

    #[test]
    fn test_city_names_miss_is_empty() {
        let tree = ReferenceTree::from_json(SAMPLE).unwrap();
        assert_eq!(tree.city_names("Philippines", "Cebu"), vec!["Cebu City", "Mandaue"]);
        assert!(tree.city_names("Japan", "Cebu").is_empty());
        assert!(tree.city_names("Atlantis", "Cebu").is_empty());
    }

    #[test]
    fn test_missing_children_default_to_empty() {
        let tree = ReferenceTree::from_json(r#"[{"name": "Nauru"}]"#).unwrap();
        assert!(tree.province_names("Nauru").is_empty());
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(ReferenceTree::from_json(r#"{"name": "Philippines"}"#).is_err());
    }
}
