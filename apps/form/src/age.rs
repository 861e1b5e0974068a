//! Age eligibility for the date-of-birth field.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::dom::{Document, NodeId};

pub const MINIMUM_AGE: i32 = 18;
pub const UNDERAGE_MESSAGE: &str = "Applicant must be 18 years or older.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// Empty (or unreadable) input: nothing is asserted either way.
    NotProvided,
    Eligible { age: i32 },
    Underage { age: i32 },
}

impl Eligibility {
    /// `None` while no date has been provided.
    pub fn is_eligible(&self) -> Option<bool> {
        match self {
            Eligibility::NotProvided => None,
            Eligibility::Eligible { .. } => Some(true),
            Eligibility::Underage { .. } => Some(false),
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            Eligibility::Underage { .. } => Some(UNDERAGE_MESSAGE),
            _ => None,
        }
    }
}

/// Whole years between `dob` and `today`: the year difference, less one if
/// the birthday has not yet come round this year.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Classifies a `YYYY-MM-DD` date-of-birth value as of `today`.
pub fn check_eligibility(input: &str, today: NaiveDate) -> Eligibility {
    let input = input.trim();
    if input.is_empty() {
        return Eligibility::NotProvided;
    }
    let Ok(dob) = NaiveDate::parse_from_str(input, "%Y-%m-%d") else {
        debug!(input, "Unreadable date of birth treated as not provided");
        return Eligibility::NotProvided;
    };

    let age = age_on(dob, today);
    if age < MINIMUM_AGE {
        Eligibility::Underage { age }
    } else {
        Eligibility::Eligible { age }
    }
}

/// Element ids of the date input and its error display.
#[derive(Debug, Clone)]
pub struct DobIds {
    pub input: &'static str,
    pub error_display: &'static str,
}

impl Default for DobIds {
    fn default() -> Self {
        Self {
            input: "dob",
            error_display: "dobError",
        }
    }
}

/// Binds the eligibility check to a date input and its error display.
#[derive(Debug, Clone, Copy)]
pub struct AgeValidator {
    input: NodeId,
    error_display: NodeId,
}

impl AgeValidator {
    /// `None` unless both elements exist.
    pub fn bind(document: &Document, ids: &DobIds) -> Option<Self> {
        let input = document.element_by_id(ids.input);
        let error_display = document.element_by_id(ids.error_display);
        match (input, error_display) {
            (Some(input), Some(error_display)) => Some(Self {
                input,
                error_display,
            }),
            _ => {
                debug!(
                    input = ids.input,
                    error_display = ids.error_display,
                    "Date of birth elements not found; age check not wired"
                );
                None
            }
        }
    }

    pub fn input(&self) -> NodeId {
        self.input
    }

    pub fn error_display(&self) -> NodeId {
        self.error_display
    }

    /// Runs the check and writes the message, or clears it.
    pub fn validate(&self, document: &mut Document, today: NaiveDate) -> Eligibility {
        let result = check_eligibility(&document.value(self.input), today);
        document.set_text(self.error_display, result.message().unwrap_or_default());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Fragment;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_exactly_eighteen_is_eligible() {
        let today = date(2026, 10, 17);
        assert_eq!(
            check_eligibility("2008-10-17", today),
            Eligibility::Eligible { age: 18 }
        );
    }

    #[test]
    fn test_one_day_short_is_underage() {
        let today = date(2026, 10, 17);
        let result = check_eligibility("2008-10-18", today);
        assert_eq!(result, Eligibility::Underage { age: 17 });
        assert_eq!(result.message(), Some(UNDERAGE_MESSAGE));
        assert_eq!(result.is_eligible(), Some(false));
    }

    #[test]
    fn test_empty_input_asserts_nothing() {
        let today = date(2026, 10, 17);
        let result = check_eligibility("  ", today);
        assert_eq!(result, Eligibility::NotProvided);
        assert_eq!(result.is_eligible(), None);
        assert_eq!(result.message(), None);
    }

    #[test]
    fn test_unreadable_input_treated_as_not_provided() {
        assert_eq!(
            check_eligibility("17/10/2008", date(2026, 10, 17)),
            Eligibility::NotProvided
        );
    }

    #[test]
    fn test_age_on_birthday_month_not_reached() {
        assert_eq!(age_on(date(2000, 12, 1), date(2026, 11, 30)), 25);
        assert_eq!(age_on(date(2000, 12, 1), date(2026, 12, 1)), 26);
    }

    #[test]
    fn test_leap_day_birthday() {
        assert_eq!(age_on(date(2008, 2, 29), date(2026, 2, 28)), 17);
        assert_eq!(age_on(date(2008, 2, 29), date(2026, 3, 1)), 18);
    }

    #[test]
    fn test_validator_writes_and_clears_message() {
        let mut doc = Document::new();
        let root = doc.root();
        let input = doc.append(root, &Fragment::new("input").attr("type", "date").id("dob"));
        let error = doc.append(root, &Fragment::new("span").id("dobError"));
        let validator = AgeValidator::bind(&doc, &DobIds::default()).unwrap();
        let today = date(2026, 10, 17);

        doc.set_value(input, "2010-01-01");
        validator.validate(&mut doc, today);
        assert_eq!(doc.text(error), UNDERAGE_MESSAGE);

        doc.set_value(input, "1990-01-01");
        assert_eq!(
            validator.validate(&mut doc, today),
            Eligibility::Eligible { age: 36 }
        );
        assert_eq!(doc.text(error), "");

        doc.set_value(input, "2010-01-01");
        validator.validate(&mut doc, today);
        doc.set_value(input, "");
        validator.validate(&mut doc, today);
        assert_eq!(doc.text(error), "");
    }

    #[test]
    fn test_bind_requires_error_display() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.append(root, &Fragment::new("input").id("dob"));
        assert!(AgeValidator::bind(&doc, &DobIds::default()).is_none());
    }
}
