use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::address::{AddressCascade, AddressIds, Prefill, ReferenceSource, Restored};
use crate::age::{AgeValidator, DobIds};
use crate::dom::{Document, Event, EventKind, Listeners, NodeId};
use crate::page;
use crate::repeater::{sections, RepeaterConfig, RepeaterController};

/// Operation a registered listener runs. Repeater handlers carry the slot of
/// their controller in `ApplicationForm::repeaters`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handler {
    AddEntry(usize),
    RemoveEntry(usize),
    CountryChanged,
    ProvinceChanged,
    ValidateAge,
}

/// Which controllers to wire, and the element ids they bind to.
#[derive(Debug, Clone)]
pub struct FormBindings {
    pub sections: Vec<RepeaterConfig>,
    pub address: AddressIds,
    pub dob: DobIds,
}

impl Default for FormBindings {
    fn default() -> Self {
        Self {
            sections: sections::all(),
            address: AddressIds::default(),
            dob: DobIds::default(),
        }
    }
}

/// A document together with every controller wired onto it.
///
/// One listener is registered per capability: each add button, each section
/// container (delegated removal), the country and province selectors, and the
/// date-of-birth input. Elements that are missing simply leave their feature
/// unwired.
#[derive(Debug, Clone)]
pub struct ApplicationForm {
    document: Document,
    repeaters: Vec<RepeaterController>,
    cascade: Option<AddressCascade>,
    age: Option<AgeValidator>,
    listeners: Listeners<Handler>,
}

impl ApplicationForm {
    pub fn new(mut document: Document, bindings: FormBindings) -> Self {
        let mut listeners = Listeners::new();

        let mut repeaters = Vec::new();
        for config in bindings.sections {
            let Some(controller) = RepeaterController::bind(&mut document, config) else {
                continue;
            };
            let slot = repeaters.len();
            if let Some(button) = controller.add_button() {
                listeners.on(button, EventKind::Click, Handler::AddEntry(slot));
            }
            listeners.on(
                controller.container(),
                EventKind::Click,
                Handler::RemoveEntry(slot),
            );
            repeaters.push(controller);
        }

        let cascade = AddressCascade::bind(&document, &bindings.address);
        if let Some(cascade) = &cascade {
            listeners.on(
                cascade.country_select(),
                EventKind::Change,
                Handler::CountryChanged,
            );
            listeners.on(
                cascade.province_select(),
                EventKind::Change,
                Handler::ProvinceChanged,
            );
        }

        let age = AgeValidator::bind(&document, &bindings.dob);
        if let Some(age) = &age {
            listeners.on(age.input(), EventKind::Change, Handler::ValidateAge);
            listeners.on(age.input(), EventKind::Blur, Handler::ValidateAge);
        }

        info!(
            sections = repeaters.len(),
            address = cascade.is_some(),
            age_check = age.is_some(),
            listeners = listeners.len(),
            "Application form wired"
        );

        Self {
            document,
            repeaters,
            cascade,
            age,
            listeners,
        }
    }

    /// The standard page with all controllers wired.
    pub fn standard() -> Self {
        Self::new(page::application_document(), FormBindings::default())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn repeater(&self, section: &str) -> Option<&RepeaterController> {
        self.repeaters.iter().find(|r| r.section() == section)
    }

    pub fn cascade(&self) -> Option<&AddressCascade> {
        self.cascade.as_ref()
    }

    pub fn age_validator(&self) -> Option<&AgeValidator> {
        self.age.as_ref()
    }

    /// Startup: loads reference data and replays the prefill.
    pub async fn start(&mut self, source: &dyn ReferenceSource, prefill: &Prefill) -> Restored {
        match &mut self.cascade {
            Some(cascade) => cascade.start(&mut self.document, source, prefill).await,
            None => Restored::Nothing,
        }
    }

    /// Delivers `event`, judging age against the local date.
    pub fn dispatch(&mut self, event: Event) -> usize {
        self.dispatch_on(event, Local::now().date_naive())
    }

    /// Delivers `event` to every listener on its path and returns how many
    /// handlers ran.
    pub fn dispatch_on(&mut self, event: Event, today: NaiveDate) -> usize {
        let routed = self.listeners.route(&self.document, event);
        for (_, handler) in &routed {
            self.run(*handler, event, today);
        }
        routed.len()
    }

    pub fn click(&mut self, target: NodeId) -> usize {
        self.dispatch(Event::click(target))
    }

    /// Picks `value` in a select (or types it into an input) and fires
    /// `change`, as a user would.
    pub fn choose(&mut self, control: NodeId, value: &str) -> usize {
        self.document.set_value(control, value);
        self.dispatch(Event::change(control))
    }

    /// Submission pairs, in document order.
    pub fn form_data(&self) -> Vec<(String, String)> {
        self.document.form_data()
    }

    fn run(&mut self, handler: Handler, event: Event, today: NaiveDate) {
        debug!(?handler, kind = ?event.kind, "Handling event");
        match handler {
            Handler::AddEntry(slot) => {
                self.repeaters[slot].add_entry(&mut self.document);
            }
            Handler::RemoveEntry(slot) => {
                self.repeaters[slot].handle_click(&mut self.document, event.target);
            }
            Handler::CountryChanged => {
                if let Some(cascade) = &self.cascade {
                    cascade.on_country_change(&mut self.document);
                }
            }
            Handler::ProvinceChanged => {
                if let Some(cascade) = &self.cascade {
                    cascade.on_province_change(&mut self.document);
                }
            }
            Handler::ValidateAge => {
                if let Some(age) = self.age {
                    age.validate(&mut self.document, today);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{InlineSource, ReferenceTree};
    use crate::age::UNDERAGE_MESSAGE;
    use crate::dom::Fragment;

    fn remove_button(form: &ApplicationForm, section: &str, position: usize) -> NodeId {
        let repeater = form.repeater(section).unwrap();
        let doc = form.document();
        let group = repeater.entries(doc)[position];
        doc.descendants(group)
            .into_iter()
            .find(|n| doc.has_class(*n, repeater.config().remove_class))
            .unwrap()
    }

    fn names(form: &ApplicationForm, prefix: &str) -> Vec<String> {
        form.form_data()
            .into_iter()
            .map(|(name, _)| name)
            .filter(|name| name.starts_with(prefix))
            .collect()
    }

    #[test]
    fn test_education_add_twice_then_remove_middle() {
        let mut form = ApplicationForm::standard();
        let add = form.document().element_by_id("add_education_button").unwrap();
        form.click(add);
        form.click(add);

        let repeater = form.repeater("education").unwrap().clone();
        assert_eq!(repeater.field_indices(form.document()).len(), 3);
        for (position, indices) in repeater.field_indices(form.document()).iter().enumerate() {
            assert!(indices.iter().all(|i| *i == position));
        }

        let entries = repeater.entries(form.document());
        let school = form
            .document()
            .element_by_id("education[2][school_name]")
            .unwrap();
        form.document_mut().set_value(school, "University of San Carlos");

        let button = remove_button(&form, "education", 1);
        form.click(button);

        assert_eq!(repeater.entries(form.document()), vec![entries[0], entries[2]]);
        assert_eq!(
            form.document().attr(school, "name"),
            Some("education[1][school_name]")
        );
        assert_eq!(form.document().value(school), "University of San Carlos");
        assert!(names(&form, "education[").iter().all(|n| !n.starts_with("education[2]")));
    }

    #[test]
    fn test_social_media_starts_empty_and_grows_from_zero() {
        let mut form = ApplicationForm::standard();
        assert!(names(&form, "social_media[").is_empty());
        let add = form
            .document()
            .element_by_id("add_social_media_button")
            .unwrap();
        form.click(add);
        assert_eq!(
            names(&form, "social_media["),
            vec!["social_media[0][platform]", "social_media[0][profile_link]"]
        );
    }

    #[test]
    fn test_remove_only_language_entry() {
        let mut form = ApplicationForm::standard();
        let button = remove_button(&form, "language", 0);
        assert_eq!(form.click(button), 1);
        assert!(names(&form, "language[").is_empty());
    }

    #[test]
    fn test_click_in_one_section_leaves_others() {
        let mut form = ApplicationForm::standard();
        let button = remove_button(&form, "experience", 0);
        form.click(button);
        assert!(names(&form, "experience[").is_empty());
        assert_eq!(names(&form, "education[").len(), 5);
    }

    #[test]
    fn test_dob_change_and_blur_validate() {
        let mut form = ApplicationForm::standard();
        let dob = form.document().element_by_id("dob").unwrap();
        let error = form.document().element_by_id("dobError").unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();

        form.document_mut().set_value(dob, "2009-01-01");
        assert_eq!(form.dispatch_on(Event::change(dob), today), 1);
        assert_eq!(form.document().text(error), UNDERAGE_MESSAGE);

        form.document_mut().set_value(dob, "2000-01-01");
        assert_eq!(form.dispatch_on(Event::blur(dob), today), 1);
        assert_eq!(form.document().text(error), "");
    }

    #[tokio::test]
    async fn test_country_change_repopulates_provinces() {
        let tree = ReferenceTree::from_json(
            r#"[{"name": "Philippines", "provinces": [{"name": "Cebu", "cities": ["Mandaue"]}]}]"#,
        )
        .unwrap();
        let mut form = ApplicationForm::standard();
        form.start(&InlineSource(tree), &Prefill::default()).await;

        let province = form.cascade().unwrap().province_select();
        let city = form.cascade().unwrap().city_select();
        form.choose(province, "Cebu");
        assert_eq!(form.document().options(city).len(), 2);

        let country = form.cascade().unwrap().country_select();
        form.choose(country, "Philippines");
        assert_eq!(form.document().value(province), "");
        assert_eq!(form.document().options(city).len(), 1);
    }

    #[test]
    fn test_missing_elements_leave_features_unwired() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.append(root, &Fragment::new("div").id("language_entries_container"));
        let form = ApplicationForm::new(doc, FormBindings::default());
        assert!(form.repeater("education").is_none());
        assert!(form.repeater("language").unwrap().add_button().is_none());
        assert!(form.cascade().is_none());
        assert!(form.age_validator().is_none());
    }
}
