//! Standard application page skeleton.
//!
//! Carries the ids and classes the controllers bind to, plus the initial
//! entries a fresh page shows: one education, one experience and one
//! language entry, no social media entries.

use crate::address::cascade::{CITY_PLACEHOLDER, COUNTRY_PLACEHOLDER, PROVINCE_PLACEHOLDER};
use crate::dom::{option, placeholder_option, Document, Fragment};
use crate::repeater::sections;

/// Country pre-selected in the markup.
pub const DEFAULT_COUNTRY: &str = "Philippines";

fn labelled(name: &str, label: &str, control: Fragment) -> [Fragment; 2] {
    [
        Fragment::new("label").attr("for", name).text(label),
        control.attr("name", name).id(name),
    ]
}

fn input(input_type: &str) -> Fragment {
    Fragment::new("input").attr("type", input_type)
}

fn section(legend: &str) -> Fragment {
    Fragment::new("fieldset").child(Fragment::new("legend").text(legend))
}

fn repeated_section(
    legend: &str,
    container_id: &str,
    add_button_id: &str,
    add_label: &str,
    initial: Option<Fragment>,
) -> Fragment {
    section(legend)
        .child(Fragment::new("div").id(container_id).children(initial))
        .child(
            Fragment::new("button")
                .attr("type", "button")
                .id(add_button_id)
                .text(add_label),
        )
}

pub fn personal_section() -> Fragment {
    section("Personal Information")
        .children(labelled("fullName", "Full Name:", input("text").flag("required")))
        .children(labelled("dob", "Date of Birth:", input("date").flag("required")))
        .child(Fragment::new("span").id("dobError").class("error"))
        .children(labelled("mobile", "Mobile Number:", input("tel").flag("required")))
        .children(labelled("email", "Email Address:", input("email").flag("required")))
}

pub fn address_section() -> Fragment {
    let country = Fragment::new("select")
        .flag("required")
        .child(Fragment::new("option").attr("value", "").flag("disabled").text(COUNTRY_PLACEHOLDER))
        .child(option(DEFAULT_COUNTRY, DEFAULT_COUNTRY).flag("selected"));
    let province = Fragment::new("select").child(placeholder_option(PROVINCE_PLACEHOLDER));
    let city = Fragment::new("select").child(placeholder_option(CITY_PLACEHOLDER));

    section("Address")
        .children(labelled("country", "Country:", country))
        .children(labelled("province", "Province:", province))
        .children(labelled("city", "City/Municipality:", city))
        .children(labelled("barangay", "Barangay:", input("text")))
        .children(labelled("postalCode", "Postal Code:", input("text")))
}

/// Builds the full application form.
pub fn application_document() -> Document {
    let mut document = Document::new();
    let root = document.root();
    document.set_attr(root, "id", "application_form");
    document.set_attr(root, "method", "post");
    document.set_attr(root, "action", "/submit");

    document.append(root, &personal_section());
    document.append(root, &address_section());
    document.append(
        root,
        &repeated_section(
            "Education",
            "education_entries_container",
            "add_education_button",
            "Add Education",
            Some(sections::education_entry(0)),
        ),
    );
    document.append(
        root,
        &repeated_section(
            "Work Experience",
            "experience_entries_container",
            "add_experience_button",
            "Add Experience",
            Some(sections::experience_entry(0)),
        ),
    );
    document.append(
        root,
        &repeated_section(
            "Languages",
            "language_entries_container",
            "add_language_button",
            "Add Language",
            Some(sections::language_entry(0)),
        ),
    );
    document.append(
        root,
        &repeated_section(
            "Social Media",
            "social_media_entries_container",
            "add_social_media_button",
            "Add Social Media",
            None,
        ),
    );
    document.append(
        root,
        &Fragment::new("button")
            .attr("type", "submit")
            .text("Submit Application"),
    );
    document
}
