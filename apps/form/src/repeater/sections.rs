//! The four repeated sections of the application form.
//!
//! Each section is a field table plus a `RepeaterConfig`; the group markup is
//! produced by one shared renderer so the sections only differ in data.

use crate::dom::{option, placeholder_option, Fragment};
use crate::repeater::controller::{FieldKinds, RepeaterConfig};

#[derive(Debug, Clone, Copy)]
pub enum Control {
    Text,
    Date,
    Url { placeholder: &'static str },
    Select {
        placeholder: &'static str,
        /// `(value, label)` pairs.
        options: &'static [(&'static str, &'static str)],
    },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: &'static str,
    pub label: &'static str,
    pub control: Control,
    pub required: bool,
}

const EDUCATION_LEVELS: &[(&str, &str)] = &[
    ("High School", "High School"),
    ("Senior High School", "Senior High School"),
    ("College", "College (Non-degree)"),
    ("Bachelor's", "Bachelor’s Degree"),
    ("Master's", "Master’s Degree"),
    ("PhD", "PhD"),
];

const LANGUAGES: &[(&str, &str)] = &[
    ("English", "English"),
    ("Spanish", "Spanish"),
    ("Turkish", "Turkish"),
    ("Italian", "Italian"),
    ("German", "German"),
    ("Arabic", "Arabic"),
    ("Tagalog", "Tagalog"),
    ("Urdu", "Urdu"),
    ("Hindi", "Hindi"),
    ("Bisaya", "Bisaya"),
    ("Ilonggo", "Ilonggo"),
    ("Other", "Other"),
];

const FLUENCY_LEVELS: &[(&str, &str)] = &[
    ("Native", "Native"),
    ("Intermediate", "Intermediate"),
    ("Beginner", "Beginner"),
    ("A1", "A1"),
    ("A2", "A2"),
    ("B1", "B1"),
    ("B2", "B2"),
    ("C1", "C1"),
    ("C2", "C2"),
];

const PLATFORMS: &[(&str, &str)] = &[
    ("Facebook", "Facebook"),
    ("LinkedIn", "LinkedIn"),
    ("Twitter (X)", "Twitter (X)"),
    ("Instagram", "Instagram"),
    ("Reddit", "Reddit"),
    ("TikTok", "TikTok"),
];

pub const EDUCATION_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        field: "school_name",
        label: "School Name:",
        control: Control::Text,
        required: true,
    },
    FieldSpec {
        field: "subject_studied",
        label: "Subject Studied:",
        control: Control::Text,
        required: false,
    },
    FieldSpec {
        field: "school_year_from",
        label: "School Year (From):",
        control: Control::Date,
        required: true,
    },
    FieldSpec {
        field: "school_year_to",
        label: "School Year (To):",
        control: Control::Date,
        required: true,
    },
    FieldSpec {
        field: "education_level",
        label: "Education Level:",
        control: Control::Select {
            placeholder: "Select Level",
            options: EDUCATION_LEVELS,
        },
        required: true,
    },
];

pub const EXPERIENCE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        field: "company_name",
        label: "Company Name:",
        control: Control::Text,
        required: false,
    },
    FieldSpec {
        field: "job_title",
        label: "Job Title:",
        control: Control::Text,
        required: false,
    },
    FieldSpec {
        field: "from_date",
        label: "From Date:",
        control: Control::Date,
        required: false,
    },
    FieldSpec {
        field: "to_date",
        label: "To Date:",
        control: Control::Date,
        required: false,
    },
];

pub const LANGUAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        field: "name",
        label: "Language:",
        control: Control::Select {
            placeholder: "Select Language",
            options: LANGUAGES,
        },
        required: true,
    },
    FieldSpec {
        field: "fluency",
        label: "Fluency:",
        control: Control::Select {
            placeholder: "Select Fluency",
            options: FLUENCY_LEVELS,
        },
        required: true,
    },
];

pub const SOCIAL_MEDIA_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        field: "platform",
        label: "Platform:",
        control: Control::Select {
            placeholder: "Select Platform",
            options: PLATFORMS,
        },
        required: true,
    },
    FieldSpec {
        field: "profile_link",
        label: "Profile Link:",
        control: Control::Url {
            placeholder: "https://example.com/profile",
        },
        required: false,
    },
];

/// Submission name of one field in one group: `section[index][field]`.
pub fn field_name(section: &str, index: usize, field: &str) -> String {
    format!("{section}[{index}][{field}]")
}

/// Renders one entry group: a labelled control per field, then the remove
/// trigger. Each control's `id` equals its name so labels bind to it.
pub fn render_entry(
    section: &str,
    group_class: &str,
    remove_class: &str,
    fields: &[FieldSpec],
    index: usize,
) -> Fragment {
    let mut group = Fragment::new("div")
        .class(group_class)
        .attr("data-index", index.to_string());

    for spec in fields {
        let name = field_name(section, index, spec.field);
        let control = match spec.control {
            Control::Text => Fragment::new("input").attr("type", "text"),
            Control::Date => Fragment::new("input").attr("type", "date"),
            Control::Url { placeholder } => Fragment::new("input")
                .attr("type", "url")
                .attr("placeholder", placeholder),
            Control::Select {
                placeholder,
                options,
            } => Fragment::new("select")
                .child(placeholder_option(placeholder))
                .children(options.iter().map(|(value, label)| option(value, label))),
        };
        group = group
            .child(
                Fragment::new("label")
                    .attr("for", name.as_str())
                    .text(spec.label),
            )
            .child(
                control
                    .attr("name", name.as_str())
                    .id(name.as_str())
                    .flag_if("required", spec.required),
            );
    }

    group.child(
        Fragment::new("button")
            .attr("type", "button")
            .class(remove_class)
            .text("Remove"),
    )
}

pub fn education_entry(index: usize) -> Fragment {
    render_entry(
        "education",
        "education_entry",
        "remove_education_entry",
        EDUCATION_FIELDS,
        index,
    )
}

pub fn experience_entry(index: usize) -> Fragment {
    render_entry(
        "experience",
        "experience_entry",
        "remove_experience_entry",
        EXPERIENCE_FIELDS,
        index,
    )
}

pub fn language_entry(index: usize) -> Fragment {
    render_entry(
        "language",
        "language_entry",
        "remove_language_entry",
        LANGUAGE_FIELDS,
        index,
    )
}

pub fn social_media_entry(index: usize) -> Fragment {
    render_entry(
        "social_media",
        "social_media_entry",
        "remove_social_media_entry",
        SOCIAL_MEDIA_FIELDS,
        index,
    )
}

pub fn education() -> RepeaterConfig {
    RepeaterConfig {
        section: "education",
        container_id: "education_entries_container",
        add_button_id: "add_education_button",
        group_class: "education_entry",
        remove_class: "remove_education_entry",
        field_kinds: FieldKinds::BOTH,
        template: education_entry,
    }
}

pub fn experience() -> RepeaterConfig {
    RepeaterConfig {
        section: "experience",
        container_id: "experience_entries_container",
        add_button_id: "add_experience_button",
        group_class: "experience_entry",
        remove_class: "remove_experience_entry",
        field_kinds: FieldKinds::INPUTS,
        template: experience_entry,
    }
}

pub fn language() -> RepeaterConfig {
    RepeaterConfig {
        section: "language",
        container_id: "language_entries_container",
        add_button_id: "add_language_button",
        group_class: "language_entry",
        remove_class: "remove_language_entry",
        field_kinds: FieldKinds::SELECTS,
        template: language_entry,
    }
}

pub fn social_media() -> RepeaterConfig {
    RepeaterConfig {
        section: "social_media",
        container_id: "social_media_entries_container",
        add_button_id: "add_social_media_button",
        group_class: "social_media_entry",
        remove_class: "remove_social_media_entry",
        field_kinds: FieldKinds::BOTH,
        template: social_media_entry,
    }
}

/// All four sections, in page order.
pub fn all() -> Vec<RepeaterConfig> {
    vec![education(), experience(), language(), social_media()]
}
