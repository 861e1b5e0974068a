//! Headless controller for a multi-section job-application form.
//!
//! - `repeater`: add / remove / renumber repeated entry groups
//! - `address`: country → province → city cascade with prefill replay
//! - `age`: date-of-birth eligibility check
//! - `form`: wires all of the above onto a `dom::Document`

pub mod address;
pub mod age;
pub mod config;
pub mod dom;
pub mod errors;
pub mod form;
pub mod page;
pub mod repeater;

pub use form::{ApplicationForm, FormBindings};
