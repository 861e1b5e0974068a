// Repeated-entry sections: add / remove / renumber groups of fields whose
// submission names embed a contiguous zero-based index.

pub mod controller;
pub mod reindex;
pub mod sections;

pub use controller::{FieldKinds, RepeaterConfig, RepeaterController};
