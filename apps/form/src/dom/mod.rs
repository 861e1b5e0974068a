// Headless document model: element tree, fragment builder, event routing.
// Controllers mutate a `Document` synchronously in response to `Event`s.

pub mod builder;
pub mod document;
pub mod event;

pub use builder::{option, placeholder_option, Fragment};
pub use document::{Document, NodeId};
pub use event::{Event, EventKind, Listeners};
