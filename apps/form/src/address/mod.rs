// Cascading address selection: country → province → city, driven by a static
// reference tree and replayed from a previous submission on startup.

pub mod cascade;
pub mod geography;
pub mod prefill;
pub mod source;

pub use cascade::{AddressCascade, AddressIds, Restored};
pub use geography::{Country, Province, ReferenceTree};
pub use prefill::Prefill;
pub use source::{FileSource, HttpSource, InlineSource, ReferenceSource};
