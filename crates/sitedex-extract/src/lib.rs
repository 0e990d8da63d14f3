//! Polymorphic field extractors and the extraction engine.

pub mod engine;
pub mod extractor;
pub mod field;
pub mod filename;
pub mod lookup;
pub mod slug;
pub mod title;
pub mod uid;

pub use engine::{extract_record, run_field};
pub use extractor::Extractor;
pub use field::Field;
pub use lookup::{FieldLookup, NoLookup};
