//! Data models for Liftdex.

mod document;
mod raw;
mod record;

pub use document::{DocumentStatus, SourceDocument};
pub use raw::{RawFields, RawValue};
pub use record::{defaults, CatalogRecord, Tier};
