//! Repository layer: in-memory keyed tables for catalog records and
//! source documents.

mod catalog;
mod document;
pub mod snapshot;

pub use catalog::{CatalogRepository, CatalogTable};
pub use document::DocumentRepository;
