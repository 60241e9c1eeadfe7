//! Service layer for Liftdex business logic.
//!
//! Domain orchestration separated from CLI concerns.

pub mod ingest;

pub use ingest::{IngestOutcome, IngestService};
