//! Liftdex - forklift equipment catalog with brochure ingestion.
//!
//! Heterogeneous, partially-unreliable specification data (hand-entered
//! forms, bulk rows, LLM-extracted brochure text) is normalized field by
//! field and folded into a canonical catalog. The merge policy decides
//! per field whether to trust incoming data, fall back to a default, or
//! preserve existing state, and whether an incoming submission updates an
//! existing record or creates a new one.

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod merge;
pub mod models;
pub mod normalize;
pub mod repository;
pub mod resolve;
pub mod seed;
pub mod services;
pub mod storage;
