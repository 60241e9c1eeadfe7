//! Extraction collaborator: LLM-backed specification field extraction.

mod client;

pub use client::{
    parse_raw_fields, ExtractionError, ExtractorConfig, LlmExtractor, SpecExtractor,
    DEFAULT_EXTRACT_PROMPT,
};
