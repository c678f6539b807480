//! Runtime: per-case summarization, summary artifact format, corpus batches.
//!
//! `CaseSummarizer` runs segmentation and ranking for one document;
//! `BatchRunner` applies it to every case folder under a corpus root.

pub mod assemble;
pub mod batch;
pub mod pipeline;
pub mod types;

pub use assemble::{assemble, parse, render_preprocessed, render_sections};
pub use batch::{case_folders, file_digest, BatchRunner, DEFAULT_CASE_FILE, DEFAULT_SUMMARY_FILE};
pub use pipeline::CaseSummarizer;
pub use types::*;
