//! casebrief ingest: case file reading, heading segmentation, text cleaning.

pub mod clean;
pub mod file;
pub mod segment;
pub mod sentences;
pub mod stemmer;
pub mod stopwords;

pub use clean::{clean, clean_sections, tokenize};
pub use file::read_case_text;
pub use segment::{segment, Sections, Segmenter};
pub use sentences::split_sentences;
pub use stemmer::stem;
