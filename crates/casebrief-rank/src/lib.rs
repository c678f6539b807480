//! casebrief rank: TF-IDF term matrix, latent topic projection, extractive ranking.

pub mod lsa;
pub mod ranker;
pub mod tfidf;

pub use lsa::{project, TopicProjection};
pub use ranker::{selection_count, ExtractiveRanker};
pub use tfidf::{analyze, build_term_matrix, TermMatrix};
