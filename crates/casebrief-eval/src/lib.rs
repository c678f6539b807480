//! casebrief eval: ROUGE-1 scoring of generated summaries against human references.

pub mod corpus;
pub mod rouge;

pub use corpus::{
    evaluate_corpus, render_table, CaseScore, EvalReport, DEFAULT_REFERENCE_FILE,
};
pub use rouge::{rouge1, rouge_tokens, RougeScore};
