//! Task relevance: keyword-scored sections and top-k ranking.
//!
//! Scoring is lexical. A block's importance is the number of distinct task
//! keywords it contains as substrings.

mod keywords;
mod ranker;

pub use keywords::{extract_keywords, extract_keywords_with_min, keyword_score};
pub use ranker::{
    document_name, extract_relevant_sections, rank_sections, RankOptions, RelevanceRanker,
};
