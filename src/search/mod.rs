//! Search functionality
//!
//! This module provides the list view's search pipeline:
//! - Keyword tokenization of raw input
//! - Literal-safe, case-insensitive keyword patterns
//! - Highlighting of keyword occurrences
//! - Relevance ranking by title/summary match counts
//! - The debounced, switch-to-latest search controller

mod tokenizer;
mod pattern;
mod highlight;
mod ranking;
pub mod controller;

pub use tokenizer::tokenize;
pub use pattern::build_pattern;
pub use highlight::{highlight, highlight_with, Marker};
pub use ranking::rank_by_keywords;
pub use controller::SearchController;
