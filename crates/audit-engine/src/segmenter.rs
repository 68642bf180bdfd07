//! Clause segmentation
//!
//! One clause is approximated as one sentence: newlines become sentence
//! terminators, the text is split on '.', each piece is trimmed and short
//! fragments are discarded. A newline in the middle of a sentence is a hard
//! split.

use shared_types::Clause;

/// Sentence terminator used for splitting
const TERMINATOR: char = '.';

/// Split raw text into clauses longer than `min_len` characters
pub fn segment(text: &str, min_len: usize) -> Vec<Clause> {
    text.split(|c: char| c == '\n' || c == TERMINATOR)
        .map(str::trim)
        .filter(|candidate| candidate.chars().count() > min_len)
        .enumerate()
        .map(|(index, candidate)| Clause::new(index, candidate))
        .collect()
}

/// Keep the first `max` clauses; returns the kept clauses and the dropped count
pub fn cap(mut clauses: Vec<Clause>, max: usize) -> (Vec<Clause>, usize) {
    let dropped = clauses.len().saturating_sub(max);
    clauses.truncate(max);
    (clauses, dropped)
}
