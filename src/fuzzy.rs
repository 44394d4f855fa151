//! Fuzzy matching for short titles
//!
//! Scores each candidate against a query using, in order of strength:
//! - Exact matching (case-sensitive)
//! - Substring containment in either direction
//! - Normalized Levenshtein similarity over the whole candidate
//! - Word-level similarity for multi-word candidates
//!
//! Everything here is a pure function of its inputs. No state survives a
//! call, so the matcher can be shared freely across threads.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

/// Threshold used when the caller does not supply one
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// A scored candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match<'a> {
    /// The matched candidate, borrowed from the input list
    pub candidate: &'a str,
    /// Position of the candidate in the input list
    pub index: usize,
    /// Match score (0.0 to 1.0)
    pub score: f64,
    /// Which rule produced the score
    pub match_type: MatchType,
}

/// How the score was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Candidate equals the query
    Exact,
    /// One string contains the other
    Substring,
    /// Levenshtein similarity of the whole strings
    Similarity,
    /// Best single word of a multi-word candidate
    Word,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchType::Exact => "exact",
            MatchType::Substring => "substring",
            MatchType::Similarity => "similarity",
            MatchType::Word => "word",
        };
        f.write_str(name)
    }
}

/// Fuzzy matcher carrying a similarity threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    threshold: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl FuzzyMatcher {
    /// Thresholds outside [0, 1] are accepted as-is.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn similarity(&self, source: &str, target: &str) -> f64 {
        levenshtein_similarity(source, target)
    }

    pub fn find_matches<'a, S: AsRef<str>>(
        &self,
        query: &str,
        candidates: &'a [S],
    ) -> Vec<&'a str> {
        find_fuzzy_matches(query, candidates, self.threshold)
    }

    pub fn rank<'a, S: AsRef<str>>(&self, query: &str, candidates: &'a [S]) -> Vec<Match<'a>> {
        rank_matches(query, candidates, self.threshold)
    }
}

/// Return the candidates matching `query`, best first, without duplicates
pub fn find_fuzzy_matches<'a, S: AsRef<str>>(
    query: &str,
    candidates: &'a [S],
    threshold: f64,
) -> Vec<&'a str> {
    rank_matches(query, candidates, threshold)
        .into_iter()
        .map(|m| m.candidate)
        .collect()
}

/// Score every candidate, keep those at or above `threshold`, and sort them
/// by descending score.
///
/// Equal scores keep their input order. When the same string occurs more
/// than once only its first occurrence is kept.
pub fn rank_matches<'a, S: AsRef<str>>(
    query: &str,
    candidates: &'a [S],
    threshold: f64,
) -> Vec<Match<'a>> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<Match<'a>> = candidates
        .iter()
        .enumerate()
        .filter_map(|(index, candidate)| {
            let candidate = candidate.as_ref();
            let (score, match_type) = score_candidate(query, candidate)?;
            (score >= threshold).then_some(Match {
                candidate,
                index,
                score,
                match_type,
            })
        })
        .collect();

    // sort_by is stable
    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut seen = HashSet::new();
    matches.retain(|m| seen.insert(m.candidate));
    matches
}

/// Score a single candidate against `query`.
///
/// Returns `None` when either string is empty. The score is the maximum over
/// all rules; on a tie the stronger rule is reported.
pub fn score_candidate(query: &str, candidate: &str) -> Option<(f64, MatchType)> {
    if query.is_empty() || candidate.is_empty() {
        return None;
    }
    if candidate == query {
        return Some((1.0, MatchType::Exact));
    }
    if contains_either(query, candidate) {
        return Some((1.0, MatchType::Substring));
    }

    let mut best = (levenshtein_similarity(query, candidate), MatchType::Similarity);

    let words: Vec<&str> = candidate.split_whitespace().collect();
    if words.len() > 1 {
        for word in words {
            let score = if contains_either(query, word) {
                1.0
            } else {
                levenshtein_similarity(query, word)
            };
            if score > best.0 {
                best = (score, MatchType::Word);
            }
        }
    }

    Some(best)
}

fn contains_either(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Levenshtein distance normalized into a similarity score.
///
/// `1 - distance / max(len)`, measured in chars. Two empty strings are
/// identical (1.0); one empty string against a non-empty one scores 0.0.
pub fn levenshtein_similarity(source: &str, target: &str) -> f64 {
    let source_len = source.chars().count();
    let target_len = target.chars().count();

    match (source_len, target_len) {
        (0, 0) => 1.0,
        (0, _) | (_, 0) => 0.0,
        _ => {
            let distance = levenshtein(source, target);
            1.0 - distance as f64 / source_len.max(target_len) as f64
        }
    }
}

/// Calculate Levenshtein distance between two strings
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row = vec![0; b_len + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;

        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}
