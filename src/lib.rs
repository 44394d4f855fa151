//! titlematch - typo-tolerant fuzzy search over short titles
//!
//! [`fuzzy`] holds the matcher itself; [`search`] layers ordering and
//! pagination on top of it for listing-style callers.

pub mod fuzzy;
pub mod search;

pub use fuzzy::{find_fuzzy_matches, levenshtein_similarity, FuzzyMatcher, DEFAULT_THRESHOLD};
pub use search::{search, Hit, Page, SearchError, SearchOrder, SearchRequest};
