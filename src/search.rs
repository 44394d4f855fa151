//! Title search with ordering and pagination
//!
//! Runs the fuzzy matcher over a list of titles and slices the hits into
//! 1-based pages. Two orderings are supported: ranked by score (duplicates
//! collapsed), or the input order of the titles with every surviving title
//! kept, which is how a post listing filters its rows.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fuzzy::{self, MatchType, DEFAULT_THRESHOLD};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid pagination: page {page}, per page {per_page} (both must be at least 1)")]
    InvalidPagination { page: usize, per_page: usize },
}

/// How surviving titles are ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchOrder {
    /// Best score first, identical titles collapsed
    #[default]
    Ranked,
    /// Input order, every matching title kept
    Input,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest<'q> {
    pub query: &'q str,
    pub threshold: f64,
    pub order: SearchOrder,
    /// 1-based
    pub page: usize,
    pub per_page: usize,
}

impl<'q> SearchRequest<'q> {
    pub fn new(query: &'q str) -> Self {
        Self {
            query,
            threshold: DEFAULT_THRESHOLD,
            order: SearchOrder::default(),
            page: 1,
            per_page: 10,
        }
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn order(mut self, order: SearchOrder) -> Self {
        self.order = order;
        self
    }

    pub fn page(mut self, page: usize, per_page: usize) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }
}

/// A title that survived filtering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hit<'a> {
    pub index: usize,
    pub title: &'a str,
    /// `None` when no query was given and nothing was filtered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_type: Option<MatchType>,
}

impl<'a> From<fuzzy::Match<'a>> for Hit<'a> {
    fn from(m: fuzzy::Match<'a>) -> Self {
        Self {
            index: m.index,
            title: m.candidate,
            score: Some(m.score),
            match_type: Some(m.match_type),
        }
    }
}

/// One page of hits
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Hits across all pages
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slice `items` down to the requested page.
    pub fn from_items(items: Vec<T>, page: usize, per_page: usize) -> Result<Self, SearchError> {
        if page < 1 || per_page < 1 {
            return Err(SearchError::InvalidPagination { page, per_page });
        }

        let total = items.len();
        let skip = (page - 1).saturating_mul(per_page);
        let items = items.into_iter().skip(skip).take(per_page).collect();

        Ok(Self {
            items,
            total,
            page,
            per_page,
            total_pages: total.div_ceil(per_page),
        })
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Filter `titles` by `request.query` and return the requested page.
///
/// An empty query filters nothing: every title is returned in input order.
pub fn search<'a, S: AsRef<str>>(
    titles: &'a [S],
    request: &SearchRequest<'_>,
) -> Result<Page<Hit<'a>>, SearchError> {
    if request.page < 1 || request.per_page < 1 {
        return Err(SearchError::InvalidPagination {
            page: request.page,
            per_page: request.per_page,
        });
    }

    let hits = if request.query.is_empty() {
        unfiltered(titles)
    } else {
        match request.order {
            SearchOrder::Ranked => fuzzy::rank_matches(request.query, titles, request.threshold)
                .into_iter()
                .map(Hit::from)
                .collect(),
            SearchOrder::Input => in_input_order(titles, request.query, request.threshold),
        }
    };

    log::debug!(
        "query {:?} kept {} of {} titles (threshold {}, {:?})",
        request.query,
        hits.len(),
        titles.len(),
        request.threshold,
        request.order
    );

    Page::from_items(hits, request.page, request.per_page)
}

fn unfiltered<S: AsRef<str>>(titles: &[S]) -> Vec<Hit<'_>> {
    titles
        .iter()
        .enumerate()
        .map(|(index, title)| Hit {
            index,
            title: title.as_ref(),
            score: None,
            match_type: None,
        })
        .collect()
}

// Each title is matched on its own, so duplicates and input order survive.
fn in_input_order<'a, S: AsRef<str>>(
    titles: &'a [S],
    query: &str,
    threshold: f64,
) -> Vec<Hit<'a>> {
    titles
        .iter()
        .enumerate()
        .filter_map(|(index, title)| {
            let single = std::slice::from_ref(title);
            let best = fuzzy::rank_matches(query, single, threshold).into_iter().next()?;
            log::trace!("{:?} scored {:.3}", best.candidate, best.score);
            Some(Hit {
                index,
                ..Hit::from(best)
            })
        })
        .collect()
}
