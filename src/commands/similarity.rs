//! Similarity command implementation

use anyhow::Result;
use serde::Serialize;
use titlematch::fuzzy;

use crate::config::RuntimeContext;
use crate::output;

#[derive(Debug, Serialize)]
struct SimilarityReport<'a> {
    source: &'a str,
    target: &'a str,
    distance: usize,
    similarity: f64,
    /// Whether `target` clears the configured threshold as a search candidate
    matches: bool,
}

impl<'a> SimilarityReport<'a> {
    fn new(source: &'a str, target: &'a str, threshold: f64) -> Self {
        let matches = fuzzy::score_candidate(source, target)
            .is_some_and(|(score, _)| score >= threshold);
        Self {
            source,
            target,
            distance: fuzzy::levenshtein(source, target),
            similarity: fuzzy::levenshtein_similarity(source, target),
            matches,
        }
    }
}

pub fn run(ctx: &RuntimeContext, source: &str, target: &str) -> Result<()> {
    let threshold = ctx.threshold(None);
    let report = SimilarityReport::new(source, target, threshold);

    output::output_for_format(ctx, &report, || {
        println!("Similarity:    {:.4}", report.similarity);
        println!("Edit distance: {}", report.distance);
        println!(
            "Match:         {} (threshold {threshold})",
            if report.matches { "yes" } else { "no" }
        );
        Ok(())
    })
}
