//! Search command implementation

use anyhow::Result;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher as FuzzyMatcherTrait;
use tabled::Tabled;
use titlematch::{Hit, Page, SearchRequest};

use crate::cli::SearchCommand;
use crate::config::RuntimeContext;
use crate::input;
use crate::output;

#[derive(Debug, Clone, Tabled)]
struct HitRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "SCORE")]
    score: String,
    #[tabled(rename = "MATCH")]
    match_type: String,
}

pub fn run(ctx: &RuntimeContext, cmd: SearchCommand) -> Result<()> {
    let titles = input::load_titles(cmd.titles, cmd.from.as_deref())?;

    let request = SearchRequest::new(&cmd.query)
        .threshold(ctx.threshold(cmd.threshold))
        .order(ctx.order(cmd.order.map(Into::into)))
        .page(cmd.page, ctx.per_page(cmd.per_page));

    let page = titlematch::search(&titles, &request)?;
    log::info!(
        "{} matches for {:?}, showing page {} of {}",
        page.total,
        cmd.query,
        page.page,
        page.total_pages
    );

    output::output_for_format(ctx, &page, || {
        if page.items.is_empty() {
            println!("No titles matched {:?}", cmd.query);
            return Ok(());
        }

        let highlighter = cmd.highlight.then(SkimMatcherV2::default);
        let rows = to_rows(&page, |title| match &highlighter {
            Some(matcher) => highlight(matcher, title, &cmd.query),
            None => title.to_string(),
        });
        output::print_table(ctx, &rows)?;

        if page.total_pages > 1 {
            println!(
                "Page {} of {} ({} matches)",
                page.page, page.total_pages, page.total
            );
        }
        Ok(())
    })
}

fn to_rows(page: &Page<Hit<'_>>, render: impl Fn(&str) -> String) -> Vec<HitRow> {
    let offset = (page.page - 1) * page.per_page;
    page.items
        .iter()
        .enumerate()
        .map(|(i, hit)| HitRow {
            rank: offset + i + 1,
            title: render(hit.title),
            score: hit
                .score
                .map(|s| format!("{s:.2}"))
                .unwrap_or_else(|| "-".to_string()),
            match_type: hit
                .match_type
                .map(|m| m.to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

/// Wrap each run of characters the skim algorithm aligned with `query` in
/// brackets. Titles the algorithm cannot align are returned unchanged.
fn highlight(matcher: &SkimMatcherV2, title: &str, query: &str) -> String {
    let Some((_, indices)) = matcher.fuzzy_indices(title, query) else {
        return title.to_string();
    };

    let mut out = String::with_capacity(title.len() + indices.len() * 2);
    let mut open = false;
    for (i, ch) in title.chars().enumerate() {
        let matched = indices.binary_search(&i).is_ok();
        if matched && !open {
            out.push('[');
            open = true;
        } else if !matched && open {
            out.push(']');
            open = false;
        }
        out.push(ch);
    }
    if open {
        out.push(']');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use titlematch::{search, SearchRequest};

    #[test]
    fn test_highlight_contiguous() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(
            highlight(&matcher, "Cooking pasta", "pasta"),
            "Cooking [pasta]"
        );
    }

    #[test]
    fn test_highlight_no_alignment() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(highlight(&matcher, "hello tst", "test"), "hello tst");
    }

    #[test]
    fn test_rows_continue_rank_across_pages() {
        let titles: Vec<String> = (1..=5).map(|i| format!("post {i}")).collect();
        let page = search(&titles, &SearchRequest::new("post").page(2, 2)).unwrap();
        let rows = to_rows(&page, str::to_string);

        let ranks: Vec<usize> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![3, 4]);
        assert_eq!(rows[0].title, "post 3");
        assert_eq!(rows[0].score, "1.00");
        assert_eq!(rows[0].match_type, "substring");
    }

    #[test]
    fn test_rows_without_query() {
        let titles = vec!["Learning Rust".to_string()];
        let page = search(&titles, &SearchRequest::new("")).unwrap();
        let rows = to_rows(&page, str::to_string);
        assert_eq!(rows[0].score, "-");
        assert_eq!(rows[0].match_type, "-");
    }
}
