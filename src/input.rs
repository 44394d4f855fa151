//! Loading candidate titles
//!
//! Titles come from positional arguments, a file, or stdin. File and stdin
//! content is either a JSON array of strings or one title per line.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use anyhow::{Context, Result};

/// Resolve the title list for a search.
///
/// Positional titles win. Otherwise `from` is read (`-` meaning stdin), and
/// with neither given stdin is read when it is piped.
pub fn load_titles(positional: Vec<String>, from: Option<&Path>) -> Result<Vec<String>> {
    if !positional.is_empty() {
        return Ok(positional);
    }

    match from {
        Some(path) if path == Path::new("-") => read_stdin(),
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading titles from {}", path.display()))?;
            parse_titles(&content).with_context(|| format!("parsing {}", path.display()))
        }
        None if !io::stdin().is_terminal() => read_stdin(),
        None => {
            log::warn!("no titles given; pass them as arguments, via --from, or on stdin");
            Ok(Vec::new())
        }
    }
}

fn read_stdin() -> Result<Vec<String>> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("reading titles from stdin")?;
    parse_titles(&buffer).context("parsing stdin")
}

/// Parse a JSON array of strings, or fall back to one title per line
pub fn parse_titles(content: &str) -> Result<Vec<String>> {
    if content.trim_start().starts_with('[') {
        let titles: Vec<String> =
            serde_json::from_str(content).context("expected a JSON array of strings")?;
        return Ok(titles);
    }

    Ok(content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_lines() {
        let titles = parse_titles("Learning Rust\r\n\nCooking pasta\n   \nGardening\n").unwrap();
        assert_eq!(titles, vec!["Learning Rust", "Cooking pasta", "Gardening"]);
    }

    #[test]
    fn test_parse_json_array() {
        let titles = parse_titles(r#"  ["Learning Rust", "", "Cooking pasta"]"#).unwrap();
        assert_eq!(titles, vec!["Learning Rust", "", "Cooking pasta"]);
    }

    #[test]
    fn test_parse_bad_json() {
        assert!(parse_titles(r#"["Learning Rust", 3]"#).is_err());
    }

    #[test]
    fn test_positional_titles_win() {
        let titles = load_titles(vec!["a".into()], Some(Path::new("/nonexistent"))).unwrap();
        assert_eq!(titles, vec!["a"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Learning Rust").unwrap();
        writeln!(file, "Cooking pasta").unwrap();

        let titles = load_titles(Vec::new(), Some(file.path())).unwrap();
        assert_eq!(titles, vec!["Learning Rust", "Cooking pasta"]);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_titles(Vec::new(), Some(Path::new("/nonexistent/titles.txt"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/titles.txt"));
    }
}
