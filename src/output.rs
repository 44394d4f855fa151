//! Output formatting utilities
//!
//! Handles JSON, YAML, and table output formats.

use std::io::IsTerminal;

use anyhow::Result;
use serde::Serialize;
use tabled::settings::object::Rows;
use tabled::settings::{Remove, Style};
use tabled::{Table, Tabled};

use crate::cli::OutputFormat;
use crate::config::RuntimeContext;

/// Format and print data according to the configured output format
pub fn print_output<T: Serialize>(ctx: &RuntimeContext, data: &T) -> Result<()> {
    let output = format_output(ctx.output_format(), data)?;
    println!("{output}");
    Ok(())
}

/// Format data for a machine-readable output format
pub fn format_output<T: Serialize>(format: OutputFormat, data: &T) -> Result<String> {
    let is_tty = std::io::stdout().is_terminal();

    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputFormat::Json | OutputFormat::Table | OutputFormat::Auto => {
            if is_tty {
                Ok(serde_json::to_string_pretty(data)?)
            } else {
                Ok(serde_json::to_string(data)?)
            }
        }
    }
}

/// Whether the human-readable rendering should be used
pub fn wants_human(ctx: &RuntimeContext) -> bool {
    match ctx.output_format() {
        OutputFormat::Table => true,
        OutputFormat::Auto => std::io::stdout().is_terminal(),
        _ => false,
    }
}

/// Print `data` as JSON/YAML, or hand over to `human` for table/tty output
pub fn output_for_format<T: Serialize>(
    ctx: &RuntimeContext,
    data: &T,
    human: impl FnOnce() -> Result<()>,
) -> Result<()> {
    if wants_human(ctx) {
        human()
    } else {
        print_output(ctx, data)
    }
}

/// Print a table from items that implement Tabled
pub fn print_table<T: Tabled>(ctx: &RuntimeContext, items: &[T]) -> Result<()> {
    let table = build_table(items, ctx.no_headers());
    println!("{table}");
    Ok(())
}

pub fn build_table<T: Tabled>(items: &[T], no_headers: bool) -> Table {
    let mut table = Table::new(items);
    table.with(Style::sharp());

    if no_headers {
        table.with(Remove::row(Rows::first()));
    }

    table
}
