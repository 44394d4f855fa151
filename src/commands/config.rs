//! Config command implementations

use anyhow::{anyhow, Result};

use crate::cli::{ConfigCommand, OutputFormat};
use crate::config::{self as app_config, RuntimeContext};
use crate::output::print_output;

pub fn run(ctx: &RuntimeContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Path => path(ctx),
        ConfigCommand::Get { key } => get(ctx, key.as_deref()),
        ConfigCommand::Reset => reset(ctx),
    }
}

fn show(ctx: &RuntimeContext) -> Result<()> {
    if matches!(ctx.output_format(), OutputFormat::Json | OutputFormat::Yaml) {
        return print_output(ctx, &ctx.config);
    }
    print!("{}", toml::to_string_pretty(&ctx.config)?);
    Ok(())
}

fn path(ctx: &RuntimeContext) -> Result<()> {
    println!("{}", ctx.config_path().display());
    Ok(())
}

fn get(ctx: &RuntimeContext, key: Option<&str>) -> Result<()> {
    match key {
        Some(key) => {
            let value = get_config_value(&ctx.config, key)?;
            println!("{value}");
            Ok(())
        }
        None => show(ctx),
    }
}

fn reset(ctx: &RuntimeContext) -> Result<()> {
    app_config::write_default_config(ctx.config_path())?;
    println!(
        "Configuration reset to defaults at: {}",
        ctx.config_path().display()
    );
    Ok(())
}

fn get_config_value(config: &app_config::AppConfig, key: &str) -> Result<String> {
    let json = serde_json::to_value(config)?;

    let mut current = &json;
    for part in key.split('.') {
        current = current
            .get(part)
            .ok_or_else(|| anyhow!("Configuration key not found: {key}"))?;
    }

    Ok(match current {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "null".to_string(),
        other => serde_json::to_string(other)?,
    })
}
