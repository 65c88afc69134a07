//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use bazaar_client::API_URL_ENV;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { api_url, force } => init_config(&api_url, force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let client = ctx.config.client.clone().with_env();

    if ctx.output.is_json() {
        ctx.output.json(&CliConfig { client });
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[client]");
    ctx.output.kv("api_base_url", &client.api_base_url);
    if std::env::var_os(API_URL_ENV).is_some() {
        ctx.output.kv("", &format!("(from {})", API_URL_ENV));
    }
    ctx.output.kv("token_key", &client.token_key);
    ctx.output.kv("envelope_field", &client.envelope_field);
    ctx.output.kv("timeout_secs", &client.timeout_secs.to_string());
    ctx.output.kv("currency", &client.currency);
    ctx.output
        .kv("storage_path", &ctx.storage_dir().display().to_string());

    Ok(())
}

fn init_config(api_url: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("bazaar.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let content = generate_default_config(api_url);
    let config: CliConfig = toml::from_str(&content)?;
    config.client.validate()?;
    fs::write(&config_path, content)?;

    ctx.output
        .success(&format!("Created {}", config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let client = ctx.config.client.clone().with_env();
    client.validate()?;

    match &ctx.config_path {
        Some(path) => ctx
            .output
            .success(&format!("{} is valid", path.display())),
        None => ctx.output.success("Default configuration is valid"),
    }
    Ok(())
}
