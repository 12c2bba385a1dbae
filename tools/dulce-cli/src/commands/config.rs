//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use dulce_commerce::catalog::Catalog;
use dulce_storefront::generate_default_config;

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.info("[storage]");
    ctx.output.kv("key", &config.storage.key);
    ctx.output
        .kv("data_dir", &ctx.data_dir().display().to_string());

    ctx.output.info("[catalog]");
    ctx.output.kv("per_page", &config.catalog.per_page.to_string());
    if let Some(products) = &config.catalog.products {
        ctx.output.kv("products", &products.display().to_string());
    }

    ctx.output.info("[auth]");
    ctx.output
        .kv("login_latency_ms", &config.auth.login_latency_ms.to_string());
    ctx.output.kv(
        "register_latency_ms",
        &config.auth.register_latency_ms.to_string(),
    );

    ctx.output.info("[carousel]");
    ctx.output
        .kv("interval_ms", &config.carousel.interval_ms.to_string());
    ctx.output.kv("slides", &config.carousel.slides.to_string());

    let notifications = &config.notifications;
    ctx.output.info("[notifications]");
    ctx.output
        .kv("cart_visible_ms", &notifications.cart_visible_ms.to_string());
    ctx.output.kv("exit_ms", &notifications.exit_ms.to_string());
    ctx.output
        .kv("success_ms", &notifications.success_ms.to_string());
    ctx.output
        .kv("form_message_ms", &notifications.form_message_ms.to_string());
    ctx.output
        .kv("name_max_chars", &notifications.name_max_chars.to_string());

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.default_config_path();

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = ctx.config.validate() {
        errors.push(e.to_string());
    }

    // Check the product file, if any
    if let Some(path) = &ctx.config.catalog.products {
        match fs::read_to_string(path) {
            Ok(json) => {
                if let Err(e) = Catalog::from_json(&json) {
                    errors.push(format!("catalog.products {}: {}", path.display(), e));
                }
            }
            Err(e) => errors.push(format!("catalog.products {}: {}", path.display(), e)),
        }
    }

    if ctx.config.notifications.name_max_chars == 0 {
        warnings.push("notifications.name_max_chars = 0 hides product names".to_string());
    }
    if ctx.config.carousel.slides == 1 {
        warnings.push("carousel.slides = 1 never advances".to_string());
    }
    if ctx.config_path.is_none() {
        warnings.push("No config file found, using defaults".to_string());
    }

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
