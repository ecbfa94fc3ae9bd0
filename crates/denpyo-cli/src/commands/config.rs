//! Config command - manage the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use denpyo_core::models::config::DenpyoConfig;

use super::default_config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init {
        /// Own company name to store right away
        #[arg(long)]
        self_company: Option<String>,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "extraction.self_company_name")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// Show configuration file path
    Path,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init { self_company, force } => init_config(&path, self_company, force),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

fn load_or_default(path: &Path) -> anyhow::Result<DenpyoConfig> {
    if path.exists() {
        Ok(DenpyoConfig::from_file(path)?)
    } else {
        Ok(DenpyoConfig::default())
    }
}

fn save(config: &DenpyoConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }
    let config = load_or_default(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init_config(path: &Path, self_company: Option<String>, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    let mut config = DenpyoConfig::default();
    if let Some(name) = self_company {
        config.extraction.self_company_name = name;
    }
    save(&config, path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        path.display()
    );
    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(load_or_default(path)?)?;
    let value = lookup(&json, key)
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let mut json = serde_json::to_value(load_or_default(path)?)?;
    let stored = assign(&mut json, key, value)?;

    let config: DenpyoConfig = serde_json::from_value(json)?;
    save(&config, path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&stored)?
    );
    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'denpyo config init' to create a configuration file.");
    }
    Ok(())
}

/// Resolve a dotted key path.
fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |current, part| current.get(part))
}

/// Replace the value at an existing dotted key path and return what was stored.
///
/// String settings keep the raw text, so a company name like "123" is not
/// turned into a number.
fn assign(json: &mut Value, key: &str, raw: &str) -> anyhow::Result<Value> {
    let slot = key
        .split('.')
        .try_fold(json, |current, part| current.get_mut(part))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    if slot.is_object() {
        anyhow::bail!("{} is a section, set one of its keys instead", key);
    }

    let value = if slot.is_string() {
        Value::String(raw.to_string())
    } else {
        serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
    };

    *slot = value.clone();
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Value {
        serde_json::to_value(DenpyoConfig::default()).unwrap()
    }

    #[test]
    fn test_lookup() {
        let json = defaults();
        assert_eq!(
            lookup(&json, "output.default_extension"),
            Some(&Value::String("pdf".to_string()))
        );
        assert!(lookup(&json, "output.missing").is_none());
    }

    #[test]
    fn test_assign_keeps_strings_raw() {
        let mut json = defaults();
        assign(&mut json, "extraction.self_company_name", "123").unwrap();
        let config: DenpyoConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.extraction.self_company_name, "123");
    }

    #[test]
    fn test_assign_numbers() {
        let mut json = defaults();
        assign(&mut json, "pdf.max_pages", "3").unwrap();
        let config: DenpyoConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.pdf.max_pages, 3);
    }

    #[test]
    fn test_assign_rejects_unknown_and_sections() {
        let mut json = defaults();
        assert!(assign(&mut json, "extraction.unknown", "x").is_err());
        assert!(assign(&mut json, "extraction", "x").is_err());
    }
}
