//! Config command - inspect and edit the JSON configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use dotdash_core::models::config::DotdashConfig;

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

    /// Write a configuration file with default values
    Init {
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Get a configuration value
    Get {
        /// Dotted key (e.g., "csv.skip_header")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Dotted key (e.g., "codec.policy")
        key: String,
        /// New value, parsed as JSON when possible
        value: String,
    },

    /// Show configuration file path
    Path,
}

/// Run a config subcommand against `config_path`, or the per-user default.
pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => {
            let config = read_or_default(&path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigCommand::Init { force } => init_config(&path, force),
        ConfigCommand::Get { key } => {
            let json = serde_json::to_value(read_or_default(&path)?)?;
            println!("{}", serde_json::to_string_pretty(lookup(&json, &key)?)?);
            Ok(())
        }
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => {
            println!("Configuration file: {}", path.display());
            if path.exists() {
                println!("Status: {}", style("exists").green());
            } else {
                println!("Status: {}", style("not created").yellow());
                println!();
                println!("Run 'dotdash config init' to create a configuration file.");
            }
            Ok(())
        }
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dotdash")
        .join("config.json")
}

fn read_or_default(path: &Path) -> anyhow::Result<DotdashConfig> {
    if path.exists() {
        Ok(DotdashConfig::from_file(path)?)
    } else {
        Ok(DotdashConfig::default())
    }
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    DotdashConfig::default().save(path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        path.display()
    );
    Ok(())
}

fn set_config(path: &Path, key: &str, raw: &str) -> anyhow::Result<()> {
    let mut json = serde_json::to_value(read_or_default(path)?)?;

    // Bare words such as `reject` or `;` are taken as strings
    let value: Value =
        serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

    assign(&mut json, key, value.clone())?;

    let config: DotdashConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&value)?
    );
    Ok(())
}

/// Follow a dotted key through nested objects.
fn lookup<'a>(json: &'a Value, key: &str) -> anyhow::Result<&'a Value> {
    key.split('.').try_fold(json, |current, part| {
        current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
    })
}

/// Replace the value at an existing dotted key.
fn assign(json: &mut Value, key: &str, value: Value) -> anyhow::Result<()> {
    let mut current = json;
    for part in key.split('.') {
        current = current
            .get_mut(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    }
    if current.is_object() {
        anyhow::bail!("{} is a section, set one of its keys instead", key);
    }
    *current = value;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup() {
        let value = serde_json::to_value(DotdashConfig::default()).unwrap();
        assert_eq!(lookup(&value, "csv.skip_header").unwrap(), &json!(true));
        assert_eq!(lookup(&value, "codec.policy").unwrap(), &json!("drop"));
        assert!(lookup(&value, "csv.missing").is_err());
    }

    #[test]
    fn test_assign_existing_key() {
        let mut value = serde_json::to_value(DotdashConfig::default()).unwrap();
        assign(&mut value, "codec.policy", json!("reject")).unwrap();

        let config: DotdashConfig = serde_json::from_value(value).unwrap();
        assert_eq!(config.codec.policy, dotdash_core::UnmappedPolicy::Reject);
    }

    #[test]
    fn test_assign_rejects_unknown_key_and_sections() {
        let mut value = serde_json::to_value(DotdashConfig::default()).unwrap();
        assert!(assign(&mut value, "codec.mode", json!("x")).is_err());
        assert!(assign(&mut value, "csv", json!(false)).is_err());
    }

    #[test]
    fn test_set_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        set_config(&path, "csv.delimiter", ";").unwrap();
        set_config(&path, "csv.skip_header", "false").unwrap();

        let config = DotdashConfig::from_file(&path).unwrap();
        assert_eq!(config.csv.delimiter, ';');
        assert!(!config.csv.skip_header);
    }

    #[test]
    fn test_set_invalid_value_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        assert!(set_config(&path, "codec.policy", "strict").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_set_unusable_timestamp_format_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        set_config(&path, "output.timestamp_format", "%Y%m%d").unwrap();
        let before = fs::read_to_string(&path).unwrap();

        assert!(set_config(&path, "output.timestamp_format", "%Q").is_err());
        assert!(set_config(&path, "output.timestamp_format", "%D").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }
}
