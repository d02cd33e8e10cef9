//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
    }
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = match args.path {
        Some(path) => path,
        None => Config::user_config_path()
            .ok_or_else(|| Error::config("Unable to determine user config directory"))?,
    };

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
        return Ok(());
    }

    Config::default().save(&path)?;
    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Edit it to customize settings for your environment.")
}

/// Handle config show subcommand
fn handle_config_show(args: ConfigShowArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let content = render_config(config, args.format)?;
    output.writeln(content.trim_end())
}

fn render_config(config: &Config, format: ConfigFormat) -> Result<String> {
    Ok(match format {
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn quiet_output() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Human, false, true, 0, Box::new(Vec::new()))
    }

    #[test]
    fn test_render_config_formats() {
        let config = Config {
            default_type: Some(PathBuf::from("types/bar.json")),
            ..Config::default()
        };

        let toml = render_config(&config, ConfigFormat::Toml).unwrap();
        assert!(toml.contains("default_type = \"types/bar.json\""));
        assert!(toml.contains("[output]"));

        let json = render_config(&config, ConfigFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["output"]["color"], true);

        let yaml = render_config(&config, ConfigFormat::Yaml).unwrap();
        assert!(yaml.contains("show_violations: false"));
    }

    #[test]
    fn test_init_respects_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("visrole.yaml");
        std::fs::write(&path, "default_type: keep.json\n").unwrap();

        let args = ConfigInitArgs {
            path: Some(path.clone()),
            force: false,
        };
        handle_config_init(args, &mut quiet_output()).unwrap();
        assert_eq!(
            Config::from_file(&path).unwrap().default_type,
            Some(PathBuf::from("keep.json"))
        );

        let args = ConfigInitArgs {
            path: Some(path.clone()),
            force: true,
        };
        handle_config_init(args, &mut quiet_output()).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());
    }
}
