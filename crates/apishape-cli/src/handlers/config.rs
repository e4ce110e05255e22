//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use std::path::{Path, PathBuf};

/// Handle the config command
pub fn handle_config(
    args: ConfigArgs,
    config: &Config,
    config_file: Option<&Path>,
    output: &mut OutputWriter,
) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => {
            let path = Config::user_config_path()
                .ok_or_else(|| Error::config("Unable to determine user config directory"))?;
            handle_config_init(init_args, &path, output)
        }
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
        ConfigAction::Path => handle_config_path(config_file, output),
    }
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, path: &Path, output: &mut OutputWriter) -> Result<()> {
    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
        return Ok(());
    }

    Config::default().save(path)?;
    tracing::info!(path = %path.display(), "Wrote default configuration");

    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Edit it to set default_alias and the pipeline switches.")?;
    Ok(())
}

/// Handle config show subcommand
fn handle_config_show(args: ConfigShowArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    output.writeln(render_config(config, args.format)?.trim_end())
}

fn render_config(config: &Config, format: ConfigFormat) -> Result<String> {
    let content = match format {
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(content)
}

/// Handle config path subcommand
fn handle_config_path(config_file: Option<&Path>, output: &mut OutputWriter) -> Result<()> {
    match active_config_path(config_file) {
        Some(path) => output.writeln(&path.display().to_string()),
        None => {
            output.info("No configuration file found; using built-in defaults")?;
            if let Some(path) = Config::user_config_path() {
                output.info(&format!("Run `apishape config init` to create {}", path.display()))?;
            }
            Ok(())
        }
    }
}

/// The file settings are read from: the explicit `--config`, else the first default location
fn active_config_path(config_file: Option<&Path>) -> Option<PathBuf> {
    config_file
        .map(Path::to_path_buf)
        .or_else(Config::find_config_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use tempfile::TempDir;

    fn sink_output() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Human, false, false, 0, Box::new(std::io::sink()))
    }

    #[test]
    fn test_init_writes_default_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apishape").join("config.toml");

        handle_config_init(ConfigInitArgs { force: false }, &path, &mut sink_output()).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_keeps_existing_file_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_alias = \"Post\"\n").unwrap();

        handle_config_init(ConfigInitArgs { force: false }, &path, &mut sink_output()).unwrap();
        assert_eq!(
            Config::from_file(&path).unwrap().default_alias.as_deref(),
            Some("Post")
        );

        handle_config_init(ConfigInitArgs { force: true }, &path, &mut sink_output()).unwrap();
        assert_eq!(Config::from_file(&path).unwrap().default_alias, None);
    }

    #[test]
    fn test_render_config_formats() {
        let config = Config {
            default_alias: Some("Post".to_string()),
            ..Config::default()
        };

        let toml = render_config(&config, ConfigFormat::Toml).unwrap();
        assert!(toml.contains("default_alias = \"Post\""));
        assert!(toml.contains("[pipeline]"));
        assert!(toml.contains("time_zone = \"local\""));

        let json: serde_json::Value =
            serde_json::from_str(&render_config(&config, ConfigFormat::Json).unwrap()).unwrap();
        assert_eq!(json["pipeline"]["change_nesting"], true);

        let yaml = render_config(&config, ConfigFormat::Yaml).unwrap();
        assert!(yaml.contains("default_alias: Post"));
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let explicit = Path::new("/etc/apishape.toml");
        assert_eq!(
            active_config_path(Some(explicit)),
            Some(PathBuf::from("/etc/apishape.toml"))
        );
    }
}
