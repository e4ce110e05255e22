//! Transform command handler

use super::{read_input, InputFormat};
use crate::cli::TransformArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use anyhow::Context;
use apishape_core::{PipelineConfig, PipelineSettings, TimeZoneSetting, TransformPipeline, Value};
use std::path::Path;

/// Handle the transform command
pub fn handle_transform(
    args: TransformArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let alias = config.resolve_alias(args.alias.as_deref())?;
    let settings = effective_settings(&args, config)?;
    let pretty = args.pretty || config.output.pretty;

    tracing::info!(
        input = %args.input.display(),
        alias = %alias,
        settings = ?settings,
        "Transforming result"
    );

    let input = {
        let _timer = Timer::with_details("read_input", &args.input.display().to_string());
        read_input(&args.input)?
    };

    let result = run_pipeline(input, &alias, &settings)?;

    match &args.save_to {
        Some(path) => {
            save_result(&result, path, pretty)?;
            output.success(&format!("✓ Saved result to {}", path.display()))?;
        }
        None => {
            if pretty {
                output.prefer_pretty();
            }
            output.section(&format!("{} ({})", alias, args.input.display()))?;
            output.result(&result)?;
        }
    }

    Ok(())
}

/// Config file settings with command-line overrides applied
fn effective_settings(args: &TransformArgs, config: &Config) -> Result<PipelineSettings> {
    let time_zone = args
        .timezone
        .as_deref()
        .map(str::parse::<TimeZoneSetting>)
        .transpose()?;

    let mut settings = config.pipeline.clone();
    args.apply_to(&mut settings, time_zone);
    Ok(settings)
}

/// Build the pipeline for `settings` and run it over `input`
pub fn run_pipeline(input: Value, alias: &str, settings: &PipelineSettings) -> Result<Value> {
    let pipeline = TransformPipeline::from_config(&PipelineConfig::from_settings(settings));

    let timer = Timer::with_details("transform", alias);
    let result = timer
        .span()
        .in_scope(|| pipeline.transform(input, alias))?;

    tracing::debug!(
        elapsed_ms = timer.elapsed().as_millis() as u64,
        kind = result.kind(),
        "Pipeline finished"
    );

    Ok(result)
}

/// Write the result next to the input in the encoding implied by `path`
fn save_result(result: &Value, path: &Path, pretty: bool) -> Result<()> {
    let content = match InputFormat::from_path(path) {
        InputFormat::Yaml => serde_yaml::to_string(result)?,
        InputFormat::Json if pretty => serde_json::to_string_pretty(result)? + "\n",
        InputFormat::Json => serde_json::to_string(result)? + "\n",
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write result to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands, OutputFormat};
    use clap::Parser;
    use serde_json::json;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> TransformArgs {
        let mut argv = vec!["apishape", "transform"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Transform(args) => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    fn quiet_output() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Json, false, true, 0, Box::new(std::io::sink()))
    }

    #[test]
    fn test_run_pipeline_with_default_settings() {
        let input = Value::from(json!({
            "Post": {"id": "1", "created": "2021-01-01 00:00:00"},
            "Comment": [{"id": "2"}]
        }));
        let settings = PipelineSettings {
            time_zone: TimeZoneSetting::Utc,
            ..PipelineSettings::default()
        };

        let result = run_pipeline(input, "Post", &settings).unwrap();
        assert_eq!(
            serde_json::Value::from(result),
            json!({"id": 1, "created": 1609459200, "comments": [{"id": 2}]})
        );
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut config = Config::default();
        config.pipeline.cast_numbers = true;

        let settings = effective_settings(&args(&["in.json", "--no-numbers", "--timezone", "+01:00"]), &config)
            .unwrap();
        assert!(!settings.cast_numbers);
        assert_eq!(settings.time_zone, TimeZoneSetting::Fixed(3600));
    }

    #[test]
    fn test_invalid_timezone_flag() {
        let err = effective_settings(&args(&["in.json", "--timezone", "moon"]), &Config::default())
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_transform_file_and_save() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("posts.json");
        let saved = dir.path().join("out").join("posts.json");
        std::fs::write(
            &input,
            r#"[{"Post": {"id": "1"}, "Tag": []}, {"Post": {"id": "2"}, "Tag": [{"id": "9"}]}]"#,
        )
        .unwrap();

        let input_arg = input.to_string_lossy().to_string();
        let saved_arg = saved.to_string_lossy().to_string();
        let args = args(&[&input_arg, "--alias", "Post", "--no-time", "--save-to", &saved_arg]);

        handle_transform(args, &Config::default(), &mut quiet_output()).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&saved).unwrap()).unwrap();
        assert_eq!(
            written,
            json!([{"id": 1, "tags": []}, {"id": 2, "tags": [{"id": 9}]}])
        );
    }

    #[test]
    fn test_alias_falls_back_to_config_default() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("article.yaml");
        let saved = dir.path().join("article.out.yaml");
        std::fs::write(&input, "Article:\n  id: '4'\nUser:\n  id: '5'\n").unwrap();

        let config = Config {
            default_alias: Some("Article".to_string()),
            ..Config::default()
        };
        let input_arg = input.to_string_lossy().to_string();
        let saved_arg = saved.to_string_lossy().to_string();

        handle_transform(
            args(&[&input_arg, "--save-to", &saved_arg]),
            &config,
            &mut quiet_output(),
        )
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(&saved).unwrap(),
            "id: 4\nuser:\n  id: 5\n"
        );
    }

    #[test]
    fn test_save_failure_names_the_target() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let result = Value::from(json!({"id": 1}));
        let err = save_result(&result, &blocker.join("out.json"), false).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Failed to create directory"), "{}", message);
        assert!(message.contains("blocker"), "{}", message);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_missing_alias_is_reported() {
        let err = handle_transform(args(&["in.json"]), &Config::default(), &mut quiet_output())
            .unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }
}
