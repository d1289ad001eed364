//! Command line front end: render a template against an event read from disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{ArgGroup, Parser};

use crate::config::Settings;
use crate::error::{AppError, Result};
use crate::event::Event;
use crate::formatter::{create_formatter, DisabledScriptEngine};

#[derive(Parser, Debug)]
#[command(name = "rule-formatter", version, about = "Render rule templates against events")]
#[command(group(ArgGroup::new("source").args(["template", "template_file"])))]
pub struct Cli {
    /// Event JSON file
    #[arg(long)]
    pub event: PathBuf,

    /// Template text
    #[arg(long)]
    pub template: Option<String>,

    /// File holding the template text
    #[arg(long)]
    pub template_file: Option<PathBuf>,

    /// Print the event envelope instead of rendering a template
    #[arg(long)]
    pub envelope: bool,

    /// Dump Prometheus metrics to stderr when done
    #[arg(long)]
    pub metrics: bool,
}

impl Cli {
    async fn template(&self) -> Result<String> {
        match (&self.template, &self.template_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => Ok(tokio::fs::read_to_string(path).await?),
            (None, None) => Err(AppError::Validation(
                "either --template or --template-file is required".to_string(),
            )),
        }
    }
}

/// Read and parse an event JSON file
pub async fn load_event(path: &Path) -> Result<Event> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

/// Run the command, returning what should be printed to stdout
pub async fn run(cli: &Cli, settings: &Settings) -> Result<String> {
    let event = load_event(&cli.event).await?;
    tracing::debug!(kind = event.kind(), name = %event.base().name, "Event loaded");

    let formatter = create_formatter(&settings.urls, Arc::new(DisabledScriptEngine), Vec::new());

    if cli.envelope {
        return Ok(formatter.to_envelope(&event)?);
    }

    let template = cli.template().await?;
    Ok(formatter.format(&template, &event).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// File in the temp dir, removed on drop
    struct TempFile(PathBuf);

    impl TempFile {
        fn path(&self) -> &str {
            self.0.to_str().unwrap()
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    fn write_temp(name: &str, contents: &str) -> TempFile {
        let path = std::env::temp_dir().join(format!("{}-{}", uuid::Uuid::new_v4(), name));
        std::fs::write(&path, contents).unwrap();
        TempFile(path)
    }

    fn manual_event() -> TempFile {
        write_temp(
            "event.json",
            r#"{
                "type": "manual",
                "appId": { "id": "00000000-0000-0000-0000-000000000000", "name": "demo" },
                "name": "Manual",
                "timestamp": "2024-03-09T14:05:07Z",
                "user": { "id": "u1", "email": "jane@example.com" }
            }"#,
        )
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::parse_from([
            "rule-formatter",
            "--event",
            "event.json",
            "--template",
            "$APP_NAME",
            "--metrics",
        ]);

        assert_eq!(cli.event, PathBuf::from("event.json"));
        assert_eq!(cli.template.as_deref(), Some("$APP_NAME"));
        assert!(cli.metrics);
        assert!(!cli.envelope);
    }

    #[test]
    fn test_template_sources_conflict() {
        let result = Cli::try_parse_from([
            "rule-formatter",
            "--event",
            "event.json",
            "--template",
            "a",
            "--template-file",
            "b.txt",
        ]);

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_run_renders_template() {
        let event = manual_event();
        let cli = Cli::parse_from([
            "rule-formatter",
            "--event",
            event.path(),
            "--template",
            "$USER_EMAIL in $APP_NAME",
        ]);

        let output = run(&cli, &Settings::default()).await.unwrap();

        assert_eq!(output, "jane@example.com in demo");
    }

    #[tokio::test]
    async fn test_run_reads_template_file() {
        let event = manual_event();
        let template = write_temp("template.txt", "$APP_NAME at $TIMESTAMP_DATE");
        let cli = Cli::parse_from([
            "rule-formatter",
            "--event",
            event.path(),
            "--template-file",
            template.path(),
        ]);

        let output = run(&cli, &Settings::default()).await.unwrap();

        assert_eq!(output, "demo at 2024-03-09");
    }

    #[tokio::test]
    async fn test_run_envelope() {
        let event = manual_event();
        let cli = Cli::parse_from([
            "rule-formatter",
            "--event",
            event.path(),
            "--envelope",
        ]);

        let output = run(&cli, &Settings::default()).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["type"], "Manual");
        assert_eq!(json["payload"]["type"], "manual");
    }

    #[tokio::test]
    async fn test_run_requires_template() {
        let event = manual_event();
        let cli = Cli::parse_from(["rule-formatter", "--event", event.path()]);

        let result = run(&cli, &Settings::default()).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_load_event_rejects_unknown_type() {
        let file = write_temp(
            "bad.json",
            r#"{ "type": "unknown", "name": "Nope", "timestamp": "2024-03-09T14:05:07Z" }"#,
        );

        let result = load_event(&file.0).await;

        assert!(matches!(result, Err(AppError::InvalidEvent(_))));
    }

    #[test]
    fn test_temp_file_removed_on_drop() {
        let file = write_temp("scratch.txt", "x");
        let path = file.0.clone();
        assert!(path.exists());

        drop(file);

        assert!(!path.exists());
    }
}
