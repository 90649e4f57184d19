//! Quill - sequential multi-agent blog generation CLI
//!
//! The `quill` command drives the content pipeline against a local
//! Ollama-compatible server.
//!
//! ## Commands
//!
//! - `write`: bootstrap the model, run the three-stage blog pipeline for a
//!   topic, and save the result
//! - `check`: verify the inference server is reachable and the configured
//!   model is ready, pulling it if necessary

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};

use quill_core::{
    blog_workflow, write_artifact, ConfigError, ModelReadinessManager, ModelReadinessRecord,
    ModelStatus, OllamaClient, PipelineExecutor, QuillConfig,
};

#[derive(Parser)]
#[command(name = "quill")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sequential multi-agent blog generation over local inference", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a blog post for a topic and write it to disk
    Write {
        /// Topic to write about
        topic: String,

        /// Path to the configuration file
        #[arg(short, long, default_value = "quill.toml")]
        config: PathBuf,

        /// Output file (default: blog_post_<topic>.txt in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that the inference server is reachable and the model is ready
    Check {
        /// Path to the configuration file
        #[arg(short, long, default_value = "quill.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    quill_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Write {
            topic,
            config,
            output,
        } => cmd_write(&topic, &config, output.as_deref()).await,
        Commands::Check { config } => cmd_check(&config).await,
    }
}

/// Load configuration from the given file, falling back to the environment
/// when the file is absent.
fn load_config(path: &Path) -> Result<QuillConfig> {
    match QuillConfig::load(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::Unreadable { .. }) if !path.exists() => QuillConfig::from_env()
            .with_context(|| {
                format!(
                    "config file {:?} not found and QUILL_BASE_URL/QUILL_MODEL are not set",
                    path
                )
            }),
        Err(err) => Err(err).with_context(|| format!("Failed to load configuration from {:?}", path)),
    }
}

/// Generate a blog post for a topic and write it to disk
async fn cmd_write(topic: &str, config_path: &Path, output: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let client = OllamaClient::new(&config.ollama.base_url);

    // Bootstrap first: the executor assumes readiness has already run.
    let record = ModelReadinessManager::new(&client)
        .ensure_ready(&config.ollama.model)
        .await
        .context("Model readiness bootstrap failed; ensure the Ollama service is running and accessible")?;
    info!(model = %record.model, status = ?record.status, "model ready");

    let binding = Arc::new(config.binding());
    let tasks = blog_workflow(topic, binding);

    let run = PipelineExecutor::new(&client)
        .run(tasks)
        .await
        .context("Pipeline run failed; no artifact was written")?;

    let text = run.final_output();
    let path = match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write artifact to {:?}", path))?;
            path.to_path_buf()
        }
        None => write_artifact(Path::new("."), topic, text)
            .context("Failed to write artifact")?,
    };

    println!("Final blog post:");
    println!();
    println!("{}", text);
    println!();
    println!("Blog post has been saved to: {}", path.display());

    Ok(())
}

/// Check that the inference server is reachable and the model is ready
async fn cmd_check(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let client = OllamaClient::new(&config.ollama.base_url);

    let record = match ModelReadinessManager::new(&client)
        .ensure_ready(&config.ollama.model)
        .await
    {
        Ok(record) => record,
        Err(err) => {
            let failed = ModelReadinessRecord::new(
                &config.ollama.base_url,
                &config.ollama.model,
                ModelStatus::Failed,
            );
            println!("{}", serde_json::to_string_pretty(&failed)?);
            return Err(err)
                .context("Readiness check failed; ensure the Ollama service is running and accessible");
        }
    };

    println!("{}", serde_json::to_string_pretty(&record)?);
    println!(
        "Model '{}' is {} on {}",
        record.model,
        describe_status(record.status),
        record.endpoint
    );

    Ok(())
}

fn describe_status(status: ModelStatus) -> &'static str {
    match status {
        ModelStatus::Available => "available",
        ModelStatus::Pulled => "pulled and ready",
        ModelStatus::Failed => "not ready",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_cli_parses_write_command() {
        let cli = Cli::try_parse_from(["quill", "write", "Rust in 2026"]).unwrap();
        match cli.command {
            Commands::Write { topic, config, output } => {
                assert_eq!(topic, "Rust in 2026");
                assert_eq!(config, PathBuf::from("quill.toml"));
                assert!(output.is_none());
            }
            _ => panic!("expected write command"),
        }
    }

    #[test]
    fn test_cli_parses_check_with_custom_config() {
        let cli = Cli::try_parse_from(["quill", "--verbose", "check", "--config", "alt.toml"])
            .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Check { config } => assert_eq!(config, PathBuf::from("alt.toml")),
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[ollama]
base_url = "http://localhost:11434"
model = "gemma3:1b"
"#,
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.ollama.model, "gemma3:1b");
    }

    #[test]
    fn test_missing_config_without_env_is_a_clear_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.toml");

        let err = load_config(&path).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("QUILL_BASE_URL"), "unexpected error: {msg}");
    }

    #[test]
    fn test_describe_status_covers_all_outcomes() {
        assert_eq!(describe_status(ModelStatus::Available), "available");
        assert_eq!(describe_status(ModelStatus::Pulled), "pulled and ready");
        assert_eq!(describe_status(ModelStatus::Failed), "not ready");
    }
}
