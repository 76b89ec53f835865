//! LLM Security CLI - Command-line interface for the security orchestrator

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, ValueEnum};
use llmsec_core::{
    Adapters, Orchestrator, RequestKind, SecurityCoreConfig, SecurityRequest, SecurityResult,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "llm-security")]
#[command(about = "LLM Security Core - policy, filtering, enforcement and incident orchestration")]
#[command(version)]
struct Cli {
    /// Configuration file path; collaborators without a URL are simulated
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Process content through security orchestration
    Check {
        /// Content to check
        #[arg(default_value = "")]
        content: String,
        /// Content type
        #[arg(value_enum, default_value_t = CheckKind::Prompt)]
        kind: CheckKind,
    },
    /// Quick validation check (prints VALID/BLOCKED)
    Validate {
        /// Content to validate
        #[arg(default_value = "")]
        content: String,
    },
    /// Show service status
    Status,
}

#[derive(Clone, Copy, ValueEnum)]
enum CheckKind {
    Prompt,
    Output,
}

impl From<CheckKind> for RequestKind {
    fn from(kind: CheckKind) -> Self {
        match kind {
            CheckKind::Prompt => RequestKind::Prompt,
            CheckKind::Output => RequestKind::Output,
        }
    }
}

#[derive(Serialize)]
struct StatusReport {
    status: &'static str,
    mode: &'static str,
    version: &'static str,
}

/// Build a request with a `cli-<unix millis>` id.
fn cli_request(kind: RequestKind, content: String) -> SecurityRequest {
    let id = format!("cli-{}", chrono::Utc::now().timestamp_millis());
    tracing::debug!(%id, %kind, "Built CLI request");
    SecurityRequest::new(id, kind, content)
}

/// Text printed by `validate`.
fn validation_report(result: &SecurityResult) -> String {
    let verdict = if result.allowed { "VALID" } else { "BLOCKED" };
    match &result.violations {
        Some(_) => format!(
            "{}\nViolations: {}",
            verdict,
            result.violated_policies().join(", ")
        ),
        None => verdict.to_string(),
    }
}

/// 0 when allowed, 1 when blocked.
fn exit_status(result: &SecurityResult) -> u8 {
    if result.allowed {
        0
    } else {
        1
    }
}

fn exit_code(result: &SecurityResult) -> ExitCode {
    ExitCode::from(exit_status(result))
}

fn orchestrator(config: &SecurityCoreConfig) -> anyhow::Result<Orchestrator> {
    Ok(Orchestrator::new(Adapters::from_config(config)?))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries results.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SecurityCoreConfig::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Check { content, kind }) => {
            let request = cli_request(kind.into(), content);
            let result = orchestrator(&config)?.process(&request).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(exit_code(&result))
        }
        Some(Commands::Validate { content }) => {
            let request = cli_request(RequestKind::Prompt, content);
            let result = orchestrator(&config)?.process(&request).await?;
            println!("{}", validation_report(&result));
            Ok(exit_code(&result))
        }
        Some(Commands::Status) => {
            let adapters = Adapters::from_config(&config)?;
            let report = StatusReport {
                status: "ready",
                mode: adapters.mode().as_str(),
                version: env!("CARGO_PKG_VERSION"),
            };
            println!("{}", serde_json::to_string(&report)?);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            Cli::command().print_help()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
