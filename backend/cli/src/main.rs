mod config;
mod output;
mod terminal_output;
mod terminal_page;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use logging::{init_logger, mask_secret, LoggerOptions};
use prodsafe_config::{config_dir, config_file_path, load_and_prepare, redact, ProdsafeConfig};
use prodsafe_upload::{AnalyzeClient, Outcome, ResultContent, UploadHandler};

use config::{log_level, AnalyzeArgs, AnalyzeSettings};
use terminal_output::{note_error, note_success, stderr_is_color_terminal, stdout_is_color_terminal, supports_color};
use terminal_page::TerminalPage;

#[derive(Parser)]
#[command(name = "prodsafe")]
#[command(about = "Upload a product label photo and print its safety analysis")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.prodsafe/config.yaml or $PRODSAFE_CONFIG_DIR/config.yaml)
    #[arg(long, global = true)]
    config_file: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit an image to the analysis server and print the report
    Analyze(AnalyzeArgs),
    /// Show the effective configuration with secrets masked
    Config,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config_path = cli
        .config_file
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let (config, report) = load_and_prepare(&config_path).await?;

    init_logger(&LoggerOptions {
        level: log_level(cli.verbose, &config),
        log_dir: config.log_dir().map(PathBuf::from),
        ansi: supports_color(),
        json: config.log_json(),
    });
    report.log();
    debug!(path = %config_path.display(), "Configuration loaded");

    match cli.command {
        Commands::Analyze(args) => {
            analyze(
                AnalyzeSettings::resolve(args, &config),
                report.is_valid(),
                &config_path,
            )
            .await
        }
        Commands::Config => {
            show_config(&config, &config_path)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn analyze(settings: AnalyzeSettings, config_valid: bool, config_path: &Path) -> Result<ExitCode> {
    let image = media::load_image(&settings.image)
        .await
        .with_context(|| format!("Failed to read {}", settings.image.display()))?;
    let form = match settings.form(image) {
        Ok(form) => form,
        Err(err) => {
            note_error(&err.to_string());
            return Ok(ExitCode::FAILURE);
        }
    };
    if !config_valid {
        bail!("invalid configuration in {}", config_path.display());
    }
    info!(api_key = %mask_secret(&form.api_key), "Using API key");

    let handler = UploadHandler::new(AnalyzeClient::new(&settings.server_url)?);
    let mut page = TerminalPage::new(std::io::stderr(), stderr_is_color_terminal());
    let outcome = handler.submit(&mut page, form).await;

    match outcome {
        Outcome::Rendered { markdown, html } => {
            if let Some(path) = &settings.html_out {
                write_html_report(path, &html).await?;
                note_success(&format!("Wrote HTML report to {}", path.display()));
            }
            let rendered =
                output::render_report(settings.format, &markdown, &html, stdout_is_color_terminal());
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Rejected | Outcome::Failed { .. } => {
            if let ResultContent::Text(text) = page.result() {
                note_error(text);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn write_html_report(path: &Path, fragment: &str) -> Result<()> {
    tokio::fs::write(path, output::html_document(fragment))
        .await
        .with_context(|| format!("Failed to write HTML report to {}", path.display()))
}

fn show_config(config: &ProdsafeConfig, path: &Path) -> Result<()> {
    let value = serde_json::to_value(config).context("Failed to serialize config")?;
    let yaml = serde_yaml::to_string(&redact(&value)).context("Failed to render config")?;
    println!("# {}", path.display());
    print!("{yaml}");
    Ok(())
}
