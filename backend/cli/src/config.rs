use std::path::PathBuf;

use clap::Args;
use prodsafe_config::{OutputFormat, ProdsafeConfig};
use prodsafe_core::{FormInput, ImageFile, ProdsafeError, Submission};

/// Flags of `prodsafe analyze`; each one stands in for a form field.
#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// Image of the product label to upload
    #[arg(short, long)]
    pub image: PathBuf,

    /// API key forwarded to the analysis server (falls back to auth.apiKey)
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Analysis server origin (falls back to server.url)
    #[arg(short, long)]
    pub server: Option<String>,

    /// Output format: auto, ansi, text or html
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Also write the rendered report as a standalone HTML page
    #[arg(long)]
    pub html_out: Option<PathBuf>,
}

/// Effective settings for one analyze run: flags first, then config file.
#[derive(Debug, Clone)]
pub struct AnalyzeSettings {
    pub image: PathBuf,
    pub api_key: String,
    pub server_url: String,
    pub format: OutputFormat,
    pub html_out: Option<PathBuf>,
}

impl AnalyzeSettings {
    pub fn resolve(args: AnalyzeArgs, config: &ProdsafeConfig) -> Self {
        Self {
            image: args.image,
            // No key anywhere leaves it empty, and the submit is rejected.
            api_key: args
                .api_key
                .or_else(|| config.api_key().map(str::to_string))
                .unwrap_or_default(),
            server_url: args
                .server
                .unwrap_or_else(|| config.server_url().to_string()),
            format: args.format.unwrap_or_else(|| config.output_format()),
            html_out: args.html_out,
        }
    }

    /// The form as the user filled it. Checked ahead of the server URL: an
    /// incomplete form always yields the validation message.
    pub fn form(&self, image: Option<ImageFile>) -> Result<FormInput, ProdsafeError> {
        let form = FormInput::new(self.api_key.clone(), image);
        Submission::from_form(form.clone())?;
        Ok(form)
    }
}

/// Log filter from `-v` flags, falling back to the configured level.
pub fn log_level(verbose: u8, config: &ProdsafeConfig) -> String {
    match verbose {
        0 => config.log_level().to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}
