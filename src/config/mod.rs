pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::ports::{FailurePolicy, OutputFormat};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "rental-pricing")]
#[command(about = "Prices car-sharing rentals and emits settlement transactions")]
pub struct CliConfig {
    #[arg(long, default_value = "data/input.json")]
    pub input_file: String,

    #[arg(long, default_value = "data")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "json")]
    pub output_formats: Vec<OutputFormat>,

    #[arg(long, default_value = "abort", help = "What to do when a rental cannot be priced: abort or skip")]
    pub on_error: FailurePolicy,

    #[arg(long, value_name = "ARCHIVE", help = "Bundle all outputs into a zip archive")]
    pub compress: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_file(&self) -> &str {
        &self.input_file
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.output_formats
    }

    fn failure_policy(&self) -> FailurePolicy {
        self.on_error
    }

    fn compression(&self) -> Option<&str> {
        self.compress.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input_file", &self.input_file)?;
        validation::validate_file_extension("input_file", &self.input_file, &["json"])?;
        validation::validate_path("output_path", &self.output_path)?;

        validation::validate_output_formats("output_formats", &self.output_formats)?;

        if let Some(archive) = &self.compress {
            validation::validate_file_extension("compress", archive, &["zip"])?;
        }

        Ok(())
    }
}
