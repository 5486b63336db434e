use crate::domain::input::InputData;
use crate::domain::model::PricingReport;
use crate::utils::error::{PricingError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// What the batch does when a single rental cannot be priced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    #[default]
    Abort,
    Skip,
}

impl FromStr for FailurePolicy {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "abort" => Ok(FailurePolicy::Abort),
            "skip" => Ok(FailurePolicy::Skip),
            other => Err(PricingError::InvalidConfigValueError {
                field: "on_rental_error".to_string(),
                value: other.to_string(),
                reason: "Valid values: abort, skip".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Settlement transactions per rental
    Json,
    /// Price and commission breakdown per rental
    Commission,
    Csv,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 3] = ["json", "commission", "csv"];

    pub fn file_name(self) -> &'static str {
        match self {
            OutputFormat::Json => "output.json",
            OutputFormat::Commission => "commission.json",
            OutputFormat::Csv => "prices.csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "commission" => Ok(OutputFormat::Commission),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(PricingError::InvalidConfigValueError {
                field: "output_formats".to_string(),
                value: other.to_string(),
                reason: format!("Unsupported format. Valid formats: {}", Self::NAMES.join(", ")),
            }),
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn input_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[OutputFormat];
    fn failure_policy(&self) -> FailurePolicy;
    /// Archive name when outputs are bundled, `None` to write plain files.
    fn compression(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<InputData>;
    async fn transform(&self, data: InputData) -> Result<PricingReport>;
    async fn load(&self, report: PricingReport) -> Result<String>;
}
