use crate::core::assembly::Database;
use crate::core::settlement::{self, RentalsDocument};
use crate::core::{pricing, ConfigProvider, Pipeline, Storage};
use crate::domain::input::InputData;
use crate::domain::model::{PricingReport, RejectedRental, RentalPrice};
use crate::domain::ports::{FailurePolicy, OutputFormat};
use crate::utils::error::{PricingError, Result};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

const REJECTED_FILE: &str = "rejected.json";

pub struct PricingPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> PricingPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn output_location(&self, file_name: &str) -> String {
        format!("{}/{}", self.config.output_path().trim_end_matches('/'), file_name)
    }

    fn render(format: OutputFormat, prices: &[RentalPrice]) -> Result<Vec<u8>> {
        match format {
            OutputFormat::Json => {
                let document = RentalsDocument {
                    rentals: prices.iter().map(settlement::rental_transactions).collect(),
                };
                Ok(serde_json::to_vec_pretty(&document)?)
            }
            OutputFormat::Commission => {
                let document = RentalsDocument {
                    rentals: prices.iter().map(settlement::price_components).collect(),
                };
                Ok(serde_json::to_vec_pretty(&document)?)
            }
            OutputFormat::Csv => {
                let mut writer = csv::Writer::from_writer(Vec::new());
                for price in prices {
                    writer.serialize(settlement::price_row(price))?;
                }
                writer
                    .into_inner()
                    .map_err(|e| PricingError::IoError(e.into_error()))
            }
        }
    }

    fn bundle(files: &[(&str, Vec<u8>)]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        for (name, data) in files {
            zip.start_file::<_, ()>(*name, FileOptions::default())?;
            zip.write_all(data)?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PricingPipeline<S, C> {
    async fn extract(&self) -> Result<InputData> {
        tracing::debug!("Reading rental input from: {}", self.config.input_file());
        let bytes = self.storage.read_file(self.config.input_file()).await?;

        let data = InputData::from_json_slice(&bytes)?;
        tracing::debug!(
            "Parsed {} cars, {} rentals, options for {} rentals",
            data.cars.len(),
            data.rentals.len(),
            data.options.len()
        );

        Ok(data)
    }

    async fn transform(&self, data: InputData) -> Result<PricingReport> {
        let database = Database::from(data);
        let policy = self.config.failure_policy();
        let mut report = PricingReport::default();

        for (rental_id, request) in database.requests() {
            match request.and_then(|request| pricing::price(&request)) {
                Ok(price) => {
                    tracing::debug!(
                        rental_id,
                        total_price = price.total_price,
                        drivy_fee = price.drivy_fee,
                        "Priced rental"
                    );
                    report.prices.push(price);
                }
                Err(e) if policy == FailurePolicy::Skip => {
                    tracing::warn!(rental_id, "Skipping rental: {}", e);
                    report.rejected.push(RejectedRental {
                        rental_id,
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    tracing::error!(rental_id, "Pricing aborted: {}", e);
                    return Err(e);
                }
            }
        }

        Ok(report)
    }

    async fn load(&self, report: PricingReport) -> Result<String> {
        let formats = self.config.output_formats();
        let primary = formats.first().copied().unwrap_or(OutputFormat::Json);

        let mut files = Vec::with_capacity(formats.len() + 1);
        for format in formats {
            files.push((format.file_name(), Self::render(*format, &report.prices)?));
        }
        if !report.rejected.is_empty() {
            files.push((REJECTED_FILE, serde_json::to_vec_pretty(&report.rejected)?));
        }

        if let Some(archive) = self.config.compression() {
            tracing::debug!("Bundling {} files into {}", files.len(), archive);
            let zip_data = Self::bundle(&files)?;
            let location = self.output_location(archive);
            self.storage.write_file(&location, &zip_data).await?;
            return Ok(location);
        }

        for (name, data) in &files {
            let location = self.output_location(name);
            tracing::debug!("Writing {} ({} bytes)", location, data.len());
            self.storage.write_file(&location, data).await?;
        }

        Ok(self.output_location(primary.file_name()))
    }
}
