use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct PricingRunner<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> PricingRunner<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting pricing run...");

        tracing::info!("Reading input...");
        let data = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} rentals across {} cars",
            data.rentals.len(),
            data.cars.len()
        );

        tracing::info!("Pricing rentals...");
        let report = self.pipeline.transform(data).await?;
        tracing::info!("Priced {} rentals", report.prices.len());
        if !report.rejected.is_empty() {
            tracing::warn!("⚠️ {} rentals were skipped", report.rejected.len());
            for rejected in &report.rejected {
                tracing::warn!("  rental {}: {}", rejected.rental_id, rejected.reason);
            }
        }

        tracing::info!("Writing output...");
        let output_path = self.pipeline.load(report).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
