use anyhow::Context;
use clap::Parser;
use rental_pricing::core::settlement;
use rental_pricing::core::{ConfigProvider, Pipeline};
use rental_pricing::domain::ports::FailurePolicy;
use rental_pricing::utils::error::ErrorSeverity;
use rental_pricing::utils::{logger, validation::Validate};
use rental_pricing::{LocalStorage, PricingPipeline, PricingRunner, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-pricing")]
#[command(about = "Rental pricing driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "pricing.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the failure policy from config (abort or skip)
    #[arg(long)]
    on_error: Option<FailurePolicy>,

    /// Dry run - price the input and print a summary without writing output
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = TomlConfig::from_file(&args.config).with_context(|| {
        format!(
            "Failed to load config file '{}'; make sure it exists and is valid TOML",
            args.config
        )
    })?;

    // 初始化日誌
    let verbose = args.verbose || config.verbose();
    if config.json_logs() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("🚀 Starting TOML-based pricing run '{}'", config.run.name);
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(policy) = args.on_error {
        config
            .error_handling
            .get_or_insert(rental_pricing::config::toml_config::ErrorHandlingConfig {
                on_rental_error: None,
            })
            .on_rental_error = Some(policy);
        tracing::info!("🔧 Failure policy overridden to: {:?}", policy);
    }

    // 驗證配置
    config
        .validate()
        .inspect_err(|e| tracing::error!("💡 Suggestion: {}", e.recovery_suggestion()))
        .context("Configuration validation failed")?;

    display_config_summary(&config);

    let storage = LocalStorage::new(".");
    let pipeline = PricingPipeline::new(storage, config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No output will be written");
        if let Err(e) = perform_dry_run(&pipeline).await {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(e.severity()));
        }
        return Ok(());
    }

    let runner = PricingRunner::new(pipeline);

    match runner.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Pricing completed successfully!");
            println!("✅ Pricing completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Pricing failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            std::process::exit(exit_code(e.severity()));
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Configuration Summary:");
    if let Some(description) = &config.run.description {
        tracing::info!("   Description: {}", description);
    }
    tracing::info!("   Input: {}", config.input_file());
    tracing::info!("   Output: {}", config.output_path());
    tracing::info!("   Formats: {:?}", config.output_formats());
    tracing::info!("   On rental error: {:?}", config.failure_policy());
    if let Some(archive) = config.compression() {
        tracing::info!("   Compression: {}", archive);
    }
}

async fn perform_dry_run(
    pipeline: &PricingPipeline<LocalStorage, TomlConfig>,
) -> rental_pricing::Result<()> {
    let data = pipeline.extract().await?;
    let report = pipeline.transform(data).await?;

    println!("🔍 Dry run for '{}'", pipeline.config().run.name);
    println!("{:>8} {:>10} {:>10} {:>10} {:>10} {:>10}", "rental", "price", "insurance", "assistance", "drivy", "owner");
    for price in &report.prices {
        let row = settlement::price_row(price);
        println!(
            "{:>8} {:>10} {:>10} {:>10} {:>10} {:>10}",
            row.id, row.price, row.insurance_fee, row.assistance_fee, row.drivy_fee, row.owner_credit
        );
    }
    for rejected in &report.rejected {
        println!("⚠️ rental {} skipped: {}", rejected.rental_id, rejected.reason);
    }

    Ok(())
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
