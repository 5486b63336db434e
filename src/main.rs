use anyhow::Context;
use clap::Parser;
use rental_pricing::utils::error::ErrorSeverity;
use rental_pricing::utils::{logger, validation::Validate};
use rental_pricing::{CliConfig, LocalStorage, PricingPipeline, PricingRunner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting rental-pricing CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    config
        .validate()
        .inspect_err(|e| tracing::error!("💡 Suggestion: {}", e.recovery_suggestion()))
        .context("Configuration validation failed")?;

    // 路徑皆相對於當前工作目錄
    let storage = LocalStorage::new(".");
    let pipeline = PricingPipeline::new(storage, config);
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

// 根據錯誤嚴重程度決定退出碼
fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Medium => 2, // 業務規則拒絕
        ErrorSeverity::High => 1,   // 輸入或配置錯誤
        ErrorSeverity::Critical => 3,
    }
}
