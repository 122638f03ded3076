use anyhow::Context;
use clap::Parser;
use grade_etl::core::ConfigProvider;
use grade_etl::utils::{logger, validation::Validate};
use grade_etl::{EtlEngine, GradePipeline, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-grades")]
#[command(about = "Grade processing driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "grades.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// List the input files that would be processed, then exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    logger::init_logger(args.verbose, config.json_logs());
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    tracing::info!("📋 Configuration Summary:");
    tracing::info!("  Input: {}", config.input_dir());
    tracing::info!(
        "  Reports: {} / {} in {}",
        config.approved_filename(),
        config.denied_filename(),
        config.output_dir()
    );

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let pipeline = GradePipeline::new(LocalStorage::new(".".to_string()), config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No reports will be written");
        let sources = pipeline
            .resolve_sources()
            .await
            .context("Failed to resolve input files")?;
        for source in &sources {
            println!("{}", source);
        }
        tracing::info!("{} input files would be processed", sources.len());
        return Ok(());
    }

    let mut engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);
    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Grade processing completed successfully!");
            println!("✅ Reports written to: {}", output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Grade processing failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
