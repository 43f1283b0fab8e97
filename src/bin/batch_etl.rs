use clap::Parser;
use uniqint_etl::config::toml_config::{ErrorHandlingConfig, TomlConfig};
use uniqint_etl::utils::{logger, validation::Validate};
use uniqint_etl::JobSequence;
use uniqint_etl::LocalStorage;

#[derive(Parser)]
#[command(name = "batch-etl")]
#[command(about = "Batch integer deduplication with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "etl-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override failure policy from config (halt or continue)
    #[arg(long)]
    on_failure: Option<String>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting batch ETL tool");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(policy) = &args.on_failure {
        config.error_handling = Some(ErrorHandlingConfig {
            on_job_failure: Some(policy.clone()),
        });
        tracing::info!("🔧 Failure policy overridden to: {}", policy);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    // 顯示配置摘要
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config)?;
        return Ok(());
    }

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 創建存儲和 job 序列
    let storage = LocalStorage::new();
    let sequence = JobSequence::new(storage)
        .with_policy(config.failure_policy())
        .with_monitoring(monitor_enabled);

    match sequence.execute_all(&config.jobs) {
        Ok(summary) => {
            println!("📊 Batch Summary:");
            println!("  Completed: {} job(s)", summary.completed.len());
            println!("  Unique integers written: {}", summary.total_values());
            println!("  Total time: {:?}", summary.total_duration());

            if summary.is_success() {
                tracing::info!("✅ Successful processed files");
                println!("✅ Successful processed files");
            } else {
                for (input, error) in &summary.failed {
                    eprintln!("❌ {}: {}", input, error);
                }
                eprintln!("⚠️ {} job(s) failed", summary.failed.len());
                std::process::exit(1);
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Batch processing failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                uniqint_etl::utils::error::ErrorSeverity::Low => 0, // 警告，但成功
                uniqint_etl::utils::error::ErrorSeverity::Medium => 2, // 重試錯誤
                uniqint_etl::utils::error::ErrorSeverity::High => 1, // 處理錯誤
                uniqint_etl::utils::error::ErrorSeverity::Critical => 3, // 系統錯誤
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name, config.pipeline.version
    );
    println!("  Jobs: {}", config.jobs.len());
    println!("  Failure policy: {:?}", config.failure_policy());
    println!("  Monitoring: {}", config.monitoring_enabled());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Dry Run Analysis:");
    println!();

    // Job 清單分析
    println!("📋 Jobs:");
    for (index, job) in config.jobs.iter().enumerate() {
        let status = if std::path::Path::new(&job.input).exists() {
            "input found"
        } else {
            "⚠️ input missing"
        };
        println!("  {}. {} -> {} ({})", index + 1, job.input, job.output, status);
    }

    // 處理模式分析
    println!();
    println!("⚙️ Processing Mode:");
    println!("  Failure policy: {:?}", config.failure_policy());
    println!(
        "  Accepted integer range: [{}, {}]",
        uniqint_etl::IntegerSet::MIN_VALUE,
        uniqint_etl::IntegerSet::MAX_VALUE
    );

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
