use clap::Parser;
use code_contests_apps::core::ConfigProvider;
use code_contests_apps::utils::error::{ConvertError, ErrorSeverity};
use code_contests_apps::utils::{logger, validation};
use code_contests_apps::{CliConfig, ConversionEngine, DelimitedSource, Emitter, LocalStorage};
use std::path::{Path, PathBuf};

fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting code-contests-apps");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli) {
        tracing::error!(
            "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

fn run(cli: &CliConfig) -> Result<(), ConvertError> {
    let config = cli.resolve()?;
    let root: Option<PathBuf> = config.output_root().map(Path::to_path_buf);
    let root = validation::validate_required_field("output.root", &root)?.clone();

    tracing::info!("📁 Output root: {}", root.display());
    tracing::info!(
        "🔧 naming={:?} reshape={:?} on_error={:?}",
        config.dir_naming(),
        config.reshape_policy(),
        config.error_policy()
    );

    let mut source = DelimitedSource::new();
    if let Some(limit) = cli.max_record_bytes {
        source = source.with_max_record_len(limit);
    }

    let stdout = std::io::stdout();
    let emitter = Emitter::from_config(LocalStorage::new(root), &config, stdout.lock())?;
    let mut engine =
        ConversionEngine::new(source, emitter).with_error_policy(config.error_policy());

    let summary = engine.run(&cli.inputs)?;
    if summary.skipped > 0 {
        tracing::warn!("⚠️ {} problem(s) were skipped", summary.skipped);
    }
    Ok(())
}
