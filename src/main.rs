use clap::Parser;
use rowcall::utils::{logger, validation::Validate};
use rowcall::{preview_batch, run_batch, CliConfig, RowcallError, RunConfig};

fn fail(e: RowcallError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn resolve(cli: CliConfig) -> Result<RunConfig, RowcallError> {
    let config = cli.into_run_config()?;
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting rowcall");
    let dry_run = cli.dry_run;
    let config = resolve(cli).unwrap_or_else(|e| fail(e));

    println!("{}", config);

    if dry_run {
        let prepared = preview_batch(&config, |request| match serde_json::to_string(request) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::warn!("Cannot render request: {}", e),
        })
        .unwrap_or_else(|e| fail(e));
        tracing::info!("🔍 Dry run: {} requests prepared, none sent", prepared);
        return;
    }

    match run_batch(&config).await {
        Ok(Some(summary)) => {
            println!("✅ Sent {} requests", summary.rows_processed);
            println!("📁 Output saved to: {}", summary.output_path);
        }
        Ok(None) => {}
        Err(e) => fail(e),
    }
}
