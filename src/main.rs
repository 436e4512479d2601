use anyhow::Context;
use clap::Parser;
use taskboard::config::cli::Command;
use taskboard::utils::error::BoardError;
use taskboard::utils::logger;
use taskboard::{CliConfig, CommandRunner, MigrationRunner};

fn exit_with(e: &BoardError) -> ! {
    tracing::error!(
        "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 驗證配置
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration '{}': {}", cli.config, e);
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, config.logging.format);
    tracing::info!("Starting taskboard");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let pool = match config.database.connect().await {
        Ok(pool) => pool,
        Err(e) => exit_with(&e),
    };

    let is_migrate = matches!(cli.command, Command::Migrate { .. });
    if config.database.auto_migrate && !is_migrate {
        if let Err(e) = MigrationRunner::new(pool.clone()).run().await {
            exit_with(&e);
        }
    }

    let runner = CommandRunner::new(pool.clone());
    let output = match runner.run(cli.command).await {
        Ok(output) => output,
        Err(e) => exit_with(&e),
    };

    if cli.json {
        let json = output.to_json().context("failed to render command output as JSON")?;
        println!("{}", json);
    } else {
        println!("{}", output.to_text());
    }

    pool.close().await;
    Ok(())
}
