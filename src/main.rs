use anyhow::Result;
use page_find::cli;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let options = cli::process_cli();

    // CLI --log-level flag takes precedence over RUST_LOG, which defaults to warn.
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = options.log_level {
        logger.filter_level(level);
    }
    logger.init();

    log::info!("Starting page-find");

    let code = cli::run::execute(&options)?;
    if code != 0 {
        // Use process::exit so the shell sees the correct exit code.
        std::process::exit(code);
    }
    Ok(())
}
