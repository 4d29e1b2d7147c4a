use clap::Parser;
use mirrorloop::config::Cli;
use mirrorloop::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Convert CLI args to Config - this validates immediately
    let config = Config::try_from(cli)?;

    mirrorloop::ui::init_logging(&config.log_file)?;
    tracing::info!("mirrorloop v{}", mirrorloop::VERSION);

    // Passes and sleeps run one after another on this thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(mirrorloop::commands::mirror::run(config));

    Ok(())
}
