use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use homework_bot::bot::HomeworkBot;
use homework_bot::config::AppConfig;
use homework_bot::practicum::client::PracticumClient;
use homework_bot::shutdown::listen_for_shutdown;
use homework_bot::telegram::client::TelegramClient;
use homework_bot::telegram::Notifier;

#[derive(Parser)]
#[command(name = "homework-bot", about = "Reports Practicum homework review status to Telegram")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Run a single poll cycle and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    let credentials = config.credentials()?;

    tracing::info!(
        endpoint = %config.practicum_endpoint,
        interval_secs = config.retry_time,
        "Starting homework bot"
    );

    let source = PracticumClient::new(
        &config.practicum_endpoint,
        &credentials.practicum_token,
        config.request_timeout(),
    )?;
    let messenger = TelegramClient::new(
        &config.telegram_api_url,
        &credentials.telegram_token,
        config.request_timeout(),
    )?;
    let notifier = Notifier::new(Box::new(messenger), &credentials.telegram_chat_id);

    let start_cursor = chrono::Utc::now().timestamp();
    let mut bot = HomeworkBot::new(source, notifier, config.poll_interval(), start_cursor);

    if cli.once {
        let outcome = bot.run_cycle().await;
        tracing::info!(outcome = ?outcome, "Single cycle finished");
        return Ok(());
    }

    let shutdown = listen_for_shutdown()?;
    bot.run(shutdown).await;

    Ok(())
}
