use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use phoneinfo_bot::application::errors::{BotError, ConfigError};
use phoneinfo_bot::application::services::CommandRouter;
use phoneinfo_bot::domain::traits::{Bot, Delivery, MessageHandler, PhoneValidator};
use phoneinfo_bot::infrastructure::adapters::{ConsoleAdapter, TelegramAdapter};
use phoneinfo_bot::infrastructure::config::{Config, DeliveryMode, ENV_PORT, ENV_PUBLIC_URL};
use phoneinfo_bot::infrastructure::delivery::{ConsoleDelivery, PollingDelivery, WebhookDelivery};
use phoneinfo_bot::infrastructure::validation::ValidationClient;

#[derive(Parser)]
#[command(name = "phoneinfo-bot")]
#[command(about = "Telegram bot that looks up phone numbers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot (default)
    Run,
    /// Show version
    Version,
    /// Validate the environment and print the resulting config
    CheckConfig,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => match Config::load_env() {
            Ok(config) => match run_bot(config) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    tracing::error!("Bot stopped: {}", e);
                    ExitCode::FAILURE
                }
            },
            Err(e) => {
                tracing::error!("Invalid configuration: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Version => {
            println!("phoneinfo-bot v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::CheckConfig => match Config::load_env() {
            Ok(config) => {
                println!("{}", config.summary());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Invalid configuration: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn run_bot(config: Config) -> Result<(), BotError> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(serve(config))
}

async fn serve(config: Config) -> Result<(), BotError> {
    tracing::info!("Starting phoneinfo-bot in {} mode", config.mode);

    let validator: Arc<dyn PhoneValidator> =
        Arc::new(ValidationClient::new(&config.validation_api_url, &config.api_key));

    let (bot, delivery): (Arc<dyn Bot>, Box<dyn Delivery>) = match config.mode {
        DeliveryMode::Console => (
            Arc::new(ConsoleAdapter::new()) as Arc<dyn Bot>,
            Box::new(ConsoleDelivery::stdin()) as Box<dyn Delivery>,
        ),
        DeliveryMode::Polling => {
            let telegram = Arc::new(TelegramAdapter::new(&config.bot_token));
            announce(&telegram).await;
            let delivery = PollingDelivery::new(telegram.clone()).with_health_port(config.port);
            (telegram as Arc<dyn Bot>, Box::new(delivery) as Box<dyn Delivery>)
        }
        DeliveryMode::Webhook => {
            let public_url = config
                .public_url
                .clone()
                .ok_or_else(|| ConfigError::MissingField(ENV_PUBLIC_URL.to_string()))?;
            let port = config
                .port
                .ok_or_else(|| ConfigError::MissingField(ENV_PORT.to_string()))?;

            let telegram = Arc::new(TelegramAdapter::new(&config.bot_token));
            announce(&telegram).await;
            let delivery = WebhookDelivery::new(telegram.clone(), public_url, port);
            (telegram as Arc<dyn Bot>, Box::new(delivery) as Box<dyn Delivery>)
        }
    };

    let info = bot.bot_info();
    tracing::info!("Bot started: @{} ({})", info.username, info.name);

    let router: Arc<dyn MessageHandler> = Arc::new(CommandRouter::new(bot, validator));

    tracing::info!("✅ Phone Info Bot is running ({})", delivery.name());
    delivery.run(router).await
}

/// Learn the bot identity and publish the command menu; neither is required to run
async fn announce(telegram: &TelegramAdapter) {
    if let Err(e) = telegram.fetch_bot_info().await {
        tracing::warn!("Failed to fetch bot info: {}", e);
    }

    if let Err(e) = telegram.register_commands().await {
        tracing::warn!("Failed to register commands: {}", e);
    }
}
