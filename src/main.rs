use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use gym_booking_bot::handlers::{self, Command};
use gym_booking_bot::{BotState, Config, Database};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Загружаем .env и инициализируем логирование
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    log::info!("Starting {} booking bot...", config.gym_name);

    // Без корректного состояния стартовать нельзя
    let db = Database::new(&config.state_path);
    let state = BotState::initialize(db).await?;
    log::info!("✅ State initialized from {}", config.state_path.display());

    let bot = Bot::new(config.token.clone());
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        log::warn!("Could not register bot commands: {}", e);
    }

    log::info!("🚀 Starting dispatcher...");

    Dispatcher::builder(bot, handlers::schema())
        .dependencies(dptree::deps![state.clone(), config.gym_info()])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    // Финальное сохранение при остановке
    state.flush().await?;
    log::info!("State saved, bye");

    Ok(())
}
