use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;

use crate::bot_state::BotState;
use crate::config::GymInfo;
use crate::handlers::utils::{display_name, main_menu_keyboard, welcome_text, BTN_MY_BOOKINGS, BTN_PRICES, BTN_TRAINERS};
use crate::handlers::HandlerResult;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "начать работу с ботом")]
    Start,
    #[command(description = "показать помощь")]
    Help,
}

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: BotState,
    gym: GymInfo,
) -> HandlerResult {
    if let Some(from) = msg.from.as_ref() {
        state.remember_user(from.id.0 as i64, &display_name(from)).await;
    }

    match cmd {
        Command::Start => send_welcome(&bot, msg.chat.id, &gym).await?,
        Command::Help => handle_help(&bot, msg.chat.id).await?,
    }
    Ok(())
}

pub async fn send_welcome(bot: &Bot, chat_id: ChatId, gym: &GymInfo) -> HandlerResult {
    bot.send_message(chat_id, welcome_text(&gym.name))
        .parse_mode(ParseMode::MarkdownV2)
        .reply_markup(main_menu_keyboard())
        .await?;
    Ok(())
}

async fn handle_help(bot: &Bot, chat_id: ChatId) -> HandlerResult {
    let text = format!(
        "{}\n\n\
        «{}» — описание тренеров и запись к ним\n\
        «{}» — абонементы и оплата\n\
        «{}» — ваши записи\n\n\
        Записаться можно только к одному тренеру, не больше 3 раз.",
        Command::descriptions(),
        BTN_TRAINERS,
        BTN_PRICES,
        BTN_MY_BOOKINGS
    );

    bot.send_message(chat_id, text)
        .reply_markup(main_menu_keyboard())
        .await?;
    Ok(())
}
