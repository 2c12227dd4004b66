use teloxide::prelude::*;

use crate::bot_state::BotState;
use crate::config::GymInfo;
use crate::handlers::callbacks::TRAINERS_PROMPT;
use crate::handlers::commands::send_welcome;
use crate::handlers::utils::{
    bookings_text, display_name, main_menu_keyboard, make_pricing_keyboard,
    make_trainers_keyboard, price_text, BTN_MY_BOOKINGS, BTN_PRICES, BTN_TRAINERS,
};
use crate::handlers::HandlerResult;

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: BotState,
    gym: GymInfo,
) -> HandlerResult {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = from.id.0 as i64;
    let user = state.remember_user(user_id, &display_name(from)).await;

    let Some(text) = msg.text() else {
        return Ok(());
    };

    // Неизвестные команды тоже ведут в главное меню.
    if text.starts_with('/') {
        return send_welcome(&bot, msg.chat.id, &gym).await;
    }

    match text {
        BTN_TRAINERS => {
            let trainers = state.list_trainers().await;
            bot.send_message(msg.chat.id, TRAINERS_PROMPT)
                .reply_markup(make_trainers_keyboard(&trainers, user.has_paid))
                .await?;
        }
        BTN_PRICES => {
            bot.send_message(msg.chat.id, price_text())
                .reply_markup(make_pricing_keyboard())
                .await?;
        }
        BTN_MY_BOOKINGS => {
            let bookings = state.user_bookings(user_id).await;
            let trainers = state.list_trainers().await;
            bot.send_message(msg.chat.id, bookings_text(&bookings, &trainers))
                .reply_markup(main_menu_keyboard())
                .await?;
        }
        _ => {
            bot.send_message(msg.chat.id, "Не понял команду. Пожалуйста, выберите пункт меню.")
                .reply_markup(main_menu_keyboard())
                .await?;
        }
    }

    Ok(())
}
