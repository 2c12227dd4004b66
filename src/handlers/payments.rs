use teloxide::prelude::*;

use crate::bot_state::BotState;
use crate::handlers::callbacks::TRAINERS_PROMPT;
use crate::handlers::utils::make_trainers_keyboard;
use crate::handlers::HandlerResult;
use crate::models::Plan;

/// Симуляция оплаты абонемента: деньги не списываются, пользователь просто получает право на запись.
pub async fn handle_payment(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    plan: Plan,
    state: &BotState,
) -> HandlerResult {
    log::info!("🎉 Simulated payment: user {} chose plan {}", user_id, plan.code());

    if let Err(e) = state.grant_payment_entitlement(user_id).await {
        log::error!("Error granting entitlement to user {}: {}", user_id, e);
        bot.send_message(chat_id, "⚠️ Не удалось провести оплату. Попробуйте ещё раз.")
            .await?;
        return Ok(());
    }
    state.flush_or_log().await;

    bot.send_message(chat_id, "Операция прошла успешно!").await?;

    let trainers = state.list_trainers().await;
    bot.send_message(
        chat_id,
        format!(
            "Абонемент {} активирован. Теперь вы можете записаться к тренеру:\n\n{}",
            plan.title(),
            TRAINERS_PROMPT
        ),
    )
    .reply_markup(make_trainers_keyboard(&trainers, true))
    .await?;

    Ok(())
}
