use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::bot_state::BotState;
use crate::config::GymInfo;
use crate::handlers::payments::handle_payment;
use crate::handlers::utils::{
    display_name, main_menu_keyboard, make_schedule_keyboard, make_trainer_details_keyboard,
    make_trainers_keyboard, trainer_card_text, welcome_text,
};
use crate::handlers::HandlerResult;
use crate::models::{Plan, Trainer, TrainerId};

pub const TRAINERS_PROMPT: &str = "Наши тренеры (нажмите имя, чтобы узнать подробнее):";

/// Данные inline-кнопок.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    Menu,
    Trainers,
    Trainer(TrainerId),
    Book(TrainerId),
    Slot { trainer_id: TrainerId, slot: String },
    Pay(Plan),
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "menu" => return Some(Self::Menu),
            "trainers" => return Some(Self::Trainers),
            _ => {}
        }

        if let Some(id) = data.strip_prefix("trainer_") {
            return id.parse().ok().map(Self::Trainer);
        }
        if let Some(id) = data.strip_prefix("book_") {
            return id.parse().ok().map(Self::Book);
        }
        if let Some(rest) = data.strip_prefix("slot_") {
            let (id, slot) = rest.split_once('_')?;
            if slot.is_empty() {
                return None;
            }
            return Some(Self::Slot {
                trainer_id: id.parse().ok()?,
                slot: slot.to_string(),
            });
        }
        if let Some(code) = data.strip_prefix("pay_") {
            return Plan::from_code(code).map(Self::Pay);
        }
        None
    }

    pub fn to_data(&self) -> String {
        match self {
            Self::Menu => "menu".to_string(),
            Self::Trainers => "trainers".to_string(),
            Self::Trainer(id) => format!("trainer_{}", id),
            Self::Book(id) => format!("book_{}", id),
            Self::Slot { trainer_id, slot } => format!("slot_{}_{}", trainer_id, slot),
            Self::Pay(plan) => format!("pay_{}", plan.code()),
        }
    }
}

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    state: BotState,
    gym: GymInfo,
) -> HandlerResult {
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        log::error!("Error answering callback query: {}", e);
    }

    let (Some(data), Some(message)) = (q.data.as_deref(), q.message.as_ref()) else {
        return Ok(());
    };
    let chat_id = message.chat().id;
    let user_id = q.from.id.0 as i64;
    let user = state.remember_user(user_id, &display_name(&q.from)).await;

    let Some(action) = CallbackAction::parse(data) else {
        log::warn!("Unknown callback data from user {}: {}", user_id, data);
        return Ok(());
    };

    match action {
        CallbackAction::Menu => {
            bot.send_message(chat_id, welcome_text(&gym.name))
                .parse_mode(ParseMode::MarkdownV2)
                .reply_markup(main_menu_keyboard())
                .await?;
        }

        CallbackAction::Trainers => {
            let trainers = state.list_trainers().await;
            bot.send_message(chat_id, TRAINERS_PROMPT)
                .reply_markup(make_trainers_keyboard(&trainers, user.has_paid))
                .await?;
        }

        CallbackAction::Trainer(trainer_id) => match state.get_trainer(trainer_id).await {
            Ok(trainer) => {
                bot.send_message(chat_id, trainer_card_text(&trainer))
                    .parse_mode(ParseMode::MarkdownV2)
                    .reply_markup(make_trainer_details_keyboard(trainer.id, user.has_paid))
                    .await?;
            }
            Err(e) => {
                bot.send_message(chat_id, capitalize(&e.to_string())).await?;
            }
        },

        CallbackAction::Book(trainer_id) => {
            if !user.has_paid {
                bot.send_message(
                    chat_id,
                    "Чтобы записаться, сначала оплатите абонемент в разделе \"Прайс абонементов\".",
                )
                .await?;
                return Ok(());
            }
            match state.get_trainer(trainer_id).await {
                Ok(trainer) => {
                    let caption = format!("Выберите время для тренера {}:", trainer.name);
                    send_schedule(&bot, chat_id, &trainer, caption).await?;
                }
                Err(e) => {
                    bot.send_message(chat_id, capitalize(&e.to_string())).await?;
                }
            }
        }

        CallbackAction::Slot { trainer_id, slot } => match state.book(user_id, trainer_id, &slot).await {
            Ok(_) => {
                state.flush_or_log().await;

                bot.send_message(
                    chat_id,
                    format!("Запись подтверждена! Тренер #{}, время {}.", trainer_id, slot),
                )
                .await?;

                // Снимок после записи: забронированного слота в нём уже нет.
                if let Ok(trainer) = state.get_trainer(trainer_id).await {
                    let caption = format!("Свободные слоты у {} обновлены:", trainer.name);
                    send_schedule(&bot, chat_id, &trainer, caption).await?;
                }
            }
            Err(e) => {
                bot.send_message(chat_id, format!("Не удалось записаться: {}", e))
                    .await?;
            }
        },

        CallbackAction::Pay(plan) => {
            handle_payment(&bot, chat_id, user_id, plan, &state).await?;
        }
    }

    Ok(())
}

async fn send_schedule(bot: &Bot, chat_id: ChatId, trainer: &Trainer, caption: String) -> HandlerResult {
    bot.send_message(chat_id, caption)
        .reply_markup(make_schedule_keyboard(trainer.id, &trainer.slots))
        .await?;
    Ok(())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_kind_of_button() {
        assert_eq!(CallbackAction::parse("menu"), Some(CallbackAction::Menu));
        assert_eq!(CallbackAction::parse("trainers"), Some(CallbackAction::Trainers));
        assert_eq!(CallbackAction::parse("trainer_3"), Some(CallbackAction::Trainer(3)));
        assert_eq!(CallbackAction::parse("book_5"), Some(CallbackAction::Book(5)));
        assert_eq!(
            CallbackAction::parse("slot_1_08:00"),
            Some(CallbackAction::Slot {
                trainer_id: 1,
                slot: "08:00".to_string()
            })
        );
        assert_eq!(CallbackAction::parse("pay_gold"), Some(CallbackAction::Pay(Plan::Gold)));
    }

    #[test]
    fn slot_label_keeps_everything_after_trainer_id() {
        assert_eq!(
            CallbackAction::parse("slot_12_evening_class"),
            Some(CallbackAction::Slot {
                trainer_id: 12,
                slot: "evening_class".to_string()
            })
        );
    }

    #[test]
    fn rejects_malformed_data() {
        for data in ["", "trainer_", "trainer_x", "book_-1", "slot_1", "slot_1_", "slot_a_08:00", "pay_vip", "help"] {
            assert_eq!(CallbackAction::parse(data), None, "{data:?} must not parse");
        }
    }

    #[test]
    fn data_parses_back_to_the_same_action() {
        let action = CallbackAction::Slot {
            trainer_id: 4,
            slot: "19:00".to_string(),
        };
        assert_eq!(action.to_data(), "slot_4_19:00");
        assert_eq!(CallbackAction::parse(&action.to_data()), Some(action));
        assert_eq!(CallbackAction::Pay(Plan::Student).to_data(), "pay_student");
    }

    #[test]
    fn capitalizes_error_messages() {
        assert_eq!(capitalize("тренер не найден"), "Тренер не найден");
        assert_eq!(capitalize(""), "");
    }
}
