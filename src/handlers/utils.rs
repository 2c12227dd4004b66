use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, ReplyMarkup};

use crate::handlers::callbacks::CallbackAction;
use crate::models::plan::format_tenge;
use crate::models::{Booking, Plan, Trainer, TrainerId};

pub const BTN_TRAINERS: &str = "Тренеры";
pub const BTN_PRICES: &str = "Прайс абонементов";
pub const BTN_MY_BOOKINGS: &str = "Мои записи";

const SLOTS_PER_ROW: usize = 4;

/// Экранирование MarkdownV2
pub fn escape_markdown_v2(text: &str) -> String {
    let specials = ['_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', '\\'];
    let mut out = String::with_capacity(text.len() * 2);

    for ch in text.chars() {
        if specials.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Имя для приветствия: имя и фамилия, иначе username.
pub fn display_name(user: &teloxide::types::User) -> String {
    let full_name = user.full_name();
    let full_name = full_name.trim();
    if full_name.is_empty() {
        user.username.clone().unwrap_or_default()
    } else {
        full_name.to_string()
    }
}

pub fn welcome_text(gym_name: &str) -> String {
    format!(
        "Вас приветствует фитнес зал *{}*\\!\nВыберите раздел ниже\\.",
        escape_markdown_v2(gym_name)
    )
}

pub fn price_text() -> String {
    let mut text = String::from("Прайсы абонементов (тенге):\n\n");
    for plan in Plan::ALL {
        text.push_str(&format!(
            "• {} — {} ₸ / мес\n",
            plan.title(),
            format_tenge(plan.monthly_price())
        ));
    }
    text.push_str("\nНажмите \"Оплатить\" для симуляции оплаты.");
    text
}

/// Карточка тренера для MarkdownV2.
pub fn trainer_card_text(trainer: &Trainer) -> String {
    let achievements = trainer
        .achievements
        .iter()
        .map(|a| format!("• {}", escape_markdown_v2(a)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "*{}*\n\nОписание: {}\n\nДостижения:\n{}",
        escape_markdown_v2(&trainer.name),
        escape_markdown_v2(&trainer.bio),
        achievements
    )
}

pub fn bookings_text(bookings: &[Booking], trainers: &[Trainer]) -> String {
    if bookings.is_empty() {
        return "У вас пока нет записей.".to_string();
    }

    let mut text = String::from("Ваши записи:\n");
    for booking in bookings {
        let trainer_name = trainers
            .iter()
            .find(|t| t.id == booking.trainer_id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| format!("Тренер #{}", booking.trainer_id));
        text.push_str(&format!("\n• {} — {}", trainer_name, booking.time_slot));
    }
    text
}

/// Главное меню
pub fn main_menu_keyboard() -> ReplyMarkup {
    ReplyMarkup::Keyboard(
        KeyboardMarkup::new(vec![
            vec![KeyboardButton::new(BTN_TRAINERS), KeyboardButton::new(BTN_PRICES)],
            vec![KeyboardButton::new(BTN_MY_BOOKINGS)],
        ])
        .resize_keyboard(),
    )
}

fn button(text: impl Into<String>, action: CallbackAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text, action.to_data())
}

fn back_to_trainers() -> InlineKeyboardButton {
    button("⬅️ Назад", CallbackAction::Trainers)
}

/// Список тренеров. Кнопка записи есть только у оплативших абонемент.
pub fn make_trainers_keyboard(trainers: &[Trainer], has_paid: bool) -> InlineKeyboardMarkup {
    let mut keyboard: Vec<Vec<InlineKeyboardButton>> = trainers
        .iter()
        .map(|t| {
            let mut row = vec![button(format!("👤 {}", t.name), CallbackAction::Trainer(t.id))];
            if has_paid {
                row.push(button("🗓 Запись", CallbackAction::Book(t.id)));
            }
            row
        })
        .collect();

    keyboard.push(vec![button("⬅️ В меню", CallbackAction::Menu)]);
    InlineKeyboardMarkup::new(keyboard)
}

pub fn make_trainer_details_keyboard(trainer_id: TrainerId, has_paid: bool) -> InlineKeyboardMarkup {
    let mut row = Vec::new();
    if has_paid {
        row.push(button("🗓 Запись", CallbackAction::Book(trainer_id)));
    }
    row.push(back_to_trainers());
    InlineKeyboardMarkup::new(vec![row])
}

/// Свободные слоты тренера, по четыре в ряд.
pub fn make_schedule_keyboard(trainer_id: TrainerId, slots: &[String]) -> InlineKeyboardMarkup {
    let mut keyboard: Vec<Vec<InlineKeyboardButton>> = slots
        .chunks(SLOTS_PER_ROW)
        .map(|chunk| {
            chunk
                .iter()
                .map(|slot| {
                    button(
                        slot.clone(),
                        CallbackAction::Slot {
                            trainer_id,
                            slot: slot.clone(),
                        },
                    )
                })
                .collect()
        })
        .collect();

    keyboard.push(vec![back_to_trainers()]);
    InlineKeyboardMarkup::new(keyboard)
}

pub fn make_pricing_keyboard() -> InlineKeyboardMarkup {
    let mut keyboard: Vec<Vec<InlineKeyboardButton>> = Plan::ALL
        .into_iter()
        .map(|plan| {
            vec![button(
                format!("Оплатить {} ({} ₸)", plan.title(), format_tenge(plan.monthly_price())),
                CallbackAction::Pay(plan),
            )]
        })
        .collect();

    keyboard.push(vec![button("⬅️ В меню", CallbackAction::Menu)]);
    InlineKeyboardMarkup::new(keyboard)
}
