pub mod commands;
pub mod messages;
pub mod callbacks;
pub mod payments;
pub mod utils;

pub use commands::{command_handler, Command};
pub use messages::message_handler;
pub use callbacks::{callback_handler, CallbackAction};

use std::error::Error;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

pub type HandlerResult = Result<(), Box<dyn Error + Send + Sync>>;

/// Дерево обработчиков: команды, нажатия inline-кнопок, остальные сообщения.
pub fn schema() -> UpdateHandler<Box<dyn Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(Update::filter_callback_query().endpoint(callback_handler))
        .branch(Update::filter_message().endpoint(message_handler))
}
