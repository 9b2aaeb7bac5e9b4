//! # kbot-core
//!
//! Core types and traits for the kadrovik bot: [`Bot`], [`Handler`], message and user types,
//! reply keyboards and tracing initialization. Transport-agnostic; used by kbot-telegram,
//! handler-chain and the kadrovik-bot application.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{HandlerError, KbotError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, ReplyKeyboard, ToCoreMessage, ToCoreUser, User,
};
