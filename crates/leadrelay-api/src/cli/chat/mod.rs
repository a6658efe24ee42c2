//! Terminal rendition of the chat widget.
//!
//! Drives a [`leadrelay_core::client::ConversationClient`] from a readline
//! prompt. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod view;
