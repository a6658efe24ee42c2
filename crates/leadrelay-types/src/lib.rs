//! Shared domain types for Leadrelay.
//!
//! Conversation turns, completion request/response shapes, the `/chat` wire
//! contract, configuration structs and the error enums used across crates.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
