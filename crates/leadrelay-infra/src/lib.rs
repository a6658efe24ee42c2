//! Infrastructure layer for Leadrelay.
//!
//! Contains the concrete implementations of the ports defined in
//! `leadrelay-core`: the OpenAI-compatible completion provider, the HTTP
//! relay transport used by the chat widget, the `leadrelay.toml` loader and
//! environment-based credential lookup.

pub mod config;
pub mod llm;
pub mod secret;
pub mod transport;
