//! Business logic for Leadrelay.
//!
//! Defines the `LlmProvider` port that `leadrelay-infra` implements, the
//! stateless [`relay::RelayService`] behind `POST /chat`, and the
//! [`client::ConversationClient`] state machine that drives the chat widget.
//! Depends only on `leadrelay-types` -- never on `leadrelay-infra` or any
//! HTTP crate.

pub mod client;
pub mod llm;
pub mod relay;
