//! Wire contract for the `/chat` relay endpoint.
//!
//! The client sends the new message separately from the conversation so far;
//! the relay appends it server-side. Every relay outcome is answered with a
//! [`ChatReply`].

use serde::{Deserialize, Deserializer, Serialize};

pub use crate::llm::{Message, MessageRole};

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's new message.
    pub message: String,
    /// Accepted history strictly before `message`. Missing or `null` means empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub conversation: Vec<Message>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Message>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Message>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of every `/chat` response, success or provider failure alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
}

impl ChatReply {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
