//! Relay endpoint.
//!
//! POST /chat
//!
//! Body `{ "message": "...", "conversation": [{ "role", "content" }] }`.
//! Every JSON body is answered `200 { "message": "..." }`, including when the
//! provider fails or the body is not a usable chat turn. Only bodies that are
//! not JSON at all are rejected.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use leadrelay_types::chat::{ChatReply, ChatRequest};

use crate::http::error::AppError;
use crate::state::AppState;

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(body) = payload?;

    let reply = match serde_json::from_value::<ChatRequest>(body) {
        Ok(request) => {
            state
                .relay
                .relay(&request.message, &request.conversation)
                .await
        }
        Err(e) => state.relay.reject_unusable(&e.to_string()),
    };

    Ok(Json(reply))
}
