//! Port for reaching the relay endpoint.

use std::future::Future;

use leadrelay_types::chat::{ChatReply, ChatRequest};
use leadrelay_types::error::TransportError;

/// How a [`super::ConversationClient`] delivers one request to `POST /chat`.
///
/// Implementations must map non-success status codes to
/// [`TransportError::Status`]; the client never inspects HTTP details.
/// The HTTP implementation lives in leadrelay-infra (`HttpRelayTransport`).
pub trait RelayTransport: Send + Sync + 'static {
    fn send(
        &self,
        request: ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, TransportError>> + Send;
}
