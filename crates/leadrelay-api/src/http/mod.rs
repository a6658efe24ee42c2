//! HTTP layer: the `/chat` relay endpoint, health check, and static site.

pub mod error;
pub mod handlers;
pub mod router;
