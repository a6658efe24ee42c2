//! Relay transports for the conversation client.

pub mod http;

pub use self::http::HttpRelayTransport;
