use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The request never produced a response: refused connection, timeout,
/// interrupted body read and the like.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &Url) -> std::result::Result<HttpResponse, TransportError>;
}
