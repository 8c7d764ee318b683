pub mod http_transport;
#[cfg(test)]
pub mod mock;

use reqwest::{Method, Url};

use crate::errors::LikeButtonError;

pub use http_transport::HttpTransport;

#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl OutboundRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct InboundResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl InboundResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network layer used by the request layer.
///
/// A transport reports only connection level problems as errors; any HTTP status, including
/// error statuses, comes back as an `InboundResponse`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: OutboundRequest) -> Result<InboundResponse, LikeButtonError>;
}
