use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};
use serde::Serialize;

use crate::errors::LikeButtonError;
use crate::token::TokenProvider;
use crate::transport::{InboundResponse, OutboundRequest, Transport};

/// Every request leaving the page goes through here.
///
/// `before_send` attaches the anti-forgery header to same-origin, state-mutating requests.
/// The provider is injected once at startup and never re-read per request.
pub struct RequestLayer<T: Transport> {
    transport: T,
    tokens: Arc<TokenProvider>,
    origin: Url,
}

impl<T: Transport> RequestLayer<T> {
    pub fn new(transport: T, tokens: Arc<TokenProvider>, origin: Url) -> Self {
        Self {
            transport,
            tokens,
            origin,
        }
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolves a markup URL (usually path-only) against the page origin.
    pub fn resolve(&self, url: &str) -> Result<Url, LikeButtonError> {
        self.origin
            .join(url)
            .map_err(|e| LikeButtonError::InvalidUrl(format!("{}: {}", url, e)))
    }

    fn before_send(&self, request: &mut OutboundRequest) {
        match self
            .tokens
            .header_for(request.method.as_str(), &self.origin, &request.url)
        {
            Ok(Some((name, token))) => request.headers.push((name.to_string(), token.to_string())),
            Ok(None) => (),
            Err(e) => log::warn!("{}: sending {} {} without it", e, request.method, request.url),
        }
    }

    pub async fn send(&self, mut request: OutboundRequest) -> Result<InboundResponse, LikeButtonError> {
        self.before_send(&mut request);

        self.transport.send(request).await
    }

    pub async fn post_json<B: Serialize>(&self, url: &str, body: &B) -> Result<InboundResponse, LikeButtonError> {
        let request = OutboundRequest {
            method: Method::POST,
            url: self.resolve(url)?,
            headers: vec![(CONTENT_TYPE.to_string(), "application/json".to_string())],
            body: serde_json::to_vec(body)?,
        };

        self.send(request).await
    }
}
