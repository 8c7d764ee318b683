use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use crate::errors::LikeButtonError;
use crate::transport::{InboundResponse, OutboundRequest, Transport};

#[derive(Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, LikeButtonError> {
        let mut map = HeaderMap::with_capacity(headers.len());

        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| LikeButtonError::ConfigError(format!("invalid header name {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| LikeButtonError::ConfigError(format!("invalid value for header {}: {}", name, e)))?;

            map.insert(name, value);
        }

        Ok(map)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: OutboundRequest) -> Result<InboundResponse, LikeButtonError> {
        let headers = Self::header_map(&request.headers)?;

        let response = self
            .client
            .request(request.method, request.url)
            .headers(headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| {
                log::error!("Error sending toggle request: {:?}", e);
                LikeButtonError::from(e)
            })?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(InboundResponse { status, body })
    }
}
