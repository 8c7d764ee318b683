use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;
use tokio::sync::Semaphore;

use crate::errors::LikeButtonError;
use crate::transport::{InboundResponse, OutboundRequest, Transport};

pub enum MockReply {
    Json(u16, Value),
    Raw(u16, &'static str),
    NetworkFailure,
}

/// Scripted transport. Records every request it is handed and answers from a queue.
///
/// A held transport parks each request until `release` hands out a permit, which keeps the
/// caller inside its pending window for as long as a test needs.
#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<OutboundRequest>>,
    replies: Mutex<VecDeque<MockReply>>,
    gate: Option<Semaphore>,
}

impl MockTransport {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        }
    }

    pub fn held(replies: Vec<MockReply>) -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new(replies)
        }
    }

    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: OutboundRequest) -> Result<InboundResponse, LikeButtonError> {
        self.requests.lock().unwrap().push(request);

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        let reply = self.replies.lock().unwrap().pop_front();

        match reply {
            Some(MockReply::Json(status, body)) => Ok(InboundResponse {
                status,
                body: serde_json::to_vec(&body).unwrap(),
            }),
            Some(MockReply::Raw(status, body)) => Ok(InboundResponse {
                status,
                body: body.as_bytes().to_vec(),
            }),
            Some(MockReply::NetworkFailure) | None => {
                Err(LikeButtonError::NetworkFailure("connection refused".to_string()))
            }
        }
    }
}
