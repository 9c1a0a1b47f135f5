//! In-memory [`HttpClient`] for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;

use super::http::{validate_response, HttpClient, HttpRequest, HttpResponse};
use crate::errors::RequestError;

/// What the mock answers with.
#[derive(Debug)]
pub(crate) enum Canned {
    Response { status: StatusCode, body: Bytes },
    TransportFailure(&'static str),
}

/// A recorded call.
#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    pub request: HttpRequest,
    pub payload: Option<Bytes>,
}

/// Replays canned responses in order and records every request it sees.
#[derive(Debug, Default)]
pub(crate) struct MockHttpClient {
    responses: Mutex<VecDeque<Canned>>,
    calls: Mutex<Vec<Recorded>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, status: u16, body: serde_json::Value) -> Self {
        self.with_body(status, serde_json::to_vec(&body).unwrap())
    }

    pub fn with_body(self, status: u16, body: impl Into<Bytes>) -> Self {
        self.responses.lock().unwrap().push_back(Canned::Response {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.into(),
        });
        self
    }

    pub fn with_transport_failure(self, message: &'static str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Canned::TransportFailure(message));
        self
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Recorded {
        self.calls().pop().expect("no request was made")
    }

    fn answer(
        &self,
        request: HttpRequest,
        payload: Option<Bytes>,
    ) -> Result<(Bytes, HttpResponse), RequestError> {
        let url = request.url.clone();
        self.calls
            .lock()
            .unwrap()
            .push(Recorded { request, payload });

        let canned = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request: no canned response left");

        match canned {
            Canned::Response { status, body } => {
                validate_response(body, HttpResponse::new(status, url))
            }
            Canned::TransportFailure(message) => Err(RequestError::transport(message)),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn fetch(&self, request: HttpRequest) -> Result<(Bytes, HttpResponse), RequestError> {
        self.answer(request, None)
    }

    async fn upload(
        &self,
        request: HttpRequest,
        payload: Bytes,
    ) -> Result<(Bytes, HttpResponse), RequestError> {
        self.answer(request, Some(payload))
    }
}
