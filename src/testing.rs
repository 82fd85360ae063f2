// Test doubles shared by the unit tests of services, state and viewmodels

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::services::{ApiError, ApiRequest, ApiResponse, HttpTransport};
use crate::utils::storage::{StorageError, TokenStorage};

enum Scripted {
    Reply(ApiResponse),
    Fail(ApiError),
    Gated(oneshot::Receiver<()>, ApiResponse),
}

/// Transport answering from a FIFO script and recording every request
#[derive(Default)]
pub struct MockTransport {
    script: RefCell<VecDeque<Scripted>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: serde_json::Value) {
        self.respond_raw(status, &body.to_string());
    }

    pub fn respond_raw(&self, status: u16, body: &str) {
        self.script.borrow_mut().push_back(Scripted::Reply(ApiResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn fail(&self, error: ApiError) {
        self.script.borrow_mut().push_back(Scripted::Fail(error));
    }

    /// Reply held back until the returned sender fires (or is dropped)
    pub fn respond_when_released(&self, status: u16, body: serde_json::Value) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.script.borrow_mut().push_back(Scripted::Gated(
            gate,
            ApiResponse {
                status,
                body: body.to_string(),
            },
        ));
        release
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        let next = self.script.borrow_mut().pop_front();
        match next {
            Some(Scripted::Reply(response)) => Ok(response),
            Some(Scripted::Fail(error)) => Err(error),
            Some(Scripted::Gated(gate, response)) => {
                let _ = gate.await;
                Ok(response)
            }
            None => Err(ApiError::Network("no scripted response".into())),
        }
    }
}

#[derive(Default)]
pub struct MemoryTokenStorage {
    token: RefCell<Option<String>>,
    fail_writes: bool,
}

impl MemoryTokenStorage {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_string())),
            fail_writes: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            token: RefCell::new(None),
            fail_writes: true,
        }
    }

    pub fn stored(&self) -> Option<String> {
        self.token.borrow().clone()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable);
        }
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.token.borrow_mut() = None;
        Ok(())
    }
}

pub fn record_json(id: &str, name: &str, sur_name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "email": format!("{}@example.com", name.to_lowercase()),
        "name": name,
        "surName": sur_name,
        "fullName": format!("{} {}", name, sur_name),
        "employment": "unemployed",
        "userAgreement": false
    })
}
