#![allow(dead_code)]

use async_trait::async_trait;
use shimdns_application::ports::UpstreamForwarder;
use shimdns_domain::{DomainError, Transport};
use std::sync::{Arc, RwLock};

#[derive(Clone, Default)]
pub struct MockUpstreamForwarder {
    response: Arc<RwLock<Option<Vec<u8>>>>,
    error: Arc<RwLock<Option<DomainError>>>,
    calls: Arc<RwLock<Vec<(Vec<u8>, Transport)>>>,
}

impl MockUpstreamForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(response: &[u8]) -> Self {
        let mock = Self::new();
        mock.set_response(response);
        mock
    }

    pub fn set_response(&self, response: &[u8]) {
        *self.response.write().unwrap() = Some(response.to_vec());
    }

    pub fn set_error(&self, error: DomainError) {
        *self.error.write().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<(Vec<u8>, Transport)> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl UpstreamForwarder for MockUpstreamForwarder {
    async fn forward(
        &self,
        message: &[u8],
        transport: Transport,
    ) -> Result<Vec<u8>, DomainError> {
        self.calls
            .write()
            .unwrap()
            .push((message.to_vec(), transport));

        if let Some(err) = self.error.read().unwrap().clone() {
            return Err(err);
        }

        self.response
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| DomainError::upstream("mock", "no mock response configured"))
    }

    fn upstream(&self) -> String {
        "mock".to_string()
    }
}
