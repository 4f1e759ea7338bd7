//! Stub upstream used by use case tests. Counts calls and records prompts.

use crate::domain::{Credential, DomainError, Prompt};
use crate::ports::{GenerativeTextPort, UpstreamConnector};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn credential() -> Credential {
    Credential::from_optional(Some("test-key".to_string())).unwrap()
}

struct StubState {
    reply: Result<String, String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

#[derive(Clone)]
pub struct StubUpstream(Arc<StubState>);

impl StubUpstream {
    pub fn returning(text: &str) -> Self {
        Self::with_reply(Ok(text.to_string()))
    }

    /// Every call fails with `DomainError::Upstream(detail)`.
    pub fn failing(detail: &str) -> Self {
        Self::with_reply(Err(detail.to_string()))
    }

    fn with_reply(reply: Result<String, String>) -> Self {
        Self(Arc::new(StubState {
            reply,
            delay: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }))
    }

    /// Must be called before the stub is shared.
    pub fn with_delay(self, delay: Duration) -> Self {
        let state = Arc::try_unwrap(self.0).unwrap_or_else(|_| panic!("stub already shared"));
        Self(Arc::new(StubState {
            delay: Some(delay),
            ..state
        }))
    }

    pub fn calls(&self) -> usize {
        self.0.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.0.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl GenerativeTextPort for StubUpstream {
    fn model(&self) -> &str {
        "stub"
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, DomainError> {
        self.0.calls.fetch_add(1, Ordering::SeqCst);
        self.0
            .prompts
            .lock()
            .unwrap()
            .push(prompt.as_str().to_string());
        if let Some(delay) = self.0.delay {
            tokio::time::sleep(delay).await;
        }
        self.0.reply.clone().map_err(DomainError::Upstream)
    }
}

pub struct StubConnector {
    upstream: StubUpstream,
    refuse: bool,
    connects: AtomicUsize,
    last_model: Mutex<Option<String>>,
}

impl StubConnector {
    pub fn new(upstream: &StubUpstream) -> Arc<Self> {
        Arc::new(Self {
            upstream: upstream.clone(),
            refuse: false,
            connects: AtomicUsize::new(0),
            last_model: Mutex::new(None),
        })
    }

    /// Connector whose `connect` always fails.
    pub fn refusing(upstream: &StubUpstream) -> Arc<Self> {
        Arc::new(Self {
            upstream: upstream.clone(),
            refuse: true,
            connects: AtomicUsize::new(0),
            last_model: Mutex::new(None),
        })
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn last_model(&self) -> Option<String> {
        self.last_model.lock().unwrap().clone()
    }
}

impl UpstreamConnector for StubConnector {
    fn connect(
        &self,
        _credential: &Credential,
        model: &str,
    ) -> Result<Arc<dyn GenerativeTextPort>, DomainError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        *self.last_model.lock().unwrap() = Some(model.to_string());
        if self.refuse {
            return Err(DomainError::Upstream("client build failed".to_string()));
        }
        Ok(Arc::new(self.upstream.clone()))
    }
}
