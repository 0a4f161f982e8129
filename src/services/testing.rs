// Dobles en memoria para los seams del cliente (solo tests)

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use crate::error::ApiError;
use crate::services::api_client::ApiClient;
use crate::services::navigation::Navigator;
use crate::services::session_store::{MemoryTokenStorage, SessionStore};
use crate::services::transport::{ApiRequest, ApiResponse, Transport};
use crate::state::signature_state::SignatureCapture;

/// Transport que registra peticiones y responde desde una cola
#[derive(Clone, Default)]
pub struct MockTransport {
    requests: Rc<RefCell<Vec<ApiRequest>>>,
    responses: Rc<RefCell<VecDeque<Result<ApiResponse, ApiError>>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, response: ApiResponse) {
        self.responses.borrow_mut().push_back(Ok(response));
    }

    pub fn respond_json(&self, status: u16, body: &str) {
        let mut response = ApiResponse::new(status, body);
        response.content_type = Some("application/json".to_string());
        self.respond(response);
    }

    pub fn fail_network(&self, message: &str) {
        self.responses
            .borrow_mut()
            .push_back(Err(ApiError::NetworkFailure(message.to_string())));
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.borrow().last().cloned()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::NetworkFailure("no mock response queued".to_string())))
    }
}

/// Navigator que solo anota las visitas `(path, retardo)`
#[derive(Default)]
pub struct RecordingNavigator {
    visits: RefCell<Vec<(String, Option<u32>)>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<(String, Option<u32>)> {
        self.visits.borrow().clone()
    }

    pub fn last_path(&self) -> Option<String> {
        self.visits.borrow().last().map(|(path, _)| path.clone())
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits.borrow_mut().push((path.to_string(), None));
    }

    fn navigate_after(&self, path: &str, delay_ms: u32) {
        self.visits.borrow_mut().push((path.to_string(), Some(delay_ms)));
    }
}

/// Firma fija: `None` = pad vacío
pub struct FakeSignature(pub Option<String>);

impl SignatureCapture for FakeSignature {
    fn clear(&self) {}

    fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    fn to_data_url(&self) -> Result<String, ApiError> {
        self.0
            .clone()
            .ok_or_else(|| ApiError::ValidationFailure("empty".to_string()))
    }
}

pub fn signed() -> FakeSignature {
    FakeSignature(Some("data:image/png;base64,iVBORw0KGgo=".to_string()))
}

pub fn unsigned() -> FakeSignature {
    FakeSignature(None)
}

/// Cliente con transporte simulado, token opcional y navegador registrador
pub fn client_with(
    transport: MockTransport,
    token: Option<&str>,
) -> (ApiClient<MockTransport>, SessionStore, Rc<RecordingNavigator>) {
    let session = SessionStore::new(Rc::new(MemoryTokenStorage::new()));
    if let Some(token) = token {
        session.save(token).expect("memory storage never fails");
    }
    let navigator = Rc::new(RecordingNavigator::default());
    let client = ApiClient::with_parts(
        "http://api.test".to_string(),
        transport,
        session.clone(),
        navigator.clone(),
    );
    (client, session, navigator)
}
