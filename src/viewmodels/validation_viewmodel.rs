// ============================================================================
// VALIDATION VIEWMODEL - Revisión y contrafirma del gestor
// ============================================================================

use crate::config::CONFIG;
use crate::error::ApiError;
use crate::models::{Checklist, ValidationSubmission};
use crate::services::{ApiClient, FetchTransport, Transport};
use crate::state::SignatureCapture;
use crate::utils::constants::HOME_PATH;

pub const VALIDATE_SUCCESS: &str = "Checklist validado com sucesso! Redirecionando...";

pub struct ValidationViewModel<T = FetchTransport> {
    api: ApiClient<T>,
    redirect_delay_ms: u32,
}

impl ValidationViewModel<FetchTransport> {
    pub fn new() -> Self {
        Self::with_client(ApiClient::new(), CONFIG.redirect_delay_ms)
    }
}

impl<T: Transport> ValidationViewModel<T> {
    pub fn with_client(api: ApiClient<T>, redirect_delay_ms: u32) -> Self {
        Self {
            api,
            redirect_delay_ms,
        }
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub async fn load(&self, checklist_id: i64) -> Result<Checklist, ApiError> {
        log::info!("📋 [VALIDATION] Cargando checklist {}", checklist_id);
        self.api.checklist(checklist_id).await
    }

    pub async fn submit(
        &self,
        checklist_id: i64,
        signature: &dyn SignatureCapture,
    ) -> Result<(), ApiError> {
        if signature.is_empty() {
            return Err(ApiError::ValidationFailure(
                "Por favor, forneça sua assinatura para validar.".to_string(),
            ));
        }

        let submission = ValidationSubmission {
            manager_signature: signature.to_data_url()?,
        };
        self.api.validate_checklist(checklist_id, &submission).await?;

        log::info!("✅ [VALIDATION] Checklist {} validado", checklist_id);
        self.api
            .navigator()
            .navigate_after(HOME_PATH, self.redirect_delay_ms);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use crate::services::testing::{client_with, signed, unsigned, MockTransport};
    use crate::services::transport::HttpMethod;

    #[test]
    fn test_empty_signature_sends_nothing() {
        let transport = MockTransport::new();
        let (client, _, _) = client_with(transport.clone(), Some("tok"));
        let vm = ValidationViewModel::with_client(client, 2000);

        let err = block_on(vm.submit(42, &unsigned())).unwrap_err();

        assert!(matches!(err, ApiError::ValidationFailure(_)));
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_signed_validation_puts_once() {
        let transport = MockTransport::new();
        transport.respond_json(200, r#"{"id":42}"#);
        let (client, _, nav) = client_with(transport.clone(), Some("tok"));
        let vm = ValidationViewModel::with_client(client, 1500);

        block_on(vm.submit(42, &signed())).unwrap();

        assert_eq!(transport.request_count(), 1);
        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.url, "http://api.test/checklists/42/validate");
        let payload: ValidationSubmission =
            serde_json::from_str(request.body.unwrap().as_str()).unwrap();
        assert!(payload.manager_signature.starts_with("data:image/png;base64,"));
        assert_eq!(nav.visits(), vec![("/".to_string(), Some(1500))]);
    }

    #[test]
    fn test_rejection_uses_fallback() {
        let transport = MockTransport::new();
        transport.respond_json(403, "{}");
        let (client, _, nav) = client_with(transport, Some("tok"));
        let vm = ValidationViewModel::with_client(client, 2000);

        let err = block_on(vm.submit(42, &signed())).unwrap_err();

        assert_eq!(err.to_string(), "Falha ao validar o checklist.");
        assert!(nav.visits().is_empty());
    }

    #[test]
    fn test_unauthorized_forces_login() {
        let transport = MockTransport::new();
        transport.respond_json(401, "{}");
        let (client, store, nav) = client_with(transport, Some("tok"));
        let vm = ValidationViewModel::with_client(client, 2000);

        assert_eq!(block_on(vm.load(42)).unwrap_err(), ApiError::Unauthorized);
        assert_eq!(store.get(), None);
        assert_eq!(nav.last_path().as_deref(), Some("/login"));
    }
}
