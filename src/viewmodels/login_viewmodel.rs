// ============================================================================
// LOGIN VIEWMODEL - Credenciales → token → dashboard
// ============================================================================

use crate::error::ApiError;
use crate::models::LoginRequest;
use crate::services::{ApiClient, FetchTransport, Transport};
use crate::utils::constants::HOME_PATH;

pub struct LoginViewModel<T = FetchTransport> {
    api: ApiClient<T>,
}

impl LoginViewModel<FetchTransport> {
    pub fn new() -> Self {
        Self::with_client(ApiClient::new())
    }
}

impl<T: Transport> LoginViewModel<T> {
    pub fn with_client(api: ApiClient<T>) -> Self {
        Self { api }
    }

    /// Login y redirección al dashboard
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ApiError::ValidationFailure(
                "Por favor, preencha usuário e senha.".to_string(),
            ));
        }

        let credentials = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.api.login(&credentials).await?;

        log::info!("✅ [LOGIN] Login correcto para {}", username);
        self.api.navigator().navigate(HOME_PATH);
        Ok(())
    }

    pub fn logout(&self) {
        self.api.logout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use crate::services::testing::{client_with, MockTransport};

    #[test]
    fn test_empty_fields_send_nothing() {
        let transport = MockTransport::new();
        let (client, _, nav) = client_with(transport.clone(), None);
        let vm = LoginViewModel::with_client(client);

        let err = block_on(vm.login("  ", "secret")).unwrap_err();

        assert!(matches!(err, ApiError::ValidationFailure(_)));
        assert_eq!(transport.request_count(), 0);
        assert!(nav.visits().is_empty());
    }

    #[test]
    fn test_success_saves_token_and_goes_home() {
        let transport = MockTransport::new();
        transport.respond_json(200, r#"{"access_token":"jwt","token_type":"bearer"}"#);
        let (client, store, nav) = client_with(transport, None);
        let vm = LoginViewModel::with_client(client);

        block_on(vm.login("ana", "secret")).unwrap();

        assert_eq!(store.get().as_deref(), Some("jwt"));
        assert_eq!(nav.visits(), vec![("/".to_string(), None)]);
    }

    #[test]
    fn test_bad_credentials_stay_on_page() {
        let transport = MockTransport::new();
        transport.respond_json(401, r#"{"detail":"Incorrect username or password"}"#);
        let (client, store, nav) = client_with(transport, None);
        let vm = LoginViewModel::with_client(client);

        let err = block_on(vm.login("ana", "wrong")).unwrap_err();

        assert_eq!(err.to_string(), "Usuário ou senha inválidos.");
        assert_eq!(store.get(), None);
        assert!(nav.visits().is_empty());
    }
}
