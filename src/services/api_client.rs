// ============================================================================
// API CLIENT - Fetch autenticado + endpoints de la API de checklists
// ============================================================================
// Única implementación del "fetch con token": todas las pantallas pasan por aquí
// ============================================================================

use std::rc::Rc;
use crate::config::CONFIG;
use crate::error::ApiError;
use crate::models::{
    Checklist, ChecklistSubmission, Equipment, ExportFormat, LoginRequest, ReportFilter, Sector,
    TokenResponse, User, ValidationSubmission,
};
use crate::services::export::{filename_from_disposition, ExportFile};
use crate::services::navigation::{BrowserNavigator, Navigator};
use crate::services::session_store::SessionStore;
use crate::services::transport::{ApiRequest, ApiResponse, FetchTransport, Transport};
use crate::utils::constants::LOGIN_PATH;

const TOKEN_PATH: &str = "/token";
const CURRENT_USER_PATH: &str = "/users/me/";
const CHECKLISTS_PATH: &str = "/checklists/";
const PENDING_CHECKLISTS_PATH: &str = "/checklists/pending";
const SECTORS_PATH: &str = "/sectors/";
const REPORT_PATH: &str = "/reports/checklists";
const REPORT_EXPORT_PATH: &str = "/reports/checklists/export";

/// Cliente API. `T` es el transporte (fetch en el navegador).
#[derive(Clone)]
pub struct ApiClient<T = FetchTransport> {
    base_url: String,
    transport: T,
    session: SessionStore,
    navigator: Rc<dyn Navigator>,
}

impl ApiClient<FetchTransport> {
    /// Cliente del navegador: fetch + localStorage + window.location
    pub fn new() -> Self {
        Self::with_parts(
            CONFIG.api_url.clone(),
            FetchTransport,
            SessionStore::browser(),
            Rc::new(BrowserNavigator),
        )
    }
}

impl Default for ApiClient<FetchTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_parts(
        base_url: String,
        transport: T,
        session: SessionStore,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            base_url,
            transport,
            session,
            navigator,
        }
    }

    pub fn navigator(&self) -> &Rc<dyn Navigator> {
        &self.navigator
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Expulsar al login: limpiar token y redirigir
    fn force_login(&self) {
        self.session.clear();
        self.navigator.navigate(LOGIN_PATH);
    }

    /// Guardia de página: sin token se redirige al login
    pub fn ensure_session(&self) -> bool {
        if self.session.is_authenticated() {
            true
        } else {
            self.navigator.navigate(LOGIN_PATH);
            false
        }
    }

    /// Sin token → login. 401 → limpiar sesión y login. Resto: respuesta cruda.
    pub async fn fetch_with_auth(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let token = match self.session.get() {
            Some(token) => token,
            None => {
                log::warn!("⚠️ [API] Sin token para {}, redirigiendo al login", request.url);
                self.navigator.navigate(LOGIN_PATH);
                return Err(ApiError::Unauthorized);
            }
        };

        let request = request.with_header("Authorization", &format!("Bearer {}", token));
        let response = self.transport.send(request).await?;

        if response.is_unauthorized() {
            log::warn!("⚠️ [API] 401 recibido, sesión expirada");
            self.force_login();
            return Err(ApiError::Unauthorized);
        }

        Ok(response)
    }

    /// Login con credenciales form-encoded. Guarda el token recibido.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<TokenResponse, ApiError> {
        log::info!("🔐 [API] Login para usuario: {}", credentials.username);

        let request = ApiRequest::post_form(self.endpoint(TOKEN_PATH), credentials.to_form_body());
        let response = self.transport.send(request).await?;

        if !response.ok() {
            // El mensaje del login es fijo: no se expone el detalle del servidor
            return Err(ApiError::Rejected {
                status: response.status,
                detail: "Usuário ou senha inválidos.".to_string(),
            });
        }

        let token = response.json::<TokenResponse>()?;
        self.session.save(&token.access_token)?;
        Ok(token)
    }

    /// Logout explícito
    pub fn logout(&self) {
        log::info!("👋 [API] Logout");
        self.force_login();
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        let response = self
            .fetch_with_auth(ApiRequest::get(self.endpoint(CURRENT_USER_PATH)))
            .await?;
        expect_ok(response, "Erro ao carregar dados do usuário.")?.json()
    }

    pub async fn equipment_by_identifier(&self, identifier: &str) -> Result<Equipment, ApiError> {
        let url = self.endpoint(&format!(
            "/equipments/by_identifier/{}",
            urlencoding::encode(identifier)
        ));
        let response = self.fetch_with_auth(ApiRequest::get(url)).await?;
        expect_ok(response, "Equipamento não encontrado.")?.json()
    }

    /// POST del checklist. El cuerpo de la respuesta no se usa.
    pub async fn create_checklist(&self, submission: &ChecklistSubmission) -> Result<(), ApiError> {
        log::info!(
            "📝 [API] Enviando checklist: equipamento {} ({} respostas)",
            submission.equipment_id,
            submission.responses.len()
        );
        let request = ApiRequest::post_json(self.endpoint(CHECKLISTS_PATH), submission)?;
        let response = self.fetch_with_auth(request).await?;
        expect_ok(response, "Falha ao enviar o checklist.")?;
        Ok(())
    }

    pub async fn pending_checklists(&self) -> Result<Vec<Checklist>, ApiError> {
        let response = self
            .fetch_with_auth(ApiRequest::get(self.endpoint(PENDING_CHECKLISTS_PATH)))
            .await?;
        expect_ok(response, "Erro ao carregar checklists pendentes.")?.json()
    }

    pub async fn checklist(&self, checklist_id: i64) -> Result<Checklist, ApiError> {
        let url = self.endpoint(&format!("/checklists/{}", checklist_id));
        let response = self.fetch_with_auth(ApiRequest::get(url)).await?;
        expect_ok(
            response,
            "Checklist não encontrado ou você não tem permissão para vê-lo.",
        )?
        .json()
    }

    pub async fn validate_checklist(
        &self,
        checklist_id: i64,
        submission: &ValidationSubmission,
    ) -> Result<(), ApiError> {
        log::info!("✍️ [API] Validando checklist {}", checklist_id);
        let url = self.endpoint(&format!("/checklists/{}/validate", checklist_id));
        let response = self.fetch_with_auth(ApiRequest::put_json(url, submission)?).await?;
        expect_ok(response, "Falha ao validar o checklist.")?;
        Ok(())
    }

    pub async fn sectors(&self) -> Result<Vec<Sector>, ApiError> {
        let response = self
            .fetch_with_auth(ApiRequest::get(self.endpoint(SECTORS_PATH)))
            .await?;
        expect_ok(response, "Erro ao carregar setores.")?.json()
    }

    pub async fn checklist_report(&self, filter: &ReportFilter) -> Result<Vec<Checklist>, ApiError> {
        let query = filter.to_query_string();
        let url = if query.is_empty() {
            self.endpoint(REPORT_PATH)
        } else {
            self.endpoint(&format!("{}?{}", REPORT_PATH, query))
        };
        let response = self.fetch_with_auth(ApiRequest::get(url)).await?;
        expect_ok(response, "Erro ao carregar relatório.")?.json()
    }

    /// Descarga del export con cabecera Authorization; el token nunca va en la URL
    pub async fn export_report(
        &self,
        filter: &ReportFilter,
        format: ExportFormat,
    ) -> Result<ExportFile, ApiError> {
        let url = self.endpoint(&format!("{}?{}", REPORT_EXPORT_PATH, filter.export_query(format)));
        let response = self.fetch_with_auth(ApiRequest::get(url)).await?;
        let response = expect_ok(response, "Falha ao exportar o relatório.")?;

        // Sin datos, la API responde 200 con {"message": "..."} en vez del fichero
        if response.is_json() {
            return Err(ApiError::Rejected {
                status: response.status,
                detail: response
                    .detail()
                    .unwrap_or_else(|| "Nenhum dado encontrado para exportar.".to_string()),
            });
        }

        let filename = response
            .content_disposition
            .as_deref()
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| format.default_filename(chrono::Local::now().date_naive()));

        log::info!("📥 [API] Export recibido: {} ({} bytes)", filename, response.body.len());

        Ok(ExportFile {
            filename,
            mime_type: response
                .content_type
                .clone()
                .unwrap_or_else(|| format.mime_type().to_string()),
            bytes: response.body,
        })
    }
}

/// 2xx → respuesta; resto → `Rejected` con el `detail` del servidor o el fallback
fn expect_ok(response: ApiResponse, fallback: &str) -> Result<ApiResponse, ApiError> {
    if response.ok() {
        Ok(response)
    } else {
        let detail = response.detail().unwrap_or_else(|| fallback.to_string());
        log::error!("❌ [API] HTTP {}: {}", response.status, detail);
        Err(ApiError::Rejected {
            status: response.status,
            detail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use crate::services::testing::{client_with, MockTransport};
    use crate::services::transport::{HttpMethod, RequestBody};

    #[test]
    fn test_without_token_redirects_and_sends_nothing() {
        let transport = MockTransport::new();
        let (client, _, nav) = client_with(transport.clone(), None);

        let result = block_on(client.current_user());

        assert_eq!(result, Err(ApiError::Unauthorized));
        assert_eq!(transport.request_count(), 0);
        assert_eq!(nav.last_path().as_deref(), Some("/login"));
    }

    #[test]
    fn test_bearer_header_is_attached() {
        let transport = MockTransport::new();
        transport.respond_json(200, r#"[]"#);
        let (client, _, _) = client_with(transport.clone(), Some("tok-123"));

        let sectors = block_on(client.sectors()).unwrap();

        assert!(sectors.is_empty());
        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "http://api.test/sectors/");
        assert_eq!(request.header("Authorization"), Some("Bearer tok-123"));
    }

    #[test]
    fn test_unauthorized_clears_session_and_redirects() {
        let transport = MockTransport::new();
        transport.respond_json(401, r#"{"detail":"Could not validate credentials"}"#);
        let (client, store, nav) = client_with(transport.clone(), Some("expired"));

        let result = block_on(client.fetch_with_auth(ApiRequest::get("http://api.test/users/me/")));

        assert_eq!(result, Err(ApiError::Unauthorized));
        assert_eq!(store.get(), None);
        assert_eq!(nav.last_path().as_deref(), Some("/login"));
    }

    #[test]
    fn test_raw_response_is_returned_for_other_statuses() {
        let transport = MockTransport::new();
        transport.respond_json(404, r#"{"detail":"nope"}"#);
        let (client, store, nav) = client_with(transport, Some("tok"));

        let response = block_on(client.fetch_with_auth(ApiRequest::get("http://api.test/x"))).unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(store.get().as_deref(), Some("tok"));
        assert!(nav.visits().is_empty());
    }

    #[test]
    fn test_login_posts_form_and_saves_token() {
        let transport = MockTransport::new();
        transport.respond_json(200, r#"{"access_token":"new-token","token_type":"bearer"}"#);
        let (client, store, _) = client_with(transport.clone(), None);

        let credentials = LoginRequest {
            username: "ana".to_string(),
            password: "s3cret".to_string(),
        };
        let token = block_on(client.login(&credentials)).unwrap();

        assert_eq!(token.access_token, "new-token");
        assert_eq!(store.get().as_deref(), Some("new-token"));
        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "http://api.test/token");
        assert_eq!(
            request.body,
            Some(RequestBody::Form("username=ana&password=s3cret".to_string()))
        );
        assert_eq!(request.header("Authorization"), None);
    }

    #[test]
    fn test_login_failure_has_fixed_message() {
        let transport = MockTransport::new();
        transport.respond_json(401, r#"{"detail":"Incorrect username or password"}"#);
        let (client, store, nav) = client_with(transport, None);

        let credentials = LoginRequest {
            username: "ana".to_string(),
            password: "x".to_string(),
        };
        let err = block_on(client.login(&credentials)).unwrap_err();

        assert_eq!(err.to_string(), "Usuário ou senha inválidos.");
        assert_eq!(store.get(), None);
        assert!(nav.visits().is_empty());
    }

    #[test]
    fn test_server_detail_is_kept_verbatim() {
        let transport = MockTransport::new();
        transport.respond_json(404, r#"{"detail":"Equipamento com identificador xyz não existe"}"#);
        let (client, _, _) = client_with(transport, Some("tok"));

        let err = block_on(client.equipment_by_identifier("xyz")).unwrap_err();

        assert_eq!(
            err,
            ApiError::Rejected {
                status: 404,
                detail: "Equipamento com identificador xyz não existe".to_string()
            }
        );
    }

    #[test]
    fn test_generic_fallback_without_detail() {
        let transport = MockTransport::new();
        transport.respond_json(500, "Internal Server Error");
        let (client, _, _) = client_with(transport, Some("tok"));

        let err = block_on(client.checklist(9)).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Checklist não encontrado ou você não tem permissão para vê-lo."
        );
    }

    #[test]
    fn test_network_failure_is_propagated() {
        let transport = MockTransport::new();
        transport.fail_network("connection refused");
        let (client, store, _) = client_with(transport, Some("tok"));

        let err = block_on(client.pending_checklists()).unwrap_err();

        assert_eq!(err, ApiError::NetworkFailure("connection refused".to_string()));
        assert_eq!(store.get().as_deref(), Some("tok"));
    }

    #[test]
    fn test_report_query_string() {
        let transport = MockTransport::new();
        transport.respond_json(200, "[]");
        let (client, _, _) = client_with(transport.clone(), Some("tok"));

        let filter = ReportFilter::from_inputs("2024-01-01", "", "3", "").unwrap();
        block_on(client.checklist_report(&filter)).unwrap();

        assert_eq!(
            transport.last_request().unwrap().url,
            "http://api.test/reports/checklists?start_date=2024-01-01&sector_id=3"
        );
    }

    #[test]
    fn test_export_keeps_token_out_of_url() {
        let transport = MockTransport::new();
        transport.respond(ApiResponse {
            status: 200,
            content_type: Some("text/csv".to_string()),
            content_disposition: Some(
                r#"attachment; filename="relatorio_checklists_20240301.csv""#.to_string(),
            ),
            body: b"Checklist ID,Data\n1,01/03/2024".to_vec(),
        });
        let (client, _, _) = client_with(transport.clone(), Some("secret-token"));

        let filter = ReportFilter::from_inputs("2024-03-01", "", "", "").unwrap();
        let file = block_on(client.export_report(&filter, ExportFormat::Csv)).unwrap();

        assert_eq!(file.filename, "relatorio_checklists_20240301.csv");
        assert_eq!(file.mime_type, "text/csv");
        let request = transport.last_request().unwrap();
        assert_eq!(
            request.url,
            "http://api.test/reports/checklists/export?format=csv&start_date=2024-03-01"
        );
        assert!(!request.url.contains("secret-token"));
        assert_eq!(request.header("Authorization"), Some("Bearer secret-token"));
    }

    #[test]
    fn test_export_without_data_is_an_error() {
        let transport = MockTransport::new();
        let mut response = ApiResponse::new(
            200,
            r#"{"message":"Nenhum dado encontrado para exportar com os filtros selecionados."}"#,
        );
        response.content_type = Some("application/json".to_string());
        transport.respond(response);
        let (client, _, _) = client_with(transport, Some("tok"));

        let err = block_on(client.export_report(&ReportFilter::default(), ExportFormat::Xlsx))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Nenhum dado encontrado para exportar com os filtros selecionados."
        );
    }

    #[test]
    fn test_ensure_session() {
        let (client, _, nav) = client_with(MockTransport::new(), Some("tok"));
        assert!(client.ensure_session());
        assert!(nav.visits().is_empty());

        let (client, _, nav) = client_with(MockTransport::new(), None);
        assert!(!client.ensure_session());
        assert_eq!(nav.last_path().as_deref(), Some("/login"));
    }

    #[test]
    fn test_logout_clears_and_redirects() {
        let (client, store, nav) = client_with(MockTransport::new(), Some("tok"));
        client.logout();
        assert_eq!(store.get(), None);
        assert_eq!(nav.last_path().as_deref(), Some("/login"));
    }
}
