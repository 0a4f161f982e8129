// ============================================================================
// DASHBOARD VIEWMODEL - Usuario actual + checklists pendientes
// ============================================================================

use crate::error::ApiError;
use crate::models::{Checklist, User, UserRole};
use crate::services::{ApiClient, FetchTransport, Transport};

/// Secciones visibles según el perfil
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DashboardSections {
    pub collaborator: bool,
    pub manager: bool,
    pub admin: bool,
}

impl DashboardSections {
    pub fn for_role(role: UserRole) -> Self {
        Self {
            collaborator: role == UserRole::Colaborador,
            manager: role.can_validate(),
            admin: role == UserRole::Administrador,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardData {
    pub user: User,
    pub sections: DashboardSections,
    pub pending: Vec<Checklist>,
    /// Error al cargar pendientes (el resto del dashboard se muestra igual)
    pub pending_error: Option<String>,
}

impl DashboardData {
    pub fn welcome(&self) -> String {
        format!("Bem-vindo, {}!", self.user.full_name)
    }

    pub fn role_line(&self) -> String {
        format!("Seu perfil é: {}", self.user.role.as_str())
    }
}

pub struct DashboardViewModel<T = FetchTransport> {
    api: ApiClient<T>,
}

impl DashboardViewModel<FetchTransport> {
    pub fn new() -> Self {
        Self::with_client(ApiClient::new())
    }
}

impl<T: Transport> DashboardViewModel<T> {
    pub fn with_client(api: ApiClient<T>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub async fn load(&self) -> Result<DashboardData, ApiError> {
        let user = self.api.current_user().await?;
        let sections = DashboardSections::for_role(user.role);
        log::info!("👤 [DASHBOARD] {} ({})", user.full_name, user.role.as_str());

        let (pending, pending_error) = if sections.manager {
            match self.api.pending_checklists().await {
                Ok(list) => (list, None),
                Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized),
                Err(e) => {
                    log::error!("❌ [DASHBOARD] Error cargando pendientes: {}", e);
                    (Vec::new(), Some(e.to_string()))
                }
            }
        } else {
            (Vec::new(), None)
        };

        Ok(DashboardData {
            user,
            sections,
            pending,
            pending_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use crate::services::testing::{client_with, MockTransport};

    const MANAGER: &str = r#"{"id":2,"username":"gil","email":"g@x.com","full_name":"Gil Souza","role":"gestor","is_active":true}"#;
    const COLLABORATOR: &str = r#"{"id":3,"username":"ana","email":"a@x.com","full_name":"Ana Lima","role":"colaborador","is_active":true}"#;

    #[test]
    fn test_sections_by_role() {
        assert_eq!(
            DashboardSections::for_role(UserRole::Colaborador),
            DashboardSections { collaborator: true, manager: false, admin: false }
        );
        assert_eq!(
            DashboardSections::for_role(UserRole::Administrador),
            DashboardSections { collaborator: false, manager: true, admin: true }
        );
    }

    #[test]
    fn test_collaborator_does_not_load_pending() {
        let transport = MockTransport::new();
        transport.respond_json(200, COLLABORATOR);
        let (client, _, _) = client_with(transport.clone(), Some("tok"));

        let data = block_on(DashboardViewModel::with_client(client).load()).unwrap();

        assert_eq!(data.welcome(), "Bem-vindo, Ana Lima!");
        assert_eq!(data.role_line(), "Seu perfil é: colaborador");
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn test_manager_loads_pending() {
        let transport = MockTransport::new();
        transport.respond_json(200, MANAGER);
        transport.respond_json(200, "[]");
        let (client, _, _) = client_with(transport.clone(), Some("tok"));

        let data = block_on(DashboardViewModel::with_client(client).load()).unwrap();

        assert!(data.sections.manager);
        assert!(data.pending.is_empty());
        assert_eq!(data.pending_error, None);
        assert_eq!(
            transport.last_request().unwrap().url,
            "http://api.test/checklists/pending"
        );
    }

    #[test]
    fn test_pending_failure_keeps_dashboard() {
        let transport = MockTransport::new();
        transport.respond_json(200, MANAGER);
        transport.respond_json(500, "{}");
        let (client, _, _) = client_with(transport, Some("tok"));

        let data = block_on(DashboardViewModel::with_client(client).load()).unwrap();

        assert_eq!(data.pending_error.as_deref(), Some("Erro ao carregar checklists pendentes."));
    }

    #[test]
    fn test_unauthorized_forces_login() {
        let transport = MockTransport::new();
        transport.respond_json(401, "{}");
        let (client, store, nav) = client_with(transport, Some("old"));

        let err = block_on(DashboardViewModel::with_client(client).load()).unwrap_err();

        assert_eq!(err, ApiError::Unauthorized);
        assert_eq!(store.get(), None);
        assert_eq!(nav.last_path().as_deref(), Some("/login"));
    }
}
