// ============================================================================
// REPORT VIEWMODEL - Filtros, informe en pantalla y exportación
// ============================================================================

use crate::error::ApiError;
use crate::models::{Checklist, ExportFormat, ReportFilter, Sector};
use crate::services::{ApiClient, ExportFile, FetchTransport, Transport};

pub struct ReportViewModel<T = FetchTransport> {
    api: ApiClient<T>,
}

impl ReportViewModel<FetchTransport> {
    pub fn new() -> Self {
        Self::with_client(ApiClient::new())
    }
}

impl<T: Transport> ReportViewModel<T> {
    pub fn with_client(api: ApiClient<T>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub async fn sectors(&self) -> Result<Vec<Sector>, ApiError> {
        self.api.sectors().await
    }

    pub async fn run(&self, filter: &ReportFilter) -> Result<Vec<Checklist>, ApiError> {
        let rows = self.api.checklist_report(filter).await?;
        log::info!("📊 [REPORTS] {} checklists en el informe", rows.len());
        Ok(rows)
    }

    pub async fn export(
        &self,
        filter: &ReportFilter,
        format: ExportFormat,
    ) -> Result<ExportFile, ApiError> {
        log::info!("📤 [REPORTS] Exportando {}", format.as_param());
        self.api.export_report(filter, format).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use crate::services::testing::{client_with, MockTransport};

    #[test]
    fn test_sectors_are_decoded() {
        let transport = MockTransport::new();
        transport.respond_json(200, r#"[{"id":1,"name":"Estamparia"},{"id":2,"name":"Pintura"}]"#);
        let (client, _, _) = client_with(transport, Some("tok"));

        let sectors = block_on(ReportViewModel::with_client(client).sectors()).unwrap();

        assert_eq!(sectors.len(), 2);
        assert_eq!(sectors[1].name, "Pintura");
    }

    #[test]
    fn test_report_failure_message() {
        let transport = MockTransport::new();
        transport.respond_json(500, "{}");
        let (client, _, _) = client_with(transport, Some("tok"));

        let err = block_on(ReportViewModel::with_client(client).run(&ReportFilter::default()))
            .unwrap_err();

        assert_eq!(err.to_string(), "Erro ao carregar relatório.");
    }

    #[test]
    fn test_unauthorized_forces_login() {
        let transport = MockTransport::new();
        transport.respond_json(401, "{}");
        let (client, store, nav) = client_with(transport, Some("tok"));

        let err = block_on(ReportViewModel::with_client(client).run(&ReportFilter::default()))
            .unwrap_err();

        assert_eq!(err, ApiError::Unauthorized);
        assert_eq!(store.get(), None);
        assert_eq!(nav.last_path().as_deref(), Some("/login"));
    }

    #[test]
    fn test_export_unauthorized_forces_login() {
        let transport = MockTransport::new();
        transport.respond_json(401, "{}");
        let (client, store, nav) = client_with(transport, Some("tok"));

        let result = block_on(
            ReportViewModel::with_client(client).export(&ReportFilter::default(), ExportFormat::Csv),
        );

        assert_eq!(result, Err(ApiError::Unauthorized));
        assert_eq!(store.get(), None);
        assert_eq!(nav.last_path().as_deref(), Some("/login"));
    }
}
