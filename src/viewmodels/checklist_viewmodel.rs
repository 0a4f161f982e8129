// ============================================================================
// CHECKLIST VIEWMODEL - Validación + payload + envío del checklist
// ============================================================================

use crate::config::CONFIG;
use crate::error::ApiError;
use crate::models::{ChecklistSubmission, Equipment};
use crate::services::{ApiClient, FetchTransport, Transport};
use crate::state::{ChecklistFormState, SignatureCapture};
use crate::utils::constants::HOME_PATH;

pub const SUBMIT_SUCCESS: &str = "Checklist enviado com sucesso! Redirecionando...";

pub struct ChecklistViewModel<T = FetchTransport> {
    api: ApiClient<T>,
    redirect_delay_ms: u32,
}

impl ChecklistViewModel<FetchTransport> {
    pub fn new() -> Self {
        Self::with_client(ApiClient::new(), CONFIG.redirect_delay_ms)
    }
}

impl<T: Transport> ChecklistViewModel<T> {
    pub fn with_client(api: ApiClient<T>, redirect_delay_ms: u32) -> Self {
        Self {
            api,
            redirect_delay_ms,
        }
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub async fn load_equipment(&self, identifier: &str) -> Result<Equipment, ApiError> {
        log::info!("🔍 [CHECKLIST] Cargando equipo: {}", identifier);
        self.api.equipment_by_identifier(identifier).await
    }

    /// Payload listo para enviar; falla sin tocar la red si falta algo
    pub fn build_submission(
        &self,
        equipment_id: Option<i64>,
        form: &ChecklistFormState,
        signature: &dyn SignatureCapture,
    ) -> Result<ChecklistSubmission, ApiError> {
        let equipment_id = equipment_id.ok_or_else(|| {
            ApiError::ValidationFailure("Equipamento não carregado.".to_string())
        })?;

        let responses = form.responses()?;

        if signature.is_empty() {
            return Err(ApiError::ValidationFailure(
                "Por favor, forneça sua assinatura.".to_string(),
            ));
        }

        Ok(ChecklistSubmission {
            equipment_id,
            collaborator_signature: signature.to_data_url()?,
            responses,
        })
    }

    /// Envío único. Éxito → vuelta al dashboard tras el retardo configurado.
    pub async fn submit(
        &self,
        equipment_id: Option<i64>,
        form: &ChecklistFormState,
        signature: &dyn SignatureCapture,
    ) -> Result<(), ApiError> {
        let submission = self.build_submission(equipment_id, form, signature)?;
        self.api.create_checklist(&submission).await?;

        log::info!("✅ [CHECKLIST] Checklist enviado");
        self.api
            .navigator()
            .navigate_after(HOME_PATH, self.redirect_delay_ms);
        Ok(())
    }
}
