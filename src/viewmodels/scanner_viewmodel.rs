// ============================================================================
// SCANNER VIEWMODEL - Texto decodificado → identificador → formulario
// ============================================================================

use std::future::Future;
use std::rc::Rc;
use crate::error::ApiError;
use crate::services::{BrowserNavigator, Navigator};
use crate::utils::constants::checklist_form_path;

/// Último segmento del path de la URL leída (sin query, fragmento ni `/` final).
/// Un esquema suelto (`https:`) no es identificador; `urn:abc` sí.
pub fn identifier_from_decoded(decoded: &str) -> Option<String> {
    let without_fragment = decoded.split('#').next().unwrap_or_default();
    let path = without_fragment.split('?').next().unwrap_or_default();
    path.trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .map(str::trim)
        .filter(|segment| !segment.is_empty() && !segment.ends_with(':'))
        .map(str::to_string)
}

pub struct ScannerViewModel {
    navigator: Rc<dyn Navigator>,
}

impl ScannerViewModel {
    pub fn new() -> Self {
        Self::with_navigator(Rc::new(BrowserNavigator))
    }

    pub fn with_navigator(navigator: Rc<dyn Navigator>) -> Self {
        Self { navigator }
    }

    /// Ruta del formulario para un QR leído
    pub fn target_for(&self, decoded: &str) -> Result<String, ApiError> {
        identifier_from_decoded(decoded)
            .map(|id| checklist_form_path(&id))
            .ok_or_else(|| {
                ApiError::ValidationFailure(format!("QR Code inválido: {}", decoded))
            })
    }

    /// Identificador válido → parar cámara → navegar al formulario.
    /// Texto inválido o cámara que no para: error sin navegar.
    pub async fn on_decoded<S, F>(&self, decoded: &str, stop_camera: S) -> Result<String, ApiError>
    where
        S: FnOnce() -> F,
        F: Future<Output = Result<(), ApiError>>,
    {
        log::info!("📱 [SCANNER] Código leído: {}", decoded);
        let target = self.target_for(decoded)?;
        stop_camera().await?;
        self.navigator.navigate(&target);
        Ok(target)
    }
}

impl Default for ScannerViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use futures::executor::block_on;
    use crate::services::testing::RecordingNavigator;

    #[test]
    fn test_start_url_navigates_to_form() {
        let nav = Rc::new(RecordingNavigator::default());
        let vm = ScannerViewModel::with_navigator(nav.clone());

        let stopped = Cell::new(false);
        let (stopped_ref, nav_ref) = (&stopped, &nav);

        let target = block_on(vm.on_decoded(
            "https://checklist.example.com/checklist/start/abc-123",
            move || async move {
                assert!(nav_ref.visits().is_empty());
                stopped_ref.set(true);
                Ok(())
            },
        ))
        .unwrap();

        assert!(stopped.get());
        assert_eq!(target, "/checklist/form/abc-123");
        assert_eq!(nav.visits(), vec![("/checklist/form/abc-123".to_string(), None)]);
    }

    #[test]
    fn test_identifier_extraction() {
        assert_eq!(identifier_from_decoded("abc-123").as_deref(), Some("abc-123"));
        assert_eq!(
            identifier_from_decoded("https://x.com/checklist/start/abc-123/").as_deref(),
            Some("abc-123")
        );
        assert_eq!(
            identifier_from_decoded("https://x.com/checklist/start/abc-123?src=qr#top").as_deref(),
            Some("abc-123")
        );
        assert_eq!(identifier_from_decoded("urn:abc").as_deref(), Some("urn:abc"));
        assert_eq!(
            identifier_from_decoded("https://x.com/eq/urn:abc-7").as_deref(),
            Some("urn:abc-7")
        );
        assert_eq!(identifier_from_decoded("https://"), None);
        assert_eq!(identifier_from_decoded("mailto:"), None);
    }

    #[test]
    fn test_unusable_text_does_not_navigate() {
        let nav = Rc::new(RecordingNavigator::default());
        let vm = ScannerViewModel::with_navigator(nav.clone());

        let stops = Cell::new(0);
        let stops_ref = &stops;
        let count_stop = move || async move {
            stops_ref.set(stops_ref.get() + 1);
            Ok(())
        };

        assert!(block_on(vm.on_decoded("", count_stop)).is_err());
        assert!(block_on(vm.on_decoded("https://", count_stop)).is_err());
        assert!(nav.visits().is_empty());
        assert_eq!(stops.get(), 0);
    }

    #[test]
    fn test_failed_stop_stays_on_scanner() {
        let nav = Rc::new(RecordingNavigator::default());
        let vm = ScannerViewModel::with_navigator(nav.clone());

        let failing_stop = || async {
            Err::<(), _>(ApiError::Dom("Falha ao parar o scanner.".to_string()))
        };
        let err = block_on(vm.on_decoded("https://x.com/checklist/start/abc-123", failing_stop))
            .unwrap_err();

        assert_eq!(err, ApiError::Dom("Falha ao parar o scanner.".to_string()));
        assert!(nav.visits().is_empty());
    }
}
