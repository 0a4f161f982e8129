// ============================================================================
// SCANNER VIEW - Lector QR (Html5Qrcode, cámara trasera)
// ============================================================================
// Html5Qrcode busca su contenedor por id: `start_scanner` va después de montar.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{append_child, ElementBuilder};
use crate::error::{js_error_text, ApiError};
use crate::services::ApiClient;
use crate::utils::qr_ffi::{CameraConstraints, Html5Qrcode, ScanConfig};
use crate::viewmodels::ScannerViewModel;
use crate::views::feedback::{self, feedback_box};
use crate::views::layout::{nav_bar, page_container};
use crate::views::Rendered;

pub const READER_ID: &str = "qr-reader";
const STATUS_ID: &str = "scanner-status";

pub fn render_scanner() -> Result<Rendered, JsValue> {
    log::info!("🎬 [SCANNER] render_scanner()");

    let container = page_container("Escanear equipamento")?;
    append_child(&container, &nav_bar(false)?)?;

    let hint = ElementBuilder::new("p")?
        .class("text-muted")
        .text("Aponte a câmera para o QR Code do equipamento.")
        .build();
    let reader = ElementBuilder::new("div")?
        .id(READER_ID)?
        .class("mx-auto")
        .attr("style", "max-width: 500px;")?
        .build();

    let status = feedback_box(STATUS_ID)?;
    append_child(&container, &hint)?;
    append_child(&container, &reader)?;
    append_child(&container, &status)?;
    Ok(Rendered::new(container).after_mount(move || start_scanner(status)))
}

/// Arrancar la cámara sobre `#qr-reader` (ya montado)
fn start_scanner(status: Element) {
    if !ApiClient::new().ensure_session() {
        return;
    }

    let scanner = match Html5Qrcode::new(READER_ID) {
        Ok(scanner) => Rc::new(scanner),
        Err(e) => {
            show_camera_error(&status, &e);
            return;
        }
    };

    let vm = Rc::new(ScannerViewModel::new());
    let handled = Rc::new(Cell::new(false));

    let on_success = {
        let scanner = scanner.clone();
        let status = status.clone();
        Closure::wrap(Box::new(move |decoded: String| {
            // La librería sigue llamando mientras la cámara está abierta
            if handled.replace(true) {
                return;
            }
            let scanner = scanner.clone();
            let status = status.clone();
            let handled = handled.clone();
            let vm = vm.clone();
            spawn_local(async move {
                let (status_ref, scanner_ref, text) = (&status, &*scanner, decoded.as_str());
                let stop = move || async move {
                    feedback::show_success(status_ref, &format!("QR Code lido: {}", text));
                    stop_camera(scanner_ref).await
                };
                if let Err(e) = vm.on_decoded(&decoded, stop).await {
                    log::warn!("⚠️ [SCANNER] {}", e);
                    feedback::show_error(&status, &e);
                    handled.set(false);
                }
            });
        }) as Box<dyn FnMut(String)>)
    };

    let camera = serde_wasm_bindgen::to_value(&CameraConstraints::rear());
    let config = serde_wasm_bindgen::to_value(&ScanConfig::square(CONFIG.scanner.fps, CONFIG.scanner.qrbox));
    let (camera, config) = match (camera, config) {
        (Ok(camera), Ok(config)) => (camera, config),
        (Err(e), _) | (_, Err(e)) => {
            log::error!("❌ [SCANNER] Config inválida: {}", e);
            return;
        }
    };

    let started = scanner.start(&camera, &config, on_success.as_ref().unchecked_ref());
    // Html5Qrcode conserva el callback mientras escanea
    on_success.forget();

    spawn_local(async move {
        let result = match started {
            Ok(promise) => JsFuture::from(promise).await.map(|_| ()),
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => {
                log::info!("📷 [SCANNER] Cámara iniciada");
                feedback::show_info(&status, "Procurando QR Code...");
            }
            Err(e) => show_camera_error(&status, &e),
        }
    });
}

/// Si la cámara no para, la página se queda en el scanner
async fn stop_camera(scanner: &Html5Qrcode) -> Result<(), ApiError> {
    let result = match scanner.stop() {
        Ok(promise) => JsFuture::from(promise).await.map(|_| ()),
        Err(e) => Err(e),
    };
    result.map_err(|e| {
        log::warn!("⚠️ [SCANNER] Error parando la cámara: {}", js_error_text(&e));
        ApiError::Dom("Falha ao parar o scanner.".to_string())
    })
}

/// Error de cámara tal cual lo da el navegador
fn show_camera_error(status: &Element, error: &JsValue) {
    let message = js_error_text(error);
    log::error!("❌ [SCANNER] Cámara: {}", message);
    feedback::show_error(
        status,
        &ApiError::Dom(format!("Erro ao iniciar a câmera: {}", message)),
    );
}
