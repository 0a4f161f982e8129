// ============================================================================
// QR SCANNER FFI - Bindings a Html5Qrcode (html5-qrcode.min.js)
// ============================================================================
// Sin estado, sin lógica: la librería debe estar cargada en la página
// ============================================================================

use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    pub type Html5Qrcode;

    #[wasm_bindgen(constructor, catch)]
    pub fn new(element_id: &str) -> Result<Html5Qrcode, JsValue>;

    /// Devuelve una Promise que se rechaza si la cámara no arranca
    #[wasm_bindgen(method, catch)]
    pub fn start(
        this: &Html5Qrcode,
        camera: &JsValue,
        config: &JsValue,
        on_success: &js_sys::Function,
    ) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, catch)]
    pub fn stop(this: &Html5Qrcode) -> Result<js_sys::Promise, JsValue>;
}

/// `{ facingMode: "environment" }`
#[derive(Serialize)]
pub struct CameraConstraints {
    #[serde(rename = "facingMode")]
    pub facing_mode: &'static str,
}

impl CameraConstraints {
    pub fn rear() -> Self {
        Self { facing_mode: "environment" }
    }
}

#[derive(Serialize)]
pub struct QrBox {
    pub width: u32,
    pub height: u32,
}

/// `{ fps, qrbox: { width, height } }`
#[derive(Serialize)]
pub struct ScanConfig {
    pub fps: u32,
    pub qrbox: QrBox,
}

impl ScanConfig {
    pub fn square(fps: u32, side: u32) -> Self {
        Self {
            fps,
            qrbox: QrBox { width: side, height: side },
        }
    }
}
