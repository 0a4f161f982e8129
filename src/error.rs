// ============================================================================
// ERRORES - Taxonomía única para todas las pantallas
// ============================================================================

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Sin token o respuesta 401. La sesión ya fue limpiada y se redirigió al login.
    #[error("Sessão expirada. Faça login novamente.")]
    Unauthorized,

    #[error("Falha de rede: {0}")]
    NetworkFailure(String),

    /// Validación en cliente: nunca se llegó a enviar nada
    #[error("{0}")]
    ValidationFailure(String),

    /// Respuesta no-2xx; `detail` es el texto del servidor o el fallback de la pantalla
    #[error("{detail}")]
    Rejected { status: u16, detail: String },

    #[error("Resposta inválida do servidor: {0}")]
    Decode(String),

    #[error("Erro de armazenamento: {0}")]
    Storage(String),

    #[error("Erro do navegador: {0}")]
    Dom(String),
}

impl ApiError {
    /// Convertir un error JS (Promise rechazada, llamada web_sys fallida)
    pub fn from_js(value: JsValue) -> Self {
        ApiError::Dom(js_error_text(&value))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        ApiError::NetworkFailure(e.to_string())
    }
}

/// Texto legible de un JsValue (string, Error.message o Debug)
pub fn js_error_text(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Ok(message) = js_sys::Reflect::get(value, &JsValue::from_str("message")) {
        if let Some(s) = message.as_string() {
            return s;
        }
    }
    format!("{:?}", value)
}
