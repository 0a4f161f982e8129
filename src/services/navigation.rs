use gloo_timers::callback::Timeout;

/// Cambios de página. Cada pantalla es una página servida por el backend.
pub trait Navigator {
    fn navigate(&self, path: &str);

    /// Navegar tras un retardo (confirmaciones de envío)
    fn navigate_after(&self, path: &str, delay_ms: u32);
}

/// `window.location.href = path`
#[derive(Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        log::info!("➡️ [NAV] Navegando a {}", path);
        let result = web_sys::window()
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("No window"))
            .and_then(|win| win.location().set_href(path));
        if let Err(e) = result {
            log::error!("❌ [NAV] No se pudo navegar a {}: {:?}", path, e);
        }
    }

    fn navigate_after(&self, path: &str, delay_ms: u32) {
        let path = path.to_string();
        Timeout::new(delay_ms, move || {
            BrowserNavigator.navigate(&path);
        })
        .forget();
    }
}
