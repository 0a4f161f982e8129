/// Clave de localStorage donde vive el bearer token
pub const TOKEN_STORAGE_KEY: &str = "accessToken";

// Rutas de páginas (servidas por el backend, todas montan la misma app WASM)
pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
pub const SCANNER_PATH: &str = "/scanner";
pub const REPORTS_PATH: &str = "/reports";

/// Id del contenedor donde se monta la app
pub const APP_ROOT_ID: &str = "app";

pub fn checklist_form_path(identifier: &str) -> String {
    format!("/checklist/form/{}", identifier)
}

pub fn validation_path(checklist_id: i64) -> String {
    format!("/validate/{}", checklist_id)
}
