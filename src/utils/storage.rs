use web_sys::{window, Storage};
use crate::error::ApiError;

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

fn require_local_storage() -> Result<Storage, ApiError> {
    get_local_storage().ok_or_else(|| ApiError::Storage("localStorage indisponível".to_string()))
}

/// Leer un valor; errores de acceso se tratan como "sin valor"
pub fn read_item(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

pub fn write_item(key: &str, value: &str) -> Result<(), ApiError> {
    require_local_storage()?
        .set_item(key, value)
        .map_err(|_| ApiError::Storage(format!("não foi possível gravar '{}'", key)))
}

pub fn remove_item(key: &str) -> Result<(), ApiError> {
    require_local_storage()?
        .remove_item(key)
        .map_err(|_| ApiError::Storage(format!("não foi possível remover '{}'", key)))
}
