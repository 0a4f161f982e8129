// ============================================================================
// SESSION STORE - Bearer token persistido (save / get / clear)
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use crate::error::ApiError;
use crate::utils::constants::TOKEN_STORAGE_KEY;
use crate::utils::storage;

/// Almacenamiento clave/valor donde vive el token
pub trait TokenStorage {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), ApiError>;
    fn remove(&self, key: &str) -> Result<(), ApiError>;
}

/// `window.localStorage`
#[derive(Clone, Copy, Default)]
pub struct LocalTokenStorage;

impl TokenStorage for LocalTokenStorage {
    fn read(&self, key: &str) -> Option<String> {
        storage::read_item(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), ApiError> {
        storage::write_item(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), ApiError> {
        storage::remove_item(key)
    }
}

/// Almacenamiento en memoria (tests y navegadores sin localStorage)
#[derive(Default)]
pub struct MemoryTokenStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), ApiError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ApiError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Única fuente del token para todas las pantallas
#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn TokenStorage>,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn TokenStorage>) -> Self {
        Self { storage }
    }

    /// localStorage; sin él (modo privado estricto) la sesión dura lo que la página
    pub fn browser() -> Self {
        if storage::get_local_storage().is_some() {
            Self::new(Rc::new(LocalTokenStorage))
        } else {
            log::warn!("⚠️ [SESSION] localStorage no disponible, sesión en memoria");
            Self::new(Rc::new(MemoryTokenStorage::new()))
        }
    }

    pub fn save(&self, token: &str) -> Result<(), ApiError> {
        self.storage.write(TOKEN_STORAGE_KEY, token)?;
        log::info!("🔐 [SESSION] Token guardado");
        Ok(())
    }

    /// Un valor vacío cuenta como "sin sesión"
    pub fn get(&self) -> Option<String> {
        self.storage
            .read(TOKEN_STORAGE_KEY)
            .filter(|token| !token.trim().is_empty())
    }

    pub fn clear(&self) {
        match self.storage.remove(TOKEN_STORAGE_KEY) {
            Ok(()) => log::info!("🗑️ [SESSION] Sesión limpiada"),
            Err(e) => log::error!("❌ [SESSION] Error limpiando sesión: {}", e),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}
