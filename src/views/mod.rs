// ============================================================================
// VIEWS - Funciones de renderizado (sin lógica de negocio)
// ============================================================================

use web_sys::Element;

pub mod feedback;
pub mod layout;
pub mod signature_pad;
pub mod login;
pub mod dashboard;
pub mod checklist_form;
pub mod validation;
pub mod reports;
pub mod scanner;

pub use login::render_login;
pub use dashboard::render_dashboard;
pub use checklist_form::render_checklist_form;
pub use validation::render_validation;
pub use reports::render_reports;
pub use scanner::render_scanner;

/// Raíz de una página + trabajo pendiente para cuando ya esté en el DOM
pub struct Rendered {
    root: Element,
    after_mount: Option<Box<dyn FnOnce()>>,
}

impl Rendered {
    pub fn new(root: Element) -> Self {
        Self { root, after_mount: None }
    }

    pub fn after_mount<F: FnOnce() + 'static>(mut self, f: F) -> Self {
        self.after_mount = Some(Box::new(f));
        self
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Llamar justo después de insertar `root` en el documento
    pub fn mounted(self) {
        if let Some(f) = self.after_mount {
            f();
        }
    }
}

impl From<Element> for Rendered {
    fn from(root: Element) -> Self {
        Self::new(root)
    }
}
