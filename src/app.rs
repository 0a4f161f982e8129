// ============================================================================
// APP - Enrutado por `location.pathname` y montaje en #app
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, require_element, set_inner_html, window, ElementBuilder};
use crate::utils::constants::{APP_ROOT_ID, HOME_PATH, LOGIN_PATH, REPORTS_PATH, SCANNER_PATH};
use crate::views::{self, Rendered};

/// Pantallas servidas por el backend (cada una es una carga de página)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Login,
    Dashboard,
    Scanner,
    ChecklistForm(String),
    Validation(i64),
    Reports,
    NotFound,
}

impl Page {
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let trimmed = if trimmed.is_empty() { HOME_PATH } else { trimmed };

        match trimmed {
            HOME_PATH => return Page::Dashboard,
            LOGIN_PATH => return Page::Login,
            SCANNER_PATH => return Page::Scanner,
            REPORTS_PATH => return Page::Reports,
            _ => {}
        }

        let segments: Vec<&str> = trimmed.trim_start_matches('/').split('/').collect();
        match segments.as_slice() {
            // `pathname` llega codificado; la API vuelve a codificar el identificador
            ["checklist", "form", identifier] if !identifier.is_empty() => {
                match urlencoding::decode(identifier) {
                    Ok(decoded) => Page::ChecklistForm(decoded.into_owned()),
                    Err(_) => Page::NotFound,
                }
            }
            ["validate", id] => id.parse().map(Page::Validation).unwrap_or(Page::NotFound),
            _ => Page::NotFound,
        }
    }
}

/// Aplicación principal
pub struct App {
    root: Element,
    page: Page,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = require_element(APP_ROOT_ID)?;
        let path = window()
            .ok_or_else(|| JsValue::from_str("No window"))?
            .location()
            .pathname()?;
        let page = Page::from_path(&path);
        log::info!("🧭 [APP] {} → {:?}", path, page);
        Ok(Self { root, page })
    }

    /// Render completo de la página actual
    pub fn render(&self) -> Result<(), JsValue> {
        let rendered: Rendered = match &self.page {
            Page::Login => views::render_login()?.into(),
            Page::Dashboard => views::render_dashboard()?.into(),
            Page::Scanner => views::render_scanner()?,
            Page::ChecklistForm(identifier) => views::render_checklist_form(identifier)?,
            Page::Validation(id) => views::render_validation(*id)?.into(),
            Page::Reports => views::render_reports()?.into(),
            Page::NotFound => not_found()?.into(),
        };

        set_inner_html(&self.root, "");
        append_child(&self.root, rendered.root())?;
        rendered.mounted();
        log::info!("✅ [APP] Página montada");
        Ok(())
    }
}

fn not_found() -> Result<Element, JsValue> {
    let container = views::layout::page_container("Página não encontrada")?;
    let link = ElementBuilder::new("a")?
        .class("btn btn-primary")
        .attr("href", HOME_PATH)?
        .text("Voltar ao início")
        .build();
    append_child(&container, &link)?;
    Ok(container)
}
