// ============================================================================
// LAYOUT - Contenedor de página, barra de navegación, botones ocupados
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, on_click, ElementBuilder};
use crate::utils::constants::{HOME_PATH, REPORTS_PATH, SCANNER_PATH};
use crate::viewmodels::LoginViewModel;

/// `<div class="container">` con título
pub fn page_container(title: &str) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .class("container py-4")
        .build();

    let heading = ElementBuilder::new("h1")?
        .class("h3 mb-4")
        .text(title)
        .build();

    append_child(&container, &heading)?;
    Ok(container)
}

/// Barra superior para páginas autenticadas
pub fn nav_bar(show_reports: bool) -> Result<Element, JsValue> {
    let nav = ElementBuilder::new("nav")?
        .class("navbar navbar-light bg-light px-3 mb-3")
        .build();

    let links = ElementBuilder::new("div")?.class("d-flex gap-3").build();
    append_child(&links, &nav_link(HOME_PATH, "Início")?)?;
    append_child(&links, &nav_link(SCANNER_PATH, "Escanear")?)?;
    if show_reports {
        append_child(&links, &nav_link(REPORTS_PATH, "Relatórios")?)?;
    }

    append_child(&nav, &links)?;
    append_child(&nav, &logout_button()?)?;
    Ok(nav)
}

fn nav_link(href: &str, label: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("a")?
        .class("nav-link")
        .attr("href", href)?
        .text(label)
        .build())
}

/// Cerrar sesión: borra el token y vuelve al login
pub fn logout_button() -> Result<Element, JsValue> {
    let button = ElementBuilder::new("button")?
        .id("logout-button")?
        .class("btn btn-outline-danger btn-sm")
        .attr("type", "button")?
        .text("Sair")
        .build();

    on_click(&button, move |_| {
        log::info!("👋 [LOGOUT] Cerrando sesión");
        LoginViewModel::new().logout();
    })?;

    Ok(button)
}

/// Deshabilitar un botón mientras hay una petición en vuelo
pub fn set_busy(button: &Element, busy: bool) {
    let result = if busy {
        button.set_attribute("disabled", "")
    } else {
        button.remove_attribute("disabled")
    };
    if let Err(e) = result {
        log::warn!("⚠️ [LAYOUT] No se pudo cambiar estado del botón: {:?}", e);
    }
}

pub fn is_busy(button: &Element) -> bool {
    button.has_attribute("disabled")
}
