// ============================================================================
// FEEDBACK - Zona de alertas bootstrap de cada página
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{set_inner_html, ElementBuilder};
use crate::error::ApiError;
use crate::utils::alert_html;

pub fn feedback_box(id: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .id(id)?
        .class("feedback mt-3")
        .attr("role", "alert")?
        .build())
}

pub fn show_success(target: &Element, text: &str) {
    set_inner_html(target, &alert_html("success", text));
}

pub fn show_info(target: &Element, text: &str) {
    set_inner_html(target, &alert_html("info", text));
}

/// Unauthorized no se pinta: la redirección al login ya está en marcha
pub fn show_error(target: &Element, error: &ApiError) {
    if error.is_unauthorized() {
        return;
    }
    set_inner_html(target, &alert_html("danger", &error.to_string()));
}

pub fn clear(target: &Element) {
    set_inner_html(target, "");
}
