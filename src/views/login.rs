// ============================================================================
// LOGIN VIEW - Formulario de acceso
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{append_child, field_value, on_submit, ElementBuilder};
use crate::viewmodels::LoginViewModel;
use crate::views::feedback::{self, feedback_box};
use crate::views::layout::{is_busy, page_container, set_busy};

/// Renderizar vista de login
pub fn render_login() -> Result<Element, JsValue> {
    log::info!("🎬 [LOGIN] render_login()");

    let container = page_container("Checklist de Equipamentos")?;

    let form = ElementBuilder::new("form")?
        .id("login-form")?
        .class("card card-body mx-auto")
        .attr("style", "max-width: 420px;")?
        .attr("novalidate", "")?
        .build();

    append_child(&form, &input_group("username", "Usuário", "text", "username")?)?;
    append_child(&form, &input_group("password", "Senha", "password", "current-password")?)?;

    let submit = ElementBuilder::new("button")?
        .id("login-submit")?
        .class("btn btn-primary w-100")
        .attr("type", "submit")?
        .text("Entrar")
        .build();
    append_child(&form, &submit)?;

    let feedback_el = feedback_box("login-feedback")?;
    append_child(&form, &feedback_el)?;

    {
        let submit = submit.clone();
        on_submit(&form, move || {
            if is_busy(&submit) {
                return;
            }
            let username = field_value("username");
            let password = field_value("password");
            let submit = submit.clone();
            let feedback_el = feedback_el.clone();

            feedback::clear(&feedback_el);
            set_busy(&submit, true);
            spawn_local(async move {
                if let Err(e) = LoginViewModel::new().login(&username, &password).await {
                    log::warn!("⚠️ [LOGIN] {}", e);
                    feedback::show_error(&feedback_el, &e);
                    set_busy(&submit, false);
                }
            });
        })?;
    }

    append_child(&container, &form)?;
    Ok(container)
}

fn input_group(id: &str, label: &str, input_type: &str, autocomplete: &str) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?.class("mb-3").build();

    let label_el = ElementBuilder::new("label")?
        .class("form-label")
        .attr("for", id)?
        .text(label)
        .build();

    let input = ElementBuilder::new("input")?
        .id(id)?
        .class("form-control")
        .attr("type", input_type)?
        .attr("name", id)?
        .attr("autocomplete", autocomplete)?
        .attr("required", "")?
        .build();

    append_child(&group, &label_el)?;
    append_child(&group, &input)?;
    Ok(group)
}
