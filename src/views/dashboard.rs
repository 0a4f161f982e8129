// ============================================================================
// DASHBOARD VIEW - Bienvenida + secciones por perfil + pendientes
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{append_child, set_inner_html, set_text_content, set_visible, ElementBuilder};
use crate::models::Checklist;
use crate::utils::constants::{validation_path, REPORTS_PATH, SCANNER_PATH};
use crate::utils::{alert_html, escape_html};
use crate::viewmodels::{DashboardData, DashboardViewModel};
use crate::views::feedback::{self, feedback_box};
use crate::views::layout::{nav_bar, page_container};

pub const NO_PENDING: &str = "Nenhum checklist pendente.";

/// Lista de pendientes como `list-group` de enlaces a la validación
pub fn pending_list_html(pending: &[Checklist]) -> String {
    if pending.is_empty() {
        return format!(r#"<p class="text-muted">{}</p>"#, NO_PENDING);
    }

    let items: String = pending
        .iter()
        .map(|c| {
            format!(
                r#"<a href="{}" class="list-group-item list-group-item-action">{} - {} <small class="text-muted">({})</small></a>"#,
                validation_path(c.id),
                escape_html(&c.equipment.name),
                escape_html(&c.collaborator.full_name),
                escape_html(&c.created_at_display()),
            )
        })
        .collect();

    format!(r#"<div class="list-group">{}</div>"#, items)
}

pub fn render_dashboard() -> Result<Element, JsValue> {
    log::info!("🎬 [DASHBOARD] render_dashboard()");

    let vm = DashboardViewModel::new();
    let container = page_container("Painel")?;
    if !vm.api().ensure_session() {
        return Ok(container);
    }

    let welcome = ElementBuilder::new("p")?.id("welcome-message")?.class("lead").text("Carregando...").build();
    let role_line = ElementBuilder::new("p")?.id("user-role")?.class("text-muted").build();

    let collaborator_section = section(
        "collaborator-section",
        "Realizar checklist",
        &format!(
            r#"<a href="{}" class="btn btn-primary">Escanear QR Code do equipamento</a>"#,
            SCANNER_PATH
        ),
    )?;
    let manager_section = section("manager-section", "Checklists pendentes de validação", "")?;
    let pending_list = ElementBuilder::new("div")?.id("pending-checklists")?.build();
    append_child(&manager_section, &pending_list)?;
    let admin_section = section(
        "admin-section",
        "Administração",
        &format!(
            r#"<a href="{}" class="btn btn-outline-primary">Relatórios de checklists</a>"#,
            REPORTS_PATH
        ),
    )?;
    let feedback_el = feedback_box("dashboard-feedback")?;

    let nav_slot = ElementBuilder::new("div")?.build();
    append_child(&container, &nav_slot)?;
    for child in [&welcome, &role_line, &collaborator_section, &manager_section, &admin_section, &feedback_el] {
        append_child(&container, child)?;
    }

    spawn_local(async move {
        match vm.load().await {
            Ok(data) => {
                if let Err(e) = fill(&data, &nav_slot, &welcome, &role_line, [&collaborator_section, &manager_section, &admin_section], &pending_list) {
                    log::error!("❌ [DASHBOARD] Error pintando: {:?}", e);
                }
            }
            Err(e) => {
                log::error!("❌ [DASHBOARD] {}", e);
                feedback::show_error(&feedback_el, &e);
            }
        }
    });

    Ok(container)
}

fn fill(
    data: &DashboardData,
    nav_slot: &Element,
    welcome: &Element,
    role_line: &Element,
    [collaborator, manager, admin]: [&Element; 3],
    pending_list: &Element,
) -> Result<(), JsValue> {
    append_child(nav_slot, &nav_bar(data.sections.manager)?)?;
    set_text_content(welcome, &data.welcome());
    set_text_content(role_line, &data.role_line());

    set_visible(collaborator, data.sections.collaborator)?;
    set_visible(manager, data.sections.manager)?;
    set_visible(admin, data.sections.admin)?;

    if data.sections.manager {
        let html = match &data.pending_error {
            Some(message) => alert_html("danger", message),
            None => pending_list_html(&data.pending),
        };
        set_inner_html(pending_list, &html);
    }
    Ok(())
}

/// Sección oculta (`d-none`) hasta conocer el perfil
fn section(id: &str, title: &str, body_html: &str) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("section")?
        .id(id)?
        .class("card card-body mb-3 d-none")
        .build();
    let heading = ElementBuilder::new("h2")?.class("h5").text(title).build();
    let body = ElementBuilder::new("div")?.html(body_html).build();
    append_child(&section, &heading)?;
    append_child(&section, &body)?;
    Ok(section)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(name: &str) -> Checklist {
        let json = format!(
            r#"{{"id":42,"equipment_id":7,"collaborator_id":3,"status":"CONCLUÍDO","created_at":"2024-05-10T14:03:22",
            "collaborator":{{"id":3,"username":"ana","full_name":"Ana Lima","role":"colaborador"}},
            "equipment":{{"id":7,"name":"{}","sector_id":1,"sector":{{"id":1,"name":"S"}}}}}}"#,
            name
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_empty_pending_message() {
        assert!(pending_list_html(&[]).contains(NO_PENDING));
    }

    #[test]
    fn test_pending_links_to_validation() {
        let html = pending_list_html(&[pending("Prensa <02>")]);
        assert!(html.contains(r#"href="/validate/42""#));
        assert!(html.contains("Prensa &lt;02&gt; - Ana Lima"));
        assert!(html.contains("10/05/2024 14:03:22"));
    }
}
