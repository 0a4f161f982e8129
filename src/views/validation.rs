// ============================================================================
// VALIDATION VIEW - Revisión del checklist + firma del gestor
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{append_child, on_submit, set_attribute, set_inner_html, set_text_content, set_visible, ElementBuilder};
use crate::models::{Checklist, ResponseEntry};
use crate::state::SignatureCapture;
use crate::utils::{alert_html, escape_html};
use crate::viewmodels::validation_viewmodel::VALIDATE_SUCCESS;
use crate::viewmodels::ValidationViewModel;
use crate::views::feedback::{self, feedback_box};
use crate::views::layout::{is_busy, nav_bar, page_container, set_busy};
use crate::views::signature_pad::SignaturePad;

/// Respuestas en modo lectura
pub fn responses_html(responses: &[ResponseEntry]) -> String {
    responses
        .iter()
        .map(|r| {
            let comment = r
                .comment
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(|c| format!(r#"<p class="mb-0 text-muted"><em>Comentário: {}</em></p>"#, escape_html(c)))
                .unwrap_or_default();
            format!(
                r#"<div class="p-2 border-bottom"><p class="mb-1"><strong>{}</strong></p><p class="mb-1"><strong>Resposta:</strong> {}</p>{}</div>"#,
                escape_html(&r.question),
                r.answer.label(),
                comment
            )
        })
        .collect()
}

pub fn render_validation(checklist_id: i64) -> Result<Element, JsValue> {
    log::info!("🎬 [VALIDATION] render_validation({})", checklist_id);

    let vm = Rc::new(ValidationViewModel::new());
    let container = page_container("Validação de checklist")?;
    if !vm.api().ensure_session() {
        return Ok(container);
    }
    append_child(&container, &nav_bar(true)?)?;

    let loading = ElementBuilder::new("div")?.id("loading-state")?.text("Carregando...").build();
    let content = ElementBuilder::new("div")?.id("checklist-content")?.class("d-none").build();
    append_child(&container, &loading)?;
    append_child(&container, &content)?;

    let info = ElementBuilder::new("dl")?.class("row").build();
    let equipment_el = info_field(&info, "Equipamento", "info-equipment")?;
    let location_el = info_field(&info, "Setor / Local", "info-location")?;
    let collaborator_el = info_field(&info, "Colaborador", "info-collaborator")?;
    let date_el = info_field(&info, "Data", "info-date")?;
    append_child(&content, &info)?;

    let signature_img = ElementBuilder::new("img")?
        .id("collaborator-signature")?
        .class("img-fluid border rounded mb-3")
        .attr("alt", "Assinatura do colaborador")?
        .build();
    let responses = ElementBuilder::new("div")?.id("responses-container")?.class("mb-4").build();
    append_child(&content, &signature_img)?;
    append_child(&content, &responses)?;

    let form = ElementBuilder::new("form")?.id("validation-form")?.attr("novalidate", "")?.build();
    let pad_label = ElementBuilder::new("label")?
        .class("form-label fw-bold")
        .attr("for", "manager-signature-pad")?
        .text("Assinatura do gestor")
        .build();
    let pad = SignaturePad::new("manager-signature-pad")?;
    let submit = ElementBuilder::new("button")?
        .id("validation-submit")?
        .class("btn btn-success w-100 mt-3")
        .attr("type", "submit")?
        .text("Validar checklist")
        .build();
    let feedback_el = feedback_box("form-feedback")?;
    append_child(&form, &pad_label)?;
    append_child(&form, pad.element())?;
    append_child(&form, &pad.clear_button()?)?;
    append_child(&form, &submit)?;
    append_child(&form, &feedback_el)?;
    append_child(&content, &form)?;

    // Carga
    {
        let vm = vm.clone();
        let pad = pad.clone();
        spawn_local(async move {
            match vm.load(checklist_id).await {
                Ok(checklist) => {
                    let fields = InfoFields {
                        equipment: &equipment_el,
                        location: &location_el,
                        collaborator: &collaborator_el,
                        date: &date_el,
                        signature: &signature_img,
                        responses: &responses,
                    };
                    if let Err(e) = fill(&checklist, fields) {
                        log::error!("❌ [VALIDATION] Error pintando: {:?}", e);
                    }
                    let shown = set_visible(&loading, false).and_then(|_| set_visible(&content, true));
                    if let Err(e) = shown {
                        log::warn!("⚠️ [VALIDATION] No se pudo mostrar el checklist: {:?}", e);
                    }
                    // El canvas solo tiene tamaño real una vez visible
                    pad.fit();
                }
                Err(e) if e.is_unauthorized() => {}
                Err(e) => {
                    log::error!("❌ [VALIDATION] {}", e);
                    set_inner_html(&loading, &alert_html("danger", &e.to_string()));
                }
            }
        });
    }

    // Envío
    {
        let submit = submit.clone();
        on_submit(&form, move || {
            if is_busy(&submit) {
                return;
            }
            feedback::clear(&feedback_el);

            // submit() valida la firma antes de tocar la red
            let vm = vm.clone();
            let pad = pad.clone();
            let submit = submit.clone();
            let feedback_el = feedback_el.clone();
            set_busy(&submit, true);
            spawn_local(async move {
                match vm.submit(checklist_id, &pad as &dyn SignatureCapture).await {
                    Ok(()) => feedback::show_success(&feedback_el, VALIDATE_SUCCESS),
                    Err(e) => {
                        log::error!("❌ [VALIDATION] Validación fallida: {}", e);
                        feedback::show_error(&feedback_el, &e);
                        set_busy(&submit, false);
                    }
                }
            });
        })?;
    }

    Ok(container)
}

struct InfoFields<'a> {
    equipment: &'a Element,
    location: &'a Element,
    collaborator: &'a Element,
    date: &'a Element,
    signature: &'a Element,
    responses: &'a Element,
}

fn fill(checklist: &Checklist, fields: InfoFields<'_>) -> Result<(), JsValue> {
    set_text_content(fields.equipment, &checklist.equipment.name);
    set_text_content(fields.location, &checklist.equipment.place_line());
    set_text_content(fields.collaborator, &checklist.collaborator.full_name);
    set_text_content(fields.date, &checklist.created_at_display());
    if let Some(src) = checklist.collaborator_signature.as_deref() {
        set_attribute(fields.signature, "src", src)?;
    }
    set_inner_html(fields.responses, &responses_html(&checklist.responses));
    Ok(())
}

/// `<dt>label</dt><dd id=..></dd>`; devuelve el `<dd>`
fn info_field(list: &Element, label: &str, id: &str) -> Result<Element, JsValue> {
    let term = ElementBuilder::new("dt")?.class("col-sm-3").text(label).build();
    let value = ElementBuilder::new("dd")?.id(id)?.class("col-sm-9").build();
    append_child(list, &term)?;
    append_child(list, &value)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Answer;

    #[test]
    fn test_responses_html_escapes_and_skips_empty_comment() {
        let html = responses_html(&[
            ResponseEntry {
                question: "Há vazamentos?".to_string(),
                answer: Answer::Nao,
                comment: Some("<script>x</script>".to_string()),
            },
            ResponseEntry {
                question: "Q2".to_string(),
                answer: Answer::NaoSeAplica,
                comment: None,
            },
        ]);

        assert!(html.contains("<strong>Resposta:</strong> Não"));
        assert!(html.contains("Comentário: &lt;script&gt;x&lt;/script&gt;"));
        assert!(html.contains("<strong>Resposta:</strong> N/A"));
        assert_eq!(html.matches("Comentário").count(), 1);
    }
}
