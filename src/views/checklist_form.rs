// ============================================================================
// CHECKLIST FORM VIEW - Equipo + preguntas + firma del colaborador
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement, HtmlTextAreaElement};
use crate::dom::{append_child, on_change, on_input, on_submit, set_text_content, ElementBuilder};
use crate::models::Answer;
use crate::state::{ChecklistFormState, SignatureCapture};
use crate::viewmodels::checklist_viewmodel::SUBMIT_SUCCESS;
use crate::viewmodels::ChecklistViewModel;
use crate::views::feedback::{self, feedback_box};
use crate::views::layout::{is_busy, nav_bar, page_container, set_busy};
use crate::views::signature_pad::SignaturePad;
use crate::views::Rendered;

pub fn render_checklist_form(identifier: &str) -> Result<Rendered, JsValue> {
    log::info!("🎬 [CHECKLIST] render_checklist_form({})", identifier);

    let vm = Rc::new(ChecklistViewModel::new());
    let container = page_container("Checklist")?;
    if !vm.api().ensure_session() {
        return Ok(Rendered::new(container));
    }
    append_child(&container, &nav_bar(false)?)?;

    let name_el = ElementBuilder::new("h2")?.id("equipment-name")?.class("h4").text("Carregando...").build();
    let details_el = ElementBuilder::new("p")?.id("equipment-details")?.class("text-muted").build();
    append_child(&container, &name_el)?;
    append_child(&container, &details_el)?;

    let state = ChecklistFormState::default();
    let equipment_id = Rc::new(Cell::new(None::<i64>));

    let form = ElementBuilder::new("form")?.id("checklist-form")?.attr("novalidate", "")?.build();
    let questions = ElementBuilder::new("div")?.id("questions-container")?.build();
    for (index, question) in state.questions.iter().enumerate() {
        append_child(&questions, &question_item(index, question, &state)?)?;
    }
    append_child(&form, &questions)?;

    let signature_label = ElementBuilder::new("label")?
        .class("form-label fw-bold mt-3")
        .attr("for", "signature-pad")?
        .text("Assinatura do colaborador")
        .build();
    let pad = SignaturePad::new("signature-pad")?;
    append_child(&form, &signature_label)?;
    append_child(&form, pad.element())?;
    append_child(&form, &pad.clear_button()?)?;

    let submit = ElementBuilder::new("button")?
        .id("checklist-submit")?
        .class("btn btn-success w-100 mt-4")
        .attr("type", "submit")?
        .text("Enviar checklist")
        .build();
    append_child(&form, &submit)?;

    let feedback_el = feedback_box("form-feedback")?;
    append_child(&form, &feedback_el)?;
    append_child(&container, &form)?;

    // Carga del equipo
    {
        let vm = vm.clone();
        let equipment_id = equipment_id.clone();
        let identifier = identifier.to_string();
        spawn_local(async move {
            match vm.load_equipment(&identifier).await {
                Ok(equipment) => {
                    equipment_id.set(Some(equipment.id));
                    set_text_content(&name_el, &format!("Checklist para: {}", equipment.name));
                    set_text_content(&details_el, &equipment.details_line());
                }
                Err(e) => {
                    log::error!("❌ [CHECKLIST] {}", e);
                    set_text_content(&name_el, "Erro");
                    set_text_content(&details_el, &e.to_string());
                }
            }
        });
    }

    // Envío
    {
        let pad = pad.clone();
        let submit = submit.clone();
        on_submit(&form, move || {
            if is_busy(&submit) {
                return;
            }
            feedback::clear(&feedback_el);

            // Validación síncrona: sin red si falta algo
            if let Err(e) = vm.build_submission(equipment_id.get(), &state, &pad) {
                feedback::show_error(&feedback_el, &e);
                return;
            }

            let vm = vm.clone();
            let state = state.clone();
            let pad = pad.clone();
            let submit = submit.clone();
            let feedback_el = feedback_el.clone();
            let equipment_id = equipment_id.get();
            set_busy(&submit, true);
            spawn_local(async move {
                match vm.submit(equipment_id, &state, &pad as &dyn SignatureCapture).await {
                    Ok(()) => feedback::show_success(&feedback_el, SUBMIT_SUCCESS),
                    Err(e) => {
                        log::error!("❌ [CHECKLIST] Envío fallido: {}", e);
                        feedback::show_error(&feedback_el, &e);
                        set_busy(&submit, false);
                    }
                }
            });
        })?;
    }

    // El canvas se mide una vez en el DOM
    Ok(Rendered::new(container).after_mount(move || pad.fit()))
}

/// Pregunta + radios (Sim/Não/Parcial/N/A) + comentario opcional
fn question_item(index: usize, question: &str, state: &ChecklistFormState) -> Result<Element, JsValue> {
    let name = format!("q{}", index);

    let item = ElementBuilder::new("div")?.class("question-item card card-body mb-3").build();
    let label = ElementBuilder::new("label")?
        .class("form-label fw-bold")
        .text(&format!("{}. {}", index + 1, question))
        .build();
    append_child(&item, &label)?;

    let options = ElementBuilder::new("div")?.class("mb-2").build();
    for answer in Answer::ALL {
        let radio_id = format!("{}-{}", name, answer.code());
        let wrapper = ElementBuilder::new("div")?.class("form-check form-check-inline").build();
        let radio = ElementBuilder::new("input")?
            .id(&radio_id)?
            .class("form-check-input")
            .attr("type", "radio")?
            .attr("name", &name)?
            .attr("value", answer.code())?
            .build();
        let radio_label = ElementBuilder::new("label")?
            .class("form-check-label")
            .attr("for", &radio_id)?
            .text(answer.label())
            .build();

        {
            let state = state.clone();
            let input = radio.clone();
            on_change(&radio, move |_| {
                let code = input.dyn_ref::<HtmlInputElement>().map(|i| i.value()).unwrap_or_default();
                match Answer::from_code(&code) {
                    Some(answer) => state.set_answer(index, answer),
                    None => log::warn!("⚠️ [CHECKLIST] Respuesta desconocida: {}", code),
                }
            })?;
        }

        append_child(&wrapper, &radio)?;
        append_child(&wrapper, &radio_label)?;
        append_child(&options, &wrapper)?;
    }
    append_child(&item, &options)?;

    let comment = ElementBuilder::new("textarea")?
        .id(&format!("{}-comment", name))?
        .class("form-control")
        .attr("rows", "2")?
        .attr("placeholder", "Comentário (opcional)")?
        .build();
    {
        let state = state.clone();
        let textarea = comment.clone();
        on_input(&comment, move |_| {
            if let Some(area) = textarea.dyn_ref::<HtmlTextAreaElement>() {
                state.set_comment(index, &area.value());
            }
        })?;
    }
    append_child(&item, &comment)?;

    Ok(item)
}
