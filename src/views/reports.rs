// ============================================================================
// REPORTS VIEW - Filtros, tabla de resultados y exportación CSV/XLSX
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{append_child, field_value, on_click, on_submit, set_inner_html, set_visible, ElementBuilder};
use crate::error::ApiError;
use crate::models::{Checklist, ExportFormat, ReportFilter, Sector};
use crate::services::trigger_download;
use crate::utils::constants::validation_path;
use crate::utils::{alert_html, escape_html};
use crate::viewmodels::ReportViewModel;
use crate::views::feedback::{self, feedback_box};
use crate::views::layout::{is_busy, nav_bar, page_container, set_busy};

pub const NO_RESULTS: &str = "Nenhum resultado encontrado.";
pub const LOADING: &str = "Carregando...";

/// Tabla de resultados (o mensaje vacío)
pub fn results_table_html(rows: &[Checklist]) -> String {
    if rows.is_empty() {
        return format!(r#"<p class="text-muted">{}</p>"#, NO_RESULTS);
    }

    let body: String = rows
        .iter()
        .map(|c| {
            format!(
                r#"<tr><td>{}</td><td>{}</td><td>{}</td><td><span class="badge {}">{}</span></td><td><a href="{}" class="btn btn-sm btn-info">Ver</a></td></tr>"#,
                escape_html(&c.created_at_display()),
                escape_html(&c.equipment.name),
                escape_html(&c.collaborator.full_name),
                c.status.badge_class(),
                c.status.label(),
                validation_path(c.id),
            )
        })
        .collect();

    format!(
        r#"<table class="table table-striped table-sm"><thead><tr><th>Data</th><th>Equipamento</th><th>Colaborador</th><th>Status</th><th>Ações</th></tr></thead><tbody>{}</tbody></table>"#,
        body
    )
}

/// Filtro desde los inputs actuales del formulario
fn current_filter() -> Result<ReportFilter, ApiError> {
    ReportFilter::from_inputs(
        &field_value("start_date"),
        &field_value("end_date"),
        &field_value("sector_id"),
        &field_value("equipment_id"),
    )
}

pub fn render_reports() -> Result<Element, JsValue> {
    log::info!("🎬 [REPORTS] render_reports()");

    let vm = Rc::new(ReportViewModel::new());
    let container = page_container("Relatórios")?;
    if !vm.api().ensure_session() {
        return Ok(container);
    }
    append_child(&container, &nav_bar(true)?)?;

    let form = ElementBuilder::new("form")?.id("filters-form")?.class("row g-3 align-items-end mb-4").build();
    append_child(&form, &labeled_input("start_date", "Data inicial", "date")?)?;
    append_child(&form, &labeled_input("end_date", "Data final", "date")?)?;

    let sector_select = ElementBuilder::new("select")?
        .id("sector_id")?
        .class("form-select")
        .child(option("", "Todos os setores")?)?
        .build();
    append_child(&form, &column("sector_id", "Setor", &sector_select)?)?;
    append_child(&form, &labeled_input("equipment_id", "Equipamento (ID)", "number")?)?;

    let run_button = ElementBuilder::new("button")?
        .id("filters-submit")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .text("Gerar relatório")
        .build();
    let run_col = ElementBuilder::new("div")?.class("col-md-2").child(run_button.clone())?.build();
    append_child(&form, &run_col)?;
    append_child(&container, &form)?;

    let export_buttons = ElementBuilder::new("div")?.id("export-buttons")?.class("d-flex gap-2 mb-3 d-none").build();
    let export_csv = export_button("export-csv", "Exportar CSV")?;
    let export_xlsx = export_button("export-xlsx", "Exportar Excel")?;
    append_child(&export_buttons, &export_csv)?;
    append_child(&export_buttons, &export_xlsx)?;

    let feedback_el = feedback_box("reports-feedback")?;
    let results = ElementBuilder::new("div")?.id("results-container")?.build();
    append_child(&container, &export_buttons)?;
    append_child(&container, &feedback_el)?;
    append_child(&container, &results)?;

    // Setores
    {
        let vm = vm.clone();
        let sector_select = sector_select.clone();
        spawn_local(async move {
            match vm.sectors().await {
                Ok(sectors) => {
                    if let Err(e) = fill_sectors(&sector_select, &sectors) {
                        log::error!("❌ [REPORTS] Error pintando setores: {:?}", e);
                    }
                }
                // El filtro sigue funcionando sin la lista de setores
                Err(e) => log::warn!("⚠️ [REPORTS] Setores no disponibles: {}", e),
            }
        });
    }

    // Informe en pantalla
    {
        let vm = vm.clone();
        let feedback_el = feedback_el.clone();
        let export_buttons = export_buttons.clone();
        on_submit(&form, move || {
            if is_busy(&run_button) {
                return;
            }
            feedback::clear(&feedback_el);
            let filter = match current_filter() {
                Ok(filter) => filter,
                Err(e) => {
                    feedback::show_error(&feedback_el, &e);
                    return;
                }
            };

            set_inner_html(&results, &format!("<p>{}</p>", LOADING));
            let vm = vm.clone();
            let results = results.clone();
            let export_buttons = export_buttons.clone();
            let run_button = run_button.clone();
            set_busy(&run_button, true);
            spawn_local(async move {
                match vm.run(&filter).await {
                    Ok(rows) => {
                        set_inner_html(&results, &results_table_html(&rows));
                        if let Err(e) = set_visible(&export_buttons, !rows.is_empty()) {
                            log::warn!("⚠️ [REPORTS] Botones de exportación: {:?}", e);
                        }
                    }
                    Err(e) => {
                        log::error!("❌ [REPORTS] {}", e);
                        if let Err(e) = set_visible(&export_buttons, false) {
                            log::warn!("⚠️ [REPORTS] Botones de exportación: {:?}", e);
                        }
                        if !e.is_unauthorized() {
                            set_inner_html(&results, &alert_html("danger", &e.to_string()));
                        }
                    }
                }
                set_busy(&run_button, false);
            });
        })?;
    }

    bind_export(&export_csv, ExportFormat::Csv, vm.clone(), feedback_el.clone())?;
    bind_export(&export_xlsx, ExportFormat::Xlsx, vm, feedback_el)?;

    Ok(container)
}

/// Descarga autenticada: fetch con cabecera → Blob → `<a download>`
fn bind_export(
    button: &Element,
    format: ExportFormat,
    vm: Rc<ReportViewModel>,
    feedback_el: Element,
) -> Result<(), JsValue> {
    let target = button.clone();
    on_click(button, move |_| {
        if is_busy(&target) {
            return;
        }
        feedback::clear(&feedback_el);
        let filter = match current_filter() {
            Ok(filter) => filter,
            Err(e) => {
                feedback::show_error(&feedback_el, &e);
                return;
            }
        };

        let vm = vm.clone();
        let button = target.clone();
        let feedback_el = feedback_el.clone();
        set_busy(&button, true);
        spawn_local(async move {
            let result = match vm.export(&filter, format).await {
                Ok(file) => trigger_download(&file),
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                log::error!("❌ [REPORTS] Exportación fallida: {}", e);
                feedback::show_error(&feedback_el, &e);
            }
            set_busy(&button, false);
        });
    })
}

fn fill_sectors(select: &Element, sectors: &[Sector]) -> Result<(), JsValue> {
    for sector in sectors {
        append_child(select, &option(&sector.id.to_string(), &sector.name)?)?;
    }
    Ok(())
}

fn option(value: &str, label: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("option")?.attr("value", value)?.text(label).build())
}

fn export_button(id: &str, label: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .id(id)?
        .class("btn btn-outline-success")
        .attr("type", "button")?
        .text(label)
        .build())
}

fn labeled_input(id: &str, label: &str, input_type: &str) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .id(id)?
        .class("form-control")
        .attr("type", input_type)?
        .attr("name", id)?
        .build();
    column(id, label, &input)
}

fn column(id: &str, label: &str, control: &Element) -> Result<Element, JsValue> {
    let col = ElementBuilder::new("div")?.class("col-md-2").build();
    let label_el = ElementBuilder::new("label")?
        .class("form-label")
        .attr("for", id)?
        .text(label)
        .build();
    append_child(&col, &label_el)?;
    append_child(&col, control)?;
    Ok(col)
}
