// ============================================================================
// SIGNATURE PAD - Canvas de firma (pointer events + devicePixelRatio)
// ============================================================================
// SignatureSurface lleva la cuenta de trazos; aquí solo se pinta.
// ============================================================================

use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, PointerEvent};
use crate::config::CONFIG;
use crate::dom::{on_click, on_pointer, on_window_resize, window, ElementBuilder};
use crate::error::ApiError;
use crate::state::{Point, SignatureCapture, SignatureSurface};

/// Alto CSS del canvas si el layout aún no lo ha medido
const FALLBACK_HEIGHT: f64 = 200.0;
const FALLBACK_WIDTH: f64 = 300.0;

#[derive(Clone)]
pub struct SignaturePad {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    surface: Rc<RefCell<SignatureSurface>>,
}

impl SignaturePad {
    /// Crear el canvas con sus listeners. Llamar a `fit()` una vez montado en el DOM.
    pub fn new(canvas_id: &str) -> Result<Self, JsValue> {
        let canvas = ElementBuilder::new("canvas")?
            .id(canvas_id)?
            .class("signature-pad border rounded bg-white")
            .attr("style", "width: 100%; height: 200px; touch-action: none;")?
            .build()
            .dyn_into::<HtmlCanvasElement>()?;

        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Canvas 2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let pad = Self {
            canvas,
            context,
            surface: Rc::new(RefCell::new(SignatureSurface::new(
                FALLBACK_WIDTH,
                FALLBACK_HEIGHT,
                1.0,
            ))),
        };
        pad.bind_pointer_events()?;

        {
            let pad = pad.clone();
            on_window_resize(move |_| pad.fit())?;
        }

        Ok(pad)
    }

    pub fn element(&self) -> &Element {
        &self.canvas
    }

    /// Ajustar el backing store al tamaño mostrado × devicePixelRatio. Borra la firma.
    pub fn fit(&self) {
        let ratio = window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        let width = measured(self.canvas.offset_width(), FALLBACK_WIDTH);
        let height = measured(self.canvas.offset_height(), FALLBACK_HEIGHT);

        let (backing_w, backing_h) = self.surface.borrow_mut().resize(width, height, ratio);
        // Cambiar width/height resetea bitmap y estado del contexto
        self.canvas.set_width(backing_w);
        self.canvas.set_height(backing_h);

        let ratio = self.surface.borrow().pixel_ratio();
        if let Err(e) = self.context.scale(ratio, ratio) {
            log::warn!("⚠️ [SIGNATURE] No se pudo escalar el canvas: {:?}", e);
        }
        self.apply_pen();
        log::debug!("✍️ [SIGNATURE] Canvas {}x{} (ratio {})", backing_w, backing_h, ratio);
    }

    /// Botón "Limpar" enlazado a este pad
    pub fn clear_button(&self) -> Result<Element, JsValue> {
        let button = ElementBuilder::new("button")?
            .class("btn btn-outline-secondary btn-sm mt-2")
            .attr("type", "button")?
            .text("Limpar assinatura")
            .build();

        let pad = self.clone();
        on_click(&button, move |_| pad.clear())?;
        Ok(button)
    }

    fn apply_pen(&self) {
        let pen = &CONFIG.signature;
        self.context.set_stroke_style_str(&pen.pen_color);
        self.context.set_fill_style_str(&pen.pen_color);
        self.context.set_line_width(pen.pen_width);
        self.context.set_line_cap("round");
        self.context.set_line_join("round");
    }

    fn bind_pointer_events(&self) -> Result<(), JsValue> {
        {
            let pad = self.clone();
            on_pointer(&self.canvas, "pointerdown", move |e: PointerEvent| {
                e.prevent_default();
                if let Err(err) = pad.canvas.set_pointer_capture(e.pointer_id()) {
                    log::warn!("⚠️ [SIGNATURE] Pointer capture: {:?}", err);
                }
                let at = event_point(&e);
                pad.surface.borrow_mut().begin_stroke(at);
                pad.draw_dot(at);
            })?;
        }
        {
            let pad = self.clone();
            on_pointer(&self.canvas, "pointermove", move |e: PointerEvent| {
                if !pad.surface.borrow().is_drawing() {
                    return;
                }
                let segment = pad.surface.borrow_mut().extend_stroke(event_point(&e));
                if let Some((from, to)) = segment {
                    e.prevent_default();
                    pad.draw_segment(from, to);
                }
            })?;
        }
        for event_type in ["pointerup", "pointerleave", "pointercancel"] {
            let pad = self.clone();
            on_pointer(&self.canvas, event_type, move |_e: PointerEvent| {
                pad.surface.borrow_mut().end_stroke();
            })?;
        }
        Ok(())
    }

    fn draw_segment(&self, from: Point, to: Point) {
        self.context.begin_path();
        self.context.move_to(from.x, from.y);
        self.context.line_to(to.x, to.y);
        self.context.stroke();
    }

    fn draw_dot(&self, at: Point) {
        self.context.begin_path();
        let radius = CONFIG.signature.pen_width / 2.0;
        if self.context.arc(at.x, at.y, radius, 0.0, 2.0 * PI).is_ok() {
            self.context.fill();
        }
    }
}

impl SignatureCapture for SignaturePad {
    fn clear(&self) {
        self.context.save();
        if let Err(e) = self.context.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0) {
            log::warn!("⚠️ [SIGNATURE] set_transform: {:?}", e);
        }
        self.context.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
        self.context.restore();
        self.surface.borrow_mut().clear();
    }

    fn is_empty(&self) -> bool {
        self.surface.borrow().is_empty()
    }

    fn to_data_url(&self) -> Result<String, ApiError> {
        log::debug!("✍️ [SIGNATURE] Exportando {} trazos", self.surface.borrow().stroke_count());
        self.canvas.to_data_url().map_err(ApiError::from_js)
    }
}

fn event_point(e: &PointerEvent) -> Point {
    Point::new(f64::from(e.offset_x()), f64::from(e.offset_y()))
}

fn measured(px: i32, fallback: f64) -> f64 {
    if px > 0 {
        f64::from(px)
    } else {
        fallback
    }
}
