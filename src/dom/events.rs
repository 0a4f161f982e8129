// ============================================================================
// EVENT HANDLING - Listeners con Closure + forget()
// ============================================================================
// Listeners en elementos: el navegador los limpia al destruir el elemento.
// Listeners en window: registrar UNA sola vez por página.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, MouseEvent, PointerEvent};

fn listen<E, F>(target: &EventTarget, event_type: &str, mut handler: F) -> Result<(), JsValue>
where
    E: JsCast,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(move |e: Event| {
        handler(e.unchecked_into::<E>());
    }) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    listen(element, "click", handler)
}

/// Submit con `prevent_default` ya aplicado
pub fn on_submit<F>(form: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    listen(form, "submit", move |e: Event| {
        e.prevent_default();
        handler();
    })
}

pub fn on_change<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    listen(element, "change", handler)
}

pub fn on_input<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    listen(element, "input", handler)
}

/// pointerdown / pointermove / pointerup / pointerleave ...
pub fn on_pointer<F>(element: &Element, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(PointerEvent) + 'static,
{
    listen(element, event_type, handler)
}

pub fn on_window_resize<F>(handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let win = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    listen(&win, "resize", handler)
}
