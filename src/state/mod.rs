// ============================================================================
// STATE MODULE - State Management con Rc<RefCell>
// ============================================================================

pub mod signature_state;
pub mod checklist_state;

pub use signature_state::{Point, SignatureCapture, SignatureSurface};
pub use checklist_state::ChecklistFormState;
