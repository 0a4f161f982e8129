// Utils compartidos

pub mod constants;
pub mod storage;
pub mod html;
pub mod qr_ffi;

pub use html::{alert_html, escape_html};
