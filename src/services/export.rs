// ============================================================================
// EXPORT - Descarga de informes CSV/XLSX vía Blob + object URL
// ============================================================================

use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};
use crate::error::ApiError;

#[derive(Clone, PartialEq, Debug)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// `attachment; filename="x.csv"` → `x.csv`
pub fn filename_from_disposition(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').trim().to_string())
        .filter(|name| !name.is_empty() && !name.contains('/') && !name.contains('\\'))
}

/// Lanzar la descarga en el navegador con un `<a download>` temporal
pub fn trigger_download(file: &ExportFile) -> Result<(), ApiError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ApiError::Dom("No document".to_string()))?;

    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(&file.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(ApiError::from_js)?;

    let object_url = Url::create_object_url_with_blob(&blob).map_err(ApiError::from_js)?;

    let anchor = document
        .create_element("a")
        .map_err(ApiError::from_js)?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| ApiError::Dom("Element is not an anchor".to_string()))?;
    anchor.set_href(&object_url);
    anchor.set_download(&file.filename);
    anchor.click();

    if let Err(e) = Url::revoke_object_url(&object_url) {
        log::warn!("⚠️ [EXPORT] No se pudo liberar el object URL: {:?}", e);
    }

    log::info!("✅ [EXPORT] Descarga iniciada: {}", file.filename);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_disposition() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="relatorio_checklists_20240101.xlsx""#)
                .as_deref(),
            Some("relatorio_checklists_20240101.xlsx")
        );
        assert_eq!(
            filename_from_disposition("attachment;filename=r.csv").as_deref(),
            Some("r.csv")
        );
    }

    #[test]
    fn test_filename_missing_or_unsafe() {
        assert_eq!(filename_from_disposition("attachment"), None);
        assert_eq!(filename_from_disposition(r#"attachment; filename="""#), None);
        assert_eq!(filename_from_disposition(r#"attachment; filename="../x.csv""#), None);
    }
}
