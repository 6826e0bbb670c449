//! Browser download of generated files.

use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::types::{AppError, AppResult};

/// Offer `content` to the user as a file named `file_name`.
pub fn save_file(file_name: &str, content: &str, content_type: &str) -> AppResult<()> {
    let parts = js_sys::Array::of1(&content.into());
    let options = BlobPropertyBag::new();
    options.set_type(content_type);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|e| AppError::Browser(format!("Blob: {:?}", e)))?;

    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| AppError::Browser(format!("Object URL: {:?}", e)))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::Browser("no document".to_string()))?;
    let anchor = document
        .create_element("a")
        .map_err(|e| AppError::Browser(format!("{:?}", e)))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| AppError::Browser("not an anchor".to_string()))?;

    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    // the click has already queued the download
    let _ = Url::revoke_object_url(&url);
    Ok(())
}
