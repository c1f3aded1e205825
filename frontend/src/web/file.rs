//! File input reading

use synergia_shared::ImageUpload;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// First file picked in the `<input type="file">` that fired `ev`.
pub fn picked_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    let input = ev.target()?.dyn_into::<HtmlInputElement>().ok()?;
    input.files()?.get(0)
}

/// Reads the whole file into memory for the multipart upload.
pub async fn read_upload(file: web_sys::File) -> Option<ImageUpload> {
    let buffer = match JsFuture::from(file.array_buffer()).await {
        Ok(buffer) => buffer,
        Err(e) => {
            tracing::warn!("failed to read {}: {:?}", file.name(), e);
            return None;
        }
    };
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let content_type = Some(file.type_()).filter(|t| !t.is_empty());

    Some(ImageUpload {
        file_name: file.name(),
        content_type: content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
        bytes,
    })
}
