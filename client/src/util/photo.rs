//! Photo upload payloads for ingredient recognition.
//!
//! [`photo_request`] is shared by the CLI and the web app; `read_file`
//! pulls the bytes out of a browser file input.

#[cfg(test)]
#[path = "photo_test.rs"]
mod photo_test;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use models::RecognizeRequest;

const FALLBACK_MIME_TYPE: &str = "image/jpeg";

/// Request body for `bytes` of an image of type `mime_type`. A blank type
/// (some browsers report none for camera captures) is sent as JPEG.
pub fn photo_request(bytes: &[u8], mime_type: &str) -> RecognizeRequest {
    let mime_type = mime_type.trim();
    RecognizeRequest {
        image_base64: BASE64.encode(bytes),
        mime_type: if mime_type.is_empty() { FALLBACK_MIME_TYPE.to_owned() } else { mime_type.to_owned() },
    }
}

/// Read a picked file into a recognition request.
///
/// # Errors
///
/// [`ClientError::Transport`] when the browser cannot read the file.
#[cfg(feature = "hydrate")]
pub async fn read_file(file: web_sys::File) -> Result<RecognizeRequest, crate::net::ClientError> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| crate::net::ClientError::Transport(format!("file read failed: {e:?}")))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(photo_request(&bytes, &file.type_()))
}
