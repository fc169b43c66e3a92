//! Asset fetching. Everything is awaited so startup fails instead of hanging
//! when a request or decode goes wrong.

use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Response};

use crate::crop::Bitmap;
use crate::error::{RefractError, Result};

fn load_error(uri: &str, reason: impl Into<String>) -> RefractError {
    RefractError::Load {
        uri: uri.to_string(),
        reason: reason.into(),
    }
}

async fn fetch(uri: &str) -> Result<Response> {
    let window = window().ok_or("no window")?;
    let response = JsFuture::from(window.fetch_with_str(uri))
        .await
        .map_err(|e| load_error(uri, format!("{:?}", e)))?;
    let response: Response = response.dyn_into()?;
    if !response.ok() {
        return Err(load_error(
            uri,
            format!("HTTP {} {}", response.status(), response.status_text()),
        ));
    }
    Ok(response)
}

/// Fetches and decodes an image into an RGBA bitmap.
pub async fn load_bitmap(uri: &str) -> Result<Bitmap> {
    let response = fetch(uri).await?;
    let body = JsFuture::from(response.array_buffer()?)
        .await
        .map_err(|e| load_error(uri, format!("{:?}", e)))?;
    let bytes = Uint8Array::new(&body).to_vec();
    let bitmap = Bitmap::decode(uri, &bytes)?;
    log::debug!("loaded {uri} ({}x{})", bitmap.width(), bitmap.height());
    Ok(bitmap)
}

/// Fetches a text resource such as shader source.
pub async fn fetch_text(uri: &str) -> Result<String> {
    let response = fetch(uri).await?;
    let text = JsFuture::from(response.text()?)
        .await
        .map_err(|e| load_error(uri, format!("{:?}", e)))?;
    text.as_string()
        .ok_or_else(|| load_error(uri, "response body is not text"))
}
