//! Server and Page Bindings
//!
//! Wrappers around the job tracker's HTTP endpoints and the host page.

mod job;
mod page;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::sync::SyncError;

// Re-export all public items
pub use job::*;
pub use page::*;

fn transport(err: JsValue) -> SyncError {
    SyncError::Transport(format!("{:?}", err))
}

/// POST a JSON body and decode the JSON reply.
/// Non-2xx statuses count as transport failures.
async fn post_json<B, R>(url: &str, body: &B) -> Result<R, SyncError>
where
    B: Serialize,
    R: DeserializeOwned,
{
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::SameOrigin);

    let headers = Headers::new().map_err(transport)?;
    headers.set("Content-Type", "application/json").map_err(transport)?;
    opts.set_headers(&headers);

    let body = serde_json::to_string(body).map_err(|e| SyncError::Decode(e.to_string()))?;
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(url, &opts).map_err(transport)?;
    let window = web_sys::window().ok_or_else(|| SyncError::Transport("no window".to_string()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await.map_err(transport)?;
    let resp: Response = resp_value.dyn_into().map_err(transport)?;

    if !resp.ok() {
        return Err(SyncError::Transport(format!("HTTP {}", resp.status())));
    }

    let json = JsFuture::from(resp.json().map_err(transport)?)
        .await
        .map_err(|e| SyncError::Decode(format!("{:?}", e)))?;
    serde_wasm_bindgen::from_value(json).map_err(|e| SyncError::Decode(e.to_string()))
}
