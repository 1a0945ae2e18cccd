//! Job Commands
//!
//! Status updates go through fetch; deletes submit a form so the server
//! can redirect back to the board.

use wasm_bindgen::JsCast;

use crate::models::{StatusUpdate, StatusUpdateResponse};
use crate::sync::SyncError;
use super::{page::PageError, post_json};

pub async fn update_job_status(endpoint: &str, update: &StatusUpdate) -> Result<StatusUpdateResponse, SyncError> {
    log::info!("[SYNC] job {} -> {}", update.job_id, update.status);
    post_json(endpoint, update).await
}

/// Submit a POST form to the delete action. The page navigates away;
/// nothing is removed locally.
pub fn delete_job(action: &str) -> Result<(), PageError> {
    let doc = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(PageError::NoDocument)?;
    let body = doc.body().ok_or(PageError::NoDocument)?;

    let form = doc
        .create_element("form")
        .map_err(PageError::dom)?
        .dyn_into::<web_sys::HtmlFormElement>()
        .map_err(|_| PageError::Dom("form element has the wrong type".to_string()))?;
    form.set_method("POST");
    form.set_action(action);

    body.append_child(&form).map_err(PageError::dom)?;
    log::info!("[APP] submitting delete to {}", action);
    form.submit().map_err(PageError::dom)
}
