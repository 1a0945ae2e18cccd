//! Page Bindings
//!
//! Embedded JSON documents and page-level navigation.

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::config::BoardConfig;
use crate::models::BoardSnapshot;

/// Element holding the board snapshot
pub const BOARD_DATA_ID: &str = "board-data";
/// Optional element holding `BoardConfig`
pub const BOARD_CONFIG_ID: &str = "board-config";

#[derive(Debug, Error)]
pub enum PageError {
    #[error("no document available")]
    NoDocument,
    #[error("missing #{0} element")]
    MissingElement(String),
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("DOM error: {0}")]
    Dom(String),
}

impl PageError {
    pub(crate) fn dom(err: JsValue) -> Self {
        PageError::Dom(format!("{:?}", err))
    }
}

/// Text of an embedded `<script type="application/json">`, if present
pub fn read_embedded_json(id: &str) -> Result<Option<String>, PageError> {
    let doc = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(PageError::NoDocument)?;
    Ok(doc.get_element_by_id(id).and_then(|el| el.text_content()))
}

pub fn load_board_snapshot() -> Result<BoardSnapshot, PageError> {
    let text = read_embedded_json(BOARD_DATA_ID)?
        .ok_or_else(|| PageError::MissingElement(BOARD_DATA_ID.to_string()))?;
    Ok(serde_json::from_str(&text)?)
}

/// Config from the page; a missing element means defaults
pub fn load_config() -> Result<BoardConfig, PageError> {
    match read_embedded_json(BOARD_CONFIG_ID)? {
        Some(text) => Ok(BoardConfig::from_json(&text)?),
        None => Ok(BoardConfig::default()),
    }
}

/// Discard all client state and fetch the board again
pub fn reload_page() {
    log::info!("[APP] reloading board");
    if let Some(win) = web_sys::window() {
        if let Err(e) = win.location().reload() {
            log::error!("[APP] reload failed: {:?}", e);
        }
    }
}
