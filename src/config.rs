//! Board Configuration
//!
//! Optional settings embedded by the page. Every field has a default, so
//! a page without a config element behaves like the stock job tracker.

use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// POST target for status updates
    pub update_endpoint: String,
    /// Prefix for delete form actions, the job id is appended
    pub delete_endpoint: String,
    /// Delay between a failure toast and the full reload
    pub reload_delay_ms: u32,
    pub toast_ms: u32,
    pub log_level: String,
    /// Elements that never start a drag on touch-capable devices
    pub touch_cancel: String,
    pub mouse_cancel: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            update_endpoint: "/update_job_status".to_string(),
            delete_endpoint: "/delete_job".to_string(),
            reload_delay_ms: 2000,
            toast_ms: 4000,
            log_level: "info".to_string(),
            touch_cancel: "input,textarea,button,select,option,.btn".to_string(),
            mouse_cancel: "input,button".to_string(),
        }
    }
}

impl BoardConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Unknown level names fall back to `info`
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    pub fn delete_url(&self, job_id: u32) -> String {
        format!("{}/{}", self.delete_endpoint.trim_end_matches('/'), job_id)
    }
}
