//! Conversation persistence for `--history`

use anyhow::{Context, Result};
use parley_core::Conversation;
use std::fs;
use std::path::Path;

/// Read a saved conversation; a missing file starts a new one
pub fn load(path: &Path) -> Result<Conversation> {
    if !path.exists() {
        return Ok(Conversation::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read history from '{}'", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("'{}' is not a saved conversation", path.display()))
}

pub fn save(path: &Path, conversation: &Conversation) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(conversation)?;
    fs::write(path, json).with_context(|| format!("Failed to write history to '{}'", path.display()))
}
