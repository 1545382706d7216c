use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::models::wrapped::WrappedRow;

/// What `GET /w/:id` should serve for a lookup result.
#[derive(Debug, PartialEq, Eq)]
pub enum ResolvedContent {
    /// Pre-rendered file under the public directory.
    StaticFile(PathBuf),
    /// Stored HTML blob.
    Inline(String),
    /// Row exists but carries neither a usable static path nor content.
    MissingContent,
    /// No row with this id.
    MissingWrapped,
}

/// A static path wins over inline content. Static paths are resolved below
/// `public_dir`; one that would escape it is ignored.
pub fn resolve_content(wrapped: Option<WrappedRow>, public_dir: &Path) -> ResolvedContent {
    let Some(wrapped) = wrapped else {
        return ResolvedContent::MissingWrapped;
    };

    if let Some(static_path) = wrapped.static_path.as_deref() {
        match join_public(public_dir, static_path) {
            Some(path) => return ResolvedContent::StaticFile(path),
            None => warn!(
                "Ignoring static_path {static_path:?} of wrapped {}: outside public dir",
                wrapped.id
            ),
        }
    }

    match wrapped.html_content {
        Some(html) if !html.is_empty() => ResolvedContent::Inline(html),
        _ => ResolvedContent::MissingContent,
    }
}

fn join_public(public_dir: &Path, static_path: &str) -> Option<PathBuf> {
    let relative = Path::new(static_path.trim_start_matches('/'));
    let mut components = relative.components().peekable();
    components.peek()?;
    if !components.all(|c| matches!(c, Component::Normal(_))) {
        return None;
    }
    Some(public_dir.join(relative))
}
