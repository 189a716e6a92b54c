// Level layout loading for the session bootstrap.

use crate::domain::SessionLayout;
use crate::interface_adapters::protocol::LayoutDto;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read level file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("level file {path} is not a valid layout: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Reads a JSON layout with `{x, y}` vectors.
pub fn load_layout(path: &Path) -> Result<SessionLayout, LayoutError> {
    let text = std::fs::read_to_string(path).map_err(|source| LayoutError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let dto: LayoutDto = serde_json::from_str(&text).map_err(|source| LayoutError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(dto.into())
}
