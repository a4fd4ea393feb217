use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{error::IoResultExt, InstallResult};

/// First candidate that exists and is a regular file.
pub async fn pick_icon(candidates: &[&Path]) -> Option<PathBuf> {
    for candidate in candidates {
        if let Ok(metadata) = tokio::fs::metadata(candidate).await {
            if metadata.is_file() {
                return Some(candidate.to_path_buf());
            }
        }
    }
    None
}

/// Reads a PNG and returns it as a `data:` URL for the launcher.
pub async fn png_data_url(path: impl AsRef<Path>) -> InstallResult<String> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.at(path)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(bytes)))
}
