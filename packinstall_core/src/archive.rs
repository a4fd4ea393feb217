use std::{
    fs::File,
    path::{Path, PathBuf},
};

use log::debug;
use zip::ZipArchive;

use crate::{error::IoResultExt, InstallResult};

/// Unpacks `archive` into `dest`, creating `dest` first. Entries that would
/// land outside `dest` are rejected by the zip reader.
pub async fn extract_zip(archive: impl AsRef<Path>, dest: impl AsRef<Path>) -> InstallResult<()> {
    let archive = archive.as_ref().to_path_buf();
    let dest = dest.as_ref().to_path_buf();
    debug!("Extracting {} to {}", archive.display(), dest.display());

    tokio::task::spawn_blocking(move || -> InstallResult<()> {
        std::fs::create_dir_all(&dest).at(&dest)?;
        let file = File::open(&archive).at(&archive)?;
        let mut zip = ZipArchive::new(file)?;
        zip.extract(&dest)?;
        Ok(())
    })
    .await?
}

/// File names of the `.zip` archives directly inside `dir`, sorted.
pub async fn list_archives(dir: impl AsRef<Path>) -> InstallResult<Vec<String>> {
    let dir = dir.as_ref();
    let mut entries = tokio::fs::read_dir(dir).await.at(dir)?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.at(dir)? {
        let name = entry.file_name().to_string_lossy().to_string();
        let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
        if is_file && name.to_lowercase().ends_with(".zip") {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Names of every entry directly inside `dir`; a missing `dir` has none.
pub async fn list_entry_names(dir: impl AsRef<Path>) -> InstallResult<Vec<String>> {
    let dir: PathBuf = dir.as_ref().to_path_buf();
    let mut entries = match tokio::fs::read_dir(&dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(crate::InstallError::io(&dir, err)),
    };
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.at(&dir)? {
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    Ok(names)
}
