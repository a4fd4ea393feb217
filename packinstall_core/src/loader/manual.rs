use std::path::Path;

use log::info;
use reqwest::Client;
use serde::Deserialize;

use super::InstallContext;
use crate::{
    archive::extract_zip,
    download::{download_file, fetch_json},
    error::IoResultExt,
    InstallError, InstallResult,
};

/// Manifest kept by the launcher under `versions/`.
pub const MANIFEST_FILE: &str = "version_manifest_v2.json";

#[derive(Debug, Deserialize)]
pub struct VersionManifest {
    pub versions: Vec<VersionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionEntry {
    pub id: String,
    pub url: String,
}

impl VersionManifest {
    pub async fn load(path: impl AsRef<Path>) -> InstallResult<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await.at(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn find_version(&self, id: &str) -> Option<&VersionEntry> {
        self.versions.iter().find(|v| v.id == id)
    }
}

#[derive(Debug, Deserialize)]
struct VersionMetadata {
    downloads: VersionDownloads,
}

#[derive(Debug, Deserialize)]
struct VersionDownloads {
    client: DownloadArtifact,
}

#[derive(Debug, Deserialize)]
struct DownloadArtifact {
    url: String,
}

/// Builds `versions/<version_id>` by hand from the vanilla client jar plus the
/// modpack's own `version.json` and `libraries.zip`.
pub(super) async fn install(
    client: &Client,
    ctx: &InstallContext<'_>,
    version_id: &str,
    mc_version: &str,
) -> InstallResult<()> {
    info!("Installing ModLoader...");
    info!("versionId: {}, mcVersion: {}", version_id, mc_version);

    let versions_dir = ctx.minecraft_dir.join("versions");
    let version_dir = versions_dir.join(version_id);
    let libraries_dir = ctx.minecraft_dir.join("libraries");
    tokio::fs::create_dir_all(&version_dir).await.at(&version_dir)?;
    tokio::fs::create_dir_all(&libraries_dir).await.at(&libraries_dir)?;

    let manifest = VersionManifest::load(versions_dir.join(MANIFEST_FILE)).await?;
    let entry = manifest.find_version(mc_version).ok_or_else(|| {
        InstallError::ResourceNotFound(format!("Minecraft {mc_version} is not in the version manifest"))
    })?;

    let metadata: VersionMetadata = fetch_json(client, &entry.url).await?;
    let jar = version_dir.join(format!("{version_id}.jar"));
    info!("Downloading client {} -> {}", mc_version, jar.display());
    download_file(client, &metadata.downloads.client.url, &jar).await?;

    let descriptor = ctx.modpack_dir.join("version.json");
    let target = version_dir.join(format!("{version_id}.json"));
    tokio::fs::copy(&descriptor, &target).await.at(&descriptor)?;

    extract_zip(ctx.modpack_dir.join("libraries.zip"), &libraries_dir).await
}
