mod manual;

use std::path::{Path, PathBuf};

use log::info;
use reqwest::Client;

pub use manual::{VersionEntry, VersionManifest, MANIFEST_FILE};

use crate::{
    models::ModpackConfig,
    process::{JavaInvocation, JavaRunner},
    InstallResult,
};

/// Layout of the extracted `buildTools.zip`.
#[derive(Debug, Clone)]
pub struct BuildTools {
    pub root: PathBuf,
    pub java: PathBuf,
    pub forge_cli: PathBuf,
    pub fabric_installer: PathBuf,
    pub default_icon: PathBuf,
}

impl BuildTools {
    pub fn locate(root: impl Into<PathBuf>, forge_cli_jar: &str, fabric_installer_jar: &str) -> Self {
        let root = root.into();
        let java_name = if cfg!(windows) { "java.exe" } else { "java" };
        BuildTools {
            java: root.join("jre").join("bin").join(java_name),
            forge_cli: root.join(forge_cli_jar),
            fabric_installer: root.join(fabric_installer_jar),
            default_icon: root.join("icon-default.png"),
            root,
        }
    }
}

/// Everything a loader installation may touch.
pub struct InstallContext<'a> {
    /// The shared `.minecraft` installation.
    pub minecraft_dir: &'a Path,
    /// The unpacked modpack archive.
    pub modpack_dir: &'a Path,
    pub tools: &'a BuildTools,
}

/// Installs the loader a modpack declares into the shared installation.
pub struct LoaderInstaller<R: JavaRunner> {
    runner: R,
    client: Client,
}

impl<R: JavaRunner> LoaderInstaller<R> {
    pub fn new(runner: R, client: Client) -> Self {
        Self { runner, client }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub async fn install(&self, config: &ModpackConfig, ctx: &InstallContext<'_>) -> InstallResult<()> {
        match config {
            ModpackConfig::Vanilla { version_id, .. } => {
                info!("Installing Vanilla...");
                info!("versionId: {}", version_id);
                Ok(())
            }
            ModpackConfig::Forge { version_id, .. } => self.install_forge(ctx, version_id).await,
            ModpackConfig::Fabric {
                version_id,
                fabric_mc_version,
                fabric_loader_version,
                ..
            } => {
                self.install_fabric(ctx, version_id, fabric_mc_version, fabric_loader_version)
                    .await
            }
            ModpackConfig::Manual {
                version_id,
                manual_mc_version,
                ..
            } => manual::install(&self.client, ctx, version_id, manual_mc_version).await,
        }
    }

    async fn install_forge(&self, ctx: &InstallContext<'_>, version_id: &str) -> InstallResult<()> {
        info!("Installing Forge...");
        info!("versionId: {}", version_id);
        let invocation = JavaInvocation::jar("forge installer", &ctx.tools.java, &ctx.tools.forge_cli)
            .arg("--installer")
            .arg(ctx.modpack_dir.join("forge-installer.jar"))
            .arg("--target")
            .arg(ctx.minecraft_dir);
        self.runner.run(&invocation).await
    }

    async fn install_fabric(
        &self,
        ctx: &InstallContext<'_>,
        version_id: &str,
        mc_version: &str,
        loader_version: &str,
    ) -> InstallResult<()> {
        info!("Installing Fabric...");
        info!(
            "versionId: {}, mcVersion: {}, loaderVersion: {}",
            version_id, mc_version, loader_version
        );
        let invocation = JavaInvocation::jar("fabric installer", &ctx.tools.java, &ctx.tools.fabric_installer)
            .arg("client")
            .arg("-snapshot")
            .arg("-noprofile")
            .arg("-dir")
            .arg(ctx.minecraft_dir)
            .arg("-mcversion")
            .arg(mc_version)
            .arg("-loader")
            .arg(loader_version);
        self.runner.run(&invocation).await
    }
}
