use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use chrono::Utc;
use log::{debug, info};
use uuid::Uuid;

use crate::{
    archive::{extract_zip, list_entry_names},
    error::IoResultExt,
    icon::{pick_icon, png_data_url},
    loader::{BuildTools, InstallContext, LoaderInstaller},
    models::{ModpackConfig, ProfileRecord},
    naming::{allocate_dir_name, allocate_name},
    operator::{select_modpack, Operator},
    process::JavaRunner,
    registry::ProfileRegistry,
    settings::InstallSettings,
    InstallError, InstallResult, ModpackKind,
};

/// Progress of a single installation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    Init,
    ToolsExtracted,
    ModpackSelected,
    ModpackUnpacked,
    ConfigParsed,
    LoaderInstalled,
    NameAllocated,
    RegistryUpdated,
    GameDirInitialized,
    Done,
    Failed,
}

/// What the operator is told once the profile exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub profile_id: String,
    pub profile_name: String,
    pub game_dir: PathBuf,
    pub kind: ModpackKind,
}

/// Drives one modpack installation from archive selection to the new
/// profile's initialised game directory.
pub struct Orchestrator<R: JavaRunner, O: Operator> {
    settings: InstallSettings,
    loader: LoaderInstaller<R>,
    operator: O,
    preselected: Option<PathBuf>,
    run_id: Uuid,
    state: InstallState,
}

impl<R: JavaRunner, O: Operator> Orchestrator<R, O> {
    pub fn new(settings: InstallSettings, loader: LoaderInstaller<R>, operator: O) -> Self {
        Orchestrator {
            settings,
            loader,
            operator,
            preselected: None,
            run_id: Uuid::new_v4(),
            state: InstallState::Init,
        }
    }

    /// Skips the selection prompt. Relative names are looked up in the
    /// modpacks directory when they do not exist as given.
    pub fn with_modpack(mut self, modpack: impl Into<PathBuf>) -> Self {
        self.preselected = Some(modpack.into());
        self
    }

    pub fn state(&self) -> InstallState {
        self.state
    }

    pub fn loader(&self) -> &LoaderInstaller<R> {
        &self.loader
    }

    /// Scratch directory of this run, discarded when the next run starts.
    pub fn work_dir(&self) -> PathBuf {
        self.settings.temp_root.join(self.run_id.to_string())
    }

    fn transition(&mut self, next: InstallState) {
        debug!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }

    pub async fn run(&mut self) -> InstallResult<InstallOutcome> {
        match self.run_steps().await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.transition(InstallState::Failed);
                Err(err)
            }
        }
    }

    async fn run_steps(&mut self) -> InstallResult<InstallOutcome> {
        let work_dir = self.prepare_work_dir().await?;
        let tools_dir = work_dir.join("build-tools");
        extract_zip(&self.settings.build_tools_archive, &tools_dir).await?;
        let tools = BuildTools::locate(
            tools_dir,
            &self.settings.forge_cli_jar,
            &self.settings.fabric_installer_jar,
        );
        self.transition(InstallState::ToolsExtracted);

        let modpack_archive = self.select_modpack().await?;
        self.transition(InstallState::ModpackSelected);

        info!("Unpacking {}...", modpack_archive.display());
        let modpack_dir = work_dir.join("modpack");
        extract_zip(&modpack_archive, &modpack_dir).await?;
        self.transition(InstallState::ModpackUnpacked);

        let config = ModpackConfig::load(modpack_dir.join("config.json"))?;
        info!("Installing modpack {} ({})...", config.profile_name(), config.kind());
        self.transition(InstallState::ConfigParsed);

        let ctx = InstallContext {
            minecraft_dir: &self.settings.minecraft_dir,
            modpack_dir: &modpack_dir,
            tools: &tools,
        };
        self.loader.install(&config, &ctx).await?;
        self.transition(InstallState::LoaderInstalled);

        info!("Setting up profile...");
        let mut registry = ProfileRegistry::open(self.settings.profile_registry()).await?;
        let profile_name = allocate_name(config.profile_name(), &registry.profile_names());
        let profiles_dir = &self.settings.profiles_dir;
        tokio::fs::create_dir_all(profiles_dir).await.at(profiles_dir)?;
        let existing_dirs: HashSet<String> = list_entry_names(profiles_dir).await?.into_iter().collect();
        let game_dir = profiles_dir.join(allocate_dir_name(&profile_name, &existing_dirs));
        self.transition(InstallState::NameAllocated);

        let modpack_icon = modpack_dir.join("icon.png");
        let icon = match pick_icon(&[modpack_icon.as_path(), tools.default_icon.as_path()]).await {
            Some(path) => {
                debug!("Using icon {}", path.display());
                Some(png_data_url(path).await?)
            }
            None => None,
        };
        let record = ProfileRecord::custom(
            profile_name.clone(),
            config.version_id().to_string(),
            game_dir.clone(),
            icon,
            Utc::now(),
        );
        info!("Creating profile...");
        let profile_id = registry.merge_profile(&record).await?;
        debug!("Wrote profile {} to {}", profile_id, registry.path().display());
        self.transition(InstallState::RegistryUpdated);

        info!("Initializing profile...");
        extract_zip(modpack_dir.join("init.zip"), &game_dir).await?;
        self.transition(InstallState::GameDirInitialized);

        self.transition(InstallState::Done);
        Ok(InstallOutcome {
            profile_id,
            profile_name,
            game_dir,
            kind: config.kind(),
        })
    }

    async fn prepare_work_dir(&self) -> InstallResult<PathBuf> {
        let temp_root = &self.settings.temp_root;
        match tokio::fs::remove_dir_all(temp_root).await {
            Ok(()) => debug!("Removed previous work files in {}", temp_root.display()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(InstallError::io(temp_root, err)),
        }
        let work_dir = self.work_dir();
        tokio::fs::create_dir_all(&work_dir).await.at(&work_dir)?;
        Ok(work_dir)
    }

    async fn select_modpack(&self) -> InstallResult<PathBuf> {
        let modpacks_dir = &self.settings.modpacks_dir;
        tokio::fs::create_dir_all(modpacks_dir).await.at(modpacks_dir)?;

        if let Some(preselected) = &self.preselected {
            return resolve_preselected(preselected, modpacks_dir);
        }
        let name = select_modpack(modpacks_dir, &self.operator).await?;
        Ok(modpacks_dir.join(name))
    }
}

fn resolve_preselected(preselected: &Path, modpacks_dir: &Path) -> InstallResult<PathBuf> {
    if preselected.is_file() {
        return Ok(preselected.to_path_buf());
    }
    let in_modpacks = modpacks_dir.join(preselected);
    if preselected.is_relative() && in_modpacks.is_file() {
        return Ok(in_modpacks);
    }
    Err(InstallError::Config(format!(
        "modpack {} does not exist",
        preselected.display()
    )))
}
