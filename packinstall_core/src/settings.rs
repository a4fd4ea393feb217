use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::{InstallError, InstallResult};

pub const SETTINGS_FILE: &str = "packinstall.toml";
pub const SETTINGS_PATH_ENV: &str = "PACKINSTALL_CONFIG_PATH";

/// Optional overrides, read from `packinstall.toml` or the command line.
#[derive(Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct SettingsFile {
    pub minecraft_dir: Option<PathBuf>,
    pub modpacks_dir: Option<PathBuf>,
    pub profiles_dir: Option<PathBuf>,
    pub build_tools_archive: Option<PathBuf>,
    pub temp_dir: Option<PathBuf>,
    pub forge_cli_jar: Option<String>,
    pub fabric_installer_jar: Option<String>,
}

impl SettingsFile {
    pub fn from_toml(text: &str) -> InstallResult<Self> {
        toml::from_str(text).map_err(|e| InstallError::Config(format!("invalid {SETTINGS_FILE}: {e}")))
    }
}

/// Every location the installer reads from or writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSettings {
    /// The shared game installation receiving loaders and versions.
    pub minecraft_dir: PathBuf,
    pub modpacks_dir: PathBuf,
    /// Root under which each profile gets its own game directory.
    pub profiles_dir: PathBuf,
    pub build_tools_archive: PathBuf,
    /// Wiped at the start of every run; each run works in a fresh subdirectory.
    pub temp_root: PathBuf,
    pub forge_cli_jar: String,
    pub fabric_installer_jar: String,
}

/// Where the official launcher keeps its data on this platform.
pub fn default_minecraft_dir() -> Option<PathBuf> {
    if cfg!(windows) {
        dirs::config_dir().map(|dir| dir.join(".minecraft"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir().map(|dir| dir.join("minecraft"))
    } else {
        dirs::home_dir().map(|dir| dir.join(".minecraft"))
    }
}

impl InstallSettings {
    /// Defaults relative to the working directory `base_dir`, with the build
    /// tools expected in `tools_dir` (normally the executable's directory).
    pub fn defaults(base_dir: &Path, tools_dir: &Path) -> Self {
        InstallSettings {
            minecraft_dir: default_minecraft_dir().unwrap_or_else(|| base_dir.join(".minecraft")),
            modpacks_dir: base_dir.join("modpacks"),
            profiles_dir: base_dir.join("profiles"),
            build_tools_archive: tools_dir.join("buildTools.zip"),
            temp_root: std::env::temp_dir().join("mc-modpack-installer"),
            forge_cli_jar: "ForgeCLI-1.0.1.jar".to_string(),
            fabric_installer_jar: "fabric-installer-0.11.2.jar".to_string(),
        }
    }

    /// Applies every value set in `file`; relative paths resolve against `base_dir`.
    pub fn apply(mut self, file: SettingsFile, base_dir: &Path) -> Self {
        let resolve = |path: PathBuf| {
            if path.is_absolute() {
                path
            } else {
                base_dir.join(path)
            }
        };
        if let Some(path) = file.minecraft_dir {
            self.minecraft_dir = resolve(path);
        }
        if let Some(path) = file.modpacks_dir {
            self.modpacks_dir = resolve(path);
        }
        if let Some(path) = file.profiles_dir {
            self.profiles_dir = resolve(path);
        }
        if let Some(path) = file.build_tools_archive {
            self.build_tools_archive = resolve(path);
        }
        if let Some(path) = file.temp_dir {
            self.temp_root = resolve(path);
        }
        if let Some(jar) = file.forge_cli_jar {
            self.forge_cli_jar = jar;
        }
        if let Some(jar) = file.fabric_installer_jar {
            self.fabric_installer_jar = jar;
        }
        self
    }

    /// Defaults overlaid with the settings file, if one exists. The file is
    /// looked up at `$PACKINSTALL_CONFIG_PATH`, else `base_dir/packinstall.toml`.
    pub fn load(base_dir: &Path, tools_dir: &Path) -> InstallResult<Self> {
        let path = std::env::var(SETTINGS_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| base_dir.join(SETTINGS_FILE));
        Self::load_from(&path, base_dir, tools_dir)
    }

    /// Defaults overlaid with the settings file at `path`; a missing file is not an error.
    pub fn load_from(path: &Path, base_dir: &Path, tools_dir: &Path) -> InstallResult<Self> {
        let settings = Self::defaults(base_dir, tools_dir);
        match std::fs::read_to_string(path) {
            Ok(text) => {
                debug!("Loaded settings from {}", path.display());
                Ok(settings.apply(SettingsFile::from_toml(&text)?, base_dir))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(settings),
            Err(err) => Err(InstallError::io(path, err)),
        }
    }

    pub fn profile_registry(&self) -> PathBuf {
        self.minecraft_dir.join("launcher_profiles.json")
    }
}
