use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{InstallError, InstallResult, ModpackKind, StrConversion};

/// Contents of the `config.json` bundled with every modpack.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModpackConfig {
    #[serde(rename_all = "camelCase")]
    Manual {
        version_id: String,
        profile_name: String,
        manual_mc_version: String,
    },
    #[serde(rename_all = "camelCase")]
    Forge {
        version_id: String,
        profile_name: String,
    },
    #[serde(rename_all = "camelCase")]
    Fabric {
        version_id: String,
        profile_name: String,
        fabric_mc_version: String,
        fabric_loader_version: String,
    },
    #[serde(rename_all = "camelCase")]
    Vanilla {
        version_id: String,
        profile_name: String,
    },
}

impl ModpackConfig {
    pub fn load(path: impl AsRef<Path>) -> InstallResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| InstallError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    /// Parses a config document. The `type` tag is checked first so an
    /// unknown loader is reported as such rather than as a schema mismatch.
    pub fn from_json(text: &str) -> InstallResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| InstallError::Config(format!("config.json is not valid JSON: {e}")))?;
        let tag = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| InstallError::Config("config.json has no `type` field".to_string()))?;
        if ModpackKind::try_from_str(tag).is_none() {
            return Err(InstallError::UnknownModpackType(tag.to_string()));
        }
        let tag = tag.to_string();
        serde_json::from_value(value)
            .map_err(|e| InstallError::Config(format!("invalid {tag} modpack config: {e}")))
    }

    pub fn kind(&self) -> ModpackKind {
        match self {
            Self::Manual { .. } => ModpackKind::Manual,
            Self::Forge { .. } => ModpackKind::Forge,
            Self::Fabric { .. } => ModpackKind::Fabric,
            Self::Vanilla { .. } => ModpackKind::Vanilla,
        }
    }

    pub fn version_id(&self) -> &str {
        match self {
            Self::Manual { version_id, .. }
            | Self::Forge { version_id, .. }
            | Self::Fabric { version_id, .. }
            | Self::Vanilla { version_id, .. } => version_id,
        }
    }

    pub fn profile_name(&self) -> &str {
        match self {
            Self::Manual { profile_name, .. }
            | Self::Forge { profile_name, .. }
            | Self::Fabric { profile_name, .. }
            | Self::Vanilla { profile_name, .. } => profile_name,
        }
    }
}
