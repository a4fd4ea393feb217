use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A launcher profile as stored under `profiles` in `launcher_profiles.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub last_version_id: String,
    pub name: String,
    pub game_dir: PathBuf,
    #[serde(rename = "type")]
    pub profile_type: String,
    pub created: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ProfileRecord {
    pub fn custom(
        name: String,
        last_version_id: String,
        game_dir: PathBuf,
        icon: Option<String>,
        created: DateTime<Utc>,
    ) -> Self {
        ProfileRecord {
            last_version_id,
            name,
            game_dir,
            profile_type: "custom".to_string(),
            created: created.to_rfc3339_opts(SecondsFormat::Millis, true),
            icon,
        }
    }
}
