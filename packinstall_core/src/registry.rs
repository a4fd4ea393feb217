use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use log::info;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    error::{IoResultExt, InstallError},
    models::ProfileRecord,
    InstallResult,
};

/// The launcher's `launcher_profiles.json`, held as raw JSON so that every
/// key this installer does not understand is written back untouched.
pub struct ProfileRegistry {
    path: PathBuf,
    document: Map<String, Value>,
}

impl ProfileRegistry {
    pub async fn open(path: impl AsRef<Path>) -> InstallResult<Self> {
        let path = path.as_ref().to_path_buf();
        let text = tokio::fs::read_to_string(&path).await.at(&path)?;
        let mut document: Map<String, Value> = serde_json::from_str(&text)?;
        match document.get("profiles") {
            None => {
                document.insert("profiles".to_string(), Value::Object(Map::new()));
            }
            Some(Value::Object(_)) => {}
            Some(_) => {
                return Err(InstallError::io(
                    &path,
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "`profiles` is not a JSON object",
                    ),
                ))
            }
        }
        Ok(ProfileRegistry { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn profiles(&self) -> Option<&Map<String, Value>> {
        self.document.get("profiles").and_then(Value::as_object)
    }

    pub fn len(&self) -> usize {
        self.profiles().map(Map::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Display names of every registered profile.
    pub fn profile_names(&self) -> HashSet<String> {
        self.profiles()
            .into_iter()
            .flat_map(|profiles| profiles.values())
            .filter_map(|profile| profile.get("name").and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }

    /// Adds `record` under a fresh id and rewrites the whole document.
    ///
    /// This is a plain read-modify-write: changes made to the file by another
    /// process since [`ProfileRegistry::open`] are overwritten.
    pub async fn merge_profile(&mut self, record: &ProfileRecord) -> InstallResult<String> {
        let id = Uuid::new_v4().simple().to_string();
        let value = serde_json::to_value(record)?;
        let profiles = self
            .document
            .entry("profiles")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(profiles) = profiles {
            profiles.insert(id.clone(), value);
        }

        let text = serde_json::to_string_pretty(&self.document)?;
        tokio::fs::write(&self.path, text).await.at(&self.path)?;
        info!("Registered profile {} as {}", record.name, id);
        Ok(id)
    }
}
