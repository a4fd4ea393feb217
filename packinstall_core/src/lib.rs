pub mod archive;
pub mod download;
pub mod error;
pub mod icon;
pub mod loader;
pub mod models;
pub mod naming;
pub mod operator;
pub mod orchestrator;
pub mod process;
pub mod registry;
pub mod settings;

pub use error::{InstallError, InstallResult};

pub trait StrConversion: Sized {
    fn try_from_str(value: &str) -> Option<Self>;
    fn as_str(&self) -> &'static str;
}

/// Loader variant declared by a modpack's `config.json`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum ModpackKind {
    Manual,
    Forge,
    Fabric,
    Vanilla,
}

impl std::fmt::Display for ModpackKind {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{}", self.as_str())
    }
}
impl StrConversion for ModpackKind {
    fn try_from_str(value: &str) -> Option<Self> {
        match value {
            "MANUAL" => Some(Self::Manual),
            "FORGE" => Some(Self::Forge),
            "FABRIC" => Some(Self::Fabric),
            "VANILLA" => Some(Self::Vanilla),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "MANUAL",
            Self::Forge => "FORGE",
            Self::Fabric => "FABRIC",
            Self::Vanilla => "VANILLA",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_round_trip() {
        for kind in [
            ModpackKind::Manual,
            ModpackKind::Forge,
            ModpackKind::Fabric,
            ModpackKind::Vanilla,
        ] {
            assert_eq!(ModpackKind::try_from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(ModpackKind::try_from_str("forge"), None);
        assert_eq!(ModpackKind::Fabric.to_string(), "FABRIC");
    }
}
