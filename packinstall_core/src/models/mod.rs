pub mod config;
pub mod profiles;

pub use config::ModpackConfig;
pub use profiles::ProfileRecord;
