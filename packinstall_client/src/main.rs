use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use console::{wait_for_key, ConsoleOperator};
use log::{error, info};
use packinstall_core::{
    download::build_http_client,
    loader::LoaderInstaller,
    orchestrator::{InstallOutcome, Orchestrator},
    process::JavaProcess,
    settings::{InstallSettings, SettingsFile},
};

mod console;

const BANNER: &str = "##########################################";

/// Install a modpack as a new Minecraft launcher profile
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Modpack archive to install instead of choosing one interactively
    #[arg(short = 'm', long)]
    modpack: Option<PathBuf>,

    /// Shared game installation (defaults to the launcher's .minecraft)
    #[arg(long)]
    minecraft_dir: Option<PathBuf>,

    /// Directory scanned for modpack archives
    #[arg(long)]
    modpacks_dir: Option<PathBuf>,

    /// Directory receiving one game directory per profile
    #[arg(long)]
    profiles_dir: Option<PathBuf>,

    /// Bundled build tools archive
    #[arg(long)]
    build_tools: Option<PathBuf>,

    /// Scratch directory, wiped at every start
    #[arg(long)]
    temp_dir: Option<PathBuf>,

    /// Exit right away instead of waiting for a key press
    #[arg(long)]
    no_wait: bool,
}

impl Args {
    fn overrides(&self) -> SettingsFile {
        SettingsFile {
            minecraft_dir: self.minecraft_dir.clone(),
            modpacks_dir: self.modpacks_dir.clone(),
            profiles_dir: self.profiles_dir.clone(),
            build_tools_archive: self.build_tools.clone(),
            temp_dir: self.temp_dir.clone(),
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    pretty_env_logger::init();
    let args = Args::parse();

    match run(&args).await {
        Ok(outcome) => {
            info!("");
            info!("{}", BANNER.cyan());
            info!("");
            info!("Profile name: {}", outcome.profile_name.green());
            info!("Profile path: {}", outcome.game_dir.display());
            info!("{}", "Installation complete!".green());
        }
        Err(err) => error!("{} {:#}", "Error:".bright_red(), err),
    }

    if !args.no_wait {
        wait_for_key().await;
    }

    Ok(())
}

async fn run(args: &Args) -> anyhow::Result<InstallOutcome> {
    info!("{}", BANNER.cyan());
    info!("");
    info!(
        "{}",
        format!("Minecraft Modpack Installer v{}", env!("CARGO_PKG_VERSION")).bold()
    );
    info!("");
    info!("{}", BANNER.cyan());

    let base_dir = std::env::current_dir()?;
    let tools_dir = std::env::current_exe()?
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| base_dir.clone());
    let settings = InstallSettings::load(&base_dir, &tools_dir)?.apply(args.overrides(), &base_dir);

    let loader = LoaderInstaller::new(JavaProcess, build_http_client()?);
    let mut orchestrator = Orchestrator::new(settings, loader, ConsoleOperator::new());
    if let Some(modpack) = &args.modpack {
        orchestrator = orchestrator.with_modpack(modpack);
    }

    Ok(orchestrator.run().await?)
}
