use std::path::Path;

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;

use crate::{error::IoResultExt, InstallError, InstallResult};

const APP_USER_AGENT: &str = concat!("packinstall/", env!("CARGO_PKG_VERSION"));

pub fn build_http_client() -> InstallResult<Client> {
    Ok(Client::builder().user_agent(APP_USER_AGENT).build()?)
}

async fn get(client: &Client, url: &str) -> InstallResult<reqwest::Response> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(InstallError::DownloadFailed {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response)
}

pub async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> InstallResult<T> {
    debug!("Fetching {}", url);
    Ok(get(client, url).await?.json().await?)
}

/// Streams `url` into `path`, creating parent directories as needed.
pub async fn download_file(client: &Client, url: &str, path: impl AsRef<Path>) -> InstallResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.at(parent)?;
    }

    let response = get(client, url).await?;
    let total_size = response.content_length();

    let bar = if let Some(size) = total_size {
        let bar = ProgressBar::new(size);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:.cyan/blue}] {bytes}/{total_bytes}",
        ) {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar
    } else {
        ProgressBar::new_spinner()
    };

    let mut file = tokio::fs::File::create(path).await.at(path)?;
    let mut bar_progress: u64 = 0;
    let mut file_stream = response.bytes_stream();

    while let Some(chunk) = file_stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await.at(path)?;
        bar_progress += chunk.len() as u64;
        bar.set_position(bar_progress);
    }
    file.flush().await.at(path)?;

    bar.finish_and_clear();
    debug!("Downloaded {} -> {} ({} bytes)", url, path.display(), bar_progress);

    Ok(())
}
