use std::path::Path;

use async_trait::async_trait;

use crate::{archive::list_archives, InstallError, InstallResult};

/// The person at the console.
#[async_trait]
pub trait Operator: Send + Sync {
    /// Shows `prompt` and reads one line. `None` means the input was closed.
    async fn read_line(&self, prompt: &str) -> InstallResult<Option<String>>;

    fn show(&self, message: &str);
}

async fn ask<O: Operator + ?Sized>(operator: &O, prompt: &str) -> InstallResult<String> {
    operator.read_line(prompt).await?.ok_or(InstallError::Cancelled)
}

/// Lets the operator pick one of the `.zip` files in `dir`, waiting for one
/// to appear if there are none. Returns the chosen file name.
pub async fn select_modpack<O: Operator + ?Sized>(dir: &Path, operator: &O) -> InstallResult<String> {
    loop {
        let names = list_archives(dir).await?;
        operator.show("");
        if names.is_empty() {
            ask(operator, "No modpack files found. (press Enter to check again)").await?;
            continue;
        }

        for (i, name) in names.iter().enumerate() {
            operator.show(&format!("  {}: {}", i + 1, name));
        }
        operator.show("");
        let answer = ask(
            operator,
            &format!("Select the modpack to install. (1 ~ {}) : ", names.len()),
        )
        .await?;
        match answer.trim().parse::<usize>() {
            Ok(index) if (1..=names.len()).contains(&index) => return Ok(names[index - 1].clone()),
            _ => operator.show("Invalid input."),
        }
    }
}
