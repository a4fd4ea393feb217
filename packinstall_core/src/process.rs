use std::{
    ffi::OsString,
    path::PathBuf,
    process::Stdio,
};

use async_trait::async_trait;
use log::{info, warn};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    process::Command,
};

use crate::{error::IoResultExt, InstallError, InstallResult};

/// One run of a bundled Java tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaInvocation {
    /// Human readable name used in logs and errors.
    pub tool: String,
    pub java: PathBuf,
    pub args: Vec<OsString>,
}

impl JavaInvocation {
    pub fn jar(tool: &str, java: impl Into<PathBuf>, jar: impl Into<OsString>) -> Self {
        JavaInvocation {
            tool: tool.to_string(),
            java: java.into(),
            args: vec!["-jar".into(), jar.into()],
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }
}

#[async_trait]
pub trait JavaRunner: Send + Sync {
    /// Runs the tool to completion. Succeeds only on exit status 0.
    async fn run(&self, invocation: &JavaInvocation) -> InstallResult<()>;
}

/// Spawns the real JVM and forwards its output line by line while it runs.
#[derive(Debug, Default, Clone)]
pub struct JavaProcess;

#[async_trait]
impl JavaRunner for JavaProcess {
    async fn run(&self, invocation: &JavaInvocation) -> InstallResult<()> {
        let mut child = Command::new(&invocation.java)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .at(&invocation.java)?;

        let stdout = child.stdout.take();
        let tool = invocation.tool.clone();
        let stdout_task = tokio::spawn(async move {
            if let Some(stdout) = stdout {
                forward_lines(stdout, |line| info!("[{}] {}", tool, line)).await;
            }
        });

        let stderr = child.stderr.take();
        let tool = invocation.tool.clone();
        let stderr_task = tokio::spawn(async move {
            let mut captured = String::new();
            if let Some(stderr) = stderr {
                forward_lines(stderr, |line| {
                    warn!("[{}] {}", tool, line);
                    captured.push_str(&line);
                    captured.push('\n');
                })
                .await;
            }
            captured
        });

        let status = child.wait().await.at(&invocation.java)?;
        stdout_task.await?;
        let stderr = stderr_task.await?;

        if status.success() {
            Ok(())
        } else {
            Err(InstallError::InstallerFailure {
                tool: invocation.tool.clone(),
                code: status.code(),
                stderr: stderr.trim_end().to_string(),
            })
        }
    }
}

/// Drains `reader` to EOF, handing each line to `on_line`. Installers print in
/// the platform code page, so bytes that are not UTF-8 are replaced.
async fn forward_lines<R>(reader: R, mut on_line: impl FnMut(String))
where
    R: AsyncRead + Unpin,
{
    let mut segments = BufReader::new(reader).split(b'\n');
    loop {
        match segments.next_segment().await {
            Ok(Some(bytes)) => on_line(decode_line(&bytes)),
            Ok(None) => break,
            Err(err) => {
                warn!("Stopped reading installer output: {}", err);
                break;
            }
        }
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jar_invocation_args() {
        let invocation = JavaInvocation::jar("fabric installer", "/tools/jre/bin/java", "/tools/fabric.jar")
            .arg("client")
            .arg("-noprofile");
        assert_eq!(invocation.java, PathBuf::from("/tools/jre/bin/java"));
        assert_eq!(invocation.args, ["-jar", "/tools/fabric.jar", "client", "-noprofile"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn zero_exit_succeeds() {
        let invocation = JavaInvocation {
            tool: "shell".to_string(),
            java: PathBuf::from("sh"),
            args: vec!["-c".into(), "echo installing; echo warning >&2".into()],
        };
        JavaProcess.run(&invocation).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_carries_stderr() {
        let invocation = JavaInvocation {
            tool: "shell".to_string(),
            java: PathBuf::from("sh"),
            args: vec!["-c".into(), "echo step; echo broken jar >&2; exit 3".into()],
        };
        match JavaProcess.run(&invocation).await {
            Err(InstallError::InstallerFailure { tool, code, stderr }) => {
                assert_eq!(tool, "shell");
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "broken jar");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn decode_line_replaces_invalid_bytes() {
        assert_eq!(decode_line(b"done\r"), "done");
        assert_eq!(decode_line(b"\xff\xfe ok"), "\u{fffd}\u{fffd} ok");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_utf8_output_keeps_draining() {
        let invocation = JavaInvocation {
            tool: "shell".to_string(),
            java: PathBuf::from("sh"),
            args: vec![
                "-c".into(),
                "printf '\\274\\263\\304\\241\\n'; head -c 300000 /dev/zero | tr '\\0' a; echo; exit 0".into(),
            ],
        };
        JavaProcess.run(&invocation).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stderr_after_non_utf8_line_is_captured() {
        let invocation = JavaInvocation {
            tool: "shell".to_string(),
            java: PathBuf::from("sh"),
            args: vec![
                "-c".into(),
                "printf '\\277\\241\\267\\257\\n' >&2; echo 'real cause' >&2; exit 2".into(),
            ],
        };
        match JavaProcess.run(&invocation).await {
            Err(InstallError::InstallerFailure { code, stderr, .. }) => {
                assert_eq!(code, Some(2));
                assert!(stderr.ends_with("real cause"), "stderr was {stderr:?}");
                assert!(stderr.starts_with('\u{fffd}'));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_executable_is_an_io_error() {
        let invocation = JavaInvocation::jar("forge installer", "/no/such/java", "forge.jar");
        assert!(matches!(
            JavaProcess.run(&invocation).await,
            Err(InstallError::Io { .. })
        ));
    }
}
