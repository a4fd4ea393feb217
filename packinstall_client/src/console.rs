use std::io::Write;

use async_trait::async_trait;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal,
};
use packinstall_core::{operator::Operator, InstallError, InstallResult};
use tokio::{
    io::{AsyncBufReadExt, BufReader, Lines, Stdin},
    sync::Mutex,
};

/// Prompts on stdout and reads answers from stdin.
pub struct ConsoleOperator {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl ConsoleOperator {
    pub fn new() -> Self {
        ConsoleOperator {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl Default for ConsoleOperator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Operator for ConsoleOperator {
    async fn read_line(&self, prompt: &str) -> InstallResult<Option<String>> {
        print!("{prompt}");
        std::io::stdout()
            .flush()
            .map_err(|e| InstallError::io("<stdout>", e))?;
        let mut lines = self.lines.lock().await;
        lines
            .next_line()
            .await
            .map_err(|e| InstallError::io("<stdin>", e))
    }

    fn show(&self, message: &str) {
        println!("{message}");
    }
}

/// Blocks until a single key is pressed. Without a terminal, waits for a
/// line (or end of input) instead.
pub async fn wait_for_key() {
    println!("Press any key to exit.");
    let _ = tokio::task::spawn_blocking(|| {
        if read_key().is_err() {
            let mut line = String::new();
            let _ = std::io::stdin().read_line(&mut line);
        }
    })
    .await;
}

fn read_key() -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    let result = loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break Ok(()),
            Ok(_) => continue,
            Err(err) => break Err(err),
        }
    };
    terminal::disable_raw_mode()?;
    result
}
