//! Reads text aloud through a local speech program.
//!
//! The engine runs as a child process and is awaited, so the interaction
//! waits until playback has finished. Text always goes in on stdin, never as
//! an argument, so a leading `-` is not read as an option.

use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech engine '{program}' is unavailable: {source}")]
    Unavailable {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("speech engine '{program}' exited with {status}")]
    EngineFailed { program: String, status: String },

    #[error("no speech command configured")]
    NotConfigured,
}

#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Speaks `text` and returns once playback is complete.
    async fn speak(&self, text: &str) -> Result<(), SpeechError>;
}

/// Runs a speech program and waits for it to exit.
#[derive(Debug, Clone)]
pub struct CommandSpeechEngine {
    program: String,
    args: Vec<String>,
}

impl CommandSpeechEngine {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Parses a command line such as `espeak-ng -s 160 --stdin`. The program
    /// must read the text from stdin.
    pub fn from_command_line(command: &str) -> Result<Self, SpeechError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(SpeechError::NotConfigured)?;
        Ok(Self::new(program, parts.collect()))
    }

    /// The platform's stock speech program, set up to read stdin.
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("say", vec!["-f".to_string(), "-".to_string()])
        } else if cfg!(target_os = "windows") {
            Self::new(
                "powershell",
                vec![
                    "-NoProfile".to_string(),
                    "-Command".to_string(),
                    "Add-Type -AssemblyName System.Speech; \
                     (New-Object System.Speech.Synthesis.SpeechSynthesizer).Speak([Console]::In.ReadToEnd())"
                        .to_string(),
                ],
            )
        } else {
            Self::new("espeak-ng", vec!["--stdin".to_string()])
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl SpeechEngine for CommandSpeechEngine {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        debug!("Speaking {} chars via {}", text.len(), self.program);

        let unavailable = |source| SpeechError::Unavailable {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(unavailable)?;
        if let Some(mut stdin) = child.stdin.take() {
            // An engine that exits without reading is judged by its exit status.
            if let Err(e) = stdin.write_all(text.as_bytes()).await {
                if e.kind() != io::ErrorKind::BrokenPipe {
                    return Err(unavailable(e));
                }
            }
        }
        let status = child.wait().await.map_err(unavailable)?;

        if !status.success() {
            return Err(SpeechError::EngineFailed {
                program: self.program.clone(),
                status: status.to_string(),
            });
        }

        info!("Read-aloud finished ({} chars)", text.len());
        Ok(())
    }
}
