//! CLI channel — stdin/stdout REPL standing in for speech input and output.

use async_trait::async_trait;
use futures::stream::{self, Stream};
use std::pin::Pin;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::dialogue::{DraftSnapshot, OutgoingPrompt, PromptKind};
use crate::session::PresentationSink;

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliInput {
    /// Treated as a spoken utterance.
    Utterance(String),
    /// `/signin <identifier> <password>` — manual login form.
    SignIn { identifier: String, secret: String },
    /// `/quit`
    Quit,
}

impl CliInput {
    /// Parse a raw line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed == "/quit" || trimmed == "/exit" {
            return Some(Self::Quit);
        }
        if let Some(rest) = trimmed.strip_prefix("/signin") {
            let mut parts = rest.trim().splitn(2, char::is_whitespace);
            let identifier = parts.next().unwrap_or_default().to_string();
            let secret = parts.next().unwrap_or_default().trim_start().to_string();
            return Some(Self::SignIn { identifier, secret });
        }
        Some(Self::Utterance(line.to_string()))
    }
}

pub type InputStream = Pin<Box<dyn Stream<Item = CliInput> + Send>>;

/// Reads from stdin and writes prompts to stdout.
pub struct CliChannel;

impl CliChannel {
    pub fn new() -> Self {
        Self
    }

    /// Start reading stdin. The stream ends on EOF or read error.
    pub fn start(&self) -> InputStream {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

        tokio::spawn(async move {
            let stdin = tokio::io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();

            eprint!("> ");

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let Some(input) = CliInput::parse(&line) else {
                            eprint!("> ");
                            continue;
                        };
                        if tx.send(input).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF
                    Err(e) => {
                        tracing::error!("Error reading stdin: {}", e);
                        break;
                    }
                }
            }
        });

        let stream = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|input| (input, rx))
        });

        Box::pin(stream)
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PresentationSink for CliChannel {
    async fn present(&self, prompt: &OutgoingPrompt) {
        match prompt.kind {
            PromptKind::Error(_) => println!("\n❌ {}\n", prompt.text),
            PromptKind::Info => println!("\n✅ {}\n", prompt.text),
            PromptKind::Prompt => println!("\n{}\n", prompt.text),
        }
        eprint!("> ");
    }

    async fn progress(&self, snapshot: &DraftSnapshot) {
        eprintln!("{}", snapshot.to_progress_lines());
    }

    async fn account_created(&self, username: &str) {
        eprintln!("ℹ️  Signed up as {}", username);
    }
}
