//! Command classifier — global intents vs. input for the current step.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// An utterance that switches flow regardless of the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalIntent {
    Login,
    Signup,
}

/// Classification of one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Global(GlobalIntent),
    /// Text for the current step, exactly as received.
    StepInput(String),
    /// Blank utterance.
    Empty,
}

/// Synonym lists that trigger the global intents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSynonyms {
    pub login: Vec<String>,
    pub signup: Vec<String>,
}

impl Default for CommandSynonyms {
    fn default() -> Self {
        Self {
            login: ["log in", "login", "sign in", "signin", "iniciar sesión"]
                .map(String::from)
                .to_vec(),
            signup: ["sign up", "signup", "register", "registrarse"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Maps raw utterances to [`Command`]s. Stateless apart from its synonyms.
#[derive(Debug, Clone)]
pub struct CommandClassifier {
    login: Vec<String>,
    signup: Vec<String>,
}

impl CommandClassifier {
    pub fn new(synonyms: &CommandSynonyms) -> Self {
        Self {
            login: synonyms.login.iter().map(|s| canonical(s)).collect(),
            signup: synonyms.signup.iter().map(|s| canonical(s)).collect(),
        }
    }

    /// Classify an utterance. Matching is case-insensitive and ignores
    /// surrounding and repeated whitespace.
    pub fn classify(&self, utterance: &str) -> Command {
        let trimmed = utterance.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }

        let key = canonical(trimmed);
        if self.login.contains(&key) {
            Command::Global(GlobalIntent::Login)
        } else if self.signup.contains(&key) {
            Command::Global(GlobalIntent::Signup)
        } else {
            Command::StepInput(utterance.to_string())
        }
    }
}

impl Default for CommandClassifier {
    fn default() -> Self {
        Self::new(&CommandSynonyms::default())
    }
}

fn canonical(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").to_lowercase()
}
