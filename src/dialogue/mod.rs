//! Authentication dialogue — conversational login and step-by-step signup.
//!
//! Each utterance is classified as a global intent ("login", "sign up") or
//! as input for the current step. Signup collects one field per step:
//! full name, username, email, password, password confirmation. The
//! machine validates each answer, calls the auth backend where needed, and
//! returns the next prompt explicitly.

pub mod classifier;
pub mod login;
pub mod machine;
pub mod model;
pub mod prompts;
pub mod state;
pub mod validator;

pub use classifier::{Command, CommandClassifier, CommandSynonyms, GlobalIntent};
pub use machine::{DialogueMachine, Turn, TurnOutcome};
pub use model::{DraftSnapshot, LoginForm, NewAccount, SignupDraft};
pub use prompts::{ErrorKind, OutgoingPrompt, PromptCatalog, PromptKind};
pub use state::{DialogueState, Step};
