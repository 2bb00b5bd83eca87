//! voice-auth — conversational login and signup dialogue.

pub mod backend;
pub mod channels;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod session;

pub use error::{Error, Result};
