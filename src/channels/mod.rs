//! Input/output channels for driving an authentication session.

pub mod cli;

pub use cli::{CliChannel, CliInput};
