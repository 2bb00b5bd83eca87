//! Configuration types.

use std::path::Path;

use crate::dialogue::classifier::CommandSynonyms;
use crate::dialogue::prompts::PromptCatalog;
use crate::error::ConfigError;

/// Dialogue configuration: intent synonyms and the localized prompt catalog.
#[derive(Debug, Clone, Default)]
pub struct DialogueConfig {
    pub synonyms: CommandSynonyms,
    pub prompts: PromptCatalog,
}

impl DialogueConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// - `VOICE_AUTH_LOGIN_SYNONYMS` / `VOICE_AUTH_SIGNUP_SYNONYMS`: comma-separated lists
    /// - `VOICE_AUTH_PROMPTS_PATH`: JSON prompt catalog
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(login) = synonyms_from_env("VOICE_AUTH_LOGIN_SYNONYMS") {
            config.synonyms.login = login;
        }
        if let Some(signup) = synonyms_from_env("VOICE_AUTH_SIGNUP_SYNONYMS") {
            config.synonyms.signup = signup;
        }
        if let Ok(path) = std::env::var("VOICE_AUTH_PROMPTS_PATH") {
            config.prompts = load_prompt_catalog(Path::new(&path))?;
        }

        Ok(config)
    }
}

/// Parse a comma-separated synonym list. `None` when unset or empty.
pub fn parse_synonyms(raw: &str) -> Option<Vec<String>> {
    let list: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if list.is_empty() { None } else { Some(list) }
}

fn synonyms_from_env(key: &str) -> Option<Vec<String>> {
    std::env::var(key).ok().and_then(|raw| parse_synonyms(&raw))
}

/// Load a prompt catalog from a JSON file. Missing keys keep their defaults.
pub fn load_prompt_catalog(path: &Path) -> Result<PromptCatalog, ConfigError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_synonyms_drops_blanks() {
        assert_eq!(
            parse_synonyms(" entrar , , acceder "),
            Some(vec!["entrar".to_string(), "acceder".to_string()])
        );
        assert_eq!(parse_synonyms(" , "), None);
        assert_eq!(parse_synonyms(""), None);
    }

    #[test]
    fn loads_partial_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"full_name": "¿Cuál es tu nombre completo?"}}"#).unwrap();

        let catalog = load_prompt_catalog(file.path()).unwrap();
        assert_eq!(catalog.full_name, "¿Cuál es tu nombre completo?");
        assert_eq!(catalog.login, PromptCatalog::default().login);
    }

    #[test]
    fn malformed_catalog_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = load_prompt_catalog(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn missing_catalog_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_prompt_catalog(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
