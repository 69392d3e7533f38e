use std::path::PathBuf;

use crate::error::ConfigError;
use crate::quiz::QuestionBank;
use crate::render::font;

pub const DB_PATH_VAR: &str = "QUIZ_DB_PATH";
pub const BANK_PATH_VAR: &str = "QUIZ_BANK_PATH";
pub const FONT_PATH_VAR: &str = "QUIZ_FONT_PATH";

const DEFAULT_DB_PATH: &str = "db.sqlite";

/// Runtime settings of the bot. The bot token itself is read by teloxide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db_path: String,
    pub bank_path: Option<PathBuf>,
    pub font_candidates: Vec<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            bank_path: None,
            font_candidates: font::default_candidates(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any variable source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Self::default();

        if let Some(db_path) = var(DB_PATH_VAR) {
            settings.db_path = db_path;
        }
        settings.bank_path = var(BANK_PATH_VAR).map(PathBuf::from);
        if let Some(font) = var(FONT_PATH_VAR) {
            settings.font_candidates.insert(0, PathBuf::from(font));
        }
        settings
    }

    /// The configured bank, or the built-in one when no file is set.
    pub fn question_bank(&self) -> Result<QuestionBank, ConfigError> {
        match &self.bank_path {
            Some(path) => QuestionBank::load(path),
            None => Ok(QuestionBank::default()),
        }
    }
}
