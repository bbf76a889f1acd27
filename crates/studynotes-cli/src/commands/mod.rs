pub mod edit;
pub mod favorite;
pub mod grades;
pub mod history;
pub mod init;
pub mod quiz;
pub mod reset;
pub mod show;
pub mod subjects;
pub mod topics;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use studynotes_store::{open_session, Session, StudynotesConfig};

/// Global options shared by every command.
pub struct Context {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

impl Context {
    pub fn load_config(&self) -> Result<StudynotesConfig> {
        let mut config = studynotes_store::load_config_from(self.config.as_deref())?;
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        Ok(config)
    }

    pub fn open_session(&self) -> Result<Session> {
        open_session(&self.load_config()?)
    }
}

/// Split a comma-separated tag list, dropping blanks.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_trimmed_and_blanks_dropped() {
        assert_eq!(parse_tags(" java, ,poo ,"), vec!["java", "poo"]);
        assert!(parse_tags("").is_empty());
    }
}
