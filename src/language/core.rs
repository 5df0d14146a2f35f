use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

use crate::error::{Error, Result};

static LANG_DIR: Dir = include_dir!("src/lang");

/// A word list bundled with the binary.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    /// Load an embedded list by file stem, e.g. `english`.
    pub fn load(name: &str) -> Result<Self> {
        read_language_from_file(&format!("{name}.json"))
    }

    /// Names of every embedded list, sorted.
    pub fn available() -> Vec<String> {
        let mut names: Vec<String> = LANG_DIR
            .files()
            .filter(|f| f.path().extension().is_some_and(|ext| ext == "json"))
            .filter_map(|f| f.path().file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

fn read_language_from_file(file_name: &str) -> Result<Language> {
    let name = file_name.trim_end_matches(".json").to_string();

    let file = LANG_DIR
        .get_file(file_name)
        .ok_or_else(|| Error::LanguageNotFound(name.clone()))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or(Error::LanguageEncoding { name })?;

    Ok(from_str(file_as_str)?)
}
