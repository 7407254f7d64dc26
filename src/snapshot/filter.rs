//! Extension whitelist/blacklist over a flat file list.

use std::collections::HashSet;

use crate::error::{AppError, Result};
use crate::models::FlatFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Whitelist,
    Blacklist,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub mode: FilterMode,
    pub extensions: HashSet<String>,
}

impl FilterSpec {
    pub fn new<I, S>(mode: FilterMode, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            mode,
            extensions: extensions
                .into_iter()
                .filter_map(|ext| normalize_extension(ext.as_ref()))
                .collect(),
        }
    }

    /// Builds a filter from the request's `filterMode` / `filterExtensions`.
    ///
    /// Returns `None` when no mode was given, which means "keep everything".
    pub fn parse(mode: Option<&str>, extensions: Option<&str>) -> Result<Option<Self>> {
        let mode = match mode.map(|m| m.trim().to_lowercase()) {
            None => return Ok(None),
            Some(m) if m.is_empty() => return Ok(None),
            Some(m) if m == "whitelist" => FilterMode::Whitelist,
            Some(m) if m == "blacklist" => FilterMode::Blacklist,
            Some(m) => {
                return Err(AppError::InvalidInput(format!(
                    "Unknown filter mode '{}', expected 'whitelist' or 'blacklist'.",
                    m
                )));
            }
        };

        Ok(Some(Self::new(mode, extensions.unwrap_or("").split(','))))
    }

    pub fn is_noop(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn keeps(&self, path: &str) -> bool {
        if self.is_noop() {
            return true;
        }
        let member = self.extensions.contains(&extension_of(path));
        match self.mode {
            FilterMode::Whitelist => member,
            FilterMode::Blacklist => !member,
        }
    }

    pub fn apply(&self, files: Vec<FlatFile>) -> Vec<FlatFile> {
        if self.is_noop() {
            return files;
        }
        files.into_iter().filter(|f| self.keeps(&f.path)).collect()
    }
}

/// Lowercased text after the last `.` of the file name, or `""`.
pub fn extension_of(path: &str) -> String {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rfind('.') {
        Some(idx) => file_name[idx + 1..].to_lowercase(),
        None => String::new(),
    }
}

fn normalize_extension(token: &str) -> Option<String> {
    let ext = token.trim().trim_start_matches('.').to_lowercase();
    (!ext.is_empty()).then_some(ext)
}
