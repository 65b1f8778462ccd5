//! Full menu parse: sections → trees → combined tree → artifacts.
//!
//! [`parse_menu`] is the single entry point of the parser. It either returns a
//! complete [`ParsedMenu`] or one [`MenuError`]; it never hands back a partial
//! tree. Recoverable anomalies are recorded on the result instead:
//!
//! - `dropped_lines`: orphan lines whose parent did not exist
//! - `ignored_sections`: language sections after the second one
//! - `pairing_mismatches`: levels where the two languages differ in length
//!
//! [`Manifest`] bundles the combined tree with the four artifacts the template
//! renderer consumes, and is what gets written to `menu.json`.

use crate::artifacts;
use crate::combine::{self, PairingMismatch};
use crate::config::MenuConfig;
use crate::naming;
use crate::section;
use crate::tree::{self, DEFAULT_MAX_DEPTH};
use crate::types::{DictionaryEntry, FileEntry, MenuItem, Page, UrlMapping, walk_pages};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("empty menu file")]
    EmptyMenu,
    #[error("line {line}: indentation level {level} is deeper than the {max_depth} supported levels")]
    TooDeep {
        line: usize,
        level: usize,
        max_depth: usize,
    },
    #[error("language sections do not line up: {0}")]
    PairingMismatch(PairingMismatch),
}

/// Settings that influence parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Language code of the first section (slug locale).
    pub primary_language: String,
    /// Language code of the second section, if the site is bilingual.
    pub secondary_language: Option<String>,
    /// Number of nesting levels allowed.
    pub max_depth: usize,
    /// Turn pairing mismatches into a parse error.
    pub strict_pairing: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            primary_language: naming::DEFAULT_LOCALE.to_string(),
            secondary_language: None,
            max_depth: DEFAULT_MAX_DEPTH,
            strict_pairing: false,
        }
    }
}

impl ParseOptions {
    pub fn from_config(config: &MenuConfig) -> Self {
        Self {
            primary_language: config.languages.primary.clone(),
            secondary_language: config.languages.secondary.clone(),
            max_depth: config.parse.max_depth,
            strict_pairing: config.parse.strict_pairing,
        }
    }

    /// Locale used to slug the secondary section.
    fn secondary_locale(&self) -> &str {
        self.secondary_language
            .as_deref()
            .unwrap_or(&self.primary_language)
    }
}

/// Result of parsing one menu file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedMenu {
    pub primary: Vec<Page>,
    pub secondary: Option<Vec<Page>>,
    pub combined: Vec<Page>,
    pub has_secondary_language: bool,
    /// Sections after the second one, which are not used.
    pub ignored_sections: usize,
    /// Line numbers of orphan lines dropped from either section.
    pub dropped_lines: Vec<usize>,
    pub pairing_mismatches: Vec<PairingMismatch>,
}

impl ParsedMenu {
    /// Number of pages in the combined tree, at every level.
    pub fn page_count(&self) -> usize {
        walk_pages(&self.combined).count()
    }
}

/// Parse a menu file.
pub fn parse_menu(content: &str, options: &ParseOptions) -> Result<ParsedMenu, MenuError> {
    let mut sections = section::split_sections(content)?.into_iter();
    let ignored_sections = sections.len().saturating_sub(2);

    let primary_section = sections.next().ok_or(MenuError::EmptyMenu)?;
    let primary = tree::build_tree(
        &primary_section,
        &options.primary_language,
        options.max_depth,
    )?;
    let mut dropped_lines = primary.dropped_lines;

    let secondary = match sections.next() {
        Some(lines) => {
            let built = tree::build_tree(&lines, options.secondary_locale(), options.max_depth)?;
            dropped_lines.extend(built.dropped_lines);
            Some(built.pages)
        }
        None => None,
    };

    let combined = combine::combine(&primary.pages, secondary.as_deref());
    if options.strict_pairing
        && let Some(mismatch) = combined.mismatches.first()
    {
        return Err(MenuError::PairingMismatch(mismatch.clone()));
    }

    Ok(ParsedMenu {
        has_secondary_language: secondary.is_some(),
        primary: primary.pages,
        secondary,
        combined: combined.pages,
        ignored_sections,
        dropped_lines,
        pairing_mismatches: combined.mismatches,
    })
}

/// Everything the template renderer needs, derived from one parsed menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub primary_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_language: Option<String>,
    pub has_secondary_language: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets_folder: Option<String>,
    pub pages: Vec<Page>,
    pub dictionary: Vec<DictionaryEntry>,
    pub urls: Vec<UrlMapping>,
    pub files: Vec<FileEntry>,
    pub navigation: Vec<MenuItem>,
}

impl Manifest {
    /// Run the artifact generators over a parsed menu.
    ///
    /// Secondary-language values and routes are only emitted when a secondary
    /// language code is configured.
    pub fn build(parsed: &ParsedMenu, config: &MenuConfig) -> Self {
        let primary = config.languages.primary.as_str();
        let secondary = config
            .languages
            .secondary
            .as_deref()
            .filter(|_| parsed.has_secondary_language);
        let business_name = config.project.business_name.as_deref();

        Self {
            primary_language: primary.to_string(),
            secondary_language: secondary.map(str::to_string),
            has_secondary_language: parsed.has_secondary_language,
            project_folder: business_name.map(naming::generate_project_folder_name),
            assets_folder: business_name.map(naming::generate_assets_folder_name),
            pages: parsed.combined.clone(),
            dictionary: artifacts::dictionary_entries(
                &parsed.combined,
                primary,
                secondary,
                business_name,
            ),
            urls: match secondary {
                Some(_) => artifacts::url_mappings(&parsed.combined),
                None => Vec::new(),
            },
            files: artifacts::files_to_create(&parsed.combined),
            navigation: artifacts::menu_structure(&parsed.combined),
        }
    }
}
