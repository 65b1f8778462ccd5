//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **page-centric, not file-centric**. Every page leads with its
//! positional index and name; the file it produces, its translation and its
//! SEO text are secondary context on indented lines. The output reads as an
//! inventory of the site while still showing which file each page becomes.
//!
//! # Output Format
//!
//! ## Parse
//!
//! ```text
//! Pages
//! 001 Inicio → web.php
//!     Translation: Inici (/inici)
//!     SEO: Página de inicio
//! 002 Servicios (menu only)
//!     001 Diseño web → diseno-web.php
//! 003 Blog (managed by hand)
//!
//! Languages
//!     es (primary)
//!     ca (secondary)
//!
//! 4 pages, 2 files, 1 route, 10 dictionary keys
//! ```
//!
//! ## Check
//!
//! ```text
//! menu.txt: ok (12 pages, 9 files)
//! other.txt: error: empty menu file
//! ```
//!
//! ## Generate
//!
//! ```text
//! menu.json
//! _diccionario.php (31 keys)
//! _urls.php (8 routes)
//! _menu.php (10 items)
//!
//! Generated 4 files → out
//! ```
//!
//! # Warnings
//!
//! Anomalies the parser recovers from (dropped orphan lines, ignored extra
//! sections, mismatched translations) are printed as `warning:` lines after
//! the main output, so nothing is absorbed silently.
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::generate::Generated;
use crate::menu::{Manifest, ParsedMenu};
use crate::types::{MenuItem, Page, walk_pages};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 page`, `2 pages`.
fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// Format a page header: positional index + name, then what the page becomes.
///
/// ```text
/// 001 Inicio → web.php
/// 002 Servicios (menu only)
/// 003 Aviso legal → aviso-legal.php (no SEO)
/// ```
fn page_header(index: usize, page: &Page) -> String {
    let name = if page.name.is_empty() {
        "(unnamed)"
    } else {
        page.name.as_str()
    };
    let head = format!("{} {}", format_index(index), name);
    match &page.php_file {
        Some(file) if page.page_no_seo => format!("{head} → {file} (no SEO)"),
        Some(file) => format!("{head} → {file}"),
        None if page.skip_page => format!("{head} (menu only)"),
        None if page.is_automanaged => format!("{head} (managed by hand)"),
        None => format!("{head} (no slug)"),
    }
}

fn push_pages(pages: &[Page], depth: usize, lines: &mut Vec<String>) {
    for (i, page) in pages.iter().enumerate() {
        let base_indent = indent(depth);
        lines.push(format!("{}{}", base_indent, page_header(i + 1, page)));

        if let Some(name) = page.translations.name.as_deref() {
            match page.translations.slug() {
                Some(slug) => lines.push(format!("{base_indent}    Translation: {name} (/{slug})")),
                None => lines.push(format!("{base_indent}    Translation: {name}")),
            }
        }
        if page.has_seo && !page.page_no_seo {
            lines.push(format!("{}    SEO: {}", base_indent, page.seo));
        }

        push_pages(&page.children, depth + 1, lines);
    }
}

// ============================================================================
// Warnings
// ============================================================================

/// Format the recoverable anomalies of a parse as `warning:` lines.
///
/// `secondary_language` is the configured code of the second section.
pub fn format_warnings(parsed: &ParsedMenu, secondary_language: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();

    if parsed.has_secondary_language && secondary_language.is_none() {
        lines.push(
            "warning: menu has a second language section but no secondary language is \
             configured; its texts are left out (set languages.secondary or --secondary)"
                .to_string(),
        );
    }
    if parsed.ignored_sections > 0 {
        lines.push(format!(
            "warning: {} after the second one ignored",
            count(parsed.ignored_sections, "section", "sections")
        ));
    }
    for line in &parsed.dropped_lines {
        lines.push(format!(
            "warning: line {line} dropped: indented under a page that does not exist"
        ));
    }
    for mismatch in &parsed.pairing_mismatches {
        lines.push(format!("warning: {mismatch}"));
    }

    lines
}

// ============================================================================
// Parse output
// ============================================================================

/// Format the page inventory of a parsed menu.
pub fn format_parse_output(parsed: &ParsedMenu, manifest: &Manifest) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    push_pages(&parsed.combined, 0, &mut lines);

    lines.push(String::new());
    lines.push("Languages".to_string());
    lines.push(format!("    {} (primary)", manifest.primary_language));
    if let Some(secondary) = &manifest.secondary_language {
        lines.push(format!("    {secondary} (secondary)"));
    }

    if let Some(folder) = &manifest.project_folder {
        lines.push(String::new());
        lines.push("Project".to_string());
        lines.push(format!("    {folder}/"));
        if let Some(assets) = &manifest.assets_folder {
            lines.push(format!("    {assets}/"));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{}, {}, {}, {}",
        count(parsed.page_count(), "page", "pages"),
        count(manifest.files.len(), "file", "files"),
        count(manifest.urls.len(), "route", "routes"),
        count(manifest.dictionary.len(), "dictionary key", "dictionary keys"),
    ));

    lines.extend(format_warnings(
        parsed,
        manifest.secondary_language.as_deref(),
    ));
    lines
}

/// Print parse output to stdout.
pub fn print_parse_output(parsed: &ParsedMenu, manifest: &Manifest) {
    for line in format_parse_output(parsed, manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the outcome of checking one menu file.
///
/// `secondary_language` is the configured code of the second section, used
/// for the warnings of a successful parse.
pub fn format_check_output(
    path: &Path,
    result: &Result<ParsedMenu, String>,
    secondary_language: Option<&str>,
) -> Vec<String> {
    match result {
        Ok(parsed) => {
            let files = walk_pages(&parsed.combined)
                .filter(|p| p.generates_file())
                .count();
            let mut lines = vec![format!(
                "{}: ok ({}, {})",
                path.display(),
                count(parsed.page_count(), "page", "pages"),
                count(files, "file", "files"),
            )];
            lines.extend(
                format_warnings(parsed, secondary_language)
                    .into_iter()
                    .map(|w| format!("    {w}")),
            );
            lines
        }
        Err(message) => vec![format!("{}: error: {}", path.display(), message)],
    }
}

/// Print check output to stdout.
pub fn print_check_output(
    path: &Path,
    result: &Result<ParsedMenu, String>,
    secondary_language: Option<&str>,
) {
    for line in format_check_output(path, result, secondary_language) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

fn count_items(items: &[MenuItem]) -> usize {
    items.iter().map(|i| 1 + count_items(&i.submenu)).sum()
}

/// Format the list of written files with what each one holds.
pub fn format_generate_output(generated: &Generated, output_dir: &Path) -> Vec<String> {
    use crate::generate::{DICTIONARY_FILENAME, MENU_FILENAME, URLS_FILENAME};

    let manifest = &generated.manifest;
    let mut lines = Vec::new();

    for path in &generated.written {
        let name = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let detail = match name.as_str() {
            DICTIONARY_FILENAME => Some(count(manifest.dictionary.len(), "key", "keys")),
            URLS_FILENAME => Some(count(manifest.urls.len() + 1, "route", "routes")),
            MENU_FILENAME => Some(count(count_items(&manifest.navigation), "item", "items")),
            _ => None,
        };
        match detail {
            Some(detail) => lines.push(format!("{name} ({detail})")),
            None => lines.push(name),
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} → {}",
        count(generated.written.len(), "file", "files"),
        output_dir.display()
    ));

    lines.extend(format_warnings(
        &generated.parsed,
        manifest.secondary_language.as_deref(),
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(generated: &Generated, output_dir: &Path) {
    for line in format_generate_output(generated, output_dir) {
        println!("{}", line);
    }
}
