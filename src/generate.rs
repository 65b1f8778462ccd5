//! PHP include generation.
//!
//! Last stage of the pipeline. Parses a menu file, checks it, and writes the
//! files a PHP template includes to become a multilingual site.
//!
//! ## Generated Files
//!
//! - **`menu.json`**: the full [`Manifest`], for the template renderer
//! - **`_diccionario.php`**: `$diccionario[key][lang]` texts for every page
//! - **`_urls.php`**: `$urls[slug][lang]` routes used by `crear_url()`
//! - **`_menu.php`**: the navigation partial
//!
//! ## Output Structure
//!
//! ```text
//! out/
//! ├── menu.json
//! ├── _diccionario.php
//! ├── _urls.php
//! └── _menu.php
//! ```
//!
//! ## Rendering
//!
//! The PHP files are plain text built with `format!`. The navigation partial
//! is HTML, built with [maud](https://maud.lambda.xyz/) so labels are escaped;
//! the embedded PHP snippets are passed through as [`PreEscaped`].

use crate::config::MenuConfig;
use crate::menu::{Manifest, MenuError, ParseOptions, ParsedMenu, parse_menu};
use crate::naming;
use crate::types::{DictionaryEntry, MenuItem, UrlMapping};
use crate::validate::{self, ValidationError};
use maud::{Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MANIFEST_FILENAME: &str = "menu.json";
pub const DICTIONARY_FILENAME: &str = "_diccionario.php";
pub const URLS_FILENAME: &str = "_urls.php";
pub const MENU_FILENAME: &str = "_menu.php";

/// Key of the home route in `$urls`.
const HOME_ROUTE: &str = "web";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Menu(#[from] MenuError),
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

/// What a `generate` run produced.
#[derive(Debug)]
pub struct Generated {
    pub parsed: ParsedMenu,
    pub manifest: Manifest,
    /// Written files, in write order.
    pub written: Vec<PathBuf>,
}

/// Parse `menu_path`, validate it, and write every output file to `output_dir`.
pub fn generate(
    menu_path: &Path,
    output_dir: &Path,
    config: &MenuConfig,
) -> Result<Generated, GenerateError> {
    let content = fs::read_to_string(menu_path)?;
    let parsed = parse_menu(&content, &ParseOptions::from_config(config))?;
    validate::validate_menu_structure(&parsed.combined, config.validation.min_pages)?;
    validate::validate_project(&config.project)?;

    let manifest = Manifest::build(&parsed, config);
    let primary = manifest.primary_language.as_str();
    let secondary = manifest.secondary_language.as_deref();

    fs::create_dir_all(output_dir)?;
    let outputs = [
        (MANIFEST_FILENAME, serde_json::to_string_pretty(&manifest)?),
        (
            DICTIONARY_FILENAME,
            render_dictionary_php(&manifest.dictionary, primary, secondary),
        ),
        (
            URLS_FILENAME,
            render_urls_php(&manifest.urls, primary, secondary),
        ),
        (MENU_FILENAME, render_menu_php(&manifest.navigation)),
    ];

    let mut written = Vec::with_capacity(outputs.len());
    for (filename, body) in outputs {
        let path = output_dir.join(filename);
        fs::write(&path, body)?;
        written.push(path);
    }

    Ok(Generated {
        parsed,
        manifest,
        written,
    })
}

// ============================================================================
// PHP files
// ============================================================================

/// Escape text for a double-quoted PHP string.
fn php_double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '"' | '$' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for a single-quoted PHP string.
fn php_single_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Renders `_diccionario.php`.
///
/// One block per entry, in generator order, with a line per language that
/// has a value. The trailing loop collapses every key to the visitor's
/// language, falling back to the preferred one.
pub fn render_dictionary_php(
    entries: &[DictionaryEntry],
    primary: &str,
    secondary: Option<&str>,
) -> String {
    let mut out = String::from(
        "<?php\n/**\n * Multilingual dictionary\n * Generated from the menu file. Do not edit.\n */\n\n$diccionario = [];\n\n",
    );

    let languages: Vec<&str> = std::iter::once(primary).chain(secondary).collect();

    for entry in entries {
        let key = php_double_quoted(&entry.key);
        out.push_str(&format!("// {}\n", entry.key));
        for lang in &languages {
            if let Some(value) = entry.get(lang) {
                out.push_str(&format!(
                    "$diccionario[\"{key}\"][\"{}\"] = \"{}\";\n",
                    php_double_quoted(lang),
                    php_double_quoted(value)
                ));
            }
        }
        out.push('\n');
    }

    out.push_str(
        "$idioma = detectar_idioma();\n\n\
         foreach ($diccionario as $clave => $traducciones) {\n    \
         $diccionario[$clave] = $traducciones[$idioma] ?? $traducciones[IDIOMA_PREFERENTE] ?? '';\n\
         }\n?>\n",
    );
    out
}

/// Renders `_urls.php`.
///
/// The `web` route is always present and points at the site root; every URL
/// mapping adds `/{slug}` for the primary language and
/// `/{lang}/{translated slug}` for the secondary one. Mappings to the home
/// file route to the language root instead.
pub fn render_urls_php(mappings: &[UrlMapping], primary: &str, secondary: Option<&str>) -> String {
    let mut out = String::from(
        "<?php\n/**\n * Multilingual URL map\n * Generated from the menu file. Do not edit.\n */\n\n$urls = [\n",
    );

    let primary_lang = php_single_quoted(primary);
    let secondary_lang = secondary.map(php_single_quoted);

    out.push_str(&format!("    '{HOME_ROUTE}' => [\n"));
    out.push_str(&format!("        '{primary_lang}' => '/',\n"));
    if let Some(lang) = &secondary_lang {
        out.push_str(&format!("        '{lang}' => '/{lang}',\n"));
    }
    out.push_str("    ],\n");

    for mapping in mappings {
        let is_home = mapping.php_file == naming::HOME_FILENAME;
        let slug = php_single_quoted(&mapping.primary_slug);
        out.push_str(&format!("    '{slug}' => [\n"));
        if is_home {
            out.push_str(&format!("        '{primary_lang}' => '/',\n"));
        } else {
            out.push_str(&format!("        '{primary_lang}' => '/{slug}',\n"));
        }
        if let Some(lang) = &secondary_lang {
            if is_home {
                out.push_str(&format!("        '{lang}' => '/{lang}',\n"));
            } else {
                out.push_str(&format!(
                    "        '{lang}' => '/{lang}/{}',\n",
                    php_single_quoted(&mapping.secondary_slug)
                ));
            }
        }
        out.push_str("    ],\n");
    }

    out.push_str("];\n?>\n");
    out
}

/// Renders `_menu.php`: a short PHP header followed by the navigation markup.
pub fn render_menu_php(items: &[MenuItem]) -> String {
    format!(
        "<?php\n/**\n * Navigation menu\n * Generated from the menu file. Do not edit.\n */\n?>\n{}\n",
        render_menu(items).into_string()
    )
}

// ============================================================================
// Navigation
// ============================================================================

/// Renders the navigation (hamburger toggle plus nested menu list)
pub fn render_menu(items: &[MenuItem]) -> Markup {
    html! {
        nav.main-nav {
            button.menu-toggle type="button" aria-label="Toggle menu" {
                span {}
                span {}
                span {}
            }
            ul.menu {
                @for item in items {
                    (render_menu_item(item))
                }
            }
        }
    }
}

/// Renders a single menu item and its submenu
fn render_menu_item(item: &MenuItem) -> Markup {
    html! {
        @if item.skip_page {
            li.menu-item.no-link {
                span { (menu_label(item)) }
                (render_submenu(item))
            }
        } @else {
            li class={ "menu-item" (active_class(item)) } {
                a href=(menu_href(item)) { (menu_label(item)) }
                (render_submenu(item))
            }
        }
    }
}

fn render_submenu(item: &MenuItem) -> Markup {
    html! {
        @if !item.submenu.is_empty() {
            ul.submenu {
                @for child in &item.submenu {
                    (render_menu_item(child))
                }
            }
        }
    }
}

/// Dictionary lookup for the label, or the literal name without a key.
fn menu_label(item: &MenuItem) -> Markup {
    match &item.dictionary_key {
        Some(key) => html! {
            (PreEscaped(format!(
                "<?php echo $diccionario[\"Menu{}\"]; ?>",
                php_double_quoted(key)
            )))
        },
        None => html! { (item.name) },
    }
}

fn menu_href(item: &MenuItem) -> PreEscaped<String> {
    match &item.slug {
        Some(slug) => PreEscaped(format!(
            "<?php echo crear_url('{}', $idioma); ?>",
            php_single_quoted(slug)
        )),
        None => PreEscaped(item.url.clone()),
    }
}

fn active_class(item: &MenuItem) -> PreEscaped<String> {
    match &item.var_name {
        Some(var) => PreEscaped(format!(
            "<?php echo ($pagina == '{}') ? ' active' : ''; ?>",
            php_single_quoted(var)
        )),
        None => PreEscaped(String::new()),
    }
}
