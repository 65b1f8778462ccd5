//! Centralized name derivation for menu entries.
//!
//! Every identifier the generated site needs is derived from the free-text
//! label of a menu line. This module owns those derivations so that the tree
//! builder, the artifact generators and the renderers agree on them:
//!
//! - `"La Botiga"` → slug `la-botiga` (URL segment)
//! - `"la-botiga"` → variable `la_botiga` (PHP variable name)
//! - `"Qué ofrecemos"` → dictionary key `QueOfrecemos`
//! - `"contacto"` → filename `contacto.php`; home aliases → `web.php`
//!
//! ## Diacritics
//!
//! Accents are removed by NFD decomposition followed by dropping the combining
//! marks (U+0300..U+036F), so `é` → `e`, `ñ` → `n`, `ç` → `c`. A handful of
//! Latin letters without a decomposition (`ß`, `æ`, `ø`, `œ`, `ł`, `đ`) are
//! folded explicitly when slugging.
//!
//! Every function accepts the empty string and returns an empty result for it.

use unicode_normalization::UnicodeNormalization;

/// Top-level slugs that mark the site's home page.
pub const HOME_ALIASES: &[&str] = &["inicio", "inici", "home", "index"];

/// Slugs written to [`HOME_FILENAME`] at any level.
pub const HOME_FILENAME_ALIASES: &[&str] = &["inicio", "home", "index"];

/// Output file for the home page.
pub const HOME_FILENAME: &str = "web.php";

/// Extension of every generated page file.
pub const PAGE_EXTENSION: &str = "php";

/// Locale assumed when a caller does not provide one.
pub const DEFAULT_LOCALE: &str = "es";

const PROJECT_FOLDER_PREFIX: &str = "Web_";
const ASSETS_FOLDER_PREFIX: &str = "assets-";

/// Characters dropped before slugging (they never act as separators).
const REMOVED_PUNCTUATION: &[char] = &['*', '+', '~', '.', '(', ')', '\'', '"', '!', ':', '@'];

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_diacritic(*c)).collect()
}

/// Latin letters that survive NFD decomposition unchanged.
fn fold_letter(c: char) -> Option<&'static str> {
    match c {
        'ß' => Some("ss"),
        'æ' | 'Æ' => Some("ae"),
        'œ' | 'Œ' => Some("oe"),
        'ø' | 'Ø' => Some("o"),
        'ł' | 'Ł' => Some("l"),
        'đ' | 'Đ' => Some("d"),
        'þ' | 'Þ' => Some("th"),
        _ => None,
    }
}

/// How `&` is spelled inside a slug for the given locale.
fn ampersand_word(locale: &str) -> &'static str {
    match locale {
        "es" => "y",
        "ca" => "i",
        "fr" => "et",
        "de" => "und",
        "it" | "pt" => "e",
        _ => "and",
    }
}

/// Append `word`, preceded by a hyphen when a separator is pending.
fn push_word(slug: &mut String, pending_separator: &mut bool, word: &str) {
    if *pending_separator && !slug.is_empty() {
        slug.push('-');
    }
    *pending_separator = false;
    slug.push_str(word);
}

/// Convert free text to a URL slug using the default locale.
///
/// - `"La Botiga"` → `"la-botiga"`
/// - `"Qué ofrecemos"` → `"que-ofrecemos"`
/// - `"Pàgina d'inici"` → `"pagina-dinici"`
/// - `"  ¡Hola, mundo!  "` → `"hola-mundo"`
pub fn slugify(text: &str) -> String {
    slugify_with_locale(text, DEFAULT_LOCALE)
}

/// Convert free text to a URL slug, spelling `&` in the given locale.
///
/// Lowercases, strips diacritics, drops the fixed punctuation set
/// `* + ~ . ( ) ' " ! : @`, and collapses every other run of non-alphanumeric
/// characters into a single hyphen. Leading and trailing hyphens never appear.
/// Letters outside the Latin script are dropped.
pub fn slugify_with_locale(text: &str, locale: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in strip_diacritics(text).chars() {
        if REMOVED_PUNCTUATION.contains(&c) {
            continue;
        }
        if c.is_ascii_alphanumeric() {
            let lower = c.to_ascii_lowercase();
            push_word(&mut slug, &mut pending_separator, lower.encode_utf8(&mut [0; 4]));
        } else if let Some(folded) = fold_letter(c) {
            push_word(&mut slug, &mut pending_separator, folded);
        } else if c == '&' {
            pending_separator = true;
            push_word(&mut slug, &mut pending_separator, ampersand_word(locale));
            pending_separator = true;
        } else if c.is_alphanumeric() {
            // Non-Latin letters and digits have no ASCII rendering.
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Convert a slug to an identifier usable as a PHP variable name.
///
/// - `"la-botiga"` → `"la_botiga"`
/// - `"Que-Ofrecemos!"` → `"que_ofrecemos"`
pub fn slug_to_variable(slug: &str) -> String {
    slug.to_lowercase()
        .chars()
        .map(|c| if c == '-' { '_' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

/// Capitalize the first letter of each whitespace-separated word and join
/// them. Only ASCII letters, digits and whitespace are kept.
fn camel_case_words(text: &str) -> String {
    let normalized: String = strip_diacritics(text)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    normalized
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = first.to_ascii_uppercase().to_string();
                    out.push_str(&chars.as_str().to_ascii_lowercase());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Convert a label to a CamelCase dictionary key.
///
/// - `"La botiga"` → `"LaBotiga"`
/// - `"Qué ofrecemos"` → `"QueOfrecemos"`
/// - `"POLÍTICA de privacidad"` → `"PoliticaDePrivacidad"`
pub fn text_to_dictionary_key(text: &str) -> String {
    camel_case_words(text)
}

/// Whether a slug is one of the [`HOME_ALIASES`].
pub fn is_home_alias(slug: &str) -> bool {
    HOME_ALIASES.contains(&slug)
}

/// Output filename for a page.
///
/// Home pages (flagged, or whose slug is one of the
/// [`HOME_FILENAME_ALIASES`]) all share [`HOME_FILENAME`]; everything else is
/// `{slug}.php`.
pub fn slug_to_php_filename(slug: &str, is_home: bool) -> String {
    if is_home || HOME_FILENAME_ALIASES.contains(&slug) {
        return HOME_FILENAME.to_string();
    }
    if slug.is_empty() {
        return String::new();
    }
    format!("{slug}.{PAGE_EXTENSION}")
}

/// True iff `slug` matches `^[a-z0-9]+(-[a-z0-9]+)*$`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.split('-').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

/// Normalize an asset reference to a path relative to the template root.
///
/// - `"./css/style.css"` → `"css/style.css"`
/// - `"../images/logo.png"` → `"images/logo.png"`
/// - `"/assets/fonts/font.woff2"` → `"assets/fonts/font.woff2"`
/// - `"css\\main.css"` → `"css/main.css"`
pub fn normalize_asset_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let mut rest = unified.as_str();
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("../") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('/') {
            rest = stripped;
        } else {
            break;
        }
    }
    rest.to_string()
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Whether a reference points at an external host (`https://`, `http://`, `//`).
pub fn is_cdn(path: &str) -> bool {
    path.starts_with("//")
        || starts_with_ignore_case(path, "http://")
        || starts_with_ignore_case(path, "https://")
}

/// Whether a reference is an inline `data:` URI.
pub fn is_data_uri(path: &str) -> bool {
    starts_with_ignore_case(path, "data:")
}

/// Whether a link is an in-page anchor or a `javascript:` pseudo-URL.
pub fn is_special_link(path: &str) -> bool {
    path.starts_with('#') || starts_with_ignore_case(path, "javascript:")
}

/// Project folder name for a business.
///
/// `"Lar Living"` → `"Web_LarLiving"`, `"Café & Restaurant"` → `"Web_CafeRestaurant"`.
pub fn generate_project_folder_name(business_name: &str) -> String {
    let words = camel_case_words(business_name);
    if words.is_empty() {
        return String::new();
    }
    format!("{PROJECT_FOLDER_PREFIX}{words}")
}

/// Assets folder name for a business.
///
/// `"Lar Living"` → `"assets-lar-living"`.
pub fn generate_assets_folder_name(business_name: &str) -> String {
    let slug = slugify(business_name);
    if slug.is_empty() {
        return String::new();
    }
    format!("{ASSETS_FOLDER_PREFIX}{slug}")
}
