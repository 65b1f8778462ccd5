//! Per-line parsing of the menu grammar.
//!
//! A menu line is a label decorated with optional markers:
//!
//! ```text
//! <indent>[- ]Label [(SEO: description)] [(*)|(**)|(autogestionable)]
//! ```
//!
//! | Marker | Meaning |
//! |--------|---------|
//! | `(*)` | listed in the menu, no file generated |
//! | `(**)` | file generated without SEO texts |
//! | `(autogestionable)` | maintained by hand, no file generated (case-insensitive) |
//! | `(SEO: ...)` | SEO description for the page |
//!
//! Indentation is one level per leading tab, or one level per two leading
//! spaces. Blank lines and lines starting with `#` carry no page.

use crate::naming;
use regex::Regex;
use std::sync::LazyLock;

static SEO_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(SEO:\s*([^)]+)\)").expect("valid SEO regex"));

static SEO_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(SEO:[^)]+\)").expect("valid SEO block regex"));

static STAR_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\*\*?\)").expect("valid star marker regex"));

static AUTOMANAGED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(autogestionable\)").expect("valid automanaged regex"));

const SEO_OPENER: &str = "(SEO:";

/// Marker tokens found on a line, each detected independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Markers {
    pub skip_page: bool,
    pub page_no_seo: bool,
    pub is_automanaged: bool,
    pub has_seo: bool,
}

impl Markers {
    /// Resolve the raw tokens to a single page kind.
    ///
    /// Precedence is `Skip > Automanaged > NoSeo`.
    pub fn kind(&self) -> PageKind {
        if self.skip_page {
            PageKind::Skip
        } else if self.is_automanaged {
            PageKind::Automanaged
        } else if self.page_no_seo {
            PageKind::NoSeo
        } else {
            PageKind::Regular
        }
    }
}

/// How a page is treated by the generators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageKind {
    #[default]
    Regular,
    /// `(*)`
    Skip,
    /// `(**)`
    NoSeo,
    /// `(autogestionable)`
    Automanaged,
}

impl PageKind {
    /// Whether pages of this kind get an output file (given a usable slug).
    pub fn generates_file(self) -> bool {
        matches!(self, PageKind::Regular | PageKind::NoSeo)
    }
}

/// A menu line broken into its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedLine {
    pub level: usize,
    /// Label with markers and SEO annotation removed.
    pub name: String,
    /// Trimmed SEO description, empty when absent.
    pub seo: String,
    /// Slug of the label, empty when the label slugs to nothing.
    pub slug: String,
    pub markers: Markers,
    pub kind: PageKind,
}

/// Classify one raw line. Returns `None` for blank and `#` comment lines.
///
/// `locale` is the language code of the section the line belongs to; it only
/// affects how `&` is spelled in the slug.
pub fn classify_line(raw: &str, locale: &str) -> Option<ClassifiedLine> {
    let level = indent_level(raw);
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let text = strip_list_prefix(trimmed);

    let markers = detect_markers(text);
    Some(ClassifiedLine {
        level,
        name: clean_text(text),
        seo: extract_seo(text),
        slug: extract_slug(text, locale),
        kind: markers.kind(),
        markers,
    })
}

/// Indentation level of a raw line.
///
/// Lines starting with a tab count leading tabs; anything else counts leading
/// whitespace characters in pairs.
pub fn indent_level(line: &str) -> usize {
    if line.starts_with('\t') {
        return line.chars().take_while(|c| *c == '\t').count();
    }
    line.chars().take_while(|c| c.is_whitespace()).count() / 2
}

/// Drop a leading `- ` list bullet.
fn strip_list_prefix(text: &str) -> &str {
    match text.strip_prefix('-') {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => text,
    }
}

/// Detect the marker tokens on a line.
pub fn detect_markers(text: &str) -> Markers {
    Markers {
        skip_page: has_single_star(text),
        page_no_seo: text.contains("(**)"),
        is_automanaged: AUTOMANAGED_MARKER.is_match(text),
        has_seo: text.contains(SEO_OPENER),
    }
}

/// `(*)` not immediately followed by another `*`.
fn has_single_star(text: &str) -> bool {
    text.match_indices("(*)")
        .any(|(pos, token)| !text[pos + token.len()..].starts_with('*'))
}

/// Text of the `(SEO: ...)` annotation, trimmed. Empty when absent.
pub fn extract_seo(text: &str) -> String {
    SEO_ANNOTATION
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// The label with every marker and the SEO annotation removed.
pub fn clean_text(text: &str) -> String {
    let without_seo = SEO_BLOCK.replace_all(text, "");
    let without_stars = STAR_MARKER.replace_all(&without_seo, "");
    AUTOMANAGED_MARKER
        .replace_all(&without_stars, "")
        .trim()
        .to_string()
}

/// Slug of the label: markers stripped, SEO annotation cut off, then slugified.
pub fn extract_slug(text: &str, locale: &str) -> String {
    let without_stars = STAR_MARKER.replace_all(text, "");
    let without_markers = AUTOMANAGED_MARKER.replace_all(&without_stars, "");
    let label = match without_markers.split_once(SEO_OPENER) {
        Some((before, _)) => before,
        None => without_markers.as_ref(),
    };
    naming::slugify_with_locale(label.trim(), locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(raw: &str) -> ClassifiedLine {
        classify_line(raw, "es").unwrap()
    }

    #[test]
    fn plain_label() {
        let line = classify("La botiga");
        assert_eq!(line.level, 0);
        assert_eq!(line.name, "La botiga");
        assert_eq!(line.slug, "la-botiga");
        assert_eq!(line.seo, "");
        assert_eq!(line.kind, PageKind::Regular);
        assert_eq!(line.markers, Markers::default());
    }

    #[test]
    fn seo_annotation_extracted_and_removed() {
        let line = classify("La botiga (SEO:   Tienda de regalos originales  )");
        assert_eq!(line.name, "La botiga");
        assert_eq!(line.seo, "Tienda de regalos originales");
        assert_eq!(line.slug, "la-botiga");
        assert!(line.markers.has_seo);
    }

    #[test]
    fn seo_is_substring_of_annotation() {
        let raw = "Política de cookies (SEO: Información sobre el uso de cookies)";
        let seo = extract_seo(raw);
        assert!(!seo.is_empty());
        assert!(raw.contains(&seo));
    }

    #[test]
    fn slug_never_embeds_seo_text() {
        let line = classify("Servicios (SEO: Los mejores servicios profesionales)");
        assert_eq!(line.slug, "servicios");
    }

    #[test]
    fn single_star_marks_skip() {
        let line = classify("Contacto (*)");
        assert!(line.markers.skip_page);
        assert!(!line.markers.page_no_seo);
        assert_eq!(line.kind, PageKind::Skip);
        assert_eq!(line.name, "Contacto");
        assert_eq!(line.slug, "contacto");
    }

    #[test]
    fn double_star_marks_no_seo() {
        let line = classify("Aviso legal (**)");
        assert!(!line.markers.skip_page);
        assert!(line.markers.page_no_seo);
        assert_eq!(line.kind, PageKind::NoSeo);
        assert_eq!(line.name, "Aviso legal");
        assert_eq!(line.slug, "aviso-legal");
    }

    #[test]
    fn single_star_followed_by_star_is_not_skip() {
        let markers = detect_markers("Extraño (*)*");
        assert!(!markers.skip_page);
    }

    #[test]
    fn automanaged_marker_is_case_insensitive() {
        let line = classify("Blog (AutoGestionable)");
        assert!(line.markers.is_automanaged);
        assert_eq!(line.kind, PageKind::Automanaged);
        assert_eq!(line.name, "Blog");
        assert_eq!(line.slug, "blog");
    }

    #[test]
    fn combined_markers_resolve_by_precedence() {
        let both = classify("Raro (*) (**)");
        assert!(both.markers.skip_page && both.markers.page_no_seo);
        assert_eq!(both.kind, PageKind::Skip);

        let managed = classify("Tienda (**) (autogestionable)");
        assert_eq!(managed.kind, PageKind::Automanaged);
        assert!(!managed.kind.generates_file());
    }

    #[test]
    fn seo_with_skip_marker() {
        let line = classify("La botiga (SEO: Descripción) (*)");
        assert_eq!(line.name, "La botiga");
        assert_eq!(line.seo, "Descripción");
        assert_eq!(line.kind, PageKind::Skip);
        assert!(line.markers.has_seo);
    }

    #[test]
    fn clean_text_removes_everything() {
        assert_eq!(clean_text("Política de cookies (SEO: Info cookies) (**)"), "Política de cookies");
        assert_eq!(clean_text("Blog (autogestionable)"), "Blog");
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert!(classify_line("", "es").is_none());
        assert!(classify_line("   \t ", "es").is_none());
        assert!(classify_line("# comentario", "es").is_none());
        assert!(classify_line("    # indented comment", "es").is_none());
    }

    #[test]
    fn indentation_with_spaces() {
        assert_eq!(indent_level("Inicio"), 0);
        assert_eq!(indent_level(" Inicio"), 0);
        assert_eq!(indent_level("  Inicio"), 1);
        assert_eq!(indent_level("   Inicio"), 1);
        assert_eq!(indent_level("    Inicio"), 2);
    }

    #[test]
    fn indentation_with_tabs() {
        assert_eq!(indent_level("\tInicio"), 1);
        assert_eq!(indent_level("\t\tInicio"), 2);
        assert_eq!(indent_level("\t  Inicio"), 1);
    }

    #[test]
    fn list_bullet_is_stripped_without_changing_level() {
        let line = classify("  - Categoría A");
        assert_eq!(line.level, 1);
        assert_eq!(line.name, "Categoría A");
        assert_eq!(line.slug, "categoria-a");

        let top = classify("- Inicio");
        assert_eq!(top.level, 0);
        assert_eq!(top.name, "Inicio");
    }

    #[test]
    fn hyphen_without_space_is_part_of_label() {
        let line = classify("-Ofertas-");
        assert_eq!(line.name, "-Ofertas-");
        assert_eq!(line.slug, "ofertas");
    }

    #[test]
    fn slug_uses_section_locale() {
        let es = classify_line("Diseño & Web", "es").unwrap();
        let ca = classify_line("Disseny & Web", "ca").unwrap();
        assert_eq!(es.slug, "diseno-y-web");
        assert_eq!(ca.slug, "disseny-i-web");
    }

    #[test]
    fn label_that_slugs_to_nothing() {
        let line = classify("(SEO: solo descripción)");
        assert_eq!(line.name, "");
        assert_eq!(line.slug, "");
        assert_eq!(line.seo, "solo descripción");
    }
}
