//! Building the page tree of one language section.
//!
//! Lines are attached along the rightmost spine of the tree: a line at level
//! `n` becomes the last child of the most recently added page at level `n - 1`.
//!
//! ```text
//! Inicio                 → pages[0]
//! Productos              → pages[1]
//!   Categoría A          → pages[1].children[0]
//!     Subcategoría A1    → pages[1].children[0].children[0]
//! Contacto               → pages[2]
//! ```
//!
//! A line whose parent does not exist (for example an indented first line) is
//! dropped and its line number recorded; the rest of the menu still parses.
//! A line deeper than the configured maximum depth fails the parse.

use crate::line::{self, ClassifiedLine, PageKind};
use crate::menu::MenuError;
use crate::naming;
use crate::section::SourceLine;
use crate::types::{Page, Translations};

/// Default number of nesting levels (0, 1 and 2).
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Result of building one section's tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionTree {
    pub pages: Vec<Page>,
    /// Line numbers of orphan lines that were dropped.
    pub dropped_lines: Vec<usize>,
}

/// Build the page tree for one section.
///
/// `locale` is the section's language code, `max_depth` the number of levels
/// allowed (a line at level `max_depth` or deeper is an error).
pub fn build_tree(
    lines: &[SourceLine<'_>],
    locale: &str,
    max_depth: usize,
) -> Result<SectionTree, MenuError> {
    let mut tree = SectionTree::default();

    for source in lines {
        let Some(classified) = line::classify_line(source.text, locale) else {
            continue;
        };
        if classified.level >= max_depth {
            return Err(MenuError::TooDeep {
                line: source.number,
                level: classified.level,
                max_depth,
            });
        }

        let page = page_from_line(classified);
        if attach(&mut tree.pages, page).is_err() {
            tree.dropped_lines.push(source.number);
        }
    }

    Ok(tree)
}

/// Append `page` as the last child of the rightmost page one level up.
///
/// Hands the page back when that parent does not exist.
fn attach(roots: &mut Vec<Page>, page: Page) -> Result<(), Page> {
    let mut siblings = roots;
    for _ in 0..page.level {
        siblings = match siblings.last_mut() {
            Some(parent) => &mut parent.children,
            None => return Err(page),
        };
    }
    siblings.push(page);
    Ok(())
}

/// Derive every page field from a classified line.
pub fn page_from_line(line: ClassifiedLine) -> Page {
    let is_home = line.level == 0 && naming::is_home_alias(&line.slug);

    let slug = match line.kind {
        PageKind::Skip => None,
        _ if line.slug.is_empty() => None,
        _ => Some(line.slug),
    };
    let php_file = match &slug {
        Some(slug) if line.kind.generates_file() => {
            Some(naming::slug_to_php_filename(slug, is_home))
        }
        _ => None,
    };
    let var_name = slug.as_deref().map(naming::slug_to_variable);
    let dictionary_key = Some(naming::text_to_dictionary_key(&line.name)).filter(|k| !k.is_empty());
    let seo = if line.seo.is_empty() {
        line.name.clone()
    } else {
        line.seo
    };

    Page {
        seo,
        slug,
        level: line.level,
        is_home,
        skip_page: line.kind == PageKind::Skip,
        page_no_seo: line.kind == PageKind::NoSeo,
        is_automanaged: line.kind == PageKind::Automanaged,
        has_seo: line.markers.has_seo,
        var_name,
        php_file,
        dictionary_key,
        name: line.name,
        children: Vec::new(),
        translations: Translations::default(),
    }
}
