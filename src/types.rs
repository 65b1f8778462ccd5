//! Shared types produced by the parser and consumed by the generators.
//!
//! These types are serialized into the JSON manifest handed to the template
//! renderer, so field names use the camelCase spelling of the output contract
//! (`phpFile`, `dictionaryKey`, `isHome`, ...).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node in the navigation tree.
///
/// Built once per menu file by [`crate::tree::build_tree`] and never mutated
/// afterwards except by [`crate::combine::combine`], which fills in
/// `translations` on its own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Label with every marker and the SEO annotation removed.
    pub name: String,
    /// URL slug. `None` for skip pages and labels that slug to nothing.
    pub slug: Option<String>,
    /// SEO description, or `name` when the line had no annotation.
    pub seo: String,
    /// Indentation depth, 0 = top level.
    pub level: usize,
    /// Top-level page whose slug is a home alias.
    pub is_home: bool,
    /// `(*)`: listed in the menu but no file is generated.
    pub skip_page: bool,
    /// `(**)`: file is generated without SEO texts.
    pub page_no_seo: bool,
    /// `(autogestionable)`: maintained by hand, no file is generated.
    pub is_automanaged: bool,
    /// The line carried an explicit `(SEO: ...)` annotation.
    pub has_seo: bool,
    pub var_name: Option<String>,
    pub php_file: Option<String>,
    pub dictionary_key: Option<String>,
    #[serde(default)]
    pub children: Vec<Page>,
    /// Secondary-language counterpart. Empty outside the combined tree.
    #[serde(default)]
    pub translations: Translations,
}

impl Page {
    /// Whether this page produces an output file.
    pub fn generates_file(&self) -> bool {
        self.php_file.is_some()
    }

    /// Depth-first, pre-order iterator over this page and its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Pre-order traversal over a page tree, in document order.
pub struct Walk<'a> {
    stack: Vec<&'a Page>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Page;

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.stack.pop()?;
        self.stack.extend(page.children.iter().rev());
        Some(page)
    }
}

/// Pre-order traversal over a forest of pages.
pub fn walk_pages(pages: &[Page]) -> impl Iterator<Item = &Page> {
    pages.iter().flat_map(Page::walk)
}

/// Fields copied from the positionally paired secondary-language page.
///
/// Serializes as `{}` when the page has no counterpart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Translations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<String>,
}

impl Translations {
    pub fn from_page(page: &Page) -> Self {
        Self {
            name: Some(page.name.clone()),
            slug: page.slug.clone(),
            seo: Some(page.seo.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.slug.is_none() && self.seo.is_none()
    }

    /// Translated label, if present and non-empty.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    /// Translated slug, if present and non-empty.
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|s| !s.is_empty())
    }

    /// Translated SEO text, if present and non-empty.
    pub fn seo(&self) -> Option<&str> {
        self.seo.as_deref().filter(|s| !s.is_empty())
    }
}

/// One dictionary key with its text per language code.
///
/// Serializes flat: `{"key": "MenuInicio", "es": "Inicio", "ca": "Inici"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub key: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, String>,
}

impl DictionaryEntry {
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.values.get(lang).map(String::as_str)
    }
}

/// Route of one page in both languages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlMapping {
    pub primary_slug: String,
    pub secondary_slug: String,
    pub php_file: String,
}

/// One output file the renderer must produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub filename: String,
    pub slug: String,
    pub name: String,
    pub var_name: String,
    pub dictionary_key: Option<String>,
    pub seo: String,
    pub is_home: bool,
}

/// Presentation-ready navigation item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    pub slug: Option<String>,
    /// `/{slug}`, or `#` for items without a slug.
    pub url: String,
    pub var_name: Option<String>,
    pub dictionary_key: Option<String>,
    pub has_submenu: bool,
    pub skip_page: bool,
    #[serde(default)]
    pub submenu: Vec<MenuItem>,
}
