//! Shared test utilities for the menuforge test suite.
//!
//! Provides fixture loading, lookup helpers and tree shape assertions that
//! work with parser output (`ParsedMenu`, `Page`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let menu = parse_fixture();
//! let shop = find_page(&menu.combined, "La botiga");
//! assert_eq!(shop.slug.as_deref(), Some("la-botiga"));
//!
//! assert_eq!(all_page_names(&shop.children), vec![
//!     "Regalos para ella",
//!     "Regalos para él",
//!     "Regalos para niños",
//! ]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::menu::{ParseOptions, ParsedMenu, parse_menu};
use crate::types::{Page, walk_pages};

// =========================================================================
// Fixture setup
// =========================================================================

/// Contents of `fixtures/menu.txt`, the bilingual reference menu.
pub fn fixture_menu() -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/menu.txt");
    std::fs::read_to_string(path).unwrap()
}

/// The reference menu parsed as Spanish with a Catalan second section.
pub fn parse_fixture() -> ParsedMenu {
    let options = ParseOptions {
        secondary_language: Some("ca".to_string()),
        ..ParseOptions::default()
    };
    parse_menu(&fixture_menu(), &options).unwrap()
}

/// Write `content` as `menu.txt` into a fresh temp directory.
///
/// Returns the directory so it lives as long as the test needs it.
pub fn temp_menu(content: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("menu.txt"), content).unwrap();
    tmp
}

// =========================================================================
// Tree lookups: panics with a clear message on miss
// =========================================================================

/// Find a page by name anywhere in the tree. Panics if not found.
pub fn find_page<'a>(pages: &'a [Page], name: &str) -> &'a Page {
    walk_pages(pages).find(|p| p.name == name).unwrap_or_else(|| {
        let names: Vec<&str> = walk_pages(pages).map(|p| p.name.as_str()).collect();
        panic!("page '{name}' not found. Available: {names:?}")
    })
}

/// Names of a page list, in order (one level only).
pub fn page_names(pages: &[Page]) -> Vec<&str> {
    pages.iter().map(|p| p.name.as_str()).collect()
}

/// Names of every page in document order, at every level.
pub fn all_page_names(pages: &[Page]) -> Vec<&str> {
    walk_pages(pages).map(|p| p.name.as_str()).collect()
}

// =========================================================================
// Shape assertions
// =========================================================================

/// Assert that the top two levels of a tree match an expected shape.
///
/// Each entry is `(name, children)`. Use `&[]` for leaf nodes.
///
/// ```rust
/// assert_tree_shape(&menu.combined, &[
///     ("Inicio", &[]),
///     ("Productos", &["Categoría A"]),
///     ("Contacto", &[]),
/// ]);
/// ```
pub fn assert_tree_shape(pages: &[Page], expected: &[(&str, &[&str])]) {
    let expected_names: Vec<&str> = expected.iter().map(|(n, _)| *n).collect();
    assert_eq!(page_names(pages), expected_names, "top-level names mismatch");

    for (page, (name, children)) in pages.iter().zip(expected) {
        assert_eq!(
            page_names(&page.children),
            children.to_vec(),
            "children of '{name}' mismatch"
        );
    }
}
