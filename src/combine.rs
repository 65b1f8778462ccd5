//! Merging the primary and secondary language trees.
//!
//! Pairing is positional: page `i` of a primary list takes its translation
//! from page `i` of the corresponding secondary list, at every nesting level.
//! The primary tree always drives the shape of the result, so secondary pages
//! beyond the primary list's length are ignored and primary pages without a
//! counterpart get empty translations.
//!
//! Because a miscount silently shifts every following translation, each level
//! where the two lists differ in length is reported as a [`PairingMismatch`].

use crate::types::{Page, Translations};
use serde::Serialize;
use std::fmt;

/// A nesting level where primary and secondary list lengths differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingMismatch {
    /// Primary name of the parent page, `None` for the top level.
    pub parent: Option<String>,
    pub primary: usize,
    pub secondary: usize,
}

impl fmt::Display for PairingMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parent {
            Some(parent) => write!(
                f,
                "submenu of \"{parent}\" has {} primary pages but {} translations",
                self.primary, self.secondary
            ),
            None => write!(
                f,
                "top level has {} primary pages but {} translations",
                self.primary, self.secondary
            ),
        }
    }
}

/// The combined tree plus pairing diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Combined {
    pub pages: Vec<Page>,
    pub mismatches: Vec<PairingMismatch>,
}

/// Combine a primary tree with an optional secondary tree.
pub fn combine(primary: &[Page], secondary: Option<&[Page]>) -> Combined {
    let mut mismatches = Vec::new();
    let pages = combine_level(primary, secondary, None, &mut mismatches);
    Combined { pages, mismatches }
}

/// `secondary` is `None` when this level has no counterpart list at all, in
/// which case every page gets empty translations and nothing is reported.
fn combine_level(
    primary: &[Page],
    secondary: Option<&[Page]>,
    parent: Option<&str>,
    mismatches: &mut Vec<PairingMismatch>,
) -> Vec<Page> {
    if let Some(secondary) = secondary
        && secondary.len() != primary.len()
    {
        mismatches.push(PairingMismatch {
            parent: parent.map(str::to_string),
            primary: primary.len(),
            secondary: secondary.len(),
        });
    }

    primary
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let counterpart = secondary.and_then(|list| list.get(i));
            let children = combine_level(
                &page.children,
                counterpart.map(|c| c.children.as_slice()),
                Some(&page.name),
                mismatches,
            );
            Page {
                translations: counterpart.map(Translations::from_page).unwrap_or_default(),
                children,
                ..page.clone()
            }
        })
        .collect()
}
