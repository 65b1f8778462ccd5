//! # Menuforge
//!
//! Turns an indented, bilingual menu outline into everything a PHP template
//! needs to become a multilingual site: a page tree, dictionary texts, URL
//! routes, the list of page files to create and a navigation partial.
//!
//! ```text
//! Inicio (SEO: Tienda de decoración)
//! La botiga
//!   Regalos para ella
//! Contacto (*)
//! ----------------------------------------
//! Inici (SEO: Botiga de decoració)
//! La botiga
//!   Regals per a ella
//! Contacte (*)
//! ```
//!
//! # Architecture: Parse, Then Derive
//!
//! A menu file goes through a parse stage that builds the page tree, then a
//! derive stage of pure generators that flatten it:
//!
//! ```text
//! 1. Split     menu.txt        →  language sections
//! 2. Build     each section    →  page tree (per language)
//! 3. Combine   two trees       →  combined tree with translations
//! 4. Derive    combined tree   →  dictionary, URLs, files, navigation
//! 5. Generate  artifacts       →  menu.json + PHP includes
//! ```
//!
//! Every stage before the last one is pure: no I/O, no shared state, so any
//! number of menus can be parsed concurrently (`check` does exactly that).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Slugs, variable names, dictionary keys, filenames, link helpers |
//! | [`line`] | Classifies one menu line: indentation, markers, SEO text, slug |
//! | [`section`] | Splits a menu file into language sections |
//! | [`tree`] | Builds the page tree of one section |
//! | [`combine`] | Pairs the two language trees by position |
//! | [`artifacts`] | The four generators over the combined tree |
//! | [`menu`] | `parse_menu` entry point and the `Manifest` bundle |
//! | [`types`] | Shared serializable types (`Page`, artifact records) |
//! | [`validate`] | Minimum page count and project settings checks |
//! | [`config`] | `config.toml` loading, validation and merging |
//! | [`generate`] | Renders and writes `menu.json` and the PHP includes |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Page Kind Per Line
//!
//! The markers `(*)`, `(**)` and `(autogestionable)` are detected
//! independently but resolved to a single [`line::PageKind`] with precedence
//! `(*)` > `(autogestionable)` > `(**)`. A page is never both "menu only" and
//! "file without SEO", so the generators never see contradictory flags.
//!
//! ## Lenient Parsing, Visible Recovery
//!
//! An indented line whose parent does not exist is dropped rather than
//! failing the parse: a menu with one stray line is still worth reviewing.
//! The same goes for extra language sections and translation lists of the
//! wrong length. Each recovery is recorded on [`menu::ParsedMenu`] and
//! printed as a warning, so nothing disappears without a trace. Menus nested
//! deeper than `parse.max_depth` are an error, since there is no sensible
//! place to put those pages.
//!
//! ## Positional Translations
//!
//! The second section translates the first line by line, so the two must
//! list the same pages in the same order. Slugs cannot be used to pair
//! pages: they are derived from the very texts being translated. With
//! `parse.strict_pairing` a length mismatch becomes an error.

pub mod artifacts;
pub mod combine;
pub mod config;
pub mod generate;
pub mod line;
pub mod menu;
pub mod naming;
pub mod output;
pub mod section;
pub mod tree;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
