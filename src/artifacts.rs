//! The four generators that flatten the combined tree for the renderer.
//!
//! Every generator walks the tree depth-first in document order, so the
//! order of their output always matches the order of the menu file.
//!
//! | Generator | Includes |
//! |-----------|----------|
//! | [`dictionary_entries`] | pages with a dictionary key |
//! | [`url_mappings`] | pages with a file, a slug and a translated slug |
//! | [`files_to_create`] | pages with a file |
//! | [`menu_structure`] | every page, skip pages included |

use crate::types::{DictionaryEntry, FileEntry, MenuItem, Page, UrlMapping, walk_pages};
use std::collections::BTreeMap;

/// Stand-in for the business name in page titles when none is configured.
pub const BUSINESS_NAME_PLACEHOLDER: &str = "[Nombre Empresa]";

/// `url` of presentation items without a slug.
pub const NO_LINK_URL: &str = "#";

/// Dictionary keys for the menu labels and page metadata.
///
/// Every page with a dictionary key gets `Menu{Key}`; pages that also produce
/// a file get `{Key}Title`, `{Key}KeyWords` and `{Key}Description`. Secondary
/// values are added only when `secondary` is set and the translated text is
/// non-empty. Pages marked `(**)` keep their keys with empty SEO texts.
pub fn dictionary_entries(
    pages: &[Page],
    primary: &str,
    secondary: Option<&str>,
    business_name: Option<&str>,
) -> Vec<DictionaryEntry> {
    let business = business_name.unwrap_or(BUSINESS_NAME_PLACEHOLDER);
    let title = |name: &str| format!("{name} - {business}");
    let mut entries = Vec::new();

    for page in walk_pages(pages) {
        let Some(key) = page.dictionary_key.as_deref() else {
            continue;
        };
        let translated_name = page.translations.name();

        entries.push(entry(
            format!("Menu{key}"),
            (primary, page.name.clone()),
            secondary.zip(translated_name.map(str::to_string)),
        ));

        if !page.generates_file() {
            continue;
        }

        entries.push(entry(
            format!("{key}Title"),
            (primary, title(&page.name)),
            secondary.zip(translated_name.map(title)),
        ));

        let (seo, translated_seo) = if page.page_no_seo {
            (String::new(), translated_name.map(|_| String::new()))
        } else {
            (page.seo.clone(), page.translations.seo().map(str::to_string))
        };
        for suffix in ["KeyWords", "Description"] {
            entries.push(entry(
                format!("{key}{suffix}"),
                (primary, seo.clone()),
                secondary.zip(translated_seo.clone()),
            ));
        }
    }

    entries
}

fn entry(key: String, primary: (&str, String), secondary: Option<(&str, String)>) -> DictionaryEntry {
    let mut values = BTreeMap::new();
    values.insert(primary.0.to_string(), primary.1);
    if let Some((lang, value)) = secondary {
        values.insert(lang.to_string(), value);
    }
    DictionaryEntry { key, values }
}

/// Routes for pages reachable in both languages.
pub fn url_mappings(pages: &[Page]) -> Vec<UrlMapping> {
    walk_pages(pages)
        .filter_map(|page| {
            Some(UrlMapping {
                php_file: page.php_file.clone()?,
                primary_slug: page.slug.clone()?,
                secondary_slug: page.translations.slug()?.to_string(),
            })
        })
        .collect()
}

/// One entry per output file, in document order.
pub fn files_to_create(pages: &[Page]) -> Vec<FileEntry> {
    walk_pages(pages)
        .filter_map(|page| {
            let filename = page.php_file.clone()?;
            let slug = page.slug.clone()?;
            Some(FileEntry {
                var_name: page.var_name.clone()?,
                filename,
                slug,
                name: page.name.clone(),
                dictionary_key: page.dictionary_key.clone(),
                seo: if page.page_no_seo {
                    String::new()
                } else {
                    page.seo.clone()
                },
                is_home: page.is_home,
            })
        })
        .collect()
}

/// Nested navigation items mirroring the tree, skip pages included.
pub fn menu_structure(pages: &[Page]) -> Vec<MenuItem> {
    pages
        .iter()
        .map(|page| MenuItem {
            name: page.name.clone(),
            slug: page.slug.clone(),
            url: match &page.slug {
                Some(slug) => format!("/{slug}"),
                None => NO_LINK_URL.to_string(),
            },
            var_name: page.var_name.clone(),
            dictionary_key: page.dictionary_key.clone(),
            has_submenu: !page.children.is_empty(),
            skip_page: page.skip_page,
            submenu: menu_structure(&page.children),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{ParseOptions, parse_menu};

    fn combined(content: &str) -> Vec<Page> {
        let options = ParseOptions {
            secondary_language: Some("ca".to_string()),
            ..ParseOptions::default()
        };
        parse_menu(content, &options).unwrap().combined
    }

    fn keys(entries: &[DictionaryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.key.as_str()).collect()
    }

    // =========================================================================
    // Dictionary
    // =========================================================================

    #[test]
    fn page_with_file_gets_four_keys() {
        let pages = combined("Qué ofrecemos\n");
        let entries = dictionary_entries(&pages, "es", None, None);
        assert_eq!(
            keys(&entries),
            vec![
                "MenuQueOfrecemos",
                "QueOfrecemosTitle",
                "QueOfrecemosKeyWords",
                "QueOfrecemosDescription"
            ]
        );
        assert_eq!(entries[0].get("es"), Some("Qué ofrecemos"));
        assert_eq!(entries[1].get("es"), Some("Qué ofrecemos - [Nombre Empresa]"));
        assert_eq!(entries[2].get("es"), Some("Qué ofrecemos"));
    }

    #[test]
    fn skip_and_automanaged_pages_only_get_menu_key() {
        let pages = combined("Contacto (*)\nBlog (autogestionable)\n");
        let entries = dictionary_entries(&pages, "es", None, None);
        assert_eq!(keys(&entries), vec!["MenuContacto", "MenuBlog"]);
    }

    #[test]
    fn secondary_values_come_from_translations() {
        let pages = combined(
            "Inicio (SEO: Página de inicio)\n----------\nInici (SEO: Pàgina d'inici)\n",
        );
        let entries = dictionary_entries(&pages, "es", Some("ca"), Some("Lar Living"));
        assert_eq!(entries[0].get("ca"), Some("Inici"));
        assert_eq!(entries[1].get("es"), Some("Inicio - Lar Living"));
        assert_eq!(entries[1].get("ca"), Some("Inici - Lar Living"));
        assert_eq!(entries[2].get("ca"), Some("Pàgina d'inici"));
        assert_eq!(entries[3].get("es"), Some("Página de inicio"));
    }

    #[test]
    fn untranslated_page_has_primary_value_only() {
        let pages = combined("A\nB\n----------\nA2\n");
        let entries = dictionary_entries(&pages, "es", Some("ca"), None);
        let menu_b = entries.iter().find(|e| e.key == "MenuB").unwrap();
        assert_eq!(menu_b.get("es"), Some("B"));
        assert_eq!(menu_b.get("ca"), None);
    }

    #[test]
    fn empty_translated_label_adds_no_secondary_values() {
        let pages = combined("Servicios\n----------\n(**)\n");
        assert_eq!(pages[0].translations.name.as_deref(), Some(""));

        let entries = dictionary_entries(&pages, "es", Some("ca"), None);
        assert_eq!(entries.len(), 4);
        for entry in &entries {
            assert!(entry.get("es").is_some(), "{}", entry.key);
            assert_eq!(entry.get("ca"), None, "{}", entry.key);
        }
    }

    #[test]
    fn no_seo_page_has_empty_seo_values() {
        let pages = combined("Aviso legal (**) (SEO: no se usa)\n----------\nAvís legal (**)\n");
        let entries = dictionary_entries(&pages, "es", Some("ca"), None);
        assert_eq!(entries.len(), 4);
        for entry in &entries[2..] {
            assert_eq!(entry.get("es"), Some(""));
            assert_eq!(entry.get("ca"), Some(""));
        }
        assert_eq!(entries[1].get("ca"), Some("Avís legal - [Nombre Empresa]"));
    }

    #[test]
    fn dictionary_follows_document_order() {
        let pages = combined("A (*)\n  B\nC (*)\n");
        let entries = dictionary_entries(&pages, "es", None, None);
        assert_eq!(
            keys(&entries),
            vec!["MenuA", "MenuB", "BTitle", "BKeyWords", "BDescription", "MenuC"]
        );
    }

    // =========================================================================
    // URLs
    // =========================================================================

    #[test]
    fn url_mapping_needs_file_slug_and_translation() {
        let pages = combined(
            "Inicio\nTienda\nContacto (*)\nBlog (autogestionable)\nSolo aquí\n\
             ----------\nInici\nBotiga\nContacte (*)\nBlog (autogestionable)\n",
        );
        let urls = url_mappings(&pages);
        assert_eq!(
            urls,
            vec![
                UrlMapping {
                    primary_slug: "inicio".to_string(),
                    secondary_slug: "inici".to_string(),
                    php_file: "web.php".to_string(),
                },
                UrlMapping {
                    primary_slug: "tienda".to_string(),
                    secondary_slug: "botiga".to_string(),
                    php_file: "tienda.php".to_string(),
                },
            ]
        );
    }

    #[test]
    fn single_language_has_no_url_mappings() {
        let pages = combined("Inicio\nTienda\n");
        assert!(url_mappings(&pages).is_empty());
    }

    // =========================================================================
    // Files
    // =========================================================================

    #[test]
    fn file_list_matches_pages_with_files() {
        let pages = combined("Inicio\nTienda\n  Ella\n  Él (*)\nAviso legal (**)\nBlog (autogestionable)\n");
        let files = files_to_create(&pages);
        let names: Vec<&str> = files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["web.php", "tienda.php", "ella.php", "aviso-legal.php"]);

        assert!(files[0].is_home);
        assert_eq!(files[1].var_name, "tienda");
        assert_eq!(files[1].dictionary_key.as_deref(), Some("Tienda"));
        assert_eq!(files[1].seo, "Tienda");
        assert_eq!(files[3].seo, "");
    }

    // =========================================================================
    // Presentation menu
    // =========================================================================

    #[test]
    fn menu_structure_keeps_every_page() {
        let pages = combined("Inicio\nServicios (*)\n  Diseño web\n  SEO local\nContacto\n");
        let menu = menu_structure(&pages);
        assert_eq!(menu.len(), 3);

        let services = &menu[1];
        assert!(services.skip_page);
        assert_eq!(services.url, NO_LINK_URL);
        assert_eq!(services.slug, None);
        assert!(services.has_submenu);
        assert_eq!(services.submenu.len(), 2);
        assert_eq!(services.submenu[0].url, "/diseno-web");
        assert!(!services.submenu[0].has_submenu);

        assert_eq!(menu[2].url, "/contacto");
        assert_eq!(menu[2].var_name.as_deref(), Some("contacto"));
    }
}
