//! Splitting a menu file into one section per language.
//!
//! Sections are separated by a line made only of hyphens, at least
//! [`DELIMITER_MIN_LEN`] of them:
//!
//! ```text
//! Inicio
//! Contacto (*)
//! ----------------------------------------
//! Inici
//! Contacte (*)
//! ```
//!
//! Blank lines are dropped but never end a section. The first section is the
//! primary language, the second the secondary language; anything after that
//! is not used by the parser.

use crate::menu::MenuError;

/// Minimum number of hyphens in a delimiter line.
pub const DELIMITER_MIN_LEN: usize = 10;

/// A raw line together with its 1-based line number in the menu file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

pub type Section<'a> = Vec<SourceLine<'a>>;

/// Whether a line (ignoring surrounding whitespace) separates two sections.
pub fn is_delimiter(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= DELIMITER_MIN_LEN && trimmed.chars().all(|c| c == '-')
}

/// Split menu content into its non-empty sections, in file order.
///
/// Fails with [`MenuError::EmptyMenu`] when no section has any content.
pub fn split_sections(content: &str) -> Result<Vec<Section<'_>>, MenuError> {
    let mut sections = Vec::new();
    let mut current: Section<'_> = Vec::new();

    for (idx, text) in content.lines().enumerate() {
        if is_delimiter(text) {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else if !text.trim().is_empty() {
            current.push(SourceLine {
                number: idx + 1,
                text,
            });
        }
    }

    if !current.is_empty() {
        sections.push(current);
    }

    if sections.is_empty() {
        return Err(MenuError::EmptyMenu);
    }
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(section: &Section<'a>) -> Vec<&'a str> {
        section.iter().map(|l| l.text).collect()
    }

    #[test]
    fn single_section_without_delimiter() {
        let sections = split_sections("Inicio\nContacto\n").unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(texts(&sections[0]), vec!["Inicio", "Contacto"]);
    }

    #[test]
    fn two_sections_split_on_hyphen_line() {
        let content = "Inicio\nContacto\n\n----------\n\nInici\nContacte\n";
        let sections = split_sections(content).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(texts(&sections[0]), vec!["Inicio", "Contacto"]);
        assert_eq!(texts(&sections[1]), vec!["Inici", "Contacte"]);
    }

    #[test]
    fn line_numbers_refer_to_the_file() {
        let content = "Inicio\n\n  Sub\n----------\nInici\n";
        let sections = split_sections(content).unwrap();
        let numbers: Vec<usize> = sections[0].iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(sections[1][0].number, 5);
    }

    #[test]
    fn blank_lines_do_not_end_a_section() {
        let sections = split_sections("Inicio\n\n\n   \nContacto").unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].len(), 2);
    }

    #[test]
    fn short_hyphen_runs_are_content() {
        let sections = split_sections("Inicio\n---------\nContacto").unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(texts(&sections[0]), vec!["Inicio", "---------", "Contacto"]);
    }

    #[test]
    fn indented_delimiter_still_splits() {
        let sections = split_sections("Inicio\n   ---------------   \nInici").unwrap();
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn leading_and_repeated_delimiters_make_no_empty_sections() {
        let content = "----------\nInicio\n----------\n----------\nInici\n----------\n";
        let sections = split_sections(content).unwrap();
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn windows_line_endings() {
        let sections = split_sections("Inicio\r\nContacto\r\n----------\r\nInici\r\n").unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(texts(&sections[0]), vec!["Inicio", "Contacto"]);
    }

    #[test]
    fn three_sections_are_all_returned() {
        let content = "A\n----------\nB\n----------\nC\n";
        assert_eq!(split_sections(content).unwrap().len(), 3);
    }

    #[test]
    fn empty_content_is_error() {
        assert!(matches!(split_sections(""), Err(MenuError::EmptyMenu)));
        assert!(matches!(split_sections("\n  \n\t\n"), Err(MenuError::EmptyMenu)));
        assert!(matches!(
            split_sections("----------\n\n----------"),
            Err(MenuError::EmptyMenu)
        ));
    }
}
