/**
 * Parsing of plain-text study files and of free-text range strings.
 *
 * A study file is a sequence of `term = meaning` lines, one entry per line,
 * with `#` comments. It may open with a settings block of `- key: value`
 * pairs (currently just `category`) separated from the entries by a blank
 * line.
 */
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use super::common::{Result, StudyError};
use super::quiz::Span;


/// A study file as parsed from disk: its category label and its term/meaning
/// pairs in file order.
#[derive(Debug)]
pub struct ParsedFile {
    pub category: String,
    pub pairs: Vec<(String, String)>,
}


pub fn parse_study_file(path: &Path) -> Result<ParsedFile> {
    let file = File::open(path).map_err(StudyError::Io)?;
    let reader = BufReader::new(file);

    let mut category = String::new();
    let mut pairs = Vec::new();
    let mut in_settings = true;
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(StudyError::Io)?;
        let lineno = i + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            in_settings = false;
            continue;
        }
        if trimmed.starts_with('#') {
            continue;
        }

        if in_settings && trimmed.starts_with("- ") {
            let colon = trimmed.find(':').ok_or_else(|| StudyError::Parse {
                line: lineno,
                message: String::from("expected colon"),
            })?;
            let key = trimmed[2..colon].trim();
            let value = trimmed[colon + 1..].trim();
            if key == "category" {
                category = String::from(value);
            } else {
                return Err(StudyError::Parse {
                    line: lineno,
                    message: format!("unexpected field '{}'", key),
                });
            }
            continue;
        }
        in_settings = false;

        // The first '=' splits the entry; meanings may contain further ones.
        let equal = trimmed.find('=').ok_or_else(|| StudyError::Parse {
            line: lineno,
            message: String::from("entry has no meaning"),
        })?;
        let term = trimmed[..equal].trim();
        let meaning = trimmed[equal + 1..].trim();
        if term.is_empty() || meaning.is_empty() {
            return Err(StudyError::Parse {
                line: lineno,
                message: String::from("term and meaning must be non-empty"),
            });
        }
        pairs.push((String::from(term), String::from(meaning)));
    }

    Ok(ParsedFile { category, pairs })
}


/// Parse a free-text range like "5-20" or "5:20" into a 1-based inclusive
/// span. Returns `fallback` whenever the text does not describe a usable
/// range, so sloppy input degrades to the caller's default instead of
/// failing.
pub fn parse_range(text: &str, fallback: Span) -> Span {
    let trimmed = text.trim();
    let sep = match trimmed.find(|c| c == '-' || c == ':') {
        Some(sep) => sep,
        None => return fallback,
    };

    let start = usize::from_str(trimmed[..sep].trim());
    let end = usize::from_str(trimmed[sep + 1..].trim());
    match (start, end) {
        (Ok(start), Ok(end)) if start > 0 && end >= start => Span { start, end },
        _ => fallback,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn well_formed_ranges_parse() {
        assert_eq!(parse_range("5-20", fallback()), Span { start: 5, end: 20 });
        assert_eq!(parse_range("5:20", fallback()), Span { start: 5, end: 20 });
        assert_eq!(parse_range("  5 - 20 ", fallback()), Span { start: 5, end: 20 });
        assert_eq!(parse_range("7-7", fallback()), Span { start: 7, end: 7 });
    }

    #[test]
    fn malformed_ranges_fall_back() {
        assert_eq!(parse_range("", fallback()), fallback());
        assert_eq!(parse_range("5", fallback()), fallback());
        assert_eq!(parse_range("five-ten", fallback()), fallback());
        assert_eq!(parse_range("5-", fallback()), fallback());
        assert_eq!(parse_range("-20", fallback()), fallback());
        assert_eq!(parse_range("5-2", fallback()), fallback());
        assert_eq!(parse_range("0-9", fallback()), fallback());
    }

    #[test]
    fn study_files_parse_settings_and_entries() {
        let path = write_fixture(
            "parses_settings",
            "- category: Spanish\n\n# staples\nel pan = bread\nel vino = wine\n",
        );
        let parsed = parse_study_file(&path).unwrap();
        assert_eq!(parsed.category, "Spanish");
        assert_eq!(
            parsed.pairs,
            vec![
                (String::from("el pan"), String::from("bread")),
                (String::from("el vino"), String::from("wine")),
            ]
        );
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn the_settings_block_is_optional() {
        let path = write_fixture("no_settings", "uno = one\ndos = two\n");
        let parsed = parse_study_file(&path).unwrap();
        assert_eq!(parsed.category, "");
        assert_eq!(parsed.pairs.len(), 2);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn meanings_may_contain_equals_signs() {
        let path = write_fixture("extra_equals", "e = mc = squared\n");
        let parsed = parse_study_file(&path).unwrap();
        assert_eq!(
            parsed.pairs,
            vec![(String::from("e"), String::from("mc = squared"))]
        );
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn entries_without_a_meaning_are_parse_errors() {
        let path = write_fixture("no_meaning", "uno = one\njust a term\n");
        match parse_study_file(&path) {
            Err(StudyError::Parse { line, ref message }) => {
                assert_eq!(line, 2);
                assert_eq!(message, "entry has no meaning");
            }
            other => panic!("expected a parse error, got {:?}", other.map(|p| p.pairs)),
        }
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unknown_settings_are_parse_errors() {
        let path = write_fixture("bad_setting", "- colour: red\n\nuno = one\n");
        match parse_study_file(&path) {
            Err(StudyError::Parse { line, ref message }) => {
                assert_eq!(line, 1);
                assert_eq!(message, "unexpected field 'colour'");
            }
            other => panic!("expected a parse error, got {:?}", other.map(|p| p.pairs)),
        }
        fs::remove_file(&path).unwrap();
    }

    fn fallback() -> Span {
        Span { start: 1, end: 100 }
    }

    fn write_fixture(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("studyiq-parser-{}.txt", name));
        fs::write(&path, contents).unwrap();
        path
    }
}
