use crate::words::{WordBank, WordEntry};
use std::fs;
use std::path::Path;

/// Loads `english,translation` lines. Blank lines and lines missing either
/// field are skipped; a leading `english,translation` header is ignored.
pub fn load_word_list(path: &Path) -> std::io::Result<Vec<WordEntry>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_word_list(&content))
}

pub fn parse_word_list(content: &str) -> Vec<WordEntry> {
    let mut words = Vec::new();

    for (index, line) in content.lines().enumerate() {
        if let Some((english, translation)) = parse_csv_line(line)
            && !english.trim().is_empty()
            && !translation.trim().is_empty()
        {
            if index == 0 && english.trim().eq_ignore_ascii_case("english") {
                continue;
            }
            words.push(WordEntry::new(english.trim(), translation.trim()));
        }
    }

    words
}

/// Builds the word bank from `path`, or the built-in list when no path is
/// configured or the file yields no words.
pub fn load_word_bank(path: Option<&Path>) -> std::io::Result<WordBank> {
    let Some(path) = path else {
        return Ok(WordBank::builtin());
    };
    let words = load_word_list(path)?;
    if words.is_empty() {
        log::warn!(
            "Word list {} has no usable lines, using built-in words",
            path.display()
        );
        return Ok(WordBank::builtin());
    }
    log::info!("Loaded {} words from {}", words.len(), path.display());
    Ok(WordBank::new(words))
}

pub fn parse_csv_line(line: &str) -> Option<(String, String)> {
    let mut chars = line.chars().peekable();
    let mut english = String::new();
    let mut translation = String::new();
    let mut current_field = &mut english;
    let mut in_quotes = false;
    let mut field_index = 0;

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current_field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes && field_index == 0 => {
                field_index = 1;
                current_field = &mut translation;
            }
            _ => {
                current_field.push(c);
            }
        }
    }

    if field_index == 0 {
        return None;
    }
    Some((english, translation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_line_simple() {
        assert_eq!(
            parse_csv_line("tent,帳棚"),
            Some(("tent".to_string(), "帳棚".to_string()))
        );
    }

    #[test]
    fn test_parse_csv_line_quoted_fields() {
        assert_eq!(
            parse_csv_line(r#""bachelor's degree","學位""#),
            Some(("bachelor's degree".to_string(), "學位".to_string()))
        );
        assert_eq!(
            parse_csv_line(r#""say ""hi""",打招呼"#),
            Some(("say \"hi\"".to_string(), "打招呼".to_string()))
        );
        assert_eq!(
            parse_csv_line(r#"contact,"與...聯繫, 聯絡""#),
            Some(("contact".to_string(), "與...聯繫, 聯絡".to_string()))
        );
    }

    #[test]
    fn test_parse_csv_line_without_separator() {
        assert_eq!(parse_csv_line("lonely"), None);
    }

    #[test]
    fn test_parse_word_list_skips_header_and_bad_lines() {
        let content = "english,translation\ntent,帳棚\n\n,缺\nmess,\n dorm , 宿舍 \n";
        let words = parse_word_list(content);
        assert_eq!(
            words,
            vec![WordEntry::new("tent", "帳棚"), WordEntry::new("dorm", "宿舍")]
        );
    }

    #[test]
    fn test_load_word_bank_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("words.csv");
        std::fs::write(&path, "tent,帳棚\ndorm,宿舍\ntent,帳篷\n").unwrap();

        let bank = load_word_bank(Some(&path)).unwrap();
        assert_eq!(bank.len(), 2);

        let empty = temp_dir.path().join("empty.csv");
        std::fs::write(&empty, "\n\n").unwrap();
        assert_eq!(load_word_bank(Some(&empty)).unwrap().len(), WordBank::builtin().len());

        assert!(load_word_bank(Some(&temp_dir.path().join("missing.csv"))).is_err());
        assert_eq!(load_word_bank(None).unwrap().len(), WordBank::builtin().len());
    }
}
