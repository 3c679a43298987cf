//! Free-text detection over generated records.
//!
//! Flags scalar leaves whose string form reads like an uncontrolled
//! natural-language sentence while letting structured tokens through:
//! bare words, hyphen pairs (`temp-sensor`), scheme-prefixed identifiers
//! (`urn:...`, `http://...`), and decimal numbers all pass.

use serde_json::Value;

use crate::types::AttributePath;

/// Lazy preorder traversal yielding the dotted path of every scalar leaf
/// that classifies as free text.
///
/// Finite (bounded by the record's own depth) and restartable: build a
/// new iterator over the same record to traverse again.
pub struct FreeTextPaths<'a> {
    stack: Vec<(AttributePath, &'a Value)>,
}

impl<'a> FreeTextPaths<'a> {
    /// Start a traversal at the record root.
    pub fn new(record: &'a Value) -> Self {
        Self {
            stack: vec![(String::new(), record)],
        }
    }
}

impl Iterator for FreeTextPaths<'_> {
    type Item = AttributePath;

    fn next(&mut self) -> Option<AttributePath> {
        while let Some((path, value)) = self.stack.pop() {
            match value {
                Value::Object(map) => {
                    for (key, child) in map.iter().rev() {
                        self.stack.push((join_path(&path, key), child));
                    }
                }
                Value::Array(items) => {
                    for (index, child) in items.iter().enumerate().rev() {
                        self.stack.push((join_path(&path, &index.to_string()), child));
                    }
                }
                Value::String(text) => {
                    if is_free_text_sentence(text) {
                        return Some(path);
                    }
                }
                Value::Number(number) => {
                    if is_free_text_sentence(&number.to_string()) {
                        return Some(path);
                    }
                }
                Value::Bool(_) | Value::Null => {}
            }
        }
        None
    }
}

/// Collect every free-text leaf path of a record, root-relative with the
/// leading separator stripped.
pub fn free_text_paths(record: &Value) -> Vec<AttributePath> {
    FreeTextPaths::new(record).collect()
}

/// True when a scalar's string form looks like uncontrolled free text.
///
/// Rejection shapes are prefix checks except the bare token, which must
/// span the whole value; everything else starting with a word character
/// and carrying at least one more character is accepted.
pub fn is_free_text_sentence(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < 2 || !is_word_char(chars[0]) {
        return false;
    }
    if chars.iter().copied().all(is_word_char) {
        return false;
    }
    if has_hyphen_pair_prefix(&chars)
        || has_scheme_prefix(&chars)
        || has_decimal_prefix(&chars)
    {
        return false;
    }
    true
}

fn join_path(prefix: &str, segment: &str) -> AttributePath {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn leading_word_run(chars: &[char]) -> usize {
    chars.iter().take_while(|c| is_word_char(**c)).count()
}

/// `foo-bar...`: word run, hyphen, word character.
fn has_hyphen_pair_prefix(chars: &[char]) -> bool {
    let run = leading_word_run(chars);
    run >= 1
        && chars.get(run) == Some(&'-')
        && chars.get(run + 1).is_some_and(|c| is_word_char(*c))
}

/// `scheme:...`: word run, colon, word character or slash.
fn has_scheme_prefix(chars: &[char]) -> bool {
    let run = leading_word_run(chars);
    run >= 1
        && chars.get(run) == Some(&':')
        && chars
            .get(run + 1)
            .is_some_and(|c| is_word_char(*c) || *c == '/')
}

/// `12.3...`: digit run, any single character, digit.
fn has_decimal_prefix(chars: &[char]) -> bool {
    let digits = chars.iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return false;
    }
    (1..=digits).any(|split| chars.get(split + 1).is_some_and(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structured_tokens_are_not_sentences() {
        assert!(!is_free_text_sentence("urn:ngsi-ld:Device:001"));
        assert!(!is_free_text_sentence("https://example.org/context.jsonld"));
        assert!(!is_free_text_sentence("23.5"));
        assert!(!is_free_text_sentence("temp-sensor"));
        assert!(!is_free_text_sentence("Device"));
        assert!(!is_free_text_sentence("battery_level_42"));
        assert!(!is_free_text_sentence("x"));
        assert!(!is_free_text_sentence(""));
    }

    #[test]
    fn sentences_are_flagged() {
        assert!(is_free_text_sentence(
            "A temperature sensor located outdoors."
        ));
        assert!(is_free_text_sentence("Reading taken at dawn"));
        assert!(is_free_text_sentence("ok!"));
    }

    #[test]
    fn leading_rejection_shapes_cover_the_whole_value() {
        // Prefix semantics: a value opening with a rejection shape stays
        // unflagged even when a sentence follows.
        assert!(!is_free_text_sentence("temp-sensor mounted outside"));
        assert!(!is_free_text_sentence("12.5 degrees at dawn"));
        assert!(!is_free_text_sentence("urn:device is offline"));
    }

    #[test]
    fn traversal_collects_dotted_paths_in_order() {
        let record = json!({
            "id": "urn:ngsi-ld:Device:001",
            "description": {
                "type": "Property",
                "value": "A temperature sensor located outdoors."
            },
            "tags": ["temp-sensor", "Mounted on the north wall."],
            "batteryLevel": {"value": 0.75}
        });

        let paths = free_text_paths(&record);
        assert_eq!(paths, vec!["description.value".to_string(), "tags.1".to_string()]);
    }

    #[test]
    fn traversal_is_restartable() {
        let record = json!({"note": "Needs a battery swap soon."});
        let first: Vec<_> = FreeTextPaths::new(&record).collect();
        let second: Vec<_> = FreeTextPaths::new(&record).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["note".to_string()]);
    }

    #[test]
    fn numeric_and_null_leaves_never_flag() {
        let record = json!({"a": 23.5, "b": 42, "c": null, "d": true});
        assert!(free_text_paths(&record).is_empty());
    }
}
