//! Monitoring-format (`eos ... -m`) tokenizer
//!
//! One entity per line, tokens separated by whitespace, each token being
//! `key=value`. Values may be wrapped in quotes to embed spaces; the quotes
//! delimit the span and are not part of the value.

use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Parsed monitoring line: key → value, last occurrence of a key wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitoringLine {
    fields: BTreeMap<String, String>,
}

impl MonitoringLine {
    /// Tokenize one line. Tokens without `=` are skipped.
    pub fn parse(line: &str) -> Self {
        let mut fields = BTreeMap::new();
        for token in split_tokens(line) {
            match token.split_once('=') {
                Some((key, value)) => {
                    fields.insert(key.to_string(), value.to_string());
                }
                None => debug!("Skipping monitoring token without '=': {:?}", token),
            }
        }
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Value of `key`, empty when absent
    pub fn value(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.fields
    }
}

impl From<&str> for MonitoringLine {
    fn from(line: &str) -> Self {
        Self::parse(line)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MonitoringLine {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Renders back to monitoring format, quoting values that contain whitespace
/// or quote marks so that parsing the output gives the same line
impl fmt::Display for MonitoringLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}=", key)?;
            if value.chars().any(|c| c.is_whitespace() || is_quote(c)) {
                write_quoted(f, value)?;
            } else {
                f.write_str(value)?;
            }
        }
        Ok(())
    }
}

/// Write `value` as adjacent quoted spans, switching between `"` and `'`
/// whenever the value contains the quote currently open
fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    let mut quote = if value.contains('"') && !value.contains('\'') {
        '\''
    } else {
        '"'
    };
    write!(f, "{}", quote)?;
    for c in value.chars() {
        if c == quote {
            quote = if quote == '"' { '\'' } else { '"' };
            write!(f, "{}{}", c, quote)?;
        }
        write!(f, "{}", c)?;
    }
    write!(f, "{}", quote)
}

/// Shorthand for [`MonitoringLine::parse`]
pub fn tokenize(line: &str) -> MonitoringLine {
    MonitoringLine::parse(line)
}

/// Non-empty lines of a raw command output, in order
pub fn records(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines().filter(|line| !line.trim().is_empty())
}

/// Split on whitespace outside quoted spans; quote characters are dropped
pub fn split_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut open_quote: Option<char> = None;
    // distinguishes `key=""` from no token at all
    let mut in_token = false;

    for c in line.chars() {
        match open_quote {
            Some(q) if c == q => open_quote = None,
            Some(_) => current.push(c),
            None if is_quote(c) => {
                open_quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens
}

/// Unicode quotation marks (ASCII quotes plus the typographic ones)
fn is_quote(c: char) -> bool {
    matches!(
        c,
        '"' | '\''
            | '\u{00AB}'
            | '\u{00BB}'
            | '\u{2018}'..='\u{201F}'
            | '\u{2039}'
            | '\u{203A}'
            | '\u{2E42}'
            | '\u{300C}'..='\u{300F}'
            | '\u{301D}'..='\u{301F}'
            | '\u{FE41}'..='\u{FE44}'
            | '\u{FF02}'
            | '\u{FF07}'
            | '\u{FF62}'
            | '\u{FF63}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_value_keeps_spaces() {
        let line = tokenize(r#"hostport=abc.cern.ch:1095 status="active now" nofs=12"#);
        assert_eq!(line.len(), 3);
        assert_eq!(line.get("hostport"), Some("abc.cern.ch:1095"));
        assert_eq!(line.get("status"), Some("active now"));
        assert_eq!(line.get("nofs"), Some("12"));
    }

    #[test]
    fn test_single_quotes_and_repeated_whitespace() {
        let line = tokenize("  stat.errmsg='disk  full'\t\tid=7   ");
        assert_eq!(line.get("stat.errmsg"), Some("disk  full"));
        assert_eq!(line.get("id"), Some("7"));
    }

    #[test]
    fn test_last_key_wins() {
        let line = tokenize("status=online nofs=1 status=offline");
        assert_eq!(line.get("status"), Some("offline"));
        assert_eq!(line.len(), 2);
    }

    #[test]
    fn test_value_splits_on_first_equal_only() {
        let line = tokenize("stat.errmsg=a=b cfg.quota=on");
        assert_eq!(line.get("stat.errmsg"), Some("a=b"));
    }

    #[test]
    fn test_token_without_equal_is_skipped() {
        let line = tokenize("name=default garbage nofs=4");
        assert_eq!(line.len(), 2);
        assert_eq!(line.get("name"), Some("default"));
        assert_eq!(line.get("nofs"), Some("4"));
        assert!(!line.contains_key("garbage"));
    }

    #[test]
    fn test_empty_line() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_empty_quoted_value() {
        let line = tokenize(r#"stat.errmsg="" id=3"#);
        assert_eq!(line.get("stat.errmsg"), Some(""));
        assert_eq!(line.get("id"), Some("3"));
    }

    #[test]
    fn test_special_characters_in_keys() {
        let line = tokenize("sum.stat.statfs.capacity?configstatus@rw=100 sum.<n>?configstatus@rw=8");
        assert_eq!(line.get("sum.stat.statfs.capacity?configstatus@rw"), Some("100"));
        assert_eq!(line.get("sum.<n>?configstatus@rw"), Some("8"));
    }

    #[test]
    fn test_typographic_quotes_close_on_same_mark() {
        let line = tokenize("a=\u{201C}x y\u{201C} b=1");
        assert_eq!(line.get("a"), Some("x y"));
        assert_eq!(line.get("b"), Some("1"));
    }

    #[test]
    fn test_reserialize_is_idempotent() {
        let inputs = [
            r#"hostport=abc.cern.ch:1095 status="active now" nofs=12"#,
            "uid=all gid=all ns.total.files=1234567",
            r#"host=fst01 stat.errmsg='says "hi"' path=/data01"#,
            r#"x="a'bc"'"d' y=1"#,
            "",
        ];
        for input in inputs {
            let first = tokenize(input);
            let second = tokenize(&first.to_string());
            assert_eq!(first, second, "input: {}", input);
        }
    }

    #[test]
    fn test_value_with_both_quote_marks_survives_rendering() {
        let line: MonitoringLine = [("x", "a'bc\"d"), ("y", "it's \"fine\"")].into_iter().collect();
        let rendered = line.to_string();
        assert_eq!(rendered, r#"x="a'bc"'"d' y="it's "'"fine"'"#);
        assert_eq!(tokenize(&rendered), line);
    }

    #[test]
    fn test_records_skip_blank_lines() {
        let raw = "a=1\n\n  \nb=2\n";
        let lines: Vec<_> = records(raw).collect();
        assert_eq!(lines, vec!["a=1", "b=2"]);
    }
}
