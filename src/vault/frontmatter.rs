//! YAML frontmatter for notes.
//!
//! Hand-rolled: properties are flat (scalars, dates and string lists), so a
//! full YAML library is not needed to write them. Existing entries that are
//! not being replaced are carried over verbatim.
use super::{Properties, PropertyValue};

const DELIMITER: &str = "---";

/// Split `content` into (frontmatter lines, body). No block gives `None`.
fn split_frontmatter(content: &str) -> (Option<Vec<&str>>, &str) {
    let mut lines = content.split_inclusive('\n');
    let first = match lines.next() {
        Some(first) if first.trim_end() == DELIMITER => first,
        _ => return (None, content),
    };

    let mut offset = first.len();
    let mut yaml = Vec::new();
    for line in lines {
        offset += line.len();
        if line.trim_end() == DELIMITER {
            return (Some(yaml), &content[offset..]);
        }
        yaml.push(line.trim_end_matches(['\n', '\r']));
    }
    // Unterminated block: treat the whole file as body
    (None, content)
}

// Plain only when it starts with a letter: digits, `.`, `-`, `~` and the
// like can all begin a YAML number, null or indicator.
fn is_plain_scalar(value: &str) -> bool {
    value.chars().next().is_some_and(char::is_alphabetic)
        && value.trim_end() == value
        && value
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-' | '.' | '/'))
        && value.parse::<f64>().is_err()
        && !matches!(
            value.to_lowercase().as_str(),
            "true" | "false" | "yes" | "no" | "on" | "off" | "y" | "n" | "null"
        )
}

pub fn yaml_scalar(value: &str) -> String {
    if is_plain_scalar(value) {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn render_entry(key: &str, value: &PropertyValue) -> Vec<String> {
    let key = yaml_scalar(key);
    match value {
        PropertyValue::Text(text) => vec![format!("{}: {}", key, yaml_scalar(text))],
        PropertyValue::Date(date) => vec![format!("{}: {}", key, date.format("%Y-%m-%d"))],
        PropertyValue::List(items) if items.is_empty() => vec![format!("{}: []", key)],
        PropertyValue::List(items) => {
            let mut lines = vec![format!("{}:", key)];
            lines.extend(items.iter().map(|item| format!("  - {}", yaml_scalar(item))));
            lines
        }
    }
}

/// Render properties as frontmatter lines, without delimiters.
pub fn render(properties: &Properties) -> String {
    properties
        .iter()
        .flat_map(|(k, v)| render_entry(k, v))
        .map(|line| line + "\n")
        .collect()
}

fn entry_key(line: &str) -> Option<String> {
    if line.starts_with([' ', '\t', '-', '#']) {
        return None;
    }
    let (key, _) = line.split_once(':')?;
    let key = key.trim();
    Some(
        key.strip_prefix('"')
            .and_then(|k| k.strip_suffix('"'))
            .unwrap_or(key)
            .to_string(),
    )
}

/// Merge `properties` into the frontmatter of `content`, creating the block
/// when the note has none.
pub fn apply(content: &str, properties: &Properties) -> String {
    let (existing, body) = split_frontmatter(content);

    // (key, lines) for each top-level entry; continuation lines stick to their key
    let mut entries: Vec<(Option<String>, Vec<String>)> = Vec::new();
    for line in existing.unwrap_or_default() {
        match entry_key(line) {
            Some(key) => entries.push((Some(key), vec![line.to_string()])),
            None => match entries.last_mut() {
                Some((_, lines)) => lines.push(line.to_string()),
                None => entries.push((None, vec![line.to_string()])),
            },
        }
    }

    for (key, value) in properties.iter() {
        let rendered = render_entry(key, value);
        if let Some(slot) = entries
            .iter_mut()
            .find(|(k, _)| k.as_deref() == Some(key))
        {
            slot.1 = rendered;
        } else {
            entries.push((Some(key.to_string()), rendered));
        }
    }

    let mut out = String::with_capacity(content.len() + 64);
    out.push_str(DELIMITER);
    out.push('\n');
    for line in entries.iter().flat_map(|(_, lines)| lines) {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(body);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_scalar_quoting() {
        assert_eq!(yaml_scalar("created"), "created");
        assert_eq!(yaml_scalar("Buy milk"), "Buy milk");
        assert_eq!(yaml_scalar("Buy milk "), "\"Buy milk \"");
        assert_eq!(yaml_scalar("a: b"), "\"a: b\"");
        assert_eq!(yaml_scalar("2027"), "\"2027\"");
        assert_eq!(yaml_scalar("yes"), "\"yes\"");
        assert_eq!(yaml_scalar(""), "\"\"");
        assert_eq!(yaml_scalar("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_number_like_scalars_are_quoted() {
        for value in ["0x1F", "0o17", ".inf", "-.inf", ".NaN", "1e3", "+12", "~x", "2026-10-16", "Null", "inf"] {
            assert_eq!(yaml_scalar(value), format!("\"{}\"", value), "{}", value);
        }
        assert_eq!(yaml_scalar("Call mom"), "Call mom");
        assert_eq!(yaml_scalar("v1.2/beta"), "v1.2/beta");
    }

    #[test]
    fn test_render_lists_and_dates() {
        let props = Properties::new()
            .with("intention date", NaiveDate::from_ymd_opt(2026, 6, 5).unwrap())
            .with("tags", vec!["errand".to_string(), "home".to_string()])
            .with("aliases", Vec::<String>::new());
        assert_eq!(
            render(&props),
            "intention date: 2026-06-05\ntags:\n  - errand\n  - home\naliases: []\n"
        );
    }

    #[test]
    fn test_apply_creates_block() {
        let props = Properties::new().with("Stage", "created");
        assert_eq!(apply("Body", &props), "---\nStage: created\n---\nBody");
    }

    #[test]
    fn test_apply_merges_existing_block() {
        let content = "---\ntitle: Old\ntags:\n  - a\nkeep: me\n---\nBody\n";
        let props = Properties::new()
            .with("tags", vec!["b".to_string()])
            .with("Stage", "created");
        assert_eq!(
            apply(content, &props),
            "---\ntitle: Old\ntags:\n  - b\nkeep: me\nStage: created\n---\nBody\n"
        );
    }

    #[test]
    fn test_unterminated_block_is_body() {
        let props = Properties::new().with("k", "v");
        assert_eq!(apply("---\nnot closed", &props), "---\nk: v\n---\n---\nnot closed");
    }
}
