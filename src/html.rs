//! Small string helpers shared by the markup producers.

/// Escape text for use as HTML element content or attribute value.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render an optional `class` attribute, leading space included.
/// Returns the empty string when no class is given, so the attribute
/// is omitted entirely rather than emitted empty.
pub fn class_attr(class: Option<&str>) -> String {
    match class {
        Some(c) => format!(" class=\"{}\"", escape(c)),
        None => String::new(),
    }
}

/// Strip the longest common leading whitespace from every line.
///
/// Lines consisting entirely of whitespace do not participate in
/// determining the margin and are passed through unchanged.
pub fn dedent(text: &str) -> String {
    let mut margin: Option<&str> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let indent = &line[..line.len() - line.trim_start().len()];
        margin = Some(match margin {
            None => indent,
            Some(current) => {
                let common = current
                    .bytes()
                    .zip(indent.bytes())
                    .take_while(|(a, b)| a == b)
                    .count();
                &current[..common]
            }
        });
    }

    let margin = match margin {
        Some(m) if !m.is_empty() => m,
        _ => return text.to_string(),
    };

    let mut out = String::with_capacity(text.len());
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.strip_prefix(margin).unwrap_or(line));
    }
    if text.ends_with('\n') {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & c > d"), "a &lt; b &amp; c &gt; d");
        assert_eq!(escape("say \"hi\""), "say &quot;hi&quot;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_class_attr() {
        assert_eq!(class_attr(Some("sales")), " class=\"sales\"");
        assert_eq!(class_attr(None), "");
    }

    #[test]
    fn test_dedent_common_margin() {
        let text = "    a {\n        b;\n    }\n";
        assert_eq!(dedent(text), "a {\n    b;\n}\n");
    }

    #[test]
    fn test_dedent_blank_lines_ignored() {
        let text = "    a\n\n    b";
        assert_eq!(dedent(text), "a\n\nb");
    }

    #[test]
    fn test_dedent_no_margin() {
        let text = "a\n    b\n";
        assert_eq!(dedent(text), text);
    }
}
