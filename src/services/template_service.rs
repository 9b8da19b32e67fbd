use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::{Captures, Regex};

use crate::error::TemplateError;

/// `{{ name }}` where name is an identifier that may contain `.` and `-`.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_.\-]*)\s*\}\}").expect("valid regex")
});

/// A template with its placeholders indexed.
///
/// Rendering is plain text substitution in a single pass. Substituted
/// values are never scanned again, and nothing outside a placeholder is
/// interpreted.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    placeholders: IndexSet<String>,
}

impl Template {
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let placeholders = PLACEHOLDER_RE
            .captures_iter(&source)
            .map(|caps| caps[1].to_string())
            .collect();
        Self {
            source,
            placeholders,
        }
    }

    /// Distinct placeholder names in order of first appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.placeholders.iter().map(String::as_str)
    }

    /// Substitute every placeholder with the value `lookup` returns.
    ///
    /// Fails on the first placeholder without a value.
    pub fn render<'a, F>(&self, lookup: F) -> Result<String, TemplateError>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let mut unbound = None;
        let rendered = PLACEHOLDER_RE.replace_all(&self.source, |caps: &Captures| {
            let name = &caps[1];
            match lookup(name) {
                Some(value) => value.to_string(),
                None => {
                    unbound.get_or_insert_with(|| name.to_string());
                    String::new()
                }
            }
        });

        match unbound {
            Some(name) => Err(TemplateError::Unbound(name)),
            None => Ok(rendered.into_owned()),
        }
    }
}

/// Whether files with `extension` need substituted values escaped.
pub fn is_markup(extension: &str) -> bool {
    ["html", "htm", "xhtml", "xml", "svg"]
        .iter()
        .any(|markup| extension.eq_ignore_ascii_case(markup))
}

/// Escape the characters HTML and XML treat as markup.
pub fn escape_markup(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_placeholders_in_order_without_duplicates() {
        let template = Template::parse("{{fg}} {{ bg }} {{fg}} {{palette.name}} {{bright-red}}");
        let names: Vec<_> = template.placeholders().collect();
        assert_eq!(names, vec!["fg", "bg", "palette.name", "bright-red"]);
    }

    #[test]
    fn test_render_substitutes() {
        let template = Template::parse("fg = {{red}}\nbg = {{  bg\t}}\n");
        let values = values(&[("red", "#de3e2d"), ("bg", "#101010")]);
        let out = template.render(|k| values.get(k).map(String::as_str)).unwrap();
        assert_eq!(out, "fg = #de3e2d\nbg = #101010\n");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let template = Template::parse("{{a}} {{b}}");
        let values = values(&[("a", "{{b}}"), ("b", "x")]);
        let out = template.render(|k| values.get(k).map(String::as_str)).unwrap();
        assert_eq!(out, "{{b}} x");
    }

    #[test]
    fn test_non_placeholders_are_left_alone() {
        let source = "local t = {{1, 2}, {3}}\n{% if x %}{{ 1red }}{{}}${HOME}";
        let template = Template::parse(source);
        assert_eq!(template.placeholders().count(), 0);
        let out = template.render(|_| None).unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn test_unbound_placeholder() {
        let template = Template::parse("{{ red }} {{ teal }}");
        let values = values(&[("red", "#ff0000")]);
        let err = template
            .render(|k| values.get(k).map(String::as_str))
            .unwrap_err();
        assert!(matches!(err, TemplateError::Unbound(name) if name == "teal"));
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape_markup(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#39;y&#39;&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_markup("color(display-p3 1 0 0)"), "color(display-p3 1 0 0)");
    }

    #[test]
    fn test_is_markup() {
        assert!(is_markup("html"));
        assert!(is_markup("XML"));
        assert!(!is_markup("toml"));
        assert!(!is_markup(""));
    }
}
