//! Serialized rich-text content
//!
//! The rich text engine hands the export subsystem a constrained HTML subset.
//! Apart from the RTF path, which pattern-matches a small tag whitelist, the
//! markup is treated as an opaque string.

use serde::{Deserialize, Serialize};

/// Tags whose boundaries separate words when markup is flattened to text
const BLOCK_TAGS: &[&str] = &[
    "p", "br", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6",
    "blockquote", "tr", "td", "th", "table", "pre", "hr",
];

/// Markup string produced by the rich text engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentContent(String);

impl DocumentContent {
    /// Wrap a markup string
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// The raw markup
    pub fn as_markup(&self) -> &str {
        &self.0
    }

    /// Consume and return the raw markup
    pub fn into_markup(self) -> String {
        self.0
    }

    /// Whether the markup is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flatten the markup to plain text
    ///
    /// Tags are dropped; block-level tags become a single space so adjacent
    /// paragraphs do not run together. Only `&nbsp;`, `&amp;`, `&lt;` and
    /// `&gt;` are decoded.
    pub fn plain_text(&self) -> String {
        let mut text = String::with_capacity(self.0.len());
        let mut rest = self.0.as_str();

        while let Some(start) = rest.find('<') {
            text.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find('>') {
                Some(end) => {
                    if is_block_tag(&after[..end]) {
                        text.push(' ');
                    }
                    rest = &after[end + 1..];
                }
                None => {
                    // Unterminated tag: keep it as literal text
                    text.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        text.push_str(rest);

        text.replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&")
    }
}

impl From<String> for DocumentContent {
    fn from(markup: String) -> Self {
        Self(markup)
    }
}

impl From<&str> for DocumentContent {
    fn from(markup: &str) -> Self {
        Self(markup.to_string())
    }
}

fn is_block_tag(tag: &str) -> bool {
    let name: String = tag
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    BLOCK_TAGS.contains(&name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_separates_paragraphs() {
        let content = DocumentContent::new("<p>Hello</p><p>World</p>");
        let words: Vec<_> = content.plain_text().split_whitespace().map(String::from).collect();
        assert_eq!(words, vec!["Hello", "World"]);
    }

    #[test]
    fn test_plain_text_keeps_inline_words_together() {
        let content = DocumentContent::new("<p>Hel<b>lo</b> there</p>");
        let text = content.plain_text();
        assert_eq!(text.split_whitespace().collect::<Vec<_>>(), vec!["Hello", "there"]);
    }

    #[test]
    fn test_plain_text_decodes_entities() {
        let content = DocumentContent::new("a&nbsp;b &lt;tag&gt; &amp;");
        assert_eq!(content.plain_text(), "a b <tag> &");
    }

    #[test]
    fn test_plain_text_unterminated_tag() {
        let content = DocumentContent::new("one <two");
        assert_eq!(content.plain_text(), "one <two");
    }

    #[test]
    fn test_block_tag_with_attributes() {
        assert!(is_block_tag("p class=\"mb-4\""));
        assert!(is_block_tag("/li"));
        assert!(is_block_tag("br/"));
        assert!(!is_block_tag("strong"));
    }
}
