/*!
 * Extraction rules shared by the classifier and the reconstruction engine.
 *
 * Every threshold and fixed token list that decides what counts as
 * translatable prose lives in `ExtractionRules`, so callers can tune the
 * classifier from configuration instead of editing constants.
 */

use serde::{Deserialize, Serialize};

/// Decorative glyphs used as status markers in titles and headings
pub const DEFAULT_DECORATIVE_GLYPHS: &[char] = &[
    '🟡', '🟢', '🔴', '🟣', '🟠', '🔵', '🤖', '⚪', '⚫', '🛸',
];

/// Invisible code points that travel with emoji (variation selector, ZWJ)
const EMOJI_COMPANIONS: &[char] = &['\u{FE0F}', '\u{200D}'];

/// Tunable rules for the content classifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionRules {
    /// Minimum alphabetic characters for a list item or plain line
    #[serde(default = "default_min_alpha_chars")]
    pub min_alpha_chars: usize,

    /// Heading text must be strictly longer than this many characters
    #[serde(default = "default_min_header_chars")]
    pub min_header_chars: usize,

    /// Inline component text must be strictly longer than this many characters
    #[serde(default = "default_min_inline_chars")]
    pub min_inline_chars: usize,

    /// Fenced code languages whose lines are prose
    #[serde(default = "default_prose_code_languages")]
    pub prose_code_languages: Vec<String>,

    /// Tags whose whole element (tag line and body) is never translated
    #[serde(default = "default_skip_tags")]
    pub skip_tags: Vec<String>,

    /// Generic container tags: only the tag line is skipped
    #[serde(default = "default_container_tags")]
    pub container_tags: Vec<String>,

    /// Glyphs stripped from the edges of titles and headings
    #[serde(default = "default_decorative_glyphs")]
    pub decorative_glyphs: Vec<char>,

    /// Bullet tokens recognised at the start of list items
    #[serde(default = "default_bullets")]
    pub bullets: Vec<String>,

    /// Lines that are pure decoration
    #[serde(default = "default_decorative_tokens")]
    pub decorative_tokens: Vec<String>,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            min_alpha_chars: default_min_alpha_chars(),
            min_header_chars: default_min_header_chars(),
            min_inline_chars: default_min_inline_chars(),
            prose_code_languages: default_prose_code_languages(),
            skip_tags: default_skip_tags(),
            container_tags: default_container_tags(),
            decorative_glyphs: default_decorative_glyphs(),
            bullets: default_bullets(),
            decorative_tokens: default_decorative_tokens(),
        }
    }
}

impl ExtractionRules {
    /// Whether lines of a fenced block with this language are translated
    pub fn is_prose_language(&self, lang: Option<&str>) -> bool {
        match lang {
            Some(lang) => self
                .prose_code_languages
                .iter()
                .any(|l| l.eq_ignore_ascii_case(lang)),
            None => false,
        }
    }

    /// Whether the tag is excluded together with its body
    pub fn is_skip_tag(&self, tag: &str) -> bool {
        self.skip_tags.iter().any(|t| t == tag)
    }

    /// Whether the tag is a generic container around translatable content
    pub fn is_container_tag(&self, tag: &str) -> bool {
        self.container_tags.iter().any(|t| t == tag)
    }

    pub fn is_decorative_token(&self, stripped: &str) -> bool {
        self.decorative_tokens.iter().any(|t| t == stripped)
    }

    fn is_decoration(&self, c: char) -> bool {
        c.is_whitespace() || self.decorative_glyphs.contains(&c) || EMOJI_COMPANIONS.contains(&c)
    }

    /// Split text into (leading decoration, core text, trailing decoration).
    ///
    /// Decoration is any run of decorative glyphs and whitespace at either
    /// edge. Concatenating the three parts always gives back the input.
    pub fn split_decorations<'a>(&self, text: &'a str) -> (&'a str, &'a str, &'a str) {
        let start = text
            .char_indices()
            .find(|(_, c)| !self.is_decoration(*c))
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        let end = text
            .char_indices()
            .rev()
            .find(|(_, c)| !self.is_decoration(*c))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(start);

        (&text[..start], &text[start..end], &text[end..])
    }

    /// Split a trimmed list line into (bullet token, rest)
    pub fn split_bullet<'a>(&self, stripped: &'a str) -> Option<(&'a str, &'a str)> {
        self.bullets
            .iter()
            .find(|b| stripped.starts_with(b.as_str()))
            .map(|b| stripped.split_at(b.len()))
    }
}

/// Count alphabetic characters (any script)
pub fn alpha_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphabetic()).count()
}

/// Split a line into (leading whitespace, content, trailing whitespace)
pub fn split_whitespace_edges(line: &str) -> (&str, &str, &str) {
    let trimmed_start = line.trim_start();
    let indent = &line[..line.len() - trimmed_start.len()];
    let content = trimmed_start.trim_end();
    let trailing = &trimmed_start[content.len()..];
    (indent, content, trailing)
}

fn default_min_alpha_chars() -> usize {
    10
}

fn default_min_header_chars() -> usize {
    3
}

fn default_min_inline_chars() -> usize {
    3
}

fn default_prose_code_languages() -> Vec<String> {
    vec!["text".to_string()]
}

fn default_skip_tags() -> Vec<String> {
    [
        "script", "style", "pre", "code", "svg", "iframe", "img", "video", "audio", "source",
        "CodeGroup", "RequestExample", "ResponseExample", "Snippet",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_container_tags() -> Vec<String> {
    [
        "div", "section", "article", "main", "aside", "header", "footer", "nav", "ul", "ol",
        "table", "thead", "tbody", "tr", "details", "Fragment", "Tabs", "Steps", "CardGroup",
        "Columns", "AccordionGroup",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_decorative_glyphs() -> Vec<char> {
    DEFAULT_DECORATIVE_GLYPHS.to_vec()
}

fn default_bullets() -> Vec<String> {
    ["- ", "* ", "1. ", "2. ", "3. ", "4. ", "5. "]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_decorative_tokens() -> Vec<String> {
    ["<br />", "<br/>", "---"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
