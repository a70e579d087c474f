/*!
 * Content classifier.
 *
 * Walks a document line by line and decides which lines carry
 * translatable prose. Rules are applied in a fixed order and the first
 * one that matches decides the line:
 *
 * 1. front matter (`title:` only)
 * 2. fenced code blocks (prose languages only)
 * 3. comments and markup tags (skipped elements, containers, inline
 *    components, elements followed by prose)
 * 4. blank, `export`/`import`, bare URL and decorative lines
 * 5. headings
 * 6. list items
 * 7. lines without letters
 * 8. plain prose
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::document::Document;
use super::rules::{alpha_count, split_whitespace_edges, ExtractionRules};
use super::state::{closes_fence, ParserState};
use super::unit::UnitContext;

/// `title: "..."` in the front matter
pub(crate) static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^(\s*title:\s*")([^"]*)(".*)$"#).unwrap());

/// Markdown heading marker
static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6}\s+)(.+)$").unwrap());

/// Start of an opening or closing tag
static TAG_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<(/?)([A-Za-z][A-Za-z0-9._:-]*)").unwrap());

/// Tag-like fragment anywhere in a line
pub(crate) static INLINE_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[A-Za-z][^>]*>").unwrap());

/// Pattern for an element opened and closed on one line.
///
/// Groups: 1 = indentation and opening tag, 2 = inner text, 3 = closing tag
/// and trailing whitespace.
pub(crate) fn inline_component_regex(tag: &str) -> Result<Regex, regex::Error> {
    let tag = regex::escape(tag);
    Regex::new(&format!(r"^(\s*<{tag}(?:\s[^>]*)?>)(.*)(</{tag}>\s*)$"))
}

/// A line selected for translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub line_index: usize,
    pub raw_text: String,
    pub context: UnitContext,
}

/// Line-oriented classifier for MDX documents
pub struct ContentClassifier<'a> {
    rules: &'a ExtractionRules,
}

impl<'a> ContentClassifier<'a> {
    pub fn new(rules: &'a ExtractionRules) -> Self {
        Self { rules }
    }

    /// Classify every line of the document, in line order
    pub fn classify(&self, document: &Document) -> Vec<Classification> {
        let mut state = ParserState::Default;
        let mut found = Vec::new();

        for (index, line) in document.lines().iter().enumerate() {
            let (next, classification) = self.step(&state, index, line);
            if let Some(classification) = classification {
                found.push(classification);
            }
            state = next;
        }

        if !state.is_default() {
            warn!(
                "{}: document ends inside a {}",
                document.path().display(),
                state.label()
            );
        }

        debug!(
            "{}: {} of {} lines selected for translation",
            document.path().display(),
            found.len(),
            document.line_count()
        );

        found
    }

    /// Process one line: returns the next state and the line's classification
    pub fn step(
        &self,
        state: &ParserState,
        index: usize,
        line: &str,
    ) -> (ParserState, Option<Classification>) {
        let stripped = line.trim();

        match state {
            ParserState::InFrontMatter => {
                if stripped == "---" {
                    return (ParserState::Default, None);
                }
                (ParserState::InFrontMatter, self.classify_title(index, line))
            }

            ParserState::InCodeBlock { lang, fence_len } => {
                if closes_fence(stripped, *fence_len) {
                    return (ParserState::Default, None);
                }
                let classification = if self.rules.is_prose_language(lang.as_deref())
                    && alpha_count(stripped) > 0
                {
                    let (indent, content, suffix) = split_whitespace_edges(line);
                    Some(Classification {
                        line_index: index,
                        raw_text: content.to_string(),
                        context: UnitContext::CodeText {
                            indent: indent.to_string(),
                            suffix: suffix.to_string(),
                        },
                    })
                } else {
                    None
                };
                (state.clone(), classification)
            }

            ParserState::InStructuralBlock(block) => (block.advance(stripped), None),

            ParserState::InComment { close } => {
                if stripped.contains(close) {
                    (ParserState::Default, None)
                } else {
                    (state.clone(), None)
                }
            }

            ParserState::Default => self.classify_default(index, line, stripped),
        }
    }

    fn classify_default(
        &self,
        index: usize,
        line: &str,
        stripped: &str,
    ) -> (ParserState, Option<Classification>) {
        if index == 0 && stripped == "---" {
            return (ParserState::InFrontMatter, None);
        }

        if let Some(code_state) = ParserState::open_fence(stripped) {
            return (code_state, None);
        }

        if let Some(comment_state) = ParserState::open_comment(stripped) {
            return (comment_state, None);
        }

        if TAG_OPEN_RE.is_match(stripped) {
            return self.classify_tag(index, line, stripped);
        }

        if self.is_skippable(stripped) {
            return (ParserState::Default, None);
        }

        let (indent, content, trailing) = split_whitespace_edges(line);

        if content.starts_with('#') {
            return (ParserState::Default, self.classify_heading(index, indent, content, trailing));
        }

        if let Some((bullet, rest)) = self.rules.split_bullet(content) {
            return (
                ParserState::Default,
                self.classify_list_item(index, indent, bullet, rest, trailing),
            );
        }

        let letters = alpha_count(content);
        if letters == 0 {
            return (ParserState::Default, None);
        }

        let words = content.split_whitespace().count();
        if words >= 1 && letters >= self.rules.min_alpha_chars {
            return (ParserState::Default, Some(plain_text(index, indent, content, trailing)));
        }

        (ParserState::Default, None)
    }

    fn classify_title(&self, index: usize, line: &str) -> Option<Classification> {
        let caps = TITLE_RE.captures(line)?;
        let (glyph_prefix, core, glyph_suffix) = self.rules.split_decorations(caps.get(2)?.as_str());
        if core.is_empty() {
            return None;
        }
        Some(Classification {
            line_index: index,
            raw_text: core.to_string(),
            context: UnitContext::Title {
                glyph_prefix: glyph_prefix.to_string(),
                glyph_suffix: glyph_suffix.to_string(),
            },
        })
    }

    fn classify_tag(
        &self,
        index: usize,
        line: &str,
        stripped: &str,
    ) -> (ParserState, Option<Classification>) {
        let Some(caps) = TAG_OPEN_RE.captures(stripped) else {
            return (ParserState::Default, None);
        };
        if &caps[1] == "/" {
            return (ParserState::Default, None);
        }
        let tag = &caps[2];

        let opening_end = stripped[caps[0].len()..]
            .find('>')
            .map(|pos| caps[0].len() + pos);
        let Some(opening_end) = opening_end else {
            // Attributes continue on the next lines
            let skip_body = self.rules.is_skip_tag(tag);
            return (ParserState::open_tag(tag, skip_body), None);
        };
        let self_closing = stripped[..opening_end].ends_with('/');
        let closed_here = stripped.contains(&format!("</{}>", tag));

        if self.rules.is_skip_tag(tag) {
            let next = if self_closing || closed_here {
                ParserState::Default
            } else {
                ParserState::skip_body(tag)
            };
            return (next, None);
        }

        if self.rules.is_container_tag(tag) {
            return (ParserState::Default, None);
        }

        if closed_here && !self_closing {
            let whole_line = inline_component_regex(tag)
                .ok()
                .and_then(|pattern| pattern.captures(line).map(|caps| caps[2].to_string()));
            if let Some(inner) = whole_line {
                return (ParserState::Default, self.classify_inline_component(index, tag, &inner));
            }
        }

        if self_closing || closed_here {
            // Prose continues after the element
            return (ParserState::Default, self.classify_tagged_prose(index, line));
        }

        (ParserState::Default, None)
    }

    fn classify_inline_component(&self, index: usize, tag: &str, inner: &str) -> Option<Classification> {
        let inner = inner.trim();

        if inner.chars().count() <= self.rules.min_inline_chars || alpha_count(inner) == 0 {
            return None;
        }

        Some(Classification {
            line_index: index,
            raw_text: inner.to_string(),
            context: UnitContext::ComponentInline { tag: tag.to_string() },
        })
    }

    /// A line mixing elements with prose is translated whole
    fn classify_tagged_prose(&self, index: usize, line: &str) -> Option<Classification> {
        let (indent, content, trailing) = split_whitespace_edges(line);
        let outside = INLINE_TAG_RE.replace_all(content, " ");
        if alpha_count(&outside) < self.rules.min_alpha_chars {
            return None;
        }
        Some(plain_text(index, indent, content, trailing))
    }

    fn classify_heading(
        &self,
        index: usize,
        indent: &str,
        content: &str,
        trailing: &str,
    ) -> Option<Classification> {
        let caps = HEADING_RE.captures(content)?;
        let (glyph_prefix, core, glyph_suffix) = self.rules.split_decorations(caps.get(2)?.as_str());
        if core.chars().count() <= self.rules.min_header_chars {
            return None;
        }
        Some(Classification {
            line_index: index,
            raw_text: core.to_string(),
            context: UnitContext::Header {
                marker: format!("{}{}", indent, &caps[1]),
                glyph_prefix: glyph_prefix.to_string(),
                suffix: format!("{}{}", glyph_suffix, trailing),
            },
        })
    }

    fn classify_list_item(
        &self,
        index: usize,
        indent: &str,
        bullet: &str,
        rest: &str,
        trailing: &str,
    ) -> Option<Classification> {
        let text = rest.trim_start();
        let spacing = &rest[..rest.len() - text.len()];

        if text.starts_with('[') || text.starts_with('`') || text.starts_with("http") {
            return None;
        }
        if alpha_count(text) < self.rules.min_alpha_chars {
            return None;
        }

        Some(Classification {
            line_index: index,
            raw_text: text.to_string(),
            context: UnitContext::ListItem {
                bullet: format!("{}{}{}", indent, bullet, spacing),
                suffix: trailing.to_string(),
            },
        })
    }

    fn is_skippable(&self, stripped: &str) -> bool {
        stripped.is_empty()
            || starts_with_keyword(stripped, "export")
            || starts_with_keyword(stripped, "import")
            || stripped.starts_with("http://")
            || stripped.starts_with("https://")
            || stripped.starts_with("www.")
            || self.rules.is_decorative_token(stripped)
    }
}

fn plain_text(index: usize, indent: &str, content: &str, trailing: &str) -> Classification {
    Classification {
        line_index: index,
        raw_text: content.to_string(),
        context: UnitContext::PlainText {
            indent: indent.to_string(),
            suffix: trailing.to_string(),
            inline_markup: INLINE_TAG_RE.is_match(content),
        },
    }
}

/// `export const x`, `import {A} from` but not `exported files ...`
fn starts_with_keyword(stripped: &str, keyword: &str) -> bool {
    match stripped.strip_prefix(keyword) {
        Some(rest) => rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == '{'),
        None => false,
    }
}
