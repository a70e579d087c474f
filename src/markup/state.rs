/*!
 * Parser state for the line classifier.
 *
 * The classifier is always in exactly one of these states. Each transition
 * is a pure function of the current state and the trimmed line, so the
 * state can be tested without running a full classification.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Opening code fence with an optional language tag
static FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(`{3,})\s*([\w+#.-]+)?").unwrap());

/// Where the classifier currently is in the document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParserState {
    /// Ordinary prose
    #[default]
    Default,

    /// Between the `---` delimiters at the top of the document
    InFrontMatter,

    /// Inside a fenced code block
    InCodeBlock {
        /// Declared language, if any
        lang: Option<String>,
        /// Number of backticks in the opening fence
        fence_len: usize,
    },

    /// Inside a multi-line markup element
    InStructuralBlock(StructuralBlock),

    /// Inside an HTML (`<!-- -->`) or MDX (`{/* */}`) comment
    InComment {
        /// Marker that ends the comment
        close: &'static str,
    },
}

/// Comment delimiters as (open, close) pairs
const COMMENT_DELIMITERS: [(&str, &str); 2] = [("<!--", "-->"), ("{/*", "*/}")];

/// A markup element spanning several lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralBlock {
    /// Tag name as written (`Note`, `div`, ...)
    pub tag: String,

    /// What closes the block
    pub end: BlockEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEnd {
    /// The opening tag's attributes run over several lines; the block
    /// ends on the first line ending with `>`. With `skip_body` the
    /// element body is skipped afterwards as well.
    OpeningTag { skip_body: bool },

    /// The body of a skipped element; ends on the line holding `</tag>`
    ClosingTag,
}

impl ParserState {
    /// State entered when a code fence opens on this line
    pub fn open_fence(stripped: &str) -> Option<ParserState> {
        let caps = FENCE_RE.captures(stripped)?;
        Some(ParserState::InCodeBlock {
            lang: caps.get(2).map(|m| m.as_str().to_string()),
            fence_len: caps[1].len(),
        })
    }

    /// State after a multi-line opening tag that has not been closed yet
    pub fn open_tag(tag: &str, skip_body: bool) -> ParserState {
        ParserState::InStructuralBlock(StructuralBlock {
            tag: tag.to_string(),
            end: BlockEnd::OpeningTag { skip_body },
        })
    }

    /// State after a skipped element whose body starts on the next line
    pub fn skip_body(tag: &str) -> ParserState {
        ParserState::InStructuralBlock(StructuralBlock {
            tag: tag.to_string(),
            end: BlockEnd::ClosingTag,
        })
    }

    /// State after a line starting a comment; `Default` when the comment
    /// also ends on this line
    pub fn open_comment(stripped: &str) -> Option<ParserState> {
        COMMENT_DELIMITERS.iter().find_map(|&(open, close)| {
            let rest = stripped.strip_prefix(open)?;
            Some(if rest.contains(close) {
                ParserState::Default
            } else {
                ParserState::InComment { close }
            })
        })
    }

    pub fn is_default(&self) -> bool {
        matches!(self, ParserState::Default)
    }

    /// Short label for log messages
    pub fn label(&self) -> &'static str {
        match self {
            ParserState::Default => "default",
            ParserState::InFrontMatter => "front matter",
            ParserState::InCodeBlock { .. } => "code block",
            ParserState::InStructuralBlock(_) => "markup block",
            ParserState::InComment { .. } => "comment",
        }
    }
}

/// Whether a trimmed line closes a fence of the given length
pub fn closes_fence(stripped: &str, fence_len: usize) -> bool {
    stripped.len() >= fence_len && stripped.bytes().take(fence_len).all(|b| b == b'`')
}

impl StructuralBlock {
    /// Advance the block over one more line
    pub fn advance(&self, stripped: &str) -> ParserState {
        match self.end {
            BlockEnd::OpeningTag { skip_body } => {
                if !stripped.ends_with('>') {
                    return ParserState::InStructuralBlock(self.clone());
                }
                if !skip_body || stripped.ends_with("/>") || self.closes_on(stripped) {
                    ParserState::Default
                } else {
                    ParserState::skip_body(&self.tag)
                }
            }
            BlockEnd::ClosingTag => {
                if self.closes_on(stripped) {
                    ParserState::Default
                } else {
                    ParserState::InStructuralBlock(self.clone())
                }
            }
        }
    }

    fn closes_on(&self, stripped: &str) -> bool {
        stripped.contains(&format!("</{}>", self.tag))
    }
}
