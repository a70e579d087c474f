/*!
 * Extraction units: text selected for translation plus what is needed to
 * put its translation back.
 */

use serde::Serialize;
use std::fmt;

/// Kind of translatable line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Title,
    Header,
    ListItem,
    CodeText,
    ComponentInline,
    PlainText,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Title => "title",
            Category::Header => "header",
            Category::ListItem => "list item",
            Category::CodeText => "code text",
            Category::ComponentInline => "component",
            Category::PlainText => "text",
        };
        f.write_str(name)
    }
}

/// Structural fragments preserved around the translated text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitContext {
    /// Quoted `title:` value in the front matter
    Title {
        /// Decorative glyphs (and spacing) before the title text
        glyph_prefix: String,
        /// Decorative glyphs (and spacing) after the title text
        glyph_suffix: String,
    },

    /// Markdown heading
    Header {
        /// Indentation, `#` run and the spacing after it
        marker: String,
        glyph_prefix: String,
        /// Trailing glyphs and whitespace
        suffix: String,
    },

    /// Bulleted or numbered list item
    ListItem {
        /// Indentation, bullet token and the spacing after it
        bullet: String,
        suffix: String,
    },

    /// Line of a prose-language fenced block
    CodeText { indent: String, suffix: String },

    /// Element opened and closed on the same line
    ComponentInline { tag: String },

    /// Free-standing prose line
    PlainText {
        indent: String,
        suffix: String,
        /// The line carries inline tags that must survive translation
        inline_markup: bool,
    },
}

impl UnitContext {
    pub fn category(&self) -> Category {
        match self {
            UnitContext::Title { .. } => Category::Title,
            UnitContext::Header { .. } => Category::Header,
            UnitContext::ListItem { .. } => Category::ListItem,
            UnitContext::CodeText { .. } => Category::CodeText,
            UnitContext::ComponentInline { .. } => Category::ComponentInline,
            UnitContext::PlainText { .. } => Category::PlainText,
        }
    }
}

/// One span of text to translate, tied to its line.
///
/// Units are created by the planner and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionUnit {
    line_index: usize,
    category: Category,
    raw_text: String,
    context: UnitContext,
}

impl ExtractionUnit {
    pub fn new(line_index: usize, raw_text: impl Into<String>, context: UnitContext) -> Self {
        Self {
            line_index,
            category: context.category(),
            raw_text: raw_text.into(),
            context,
        }
    }

    pub fn line_index(&self) -> usize {
        self.line_index
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn context(&self) -> &UnitContext {
        &self.context
    }
}
