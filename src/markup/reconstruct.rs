/*!
 * Reconstruction engine.
 *
 * Rebuilds each translated line from its preserved structural fragments.
 * Lines without a unit are copied as they are, so the output always has
 * the same number of lines, in the same order, as the input.
 */

use std::collections::HashMap;

use log::warn;

use super::classifier::{inline_component_regex, INLINE_TAG_RE, TITLE_RE};
use super::document::Document;
use super::unit::{ExtractionUnit, UnitContext};

/// Build the translated document.
///
/// `translations` pairs each unit with the text to put in its place.
pub fn rebuild<'a, I>(document: &Document, translations: I) -> Document
where
    I: IntoIterator<Item = (&'a ExtractionUnit, &'a str)>,
{
    let by_line: HashMap<usize, (&ExtractionUnit, &str)> = translations
        .into_iter()
        .map(|(unit, text)| (unit.line_index(), (unit, text)))
        .collect();

    let lines = document
        .lines()
        .iter()
        .enumerate()
        .map(|(index, line)| match by_line.get(&index) {
            Some((unit, text)) => rebuild_line(line, unit, text).unwrap_or_else(|| {
                warn!(
                    "{}:{}: line no longer matches its {} layout, keeping original",
                    document.path().display(),
                    index + 1,
                    unit.category()
                );
                line.clone()
            }),
            None => line.clone(),
        })
        .collect();

    Document::from_lines(document.path(), lines)
}

/// Rebuild a single line, or `None` if the line does not have the
/// structure the unit was extracted from
pub fn rebuild_line(line: &str, unit: &ExtractionUnit, translated: &str) -> Option<String> {
    let text = single_line(translated);

    match unit.context() {
        UnitContext::Title { glyph_prefix, glyph_suffix } => {
            let caps = TITLE_RE.captures(line)?;
            Some(format!(
                "{}{}{}{}{}",
                &caps[1],
                glyph_prefix,
                text.replace('"', "\\\""),
                glyph_suffix,
                &caps[3]
            ))
        }
        UnitContext::Header { marker, glyph_prefix, suffix } => {
            Some(format!("{}{}{}{}", marker, glyph_prefix, text, suffix))
        }
        UnitContext::ListItem { bullet, suffix } => Some(format!("{}{}{}", bullet, text, suffix)),
        UnitContext::CodeText { indent, suffix } => Some(format!("{}{}{}", indent, text, suffix)),
        UnitContext::PlainText { indent, suffix, inline_markup } => {
            if *inline_markup
                && INLINE_TAG_RE.find_iter(unit.raw_text()).count() != INLINE_TAG_RE.find_iter(&text).count()
            {
                warn!("Inline tags changed in translation of: {}", unit.raw_text());
            }
            Some(format!("{}{}{}", indent, text, suffix))
        }
        UnitContext::ComponentInline { tag } => {
            let pattern = inline_component_regex(tag).ok()?;
            let caps = pattern.captures(line)?;
            let inner = &caps[2];
            let lead = &inner[..inner.len() - inner.trim_start().len()];
            let trail = &inner[inner.trim_end().len()..];
            Some(format!("{}{}{}{}{}", &caps[1], lead, text, trail, &caps[3]))
        }
    }
}

/// Collapse provider output onto one line so the line count never changes
fn single_line(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.contains('\n') || trimmed.contains('\r') {
        trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        trimmed.to_string()
    }
}
