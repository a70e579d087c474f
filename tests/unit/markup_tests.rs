/*!
 * Tests for classification and reconstruction over whole documents
 */

use mdxlate::markup::{extract_units, rebuild, Category, Document, ExtractionRules, ExtractionUnit};

use crate::common::SAMPLE_MDX;

fn sample_units() -> (Document, Vec<ExtractionUnit>) {
    let document = Document::parse("sample.mdx", SAMPLE_MDX);
    let units = extract_units(&document, &ExtractionRules::default());
    (document, units)
}

#[test]
fn test_extractUnits_withSampleDocument_shouldSelectProseOnly() {
    let (_, units) = sample_units();

    let selected: Vec<(usize, Category, &str)> = units
        .iter()
        .map(|u| (u.line_index(), u.category(), u.raw_text()))
        .collect();

    assert_eq!(
        selected,
        vec![
            (1, Category::Title, "Getting Started Guide"),
            (7, Category::Header, "Introduction"),
            (9, Category::PlainText, "Welcome to the platform documentation for new developers."),
            (11, Category::ListItem, "Install the command line tool first."),
            (13, Category::ListItem, "Configure your workspace before deploying anything."),
            (15, Category::ComponentInline, "Remember to save your work often."),
            (28, Category::CodeText, "This block explains the output format."),
            (32, Category::PlainText, "Content inside a container is still translated."),
        ]
    );
}

#[test]
fn test_rebuild_withIdentityTranslation_shouldReproduceDocument() {
    let (document, units) = sample_units();

    let rebuilt = rebuild(&document, units.iter().map(|u| (u, u.raw_text())));

    assert_eq!(rebuilt.render(), SAMPLE_MDX);
}

#[test]
fn test_rebuild_withLongerTranslations_shouldKeepLineCount() {
    let (document, units) = sample_units();
    let translations: Vec<String> = units
        .iter()
        .map(|u| format!("{} (tarjima qilingan)\nikkinchi qator", u.raw_text()))
        .collect();

    let rebuilt = rebuild(
        &document,
        units.iter().zip(translations.iter().map(String::as_str)),
    );

    assert_eq!(rebuilt.line_count(), document.line_count());
    assert_eq!(
        rebuilt.lines()[7],
        "# 🛸 Introduction (tarjima qilingan) ikkinchi qator"
    );
}

#[test]
fn test_extractUnits_withNonProseCode_shouldLeaveCodeUntouched() {
    let (document, units) = sample_units();

    assert!(units.iter().all(|u| !u.raw_text().contains("print(")));
    assert!(units.iter().all(|u| !u.raw_text().contains("npm install")));
    assert_eq!(document.lines()[24], "print(\"hello world from python\")");
}

#[test]
fn test_extractUnits_withShortListItem_shouldSkipIt() {
    let (_, units) = sample_units();
    assert!(units.iter().all(|u| u.line_index() != 12));
}

#[test]
fn test_extractUnits_withCommentsAndLeadingTags_shouldSelectVisibleProseOnly() {
    let content = "<!--\nTODO remember to rewrite this section later\n-->\n{/*\nInternal editorial note for maintainers only\n*/}\n<strong>Important:</strong> always back up your data before upgrading.\n<Icon icon=\"rocket\" /> Install the SDK to get started quickly.";
    let document = Document::parse("comments.mdx", content);

    let units = extract_units(&document, &ExtractionRules::default());

    let selected: Vec<(usize, Category)> = units.iter().map(|u| (u.line_index(), u.category())).collect();
    assert_eq!(selected, vec![(6, Category::PlainText), (7, Category::PlainText)]);
    assert_eq!(units[1].raw_text(), "<Icon icon=\"rocket\" /> Install the SDK to get started quickly.");
}
