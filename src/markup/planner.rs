/*!
 * Extraction planner: turns classifier output into extraction units.
 */

use std::collections::HashMap;

use log::debug;

use super::classifier::{Classification, ContentClassifier};
use super::document::Document;
use super::rules::ExtractionRules;
use super::unit::{Category, ExtractionUnit};

/// Materialize classifications into units.
///
/// Identical texts on different lines stay separate units; repeated text is
/// collapsed later by the cache, keyed on content.
pub fn plan_units(classifications: Vec<Classification>) -> Vec<ExtractionUnit> {
    let units: Vec<ExtractionUnit> = classifications
        .into_iter()
        .map(|c| ExtractionUnit::new(c.line_index, c.raw_text, c.context))
        .collect();

    debug_assert!(units.windows(2).all(|w| w[0].line_index() < w[1].line_index()));

    if log::log_enabled!(log::Level::Debug) {
        let mut per_category: HashMap<Category, usize> = HashMap::new();
        for unit in &units {
            *per_category.entry(unit.category()).or_default() += 1;
        }
        let mut summary: Vec<String> = per_category
            .iter()
            .map(|(category, count)| format!("{} {}", count, category))
            .collect();
        summary.sort();
        debug!("Planned {} units: {}", units.len(), summary.join(", "));
    }

    units
}

/// Classify a document and plan its units in one go
pub fn extract_units(document: &Document, rules: &ExtractionRules) -> Vec<ExtractionUnit> {
    plan_units(ContentClassifier::new(rules).classify(document))
}
