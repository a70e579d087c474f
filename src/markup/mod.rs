/*!
 * Markup-aware extraction and reinsertion.
 *
 * This module decides which lines of an MDX document hold translatable
 * prose and splices translations back without touching markup:
 *
 * - `document`: line-oriented document model
 * - `rules`: thresholds and token lists driving the classifier
 * - `state`: parser state machine
 * - `classifier`: per-line content classification
 * - `planner`: extraction units built from classifications
 * - `reconstruct`: rebuilding lines from translated units
 */

pub use self::classifier::{Classification, ContentClassifier};
pub use self::document::Document;
pub use self::planner::{extract_units, plan_units};
pub use self::reconstruct::rebuild;
pub use self::rules::ExtractionRules;
pub use self::state::{BlockEnd, ParserState, StructuralBlock};
pub use self::unit::{Category, ExtractionUnit, UnitContext};

pub mod classifier;
pub mod document;
pub mod planner;
pub mod reconstruct;
pub mod rules;
pub mod state;
pub mod unit;
