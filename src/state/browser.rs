/// Catalog browser controller
///
/// Owns the loaded records, the current `PredicateSet` and the search
/// debouncer. Every command applies one change and re-runs `evaluate`
/// at most once. The UI never reads filter values back from widgets;
/// it renders what this controller holds.

use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::data::{Dimension, Material};
use super::debounce::{Debouncer, Ticket};
use super::filter::{distinct_values, evaluate, PredicateSet, Visibility};
use crate::error::LoadFailure;

/// The loaded record store
#[derive(Debug, Clone)]
pub struct Catalog {
    pub materials: Vec<Material>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum Phase {
    Loading,
    Ready(Catalog),
    Failed(LoadFailure),
}

#[derive(Debug)]
pub struct Browser {
    phase: Phase,
    predicates: PredicateSet,
    /// Text currently shown in the search box (may not be committed yet)
    search_input: String,
    search: Debouncer<String>,
    visibility: Visibility,
    evaluations: u64,
}

impl Browser {
    pub fn new(search_quiet_period: Duration) -> Self {
        Self {
            phase: Phase::Loading,
            predicates: PredicateSet::new(),
            search_input: String::new(),
            search: Debouncer::new(search_quiet_period),
            visibility: Visibility::default(),
            evaluations: 0,
        }
    }

    /// Discard everything and wait for a fresh fetch
    pub fn begin_load(&mut self) {
        self.phase = Phase::Loading;
        self.predicates = PredicateSet::new();
        self.search_input.clear();
        self.search.cancel();
        self.visibility = Visibility::default();
    }

    /// Store the fetch result. Ignored unless a load is in progress.
    pub fn finish_load(&mut self, result: Result<Vec<Material>, LoadFailure>) {
        if !matches!(self.phase, Phase::Loading) {
            warn!("ignoring load result that arrived outside a load");
            return;
        }

        match result {
            Ok(materials) => {
                info!(count = materials.len(), "catalog loaded");
                self.phase = Phase::Ready(Catalog {
                    materials,
                    fetched_at: Utc::now(),
                });
                self.reevaluate();
            }
            Err(failure) => {
                warn!(kind = ?failure.kind, error = %failure, "catalog load failed");
                self.phase = Phase::Failed(failure);
            }
        }
    }

    /// Change a categorical filter; evaluates immediately
    pub fn select(&mut self, dimension: Dimension, value: impl Into<String>) {
        let predicates = std::mem::take(&mut self.predicates);
        self.predicates = predicates.with(dimension, value);
        self.reevaluate();
    }

    /// Record a search keystroke. The returned ticket must be passed to
    /// `settle_search` after `search_quiet_period()` has elapsed.
    pub fn type_search(&mut self, text: String) -> Ticket {
        self.search_input = text.clone();
        self.search.push(text)
    }

    /// Commit the pending search text if `ticket` is the latest one.
    /// Returns whether an evaluation happened; outside `Ready` the text is
    /// stored but nothing is evaluated.
    pub fn settle_search(&mut self, ticket: Ticket) -> bool {
        let Some(text) = self.search.settle(ticket) else {
            return false;
        };

        let predicates = std::mem::take(&mut self.predicates);
        self.predicates = predicates.with_search(text);
        self.reevaluate()
    }

    /// Remove one active filter (chip close)
    pub fn remove(&mut self, dimension: Dimension) {
        let predicates = std::mem::take(&mut self.predicates);
        self.predicates = predicates.cleared(dimension);
        self.reevaluate();
    }

    /// Clear every filter, including any pending search text
    pub fn reset(&mut self) {
        if self.search.is_pending() {
            debug!("dropping unsettled search input");
        }
        self.predicates = PredicateSet::new();
        self.search_input.clear();
        self.search.cancel();
        self.reevaluate();
    }

    fn reevaluate(&mut self) -> bool {
        let Phase::Ready(catalog) = &self.phase else {
            return false;
        };

        self.visibility = evaluate(&catalog.materials, &self.predicates);
        self.evaluations += 1;

        debug!(
            visible = self.visibility.visible_count,
            total = catalog.materials.len(),
            "filters applied"
        );
        true
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn predicates(&self) -> &PredicateSet {
        &self.predicates
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn search_quiet_period(&self) -> Duration {
        self.search.quiet_period()
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    /// Number of evaluator runs since creation
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Materials that pass the current filters, in catalog order
    pub fn visible_materials(&self) -> Vec<&Material> {
        match &self.phase {
            Phase::Ready(catalog) => catalog
                .materials
                .iter()
                .enumerate()
                .filter(|(index, _)| self.visibility.is_visible(*index))
                .map(|(_, material)| material)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether any filter or typed search text is in effect
    pub fn has_active_filters(&self) -> bool {
        !self.predicates.is_empty() || !self.search_input.trim().is_empty()
    }

    pub fn total_count(&self) -> usize {
        match &self.phase {
            Phase::Ready(catalog) => catalog.materials.len(),
            _ => 0,
        }
    }

    /// Picker options for a dimension, derived from the loaded records
    pub fn options(&self, dimension: Dimension) -> Vec<String> {
        match &self.phase {
            Phase::Ready(catalog) => distinct_values(&catalog.materials, dimension),
            _ => Vec::new(),
        }
    }
}

impl Default for Browser {
    fn default() -> Self {
        Self::new(super::debounce::DEFAULT_QUIET_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    fn material(title: &str, college: &str, kind: &str) -> Material {
        Material {
            title: Some(title.to_string()),
            college: Some(college.to_string()),
            kind: Some(kind.to_string()),
            ..Default::default()
        }
    }

    fn loaded() -> Browser {
        let mut browser = Browser::default();
        browser.finish_load(Ok(vec![
            material("Algebra I", "Science", "Note"),
            material("Biology II", "Science", "PastQuestion"),
            material("Circuit Theory", "Engineering", "Note"),
        ]));
        browser
    }

    fn visible_titles(browser: &Browser) -> Vec<&str> {
        browser
            .visible_materials()
            .into_iter()
            .map(|m| m.title.as_deref().unwrap())
            .collect()
    }

    #[test]
    fn test_load_shows_everything() {
        let browser = loaded();

        assert!(matches!(browser.phase(), Phase::Ready(_)));
        assert_eq!(browser.visibility().visible_count, 3);
        assert_eq!(browser.total_count(), 3);
        assert_eq!(browser.evaluations(), 1);
    }

    #[test]
    fn test_empty_catalog_is_ready_with_no_results() {
        let mut browser = Browser::default();
        browser.finish_load(Ok(Vec::new()));

        assert!(matches!(browser.phase(), Phase::Ready(_)));
        assert!(browser.visibility().is_empty());
    }

    #[test]
    fn test_select_evaluates_immediately() {
        let mut browser = loaded();

        browser.select(Dimension::Type, "note");
        assert_eq!(visible_titles(&browser), ["Algebra I", "Circuit Theory"]);

        browser.select(Dimension::College, "Science");
        assert_eq!(visible_titles(&browser), ["Algebra I"]);
        assert_eq!(browser.evaluations(), 3);
    }

    #[test]
    fn test_search_burst_evaluates_once_with_final_value() {
        let mut browser = loaded();

        let tickets: Vec<Ticket> = ["c", "ci", "cir"]
            .into_iter()
            .map(|text| browser.type_search(text.to_string()))
            .collect();
        assert_eq!(browser.search_input(), "cir");
        assert_eq!(browser.evaluations(), 1);

        let settled: Vec<bool> = tickets.into_iter().map(|t| browser.settle_search(t)).collect();

        assert_eq!(settled, [false, false, true]);
        assert_eq!(browser.evaluations(), 2);
        assert_eq!(browser.predicates().search(), "cir");
        assert_eq!(visible_titles(&browser), ["Circuit Theory"]);
    }

    #[test]
    fn test_remove_clears_only_that_dimension() {
        let mut browser = loaded();
        browser.select(Dimension::College, "Science");
        browser.select(Dimension::Type, "Note");
        let before = browser.evaluations();

        browser.remove(Dimension::Type);

        assert_eq!(browser.predicates().value(Dimension::College), "Science");
        assert_eq!(visible_titles(&browser), ["Algebra I", "Biology II"]);
        assert_eq!(browser.evaluations(), before + 1);
    }

    #[test]
    fn test_reset_clears_everything_and_evaluates_once() {
        let mut browser = loaded();
        browser.select(Dimension::College, "Engineering");
        let ticket = browser.type_search("alg".to_string());
        let before = browser.evaluations();

        browser.reset();

        assert_eq!(browser.evaluations(), before + 1);
        assert!(browser.predicates().is_empty());
        assert_eq!(browser.search_input(), "");
        assert_eq!(browser.visibility().visible_count, 3);
        assert!(!browser.settle_search(ticket));
    }

    #[test]
    fn test_settle_outside_ready_reports_no_evaluation() {
        let mut browser = Browser::default();
        let ticket = browser.type_search("alg".to_string());

        assert!(!browser.settle_search(ticket));
        assert_eq!(browser.evaluations(), 0);
        assert_eq!(browser.predicates().search(), "alg");
    }

    #[test]
    fn test_active_filters_include_unsettled_search() {
        let mut browser = loaded();
        assert!(!browser.has_active_filters());

        browser.type_search("bio".to_string());
        assert!(browser.has_active_filters());

        browser.reset();
        browser.select(Dimension::Type, "Note");
        assert!(browser.has_active_filters());

        browser.remove(Dimension::Type);
        assert!(!browser.has_active_filters());
    }

    #[test]
    fn test_failed_load_is_terminal_until_reload() {
        let mut browser = Browser::default();
        browser.finish_load(Err(LoadFailure {
            kind: FailureKind::Failed,
            message: "boom".to_string(),
        }));

        assert!(matches!(browser.phase(), Phase::Failed(f) if f.message == "boom"));

        browser.select(Dimension::Level, "100");
        assert_eq!(browser.evaluations(), 0);
        assert!(browser.visible_materials().is_empty());

        browser.begin_load();
        browser.finish_load(Ok(vec![material("Algebra I", "Science", "Note")]));
        assert_eq!(browser.visibility().visible_count, 1);
        assert!(browser.predicates().is_empty());
    }

    #[test]
    fn test_late_load_result_is_ignored() {
        let mut browser = loaded();

        browser.finish_load(Ok(Vec::new()));

        assert_eq!(browser.total_count(), 3);
    }

    #[test]
    fn test_options_come_from_loaded_records() {
        let browser = loaded();

        assert_eq!(browser.options(Dimension::College), ["Engineering", "Science"]);
        assert!(Browser::default().options(Dimension::College).is_empty());
    }
}
