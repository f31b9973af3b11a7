/// Client-side filtering of the loaded catalog
///
/// A `PredicateSet` holds the current value of every filter dimension.
/// `evaluate` is a pure function from (records, predicates) to the
/// visible subset; it is re-run from scratch after every change.

use std::collections::BTreeMap;

use super::data::{normalize, Dimension, Material};

/// Current value of each filter dimension plus free-text search.
///
/// Values are stored as the user entered them. An empty (or whitespace-only)
/// value means "no constraint". Mutators consume `self` and return the
/// updated set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateSet {
    categorical: BTreeMap<Dimension, String>,
    search: String,
}

impl PredicateSet {
    /// Create an empty predicate set (everything matches)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of a categorical dimension
    pub fn with(mut self, dimension: Dimension, value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            self.categorical.remove(&dimension);
        } else {
            self.categorical.insert(dimension, value);
        }
        self
    }

    /// Set the free-text search value
    pub fn with_search(mut self, value: impl Into<String>) -> Self {
        self.search = value.into();
        self
    }

    /// Clear a single categorical dimension
    pub fn cleared(mut self, dimension: Dimension) -> Self {
        self.categorical.remove(&dimension);
        self
    }

    /// Raw value for a dimension, empty if unconstrained
    pub fn value(&self, dimension: Dimension) -> &str {
        self.categorical.get(&dimension).map(String::as_str).unwrap_or("")
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// True when no dimension constrains the result
    pub fn is_empty(&self) -> bool {
        self.categorical.is_empty() && self.search.trim().is_empty()
    }

    /// Active categorical filters as (dimension, trimmed value), in chip order
    pub fn active_filters(&self) -> Vec<(Dimension, &str)> {
        Dimension::ALL
            .iter()
            .filter_map(|&dimension| {
                let value = self.value(dimension).trim();
                (!value.is_empty()).then_some((dimension, value))
            })
            .collect()
    }
}

/// Which records survive the current predicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    /// Indices into the record slice, in fetch order
    pub visible: Vec<usize>,
    pub visible_count: usize,
}

impl Visibility {
    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.binary_search(&index).is_ok()
    }

    /// True when the "no results" state should be shown
    pub fn is_empty(&self) -> bool {
        self.visible_count == 0
    }
}

/// Normalized form of a predicate set, computed once per evaluation
struct Criteria {
    categorical: Vec<(Dimension, String)>,
    search: Option<String>,
}

impl Criteria {
    fn from_predicates(predicates: &PredicateSet) -> Self {
        let categorical = Dimension::ALL
            .iter()
            .map(|&dimension| (dimension, normalize(predicates.value(dimension))))
            .filter(|(_, value)| !value.is_empty())
            .collect();
        let search = Some(normalize(predicates.search())).filter(|s| !s.is_empty());

        Self { categorical, search }
    }

    fn matches(&self, material: &Material) -> bool {
        for (dimension, expected) in &self.categorical {
            if normalize(material.field(*dimension)) != *expected {
                return false;
            }
        }

        if let Some(search) = &self.search {
            return material
                .searchable_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(search.as_str()));
        }

        true
    }
}

/// Compute the visible subset of `records` under `predicates`.
///
/// Order preserving and side-effect free; an empty slice yields an empty
/// result.
pub fn evaluate(records: &[Material], predicates: &PredicateSet) -> Visibility {
    let criteria = Criteria::from_predicates(predicates);

    let visible: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, material)| criteria.matches(material))
        .map(|(index, _)| index)
        .collect();

    Visibility {
        visible_count: visible.len(),
        visible,
    }
}

/// Distinct non-empty values of a dimension, de-duplicated and sorted
/// case-insensitively. The first spelling seen wins.
pub fn distinct_values(records: &[Material], dimension: Dimension) -> Vec<String> {
    let mut values: BTreeMap<String, String> = BTreeMap::new();
    for material in records {
        let raw = material.field(dimension).trim();
        if raw.is_empty() {
            continue;
        }
        values
            .entry(raw.to_lowercase())
            .or_insert_with(|| raw.to_string());
    }
    values.into_values().collect()
}
