/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the record sources and the UI layer.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// A single catalog entry (lecture note, past question, ...)
///
/// Every field is optional. Hosted rows sometimes carry numbers
/// (e.g. `level: 100`) so fields are decoded leniently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Material {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Course code (e.g., "MAT101")
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub semester: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub college: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub department: Option<String>,
    /// Resource type: "Note" or "PastQuestion"
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub topic: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub download_link: Option<String>,
}

impl Material {
    /// Field value for a categorical dimension, empty if absent
    pub fn field(&self, dimension: Dimension) -> &str {
        let value = match dimension {
            Dimension::College => &self.college,
            Dimension::Department => &self.department,
            Dimension::Level => &self.level,
            Dimension::Semester => &self.semester,
            Dimension::Type => &self.kind,
        };
        value.as_deref().unwrap_or("")
    }

    /// Fields scanned by free-text search
    pub fn searchable_fields(&self) -> [&str; 5] {
        [
            self.title.as_deref().unwrap_or(""),
            self.code.as_deref().unwrap_or(""),
            self.topic.as_deref().unwrap_or(""),
            self.college.as_deref().unwrap_or(""),
            self.department.as_deref().unwrap_or(""),
        ]
    }

    /// Whether this is a lecture note (everything else is shown as a past question)
    pub fn is_note(&self) -> bool {
        normalize(self.kind.as_deref().unwrap_or("")) == "note"
    }
}

/// One categorical filter axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    College,
    Department,
    Level,
    Semester,
    Type,
}

impl Dimension {
    /// All categorical dimensions, in evaluation and chip order
    pub const ALL: [Dimension; 5] = [
        Dimension::College,
        Dimension::Department,
        Dimension::Level,
        Dimension::Semester,
        Dimension::Type,
    ];

    /// Plural label used by the "All ..." picker entry
    pub fn plural(self) -> &'static str {
        match self {
            Dimension::College => "colleges",
            Dimension::Department => "departments",
            Dimension::Level => "levels",
            Dimension::Semester => "semesters",
            Dimension::Type => "types",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::College => "college",
            Dimension::Department => "department",
            Dimension::Level => "level",
            Dimension::Semester => "semester",
            Dimension::Type => "type",
        };
        f.write_str(name)
    }
}

/// Trim and lower-case a value for comparison
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Sort materials into canonical order: title ascending, case-insensitive.
/// The sort is stable, so equal titles keep fetch order.
pub fn sort_canonical(materials: &mut [Material]) {
    materials.sort_by_cached_key(|m| m.title.as_deref().unwrap_or("").to_lowercase());
}

/// Accept strings, numbers and booleans; treat null as absent
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}
