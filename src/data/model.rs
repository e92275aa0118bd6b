use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// FieldValue – a single projected field of a record
// ---------------------------------------------------------------------------

/// A dynamically-typed field value, mirroring what a JSON record can hold.
/// Serializes untagged so projections print as plain JSON values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<FieldValue>),
    Null,
}

impl FieldValue {
    /// Integral numbers become `Integer` so `150` does not print as `150.0`.
    pub fn from_number(v: f64) -> Self {
        if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
            FieldValue::Integer(v as i64)
        } else {
            FieldValue::Float(v)
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            FieldValue::Null => write!(f, "null"),
        }
    }
}

// ---------------------------------------------------------------------------
// Mya – "millions of years ago"
// ---------------------------------------------------------------------------

/// The era a specimen is known from. One value is a single era; two values
/// are an inclusive `[earliest, latest]` range, earliest first.
///
/// The length is not checked on construction: records with any other number
/// of values are never alive at any time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Mya(pub Vec<f64>);

impl Mya {
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// The most recent bound, i.e. the smallest value.
    /// An empty sequence yields `f64::INFINITY`.
    pub fn most_recent(&self) -> f64 {
        self.0.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Whether a specimen with this era counts as alive `mya` million years ago.
    ///
    /// A single value `v` matches when the query is `v` or `v - 1`. A range
    /// matches when each bound independently covers either `mya` or `mya - 1`;
    /// the two clauses are not a shifted range and are kept exactly as written.
    pub fn alive_at(&self, mya: f64) -> bool {
        match self.0.as_slice() {
            [v] => *v == mya || *v - 1.0 == mya,
            [earliest, latest] => {
                (*earliest >= mya || *earliest >= mya - 1.0)
                    && (*latest <= mya || *latest <= mya - 1.0)
            }
            _ => false,
        }
    }
}

impl From<Vec<f64>> for Mya {
    fn from(values: Vec<f64>) -> Self {
        Mya(values)
    }
}

// ---------------------------------------------------------------------------
// Dinosaur – one record of the collection
// ---------------------------------------------------------------------------

pub const FIELD_ID: &str = "dinosaurId";
pub const FIELD_NAME: &str = "name";
pub const FIELD_PRONUNCIATION: &str = "pronunciation";
pub const FIELD_INFO: &str = "info";
pub const FIELD_PERIOD: &str = "period";
pub const FIELD_MYA: &str = "mya";
pub const FIELD_LENGTH: &str = "lengthInMeters";

/// Field names every record must carry, in their external spelling.
pub const REQUIRED_FIELDS: [&str; 7] = [
    FIELD_ID,
    FIELD_NAME,
    FIELD_PRONUNCIATION,
    FIELD_INFO,
    FIELD_PERIOD,
    FIELD_MYA,
    FIELD_LENGTH,
];

/// A single dinosaur record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dinosaur {
    /// Unique within a collection.
    pub dinosaur_id: String,
    pub name: String,
    pub pronunciation: String,
    pub info: String,
    pub period: String,
    pub mya: Mya,
    pub length_in_meters: f64,
    /// Any other fields of the source record (`diet`, `meaningOfName`, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, FieldValue>,
}

impl Dinosaur {
    /// Look up a field by its external name. `None` means the record does not
    /// define the field at all; a present `null` is `Some(FieldValue::Null)`.
    pub fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            FIELD_ID => Some(FieldValue::from(self.dinosaur_id.as_str())),
            FIELD_NAME => Some(FieldValue::from(self.name.as_str())),
            FIELD_PRONUNCIATION => Some(FieldValue::from(self.pronunciation.as_str())),
            FIELD_INFO => Some(FieldValue::from(self.info.as_str())),
            FIELD_PERIOD => Some(FieldValue::from(self.period.as_str())),
            FIELD_MYA => Some(FieldValue::List(
                self.mya.values().iter().map(|v| FieldValue::from_number(*v)).collect(),
            )),
            FIELD_LENGTH => Some(FieldValue::from_number(self.length_in_meters)),
            other => self.extra.get(other).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rex() -> Dinosaur {
        let mut extra = BTreeMap::new();
        extra.insert("diet".to_string(), FieldValue::from("carnivorous"));
        extra.insert("nickname".to_string(), FieldValue::Null);
        Dinosaur {
            dinosaur_id: "mPk7cIWIB".to_string(),
            name: "Tyrannosaurus".to_string(),
            pronunciation: "tie-RAN-oh-sore-us".to_string(),
            info: "Big.".to_string(),
            period: "Late Cretaceous".to_string(),
            mya: Mya(vec![67.0, 66.0]),
            length_in_meters: 12.3,
            extra,
        }
    }

    #[test]
    fn single_era_matches_value_and_one_less() {
        let mya = Mya(vec![29.0]);
        assert!(mya.alive_at(29.0));
        assert!(mya.alive_at(28.0));
        assert!(!mya.alive_at(30.0));
        assert!(!mya.alive_at(27.0));
        assert!(!mya.alive_at(28.5));
    }

    #[test]
    fn range_uses_independent_clauses() {
        let mya = Mya(vec![156.0, 144.0]);
        assert!(mya.alive_at(150.0));
        assert!(mya.alive_at(144.0));
        // earliest >= mya - 1 admits one unit past the earliest bound
        assert!(mya.alive_at(157.0));
        assert!(!mya.alive_at(158.0));
        // latest <= mya is required on the recent side
        assert!(!mya.alive_at(143.0));
    }

    #[test]
    fn other_lengths_never_match() {
        assert!(!Mya(vec![]).alive_at(0.0));
        assert!(!Mya(vec![10.0, 8.0, 6.0]).alive_at(8.0));
    }

    #[test]
    fn builds_from_loaded_values() {
        let mya = Mya::from(vec![154.0, 150.0]);
        assert_eq!(mya.values(), &[154.0, 150.0]);
        assert!(mya.alive_at(150.0));
    }

    #[test]
    fn most_recent_is_the_minimum() {
        assert_eq!(Mya(vec![156.0, 144.0]).most_recent(), 144.0);
        assert_eq!(Mya(vec![77.5]).most_recent(), 77.5);
        assert_eq!(Mya(vec![]).most_recent(), f64::INFINITY);
    }

    #[test]
    fn field_lookup_covers_known_and_extra_fields() {
        let d = rex();
        assert_eq!(d.field("name"), Some(FieldValue::from("Tyrannosaurus")));
        assert_eq!(d.field("dinosaurId"), Some(FieldValue::from("mPk7cIWIB")));
        assert_eq!(d.field("lengthInMeters"), Some(FieldValue::Float(12.3)));
        assert_eq!(
            d.field("mya"),
            Some(FieldValue::List(vec![
                FieldValue::Integer(67),
                FieldValue::Integer(66)
            ]))
        );
        assert_eq!(d.field("diet"), Some(FieldValue::from("carnivorous")));
        assert_eq!(d.field("nickname"), Some(FieldValue::Null));
        assert_eq!(d.field("unknown-key"), None);
    }

    #[test]
    fn serializes_with_external_field_names() {
        let json = serde_json::to_value(rex()).unwrap();
        assert_eq!(json["dinosaurId"], "mPk7cIWIB");
        assert_eq!(json["lengthInMeters"], 12.3);
        assert_eq!(json["mya"], serde_json::json!([67.0, 66.0]));
        assert_eq!(json["diet"], "carnivorous");
        assert!(json["nickname"].is_null());
    }

    #[test]
    fn display_renders_plain_values() {
        assert_eq!(FieldValue::from_number(150.0).to_string(), "150");
        assert_eq!(FieldValue::from_number(77.5).to_string(), "77.5");
        assert_eq!(
            FieldValue::List(vec![FieldValue::Integer(1), FieldValue::from("a")]).to_string(),
            "[1, a]"
        );
    }
}
