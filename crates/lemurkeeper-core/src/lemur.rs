//! Lemur records as served by the `/lemurs` endpoint.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Identity key of a record. The endpoint may emit any JSON number or a
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LemurId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for LemurId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LemurId::Number(n) => write!(f, "{n}"),
            LemurId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for LemurId {
    fn from(n: u64) -> Self {
        LemurId::Number(n.into())
    }
}

impl From<&str> for LemurId {
    fn from(s: &str) -> Self {
        LemurId::Text(s.to_string())
    }
}

/// One animal entry.
///
/// `name`, `sex` and `src` are optional on the wire: incoming records are
/// stored as-is. A missing or non-string value reads as `None`, and such a
/// record simply never matches a non-sentinel filter. Unknown fields are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lemur {
    pub id: LemurId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Category facet, expected to be one of [`Sex::ALL`] codes.
    #[serde(default, deserialize_with = "lenient_string")]
    pub sex: Option<String>,
    /// Image URI, display only.
    #[serde(default, deserialize_with = "lenient_string")]
    pub src: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

impl Lemur {
    pub fn new(
        id: impl Into<LemurId>,
        name: impl Into<String>,
        sex: impl Into<String>,
        src: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            sex: Some(sex.into()),
            src: Some(src.into()),
        }
    }

    /// Check that the fields the filter pipeline reads are present.
    pub fn validate(&self) -> Result<(), MalformedRecord> {
        if self.name.is_none() {
            return Err(MalformedRecord {
                id: self.id.clone(),
                field: "name",
            });
        }
        if self.sex.is_none() {
            return Err(MalformedRecord {
                id: self.id.clone(),
                field: "sex",
            });
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("lemur {id} is missing `{field}`")]
pub struct MalformedRecord {
    pub id: LemurId,
    pub field: &'static str,
}

/// Collect every malformed record in a collection, in collection order.
pub fn malformed(lemurs: &[Lemur]) -> Vec<MalformedRecord> {
    lemurs.iter().filter_map(|l| l.validate().err()).collect()
}

/// The fixed set of category values offered by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
    Indeterminate,
}

impl Sex {
    pub const ALL: [Sex; 3] = [Sex::Male, Sex::Female, Sex::Indeterminate];

    /// Wire code stored in the record's `sex` field.
    pub fn code(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Indeterminate => "I",
        }
    }

    pub fn from_code(code: &str) -> Option<Sex> {
        Sex::ALL.into_iter().find(|s| s.code() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_numeric_id() {
        let json = r#"{"id": 1, "name": "Ringo", "sex": "M", "src": "https://img/ringo.jpg"}"#;
        let lemur: Lemur = serde_json::from_str(json).unwrap();
        assert_eq!(lemur.id, LemurId::from(1));
        assert_eq!(lemur.name.as_deref(), Some("Ringo"));
        assert_eq!(lemur.sex.as_deref(), Some("M"));
    }

    #[test]
    fn deserialize_string_id_and_extra_fields() {
        let json = r#"{"id": "a7", "name": "Zaza", "sex": "F", "age": "Young", "src": "z.png"}"#;
        let lemur: Lemur = serde_json::from_str(json).unwrap();
        assert_eq!(lemur.id, LemurId::Text("a7".into()));
        assert_eq!(lemur.id.to_string(), "a7");
    }

    #[test]
    fn missing_fields_are_kept_but_flagged() {
        let json = r#"[{"id": 1, "sex": "M"}, {"id": 2, "name": "Rango"}, {"id": 3, "name": "Zaza", "sex": "F"}]"#;
        let lemurs: Vec<Lemur> = serde_json::from_str(json).unwrap();
        assert_eq!(lemurs.len(), 3);

        let bad = malformed(&lemurs);
        assert_eq!(bad.len(), 2);
        assert_eq!(bad[0].field, "name");
        assert_eq!(bad[1].field, "sex");
        assert_eq!(bad[1].to_string(), "lemur 2 is missing `sex`");
    }

    #[test]
    fn odd_ids_and_field_types_do_not_sink_the_collection() {
        let json = r#"[
            {"id": 1, "name": "Ringo", "sex": "M"},
            {"id": -2, "name": "Rango", "sex": "F"},
            {"id": 3.5, "name": 42, "sex": "F"},
            {"id": "x", "name": "Zaza", "sex": null, "src": ["a.png"]}
        ]"#;
        let lemurs: Vec<Lemur> = serde_json::from_str(json).unwrap();
        assert_eq!(lemurs.len(), 4);
        assert_eq!(lemurs[1].id.to_string(), "-2");
        assert_eq!(lemurs[1].name.as_deref(), Some("Rango"));
        assert_eq!(lemurs[2].id.to_string(), "3.5");
        assert_eq!(lemurs[2].name, None);
        assert_eq!(lemurs[3].sex, None);
        assert_eq!(lemurs[3].src, None);

        let bad = malformed(&lemurs);
        assert_eq!(bad.len(), 2);
        assert_eq!((bad[0].id.to_string(), bad[0].field), ("3.5".to_string(), "name"));
        assert_eq!((bad[1].id.to_string(), bad[1].field), ("x".to_string(), "sex"));
    }

    #[test]
    fn sex_codes() {
        let codes: Vec<&str> = Sex::ALL.iter().map(|s| s.code()).collect();
        assert_eq!(codes, ["M", "F", "I"]);
        assert_eq!(Sex::from_code("F"), Some(Sex::Female));
        assert_eq!(Sex::from_code("f"), None);
        assert_eq!(Sex::from_code("Old"), None);
    }
}
