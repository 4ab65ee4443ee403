// Player record and the stat arithmetic derived from it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Generate a fresh opaque player identifier (UUID v4).
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// One roster entry.
///
/// Field names serialize in camelCase (`flagId`, `isCaptain`), the format of
/// saved rosters and export files. Every field has a default and a lenient
/// reader, so older or hand-edited records load with missing or mistyped keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Opaque identifier, immutable once assigned. Records stored without one
    /// receive a fresh id on load.
    #[serde(default = "generate_id", deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub team: String,
    /// Key into the nationality table.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub flag_id: Option<String>,
    /// Older records stored the nationality key under this name.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub nationality: Option<String>,
    /// Relative image path computed from `flag_id` when the record was saved.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub flag_src: Option<String>,
    /// Freeform flag text or emoji from records that predate the table.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub flag: Option<String>,
    /// Embedded `data:` URL for the card photo.
    #[serde(default, deserialize_with = "lenient_string")]
    pub photo: String,
    #[serde(default, deserialize_with = "lenient_stat")]
    pub ski: i32,
    #[serde(default, deserialize_with = "lenient_stat")]
    pub drnk: i32,
    #[serde(default, deserialize_with = "lenient_stat")]
    pub chaos: i32,
    #[serde(default, deserialize_with = "lenient_stat")]
    pub coord: i32,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_captain: bool,
}

impl Player {
    /// Sum of the four stat ratings.
    pub fn total_score(&self) -> i64 {
        i64::from(self.ski) + i64::from(self.drnk) + i64::from(self.chaos) + i64::from(self.coord)
    }

    /// Mean of the four stat ratings, rounded half toward positive infinity.
    pub fn average_rating(&self) -> i64 {
        (self.total_score() + 2).div_euclid(4)
    }

    /// The nationality key for this record, falling back to the legacy field.
    /// Empty strings count as absent.
    pub fn nationality_key(&self) -> Option<&str> {
        self.flag_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.nationality.as_deref().filter(|id| !id.is_empty()))
    }
}

/// Values submitted from the create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub name: String,
    pub team: String,
    pub flag_id: Option<String>,
    /// A newly converted photo, or `None` to keep the current one on edit.
    pub photo: Option<String>,
    pub ski: i32,
    pub drnk: i32,
    pub chaos: i32,
    pub coord: i32,
}

// ---------------------------------------------------------------------------
// Lenient field readers
// ---------------------------------------------------------------------------
//
// Saved rosters and hand-edited export files carry whatever older versions
// wrote: `null` for cleared fields, stats as floats or strings, numeric
// names. A single odd field must not make the whole record unreadable.

/// Stats: integers as-is (saturated to i32), floats truncated toward zero,
/// numeric strings parsed the same way. Anything else reads as 0.
fn lenient_stat<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n.as_i64().map(|i| i as f64).or_else(|| n.as_f64()),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number
        .filter(|f| f.is_finite())
        .map(|f| f.trunc().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32)
        .unwrap_or(0))
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Text fields: `null`, arrays and objects read as empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(Value::deserialize(deserializer)?))
}

/// A null or empty id gets a fresh one, like a missing id does.
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(Value::deserialize(deserializer)?)
        .filter(|id| !id.is_empty())
        .unwrap_or_else(generate_id))
}

/// Truthiness: non-zero numbers and non-empty strings count as set.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn player_with_stats(ski: i32, drnk: i32, chaos: i32, coord: i32) -> Player {
        Player {
            id: "p1".into(),
            name: "Ada".into(),
            team: "Moguls".into(),
            flag_id: None,
            nationality: None,
            flag_src: None,
            flag: None,
            photo: String::new(),
            ski,
            drnk,
            chaos,
            coord,
            is_captain: false,
        }
    }

    #[test]
    fn total_score_sums_all_stats() {
        let p = player_with_stats(80, 70, 90, 60);
        assert_eq!(p.total_score(), 300);
    }

    #[test]
    fn average_rating_rounds_half_up() {
        // 301 / 4 = 75.25
        assert_eq!(player_with_stats(80, 71, 90, 60).average_rating(), 75);
        // 302 / 4 = 75.5
        assert_eq!(player_with_stats(80, 72, 90, 60).average_rating(), 76);
        // 303 / 4 = 75.75
        assert_eq!(player_with_stats(80, 73, 90, 60).average_rating(), 76);
    }

    #[test]
    fn average_rating_negative_half_rounds_toward_positive() {
        // -6 / 4 = -1.5, which rounds to -1
        assert_eq!(player_with_stats(-6, 0, 0, 0).average_rating(), -1);
        // -2 / 4 = -0.5, which rounds to 0
        assert_eq!(player_with_stats(-2, 0, 0, 0).average_rating(), 0);
    }

    #[test]
    fn total_score_does_not_overflow() {
        let p = player_with_stats(i32::MAX, i32::MAX, i32::MAX, i32::MAX);
        assert_eq!(p.total_score(), 4 * i64::from(i32::MAX));
    }

    #[test]
    fn serializes_camel_case_fields() {
        let mut p = player_with_stats(1, 2, 3, 4);
        p.flag_id = Some("usa".into());
        p.is_captain = true;
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["flagId"], "usa");
        assert_eq!(json["isCaptain"], true);
        assert!(json.get("nationality").is_none());
        assert!(json.get("flag").is_none());
    }

    #[test]
    fn legacy_record_without_flag_id_loads() {
        let json = r#"{
            "id": "old-1",
            "name": "Bo",
            "team": "Gapers",
            "flag": "🇨🇦",
            "photo": "data:image/png;base64,AAAA",
            "ski": 5, "drnk": 9, "chaos": 7, "coord": 2
        }"#;
        let p: Player = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, "old-1");
        assert_eq!(p.flag.as_deref(), Some("🇨🇦"));
        assert!(p.flag_id.is_none());
        assert!(!p.is_captain);
        assert_eq!(p.total_score(), 23);
    }

    #[test]
    fn null_stats_load_as_zero() {
        let json = r#"{"id": "x", "ski": null, "drnk": 3}"#;
        let p: Player = serde_json::from_str(json).unwrap();
        assert_eq!(p.ski, 0);
        assert_eq!(p.drnk, 3);
        assert_eq!(p.chaos, 0);
    }

    #[test]
    fn null_text_fields_load_as_empty() {
        let json = r#"{"id": "b", "name": null, "team": null, "photo": null, "flagId": null}"#;
        let p: Player = serde_json::from_str(json).unwrap();
        assert_eq!(p.name, "");
        assert_eq!(p.team, "");
        assert_eq!(p.photo, "");
        assert!(p.flag_id.is_none());
    }

    #[test]
    fn float_and_string_stats_are_truncated() {
        let json = r#"{"id": "c", "ski": 7.0, "drnk": 8.9, "chaos": " 42 ", "coord": "-3.5"}"#;
        let p: Player = serde_json::from_str(json).unwrap();
        assert_eq!((p.ski, p.drnk, p.chaos, p.coord), (7, 8, 42, -3));
    }

    #[test]
    fn garbage_stats_read_as_zero() {
        let json = r#"{"id": "d", "ski": "lots", "drnk": [1], "chaos": 1e300, "coord": true}"#;
        let p: Player = serde_json::from_str(json).unwrap();
        assert_eq!(p.ski, 0);
        assert_eq!(p.drnk, 0);
        assert_eq!(p.chaos, i32::MAX);
        assert_eq!(p.coord, 0);
    }

    #[test]
    fn numeric_name_and_truthy_captain() {
        let p: Player = serde_json::from_str(r#"{"id": 7, "name": 42, "isCaptain": 1}"#).unwrap();
        assert_eq!(p.id, "7");
        assert_eq!(p.name, "42");
        assert!(p.is_captain);

        let q: Player = serde_json::from_str(r#"{"id": null, "isCaptain": null}"#).unwrap();
        assert!(!q.id.is_empty());
        assert!(!q.is_captain);
    }

    #[test]
    fn missing_id_gets_generated() {
        let a: Player = serde_json::from_str(r#"{"name": "A"}"#).unwrap();
        let b: Player = serde_json::from_str(r#"{"name": "B"}"#).unwrap();
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn nationality_key_prefers_flag_id() {
        let mut p = player_with_stats(0, 0, 0, 0);
        p.flag_id = Some("japan".into());
        p.nationality = Some("italy".into());
        assert_eq!(p.nationality_key(), Some("japan"));

        p.flag_id = Some(String::new());
        assert_eq!(p.nationality_key(), Some("italy"));

        p.nationality = None;
        assert_eq!(p.nationality_key(), None);
    }
}
