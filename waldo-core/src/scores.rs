use std::cmp::Ordering;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{GameError, Result};

/// One row of the public score board.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ScoreEntry {
    #[serde(rename = "_id", default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    // Players who never finished have no duration, sometimes sent as "".
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub duration_in_seconds: Option<f64>,
}

impl ScoreEntry {
    /// `name 42s`; an empty name or missing duration is left out.
    pub fn label(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if !self.name.is_empty() {
            parts.push(self.name.clone());
        }
        if let Some(d) = self.display_duration() {
            parts.push(d);
        }
        parts.join(" ")
    }

    pub fn display_duration(&self) -> Option<String> {
        self.duration_in_seconds.map(|d| format!("{}s", d))
    }
}

// One odd row (null or numeric name) must not sink the whole board.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_seconds<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

pub fn parse_scores(body: &str) -> Result<Vec<ScoreEntry>> {
    serde_json::from_str(body.trim())
        .map_err(|e| GameError::InvalidResponse(format!("score list: {e}")))
}

/// Fastest first; entries without a duration keep their order at the end.
pub fn ranked(mut entries: Vec<ScoreEntry>) -> Vec<ScoreEntry> {
    entries.sort_by(|a, b| match (a.duration_in_seconds, b.duration_in_seconds) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_server_rows() {
        let body = r#"[
            {"_id":"a","name":"zoe","duration_in_seconds":61},
            {"_id":"b","name":"","duration_in_seconds":"45"},
            {"_id":"c","name":"max","duration_in_seconds":""},
            {"_id":"d"},
            {"_id":"e","name":null,"duration_in_seconds":null},
            {"_id":null,"name":"kai","duration_in_seconds":12}
        ]"#;
        let rows = parse_scores(body).unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].duration_in_seconds, Some(61.0));
        assert_eq!(rows[1].duration_in_seconds, Some(45.0));
        assert_eq!(rows[2].duration_in_seconds, None);
        assert_eq!(rows[3].name, "");
        assert_eq!(rows[4].id, "e");
        assert_eq!(rows[4].name, "");
        assert_eq!(rows[4].duration_in_seconds, None);
        assert_eq!(rows[5].id, "");
        assert_eq!(rows[5].label(), "kai 12s");
    }

    #[test]
    fn labels_skip_empty_parts() {
        let full = ScoreEntry { id: "1".into(), name: "zoe".into(), duration_in_seconds: Some(61.0) };
        let anon = ScoreEntry { id: "2".into(), name: String::new(), duration_in_seconds: Some(7.5) };
        let unfinished = ScoreEntry { id: "3".into(), name: "max".into(), duration_in_seconds: None };
        assert_eq!(full.label(), "zoe 61s");
        assert_eq!(anon.label(), "7.5s");
        assert_eq!(unfinished.label(), "max");
    }

    #[test]
    fn ranking_puts_unfinished_last() {
        let rows = parse_scores(
            r#"[{"_id":"a","duration_in_seconds":90},{"_id":"b"},{"_id":"c","duration_in_seconds":30},{"_id":"d"}]"#,
        )
        .unwrap();
        let ids: Vec<String> = ranked(rows).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn malformed_list_is_an_error() {
        assert!(matches!(parse_scores("{\"oops\":1}"), Err(GameError::InvalidResponse(_))));
    }
}
