//! Play-by-play rows as read from the `plays` table (or a JSON snapshot of it).

use serde::Deserialize;
use serde::de::Deserializer;

/// One pass attempt. Field names in the snapshot JSON follow the table's column names.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlayRecord {
    /// Empty when the source row has no passer.
    #[serde(rename = "passer_player_name", default, deserialize_with = "deserialize_name")]
    pub passer: String,

    #[serde(rename = "receiver_player_name", default)]
    pub receiver: Option<String>,

    #[serde(default)]
    pub air_yards: Option<f64>,

    #[serde(default, deserialize_with = "deserialize_whole")]
    pub down: Option<u8>,

    #[serde(default, deserialize_with = "deserialize_whole")]
    pub distance: Option<u32>,

    #[serde(default)]
    pub play_clock: Option<f64>,

    /// Seconds remaining in the quarter.
    #[serde(default)]
    pub game_clock: Option<f64>,

    /// Raw date text; normalized by the temporal pass.
    #[serde(default, deserialize_with = "deserialize_name")]
    pub game_date: String,

    #[serde(default)]
    pub pass_location_x: Option<f64>,

    #[serde(default)]
    pub pass_location_y: Option<f64>,

    #[serde(default)]
    pub pass_direction: Option<String>,

    #[serde(default)]
    pub epa: Option<f64>,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub complete_pass: bool,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub pass_touchdown: bool,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub first_down: bool,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub first_down_pass: bool,

    #[serde(default)]
    pub posteam: Option<String>,

    #[serde(default)]
    pub defteam: Option<String>,
}

/// Flags arrive as booleans, 0/1 integers, 1.0 floats or strings depending on the exporter.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => matches!(s.trim(), "1" | "true" | "True" | "TRUE"),
        _ => false,
    })
}

/// Whole numbers may arrive as `3`, `3.0` or `"3"` (pandas writes floats once a column has NaN).
/// Anything that is not a whole number in range reads as missing.
fn deserialize_whole<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    use serde_json::Value;

    let value = Option::<Value>::deserialize(deserializer)?;
    let number = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().and_then(whole),
        _ => None,
    };
    Ok(number.and_then(|n| T::try_from(n).ok()))
}

/// The integer value of `f` when it has no fractional part.
pub(crate) fn whole(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

fn deserialize_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
