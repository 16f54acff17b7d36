use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An opportunity posting as supplied by the catalog.
///
/// Text fields default to empty and numeric signals default to `0.0` when
/// missing. Numeric signals also accept numeric strings; anything else that
/// cannot be read as a number is recorded as `0.0` instead of failing the load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_skills: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub apply_url: Option<String>,
    /// 0 – 100
    #[serde(default, deserialize_with = "lenient_number")]
    pub popularity: f64,
    /// 0 – 5
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: f64,
    /// 0 – 10
    #[serde(default, deserialize_with = "lenient_number")]
    pub company_prestige: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub stipend: f64,
}

impl CandidateRecord {
    /// The free text the ranking engine vectorizes for this posting.
    pub fn document_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title, self.description, self.required_skills
        )
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if number.is_finite() { number } else { 0.0 })
}
