use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::period::Period;

/// Staff record as returned by `GET /staff`.
///
/// The backend does not range-check stored ages, so the read side takes
/// any integer; only the create form insists on a positive one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

/// Accepts naive and offset-qualified timestamps; anything else reads as unknown.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| {
        let raw = raw.trim();
        raw.parse::<NaiveDateTime>()
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
    }))
}

/// Body of `POST /staff`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStaff {
    pub name: String,
    pub age: u32,
    pub position: String,
}

/// One roster row. The assign endpoint answers with `{id, shift_id, staff_id}`,
/// the roster listing with enriched rows keyed by `assignment_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(alias = "assignment_id")]
    pub id: i64,
    #[serde(default)]
    pub shift_id: Option<i64>,
    pub staff_id: i64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub shift_type: Option<String>,
    #[serde(default)]
    pub staff_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

/// How an assignment names its shift.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ShiftRef {
    Id { shift_id: i64 },
    Slot { date: NaiveDate, shift_type: String },
}

/// Body of `POST /assignments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignRequest {
    pub staff_id: i64,
    #[serde(flatten)]
    pub shift: ShiftRef,
}

pub fn default_shift_types() -> Vec<String> {
    vec!["morning".into(), "afternoon".into(), "night".into()]
}

/// Body of `POST /schedule/auto`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutoScheduleRequest {
    #[serde(flatten)]
    pub period: Period,
    pub shift_types: Vec<String>,
    pub min_per_shift: u32,
}

impl AutoScheduleRequest {
    pub fn for_period(period: Period) -> Self {
        AutoScheduleRequest {
            period,
            shift_types: default_shift_types(),
            min_per_shift: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AutoScheduleResult {
    #[serde(default)]
    pub created_assignments: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageStat {
    pub date: NaiveDate,
    pub shift_type: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadStat {
    pub staff_id: i64,
    pub name: String,
    pub total_assignments: u32,
}

/// Pre-rendered CSV wrapped in JSON by `GET /export/roster.csv`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExportPayload {
    pub filename: String,
    pub content: String,
    pub content_type: String,
}

impl ExportPayload {
    /// Data rows in the CSV body, header excluded.
    pub fn row_count(&self) -> Result<usize, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(self.content.as_bytes());
        let mut rows = 0;
        for record in reader.records() {
            record?;
            rows += 1;
        }
        Ok(rows)
    }
}
