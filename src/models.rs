use crate::errors::ValidationError;
use crate::filter::Timestamped;
use crate::report::ReportMode;
use crate::stats::SummaryStats;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

pub const MAX_PAIN: u8 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "StoredSymptom")]
pub struct SymptomEntry {
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
    pub joints: Vec<String>,
    pub pain: u8,
    /// Notes attached to a single joint, keyed by joint name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub joint_notes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SymptomEntry {
    /// The joint's own note, falling back to the entry note.
    pub fn note_for(&self, joint: &str) -> Option<&str> {
        self.joint_notes
            .get(joint)
            .map(String::as_str)
            .or(self.notes.as_deref())
            .filter(|note| !note.is_empty())
    }
}

// Joints are read either as plain names or as the browser app's
// `{ "name", "note" }` objects.
#[derive(Deserialize)]
struct StoredSymptom {
    #[serde(default)]
    date: DateTime<Utc>,
    #[serde(default)]
    joints: Vec<StoredJoint>,
    #[serde(default, deserialize_with = "deserialize_pain")]
    pain: u8,
    #[serde(default)]
    joint_notes: BTreeMap<String, String>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredJoint {
    Name(String),
    Detailed {
        #[serde(default)]
        name: String,
        #[serde(default)]
        note: Option<String>,
    },
    Other(IgnoredAny),
}

impl From<StoredSymptom> for SymptomEntry {
    fn from(stored: StoredSymptom) -> Self {
        let mut joints = Vec::with_capacity(stored.joints.len());
        let mut joint_notes = stored.joint_notes;

        for joint in stored.joints {
            match joint {
                StoredJoint::Name(name) => joints.push(name),
                StoredJoint::Detailed { name, note } => {
                    if name.is_empty() {
                        continue;
                    }
                    if let Some(note) = non_blank(note) {
                        joint_notes.entry(name.clone()).or_insert(note);
                    }
                    joints.push(name);
                }
                StoredJoint::Other(_) => {}
            }
        }

        Self {
            timestamp: stored.date,
            joints,
            pain: stored.pain,
            joint_notes,
            notes: stored.notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct JournalEntry {
    #[serde(rename = "date", default)]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MedicationEntry {
    #[serde(rename = "date", default)]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Timestamped for SymptomEntry {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Timestamped for JournalEntry {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Timestamped for MedicationEntry {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[derive(Debug, Deserialize)]
pub struct NewSymptom {
    #[serde(default)]
    pub joints: Vec<String>,
    pub pain: u8,
    #[serde(default)]
    pub joint_notes: BTreeMap<String, String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewSymptom {
    pub fn into_entry(self, timestamp: DateTime<Utc>) -> Result<SymptomEntry, ValidationError> {
        if self.pain > MAX_PAIN {
            return Err(ValidationError::PainOutOfRange(self.pain));
        }

        let joints: Vec<String> = self
            .joints
            .into_iter()
            .map(|joint| joint.trim().to_string())
            .filter(|joint| !joint.is_empty())
            .collect();

        let joint_notes = self
            .joint_notes
            .into_iter()
            .filter_map(|(joint, note)| Some((joint.trim().to_string(), non_blank(Some(note))?)))
            .filter(|(joint, _)| joints.contains(joint))
            .collect();

        Ok(SymptomEntry {
            timestamp,
            joints,
            pain: self.pain,
            joint_notes,
            notes: non_blank(self.notes),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct NewJournalEntry {
    #[serde(default)]
    pub text: String,
}

impl NewJournalEntry {
    pub fn into_entry(self, timestamp: DateTime<Utc>) -> Result<JournalEntry, ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyJournalText);
        }
        Ok(JournalEntry {
            timestamp,
            text: self.text,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct NewMedication {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub details: Option<String>,
}

impl NewMedication {
    pub fn into_entry(self, timestamp: DateTime<Utc>) -> Result<MedicationEntry, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingMedicationName);
        }
        Ok(MedicationEntry {
            timestamp,
            name: name.to_string(),
            kind: self.kind.trim().to_string(),
            details: non_blank(self.details),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub days: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub mode: ReportMode,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub days: Option<u32>,
}

impl ExportQuery {
    pub fn range_query(&self) -> RangeQuery {
        RangeQuery {
            start: self.start,
            end: self.end,
            days: self.days,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct BodyMapQuery {
    #[serde(default)]
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BodyPartResponse {
    pub part: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JointsResponse {
    pub joints: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub date: NaiveDate,
    pub symptoms: Vec<SymptomEntry>,
    pub journal: Vec<JournalEntry>,
    pub meds: Vec<MedicationEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub stats: SummaryStats,
    pub symptoms: Vec<SymptomEntry>,
    pub meds: Vec<MedicationEntry>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPain {
    Int(i64),
    Float(f64),
    Text(String),
}

// Older data stored the slider value as a string.
fn deserialize_pain<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<RawPain>::deserialize(deserializer)? {
        Some(RawPain::Int(value)) => value,
        Some(RawPain::Float(value)) => value.round() as i64,
        Some(RawPain::Text(text)) => text.trim().parse::<f64>().map(|v| v.round() as i64).unwrap_or(0),
        None => 0,
    };
    Ok(value.clamp(0, i64::from(MAX_PAIN)) as u8)
}
