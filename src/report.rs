use crate::filter::{filter_entries, DateRange};
use crate::models::{JournalEntry, MedicationEntry, SymptomEntry};
use crate::stats::summarize;
use crate::store::{KeyValueStore, RecordStore};
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const REPORT_TITLE: &str = "Arthritis Tracker Export";
pub const REPORT_FILENAME: &str = "arthritis_export.pdf";

pub const LEFT_MARGIN: f32 = 10.0;
pub const TOP_MARGIN: f32 = 10.0;
pub const TITLE_FONT_SIZE: f32 = 14.0;
pub const BODY_FONT_SIZE: f32 = 12.0;
pub const HEADING_ADVANCE: f32 = 10.0;
pub const LINE_ADVANCE: f32 = 8.0;
pub const ENTRY_GAP: f32 = 4.0;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    /// One line per joint per symptom entry.
    #[default]
    Detail,
    /// Aggregated statistics instead of the symptom listing.
    Summary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderLine {
    pub text: String,
    pub x: f32,
    /// Vertical offset from the top of the page.
    pub y: f32,
    pub font_size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub filename: String,
    pub lines: Vec<RenderLine>,
}

/// Reads every partition, keeps what falls inside `range`, and lays it out
/// as one unpaginated page with timestamps in local time.
pub fn build_report<S: KeyValueStore>(
    store: &RecordStore<S>,
    range: &DateRange,
    mode: ReportMode,
) -> Report {
    build_report_in(store, range, mode, &Local)
}

pub fn build_report_in<S, Tz>(
    store: &RecordStore<S>,
    range: &DateRange,
    mode: ReportMode,
    tz: &Tz,
) -> Report
where
    S: KeyValueStore,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let symptoms = filter_entries(&store.symptoms(), range);
    let journal = filter_entries(&store.journal(), range);
    let meds = filter_entries(&store.meds(), range);
    assemble_report(&symptoms, &journal, &meds, mode, tz)
}

pub fn assemble_report<Tz>(
    symptoms: &[SymptomEntry],
    journal: &[JournalEntry],
    meds: &[MedicationEntry],
    mode: ReportMode,
    tz: &Tz,
) -> Report
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut page = Page::new();
    page.heading(REPORT_TITLE, TITLE_FONT_SIZE);

    match mode {
        ReportMode::Detail => {
            page.heading("Symptoms:", BODY_FONT_SIZE);
            for entry in symptoms {
                for joint in &entry.joints {
                    page.line(symptom_line(joint, entry));
                }
                page.gap(ENTRY_GAP);
            }
        }
        ReportMode::Summary => {
            let stats = summarize(symptoms, meds);
            page.heading("Summary:", BODY_FONT_SIZE);
            let average = match stats.average_pain {
                Some(_) => format!("Average pain: {}/10", stats.average_pain_label()),
                None => format!("Average pain: {}", stats.average_pain_label()),
            };
            page.line(average);
            page.line(format!("Most affected joints: {}", stats.top_joints_label()));
            page.line(format!("Symptom entries: {}", stats.symptom_count));
            page.line(format!("Medication entries: {}", stats.medication_count));
        }
    }

    page.heading("Journal:", BODY_FONT_SIZE);
    for entry in journal {
        page.line(format!("{}: {}", stamp(entry.timestamp, tz), entry.text));
    }

    page.heading("Medications:", BODY_FONT_SIZE);
    for entry in meds {
        page.line(medication_line(entry, tz));
    }

    Report {
        filename: REPORT_FILENAME.to_string(),
        lines: page.lines,
    }
}

/// `<joint> - Pain <n>/10 - Note: <note or None>`
pub fn symptom_line(joint: &str, entry: &SymptomEntry) -> String {
    let note = entry.note_for(joint).unwrap_or("None");
    format!("{joint} - Pain {}/10 - Note: {note}", entry.pain)
}

fn medication_line<Tz>(entry: &MedicationEntry, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}: {} ({}) - {}",
        stamp(entry.timestamp, tz),
        entry.name,
        entry.kind,
        entry.details.as_deref().unwrap_or_default()
    )
}

fn stamp<Tz>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    instant.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string()
}

struct Page {
    y: f32,
    font_size: f32,
    lines: Vec<RenderLine>,
}

impl Page {
    fn new() -> Self {
        Self {
            y: TOP_MARGIN,
            font_size: BODY_FONT_SIZE,
            lines: Vec::new(),
        }
    }

    fn heading(&mut self, text: &str, font_size: f32) {
        self.font_size = font_size;
        self.push(text.to_string(), HEADING_ADVANCE);
    }

    fn line(&mut self, text: String) {
        self.push(text, LINE_ADVANCE);
    }

    fn gap(&mut self, amount: f32) {
        self.y += amount;
    }

    fn push(&mut self, text: String, advance: f32) {
        self.lines.push(RenderLine {
            text,
            x: LEFT_MARGIN,
            y: self.y,
            font_size: self.font_size,
        });
        self.y += advance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;
    use std::collections::BTreeMap;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, day, hour, 5, 0).unwrap()
    }

    fn texts(report: &Report) -> Vec<&str> {
        report.lines.iter().map(|line| line.text.as_str()).collect()
    }

    fn offsets(report: &Report) -> Vec<f32> {
        report.lines.iter().map(|line| line.y).collect()
    }

    fn sample() -> (Vec<SymptomEntry>, Vec<JournalEntry>, Vec<MedicationEntry>) {
        let symptoms = vec![
            SymptomEntry {
                timestamp: at(2, 8),
                joints: vec!["Knee".into(), "Wrist".into()],
                pain: 8,
                joint_notes: BTreeMap::from([("Wrist".to_string(), "Hot to touch".to_string())]),
                notes: Some("Swollen".into()),
            },
            SymptomEntry {
                timestamp: at(1, 8),
                joints: vec!["Knee".into()],
                pain: 6,
                joint_notes: BTreeMap::new(),
                notes: None,
            },
        ];
        let journal = vec![JournalEntry {
            timestamp: at(2, 21),
            text: "Rough day".into(),
        }];
        let meds = vec![MedicationEntry {
            timestamp: at(2, 9),
            name: "Methotrexate".into(),
            kind: "Injection".into(),
            details: Some("Thigh".into()),
        }];
        (symptoms, journal, meds)
    }

    #[test]
    fn detail_report_lists_each_joint() {
        let (symptoms, journal, meds) = sample();
        let report = assemble_report(&symptoms, &journal, &meds, ReportMode::Detail, &Utc);

        assert_eq!(report.filename, "arthritis_export.pdf");
        assert_eq!(
            texts(&report),
            vec![
                "Arthritis Tracker Export",
                "Symptoms:",
                "Knee - Pain 8/10 - Note: Swollen",
                "Wrist - Pain 8/10 - Note: Hot to touch",
                "Knee - Pain 6/10 - Note: None",
                "Journal:",
                "2026-06-02 21:05: Rough day",
                "Medications:",
                "2026-06-02 09:05: Methotrexate (Injection) - Thigh",
            ]
        );
        assert_eq!(
            offsets(&report),
            vec![10.0, 20.0, 30.0, 38.0, 50.0, 62.0, 72.0, 80.0, 90.0]
        );
        assert_eq!(report.lines[0].font_size, TITLE_FONT_SIZE);
        assert!(report.lines[1..].iter().all(|line| line.font_size == BODY_FONT_SIZE));
        assert!(report.lines.iter().all(|line| line.x == LEFT_MARGIN));
    }

    #[test]
    fn summary_report_replaces_symptom_listing() {
        let (symptoms, journal, meds) = sample();
        let report = assemble_report(&symptoms, &journal, &meds, ReportMode::Summary, &Utc);

        assert_eq!(
            &texts(&report)[..6],
            &[
                "Arthritis Tracker Export",
                "Summary:",
                "Average pain: 7.0/10",
                "Most affected joints: Knee, Wrist",
                "Symptom entries: 2",
                "Medication entries: 1",
            ]
        );
        assert_eq!(texts(&report)[6], "Journal:");
    }

    #[test]
    fn empty_sections_render_labels_only() {
        let report = assemble_report(&[], &[], &[], ReportMode::Detail, &Utc);
        assert_eq!(texts(&report), vec!["Arthritis Tracker Export", "Symptoms:", "Journal:", "Medications:"]);
        assert_eq!(offsets(&report), vec![10.0, 20.0, 30.0, 40.0]);

        let summary = assemble_report(&[], &[], &[], ReportMode::Summary, &Utc);
        assert!(texts(&summary).contains(&"Average pain: undefined"));
        assert!(texts(&summary).contains(&"Most affected joints: None"));
    }

    #[test]
    fn entry_without_joints_only_adds_spacing() {
        let symptoms = vec![SymptomEntry {
            timestamp: at(3, 7),
            joints: vec![],
            pain: 2,
            joint_notes: BTreeMap::new(),
            notes: None,
        }];
        let report = assemble_report(&symptoms, &[], &[], ReportMode::Detail, &Utc);
        assert_eq!(report.lines[2].text, "Journal:");
        assert_eq!(report.lines[2].y, 34.0);
    }

    #[test]
    fn missing_details_render_blank() {
        let meds = vec![MedicationEntry {
            timestamp: at(4, 10),
            name: "Ibuprofen".into(),
            kind: "Tablet".into(),
            details: None,
        }];
        let report = assemble_report(&[], &[], &meds, ReportMode::Detail, &Utc);
        assert_eq!(report.lines.last().unwrap().text, "2026-06-04 10:05: Ibuprofen (Tablet) - ");
    }

    #[test]
    fn build_report_applies_range_to_every_partition() {
        let (symptoms, journal, meds) = sample();
        let mut store = RecordStore::new(MemoryStorage::new());
        for entry in symptoms {
            store.append(entry).unwrap();
        }
        for entry in journal {
            store.append(entry).unwrap();
        }
        for entry in meds {
            store.append(entry).unwrap();
        }

        let day_one = DateRange::for_day(chrono::NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(), &Utc);
        let report = build_report_in(&store, &day_one, ReportMode::Detail, &Utc);
        assert_eq!(
            texts(&report),
            vec![
                "Arthritis Tracker Export",
                "Symptoms:",
                "Knee - Pain 6/10 - Note: None",
                "Journal:",
                "Medications:",
            ]
        );
    }
}
