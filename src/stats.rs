use crate::models::{MedicationEntry, SymptomEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const TOP_JOINT_LIMIT: usize = 3;
pub const UNDEFINED_LABEL: &str = "undefined";
pub const NO_JOINTS_LABEL: &str = "None";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Mean pain rounded to one decimal; `None` when there were no symptom entries.
    pub average_pain: Option<f64>,
    /// Most frequent joints, at most three; empty when none were recorded.
    pub top_joints: Vec<String>,
    pub symptom_count: usize,
    pub medication_count: usize,
}

impl SummaryStats {
    pub fn average_pain_label(&self) -> String {
        match self.average_pain {
            Some(avg) => format!("{avg:.1}"),
            None => UNDEFINED_LABEL.to_string(),
        }
    }

    pub fn top_joints_label(&self) -> String {
        if self.top_joints.is_empty() {
            NO_JOINTS_LABEL.to_string()
        } else {
            self.top_joints.join(", ")
        }
    }
}

/// Summarizes already-filtered entries. Reads no clock and no store.
pub fn summarize(symptoms: &[SymptomEntry], meds: &[MedicationEntry]) -> SummaryStats {
    SummaryStats {
        average_pain: average_pain(symptoms),
        top_joints: top_joints(symptoms, TOP_JOINT_LIMIT),
        symptom_count: symptoms.len(),
        medication_count: meds.len(),
    }
}

fn average_pain(symptoms: &[SymptomEntry]) -> Option<f64> {
    if symptoms.is_empty() {
        return None;
    }
    let total: u64 = symptoms.iter().map(|entry| u64::from(entry.pain)).sum();
    let mean = total as f64 / symptoms.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

/// Joints ranked by occurrence count. Equal counts keep first-seen order.
fn top_joints(symptoms: &[SymptomEntry], limit: usize) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for joint in symptoms.iter().flat_map(|entry| entry.joints.iter()) {
        match slots.get(joint.as_str()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(joint.as_str(), counts.len());
                counts.push((joint.as_str(), 1));
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(joint, _)| joint.to_string())
        .collect()
}
