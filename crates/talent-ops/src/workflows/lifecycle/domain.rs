use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::workflows::people::PersonId;

/// Career stage. Profiles without a stage are interns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EmployeeStage {
    #[default]
    Intern,
    #[serde(rename = "FullTime_IC")]
    FullTimeIc,
    #[serde(rename = "Senior_IC")]
    SeniorIc,
    TeamLead,
    Manager,
    #[serde(rename = "HR")]
    Hr,
    Exited,
}

impl EmployeeStage {
    pub const ALL: [EmployeeStage; 7] = [
        EmployeeStage::Intern,
        EmployeeStage::FullTimeIc,
        EmployeeStage::SeniorIc,
        EmployeeStage::TeamLead,
        EmployeeStage::Manager,
        EmployeeStage::Hr,
        EmployeeStage::Exited,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            EmployeeStage::Intern => "Intern",
            EmployeeStage::FullTimeIc => "FullTime_IC",
            EmployeeStage::SeniorIc => "Senior_IC",
            EmployeeStage::TeamLead => "TeamLead",
            EmployeeStage::Manager => "Manager",
            EmployeeStage::Hr => "HR",
            EmployeeStage::Exited => "Exited",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|stage| stage.label().eq_ignore_ascii_case(raw))
    }

    pub const fn is_active(self) -> bool {
        !matches!(self, EmployeeStage::Exited)
    }
}

impl fmt::Display for EmployeeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionalTrack {
    Engineering,
    Management,
    #[serde(rename = "HR")]
    Hr,
    Operations,
    Sales,
}

impl FunctionalTrack {
    pub const fn label(self) -> &'static str {
        match self {
            FunctionalTrack::Engineering => "Engineering",
            FunctionalTrack::Management => "Management",
            FunctionalTrack::Hr => "HR",
            FunctionalTrack::Operations => "Operations",
            FunctionalTrack::Sales => "Sales",
        }
    }
}

pub const NO_TRACK_LABEL: &str = "No Track";

/// Profile columns the lifecycle screen reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleProfile {
    pub id: PersonId,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "stage_or_default")]
    pub employee_stage: EmployeeStage,
    #[serde(default)]
    pub functional_track: Option<FunctionalTrack>,
}

impl LifecycleProfile {
    pub fn track_label(&self) -> &'static str {
        self.functional_track
            .map_or(NO_TRACK_LABEL, FunctionalTrack::label)
    }

    pub(crate) fn sort_key(&self) -> &str {
        self.full_name.as_deref().unwrap_or("")
    }
}

fn stage_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<EmployeeStage, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(EmployeeStage::parse)
        .unwrap_or_default())
}

/// Audit row appended on every stage change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageChange {
    pub employee_id: PersonId,
    /// `None` for the first recorded stage.
    pub previous_stage: Option<EmployeeStage>,
    pub new_stage: EmployeeStage,
    pub reason: String,
    #[serde(default)]
    pub approved_by: Option<PersonId>,
    pub created_at: DateTime<Utc>,
}

impl StageChange {
    /// `"Intern → FullTime_IC"`, with `Start` for the first entry.
    pub fn transition_label(&self) -> String {
        let from = self.previous_stage.map_or("Start", EmployeeStage::label);
        format!("{from} → {}", self.new_stage.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_labels_round_trip_through_parse() {
        for stage in EmployeeStage::ALL {
            assert_eq!(EmployeeStage::parse(stage.label()), Some(stage));
        }
        assert_eq!(EmployeeStage::parse("senior_ic"), Some(EmployeeStage::SeniorIc));
        assert_eq!(EmployeeStage::parse("Contractor"), None);
    }

    #[test]
    fn missing_stage_and_track_use_defaults() {
        let profile: LifecycleProfile =
            serde_json::from_str(r#"{"id":"p-1","full_name":"Ann","employee_stage":null}"#)
                .expect("profile parses");
        assert_eq!(profile.employee_stage, EmployeeStage::Intern);
        assert_eq!(profile.track_label(), "No Track");
    }

    #[test]
    fn stages_serialize_with_stored_labels() {
        let json = serde_json::to_value(EmployeeStage::FullTimeIc).expect("serializes");
        assert_eq!(json, "FullTime_IC");
        assert!(!EmployeeStage::Exited.is_active());
    }
}
