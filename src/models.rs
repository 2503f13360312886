//! Data models for the data-quality reporter.
//!
//! This module contains the legislative records read from the store
//! (bills and their child records, chambers) and the per-chamber summary
//! records that make up a data-quality report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Organization classifications that count as a legislative chamber.
pub const CHAMBER_CLASSIFICATIONS: [&str; 3] = ["upper", "lower", "legislature"];

/// A legislative chamber (or any organization attached to a jurisdiction).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chamber {
    /// Store identifier, referenced by `Bill::from_organization`.
    pub id: String,
    /// Display name, e.g. "Senate" or "House of Delegates".
    pub name: String,
    /// Organization classification ("upper", "lower", "legislature", ...).
    pub classification: String,
}

impl Chamber {
    /// Key used for this chamber in every report table.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Whether this organization is one of the legislature's chambers.
    pub fn is_legislative(&self) -> bool {
        CHAMBER_CLASSIFICATIONS.contains(&self.classification.as_str())
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.classification)
    }
}

/// An action taken on a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillAction {
    /// Date as recorded by the scraper, usually `YYYY-MM-DD` with an
    /// optional time part. Compared as a string.
    pub date: String,
    /// Free-text description of the action.
    pub description: String,
    /// Action classifications, e.g. `["introduction"]`.
    #[serde(default)]
    pub classification: Vec<String>,
}

/// A sponsorship of a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSponsorship {
    pub name: String,
    #[serde(default)]
    pub classification: String,
    #[serde(default)]
    pub primary: bool,
}

/// A source URL for a bill or vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A vote event on a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteEvent {
    #[serde(default)]
    pub motion_text: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// A bill with all of its child records loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: String,
    /// Human-facing identifier, e.g. "HB 1".
    pub identifier: String,
    /// Id of the originating chamber.
    pub from_organization: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub actions: Vec<BillAction>,
    #[serde(default)]
    pub sponsorships: Vec<BillSponsorship>,
    #[serde(default)]
    pub votes: Vec<VoteEvent>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl Bill {
    /// Whether the bill originated in the given chamber.
    pub fn is_from(&self, chamber: &Chamber) -> bool {
        self.from_organization == chamber.id
    }

    /// The action with the greatest date. Ties resolve to the first
    /// action in stored order.
    pub fn latest_action(&self) -> Option<&BillAction> {
        // max_by keeps the last maximum, so scan from the back.
        self.actions
            .iter()
            .rev()
            .max_by(|a, b| a.date.cmp(&b.date))
    }

    /// The action with the smallest date. Ties resolve to the first
    /// action in stored order.
    pub fn earliest_action(&self) -> Option<&BillAction> {
        self.actions.iter().min_by(|a, b| a.date.cmp(&b.date))
    }

    /// Total number of sources attached to this bill's votes.
    pub fn vote_source_count(&self) -> usize {
        self.votes.iter().map(|v| v.sources.len()).sum()
    }
}

/// Report table keyed by lower-cased chamber name.
pub type ChamberTable<T> = BTreeMap<String, Vec<T>>;

/// Bill totals and latest/earliest activity for one chamber.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub chamber: String,
    pub total_bills: usize,
    #[serde(with = "empty_string")]
    pub latest_bill_created_id: Option<String>,
    #[serde(with = "empty_string")]
    pub latest_bill_created_date: Option<String>,
    #[serde(rename = "bill_id_with_latest_action", with = "empty_string")]
    pub bill_with_latest_action_id: Option<String>,
    #[serde(with = "empty_string")]
    pub latest_action_date: Option<String>,
    #[serde(with = "empty_string")]
    pub latest_action_description: Option<String>,
    #[serde(rename = "bill_id_with_earliest_action", with = "empty_string")]
    pub bill_with_earliest_action_id: Option<String>,
    #[serde(with = "empty_string")]
    pub earliest_action_date: Option<String>,
    #[serde(with = "empty_string")]
    pub earliest_action_description: Option<String>,
}

impl SessionSummary {
    /// Summary for a chamber with no bills.
    pub fn empty(chamber: String) -> Self {
        Self {
            chamber,
            ..Self::default()
        }
    }
}

/// Mean child-record counts per bill for one chamber.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AverageSummary {
    pub chamber: String,
    pub average_sponsors_per_bill: u64,
    pub average_actions_per_bill: u64,
    pub average_votes_per_bill: u64,
}

/// Counts of bills missing source links for one chamber.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceGapSummary {
    pub chamber: String,
    pub total_bills_no_sources: usize,
    pub total_votes_no_sources: usize,
}

/// Subject coverage for one chamber.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectCoverageSummary {
    pub chamber: String,
    pub overall_number_of_subjects: usize,
    pub number_of_subjects: usize,
    pub number_of_bills_without_subjects: usize,
}

/// The complete data-quality report for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQualityReport {
    pub bills_per_session_data: ChamberTable<SessionSummary>,
    pub average_num_data: ChamberTable<AverageSummary>,
    pub no_sources_data: ChamberTable<SourceGapSummary>,
    pub bill_subjects_data: ChamberTable<SubjectCoverageSummary>,
}

/// Absent text is written as `""` so existing report consumers keep working.
mod empty_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(if value.is_empty() { None } else { Some(value) })
    }
}
