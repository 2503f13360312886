//! Per-chamber data-quality aggregation.
//!
//! Every function here takes one session's bills and the jurisdiction's
//! chambers and returns a table keyed by lower-cased chamber name. Each
//! chamber gets an entry even when it has no bills in the session.

use crate::models::{
    AverageSummary, Bill, Chamber, ChamberTable, SessionSummary, SourceGapSummary,
    SubjectCoverageSummary,
};
use std::collections::BTreeSet;
use tracing::debug;

/// Bill totals plus the most recently created bill and the bills holding
/// the latest and earliest actions, per chamber.
pub fn session_totals(bills: &[Bill], chambers: &[Chamber]) -> ChamberTable<SessionSummary> {
    let mut table = ChamberTable::new();

    for chamber in chambers {
        let name = chamber.key();
        let chamber_bills = bills_from(bills, chamber);
        let mut summary = SessionSummary::empty(name.clone());
        summary.total_bills = chamber_bills.len();

        // Scanning in reverse makes max_by/max_by_key return the first
        // maximum in store order.
        if let Some(latest) = chamber_bills.iter().rev().max_by_key(|b| b.created_at) {
            summary.latest_bill_created_id = non_empty(&latest.identifier);
            summary.latest_bill_created_date =
                Some(latest.created_at.format("%Y-%m-%d").to_string());
        }

        // Bills without actions never qualify for either lookup.
        let latest_action = chamber_bills
            .iter()
            .rev()
            .filter_map(|&bill| bill.latest_action().map(|action| (bill, action)))
            .max_by(|(_, a), (_, b)| a.date.cmp(&b.date));

        if let Some((bill, action)) = latest_action {
            summary.bill_with_latest_action_id = non_empty(&bill.identifier);
            summary.latest_action_date = non_empty(&action.date);
            summary.latest_action_description = non_empty(&action.description);
        }

        let earliest_action = chamber_bills
            .iter()
            .filter_map(|&bill| bill.earliest_action().map(|action| (bill, action)))
            .min_by(|(_, a), (_, b)| a.date.cmp(&b.date));

        if let Some((bill, action)) = earliest_action {
            summary.bill_with_earliest_action_id = non_empty(&bill.identifier);
            summary.earliest_action_date = non_empty(&action.date);
            summary.earliest_action_description = non_empty(&action.description);
        }

        debug!("{}: {} bill(s)", chamber, summary.total_bills);
        table.entry(name).or_default().push(summary);
    }

    table
}

/// Mean sponsorships, actions and votes per bill, per chamber.
///
/// A chamber without bills reports zero for every average.
pub fn averages(bills: &[Bill], chambers: &[Chamber]) -> ChamberTable<AverageSummary> {
    let mut table = ChamberTable::new();

    for chamber in chambers {
        let name = chamber.key();
        let chamber_bills = bills_from(bills, chamber);

        let sponsorships: Vec<usize> =
            chamber_bills.iter().map(|b| b.sponsorships.len()).collect();
        let actions: Vec<usize> = chamber_bills.iter().map(|b| b.actions.len()).collect();
        let votes: Vec<usize> = chamber_bills.iter().map(|b| b.votes.len()).collect();

        if chamber_bills.is_empty() {
            debug!("{}: no bills, averages default to zero", chamber);
        }

        table.entry(name.clone()).or_default().push(AverageSummary {
            chamber: name,
            average_sponsors_per_bill: rounded_mean(&sponsorships),
            average_actions_per_bill: rounded_mean(&actions),
            average_votes_per_bill: rounded_mean(&votes),
        });
    }

    table
}

/// Bills with no sources, and bills whose votes carry no sources, per chamber.
///
/// A bill without any votes counts toward `total_votes_no_sources`.
pub fn source_gaps(bills: &[Bill], chambers: &[Chamber]) -> ChamberTable<SourceGapSummary> {
    let mut table = ChamberTable::new();

    for chamber in chambers {
        let name = chamber.key();
        let chamber_bills = bills_from(bills, chamber);

        let total_bills_no_sources =
            chamber_bills.iter().filter(|b| b.sources.is_empty()).count();
        let total_votes_no_sources = chamber_bills
            .iter()
            .filter(|b| b.vote_source_count() == 0)
            .count();

        table.entry(name.clone()).or_default().push(SourceGapSummary {
            chamber: name,
            total_bills_no_sources,
            total_votes_no_sources,
        });
    }

    table
}

/// Distinct subjects session-wide and per chamber, plus bills missing a
/// subject. Subjects compare as exact, case-sensitive strings.
pub fn subject_coverage(
    bills: &[Bill],
    chambers: &[Chamber],
) -> ChamberTable<SubjectCoverageSummary> {
    let mut table = ChamberTable::new();
    let overall_number_of_subjects = distinct_subjects(bills.iter());

    for chamber in chambers {
        let name = chamber.key();
        let chamber_bills = bills_from(bills, chamber);

        let number_of_subjects = distinct_subjects(chamber_bills.iter().copied());
        let number_of_bills_without_subjects =
            chamber_bills.iter().filter(|b| b.subject.is_none()).count();

        table.entry(name.clone()).or_default().push(SubjectCoverageSummary {
            chamber: name,
            overall_number_of_subjects,
            number_of_subjects,
            number_of_bills_without_subjects,
        });
    }

    table
}

/// Blank text is reported the same as missing text.
fn non_empty(text: &str) -> Option<String> {
    Some(text).filter(|s| !s.is_empty()).map(String::from)
}

fn bills_from<'a>(bills: &'a [Bill], chamber: &Chamber) -> Vec<&'a Bill> {
    bills.iter().filter(|b| b.is_from(chamber)).collect()
}

fn distinct_subjects<'a>(bills: impl Iterator<Item = &'a Bill>) -> usize {
    bills
        .filter_map(|b| b.subject.as_deref())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Arithmetic mean rounded half-to-even; zero for an empty sample.
fn rounded_mean(counts: &[usize]) -> u64 {
    if counts.is_empty() {
        return 0;
    }

    let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
    mean.round_ties_even() as u64
}
