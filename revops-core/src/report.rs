//! Reconciled output records and consolidation.
//!
//! Two shapes leave this system: `ConsolidatedOutput` (the full historical
//! series built from the sheet) and `ExtractSnapshot` (the ad-hoc record a
//! same-day extraction run produces from live calendar and CRM data). Both
//! are plain serde documents.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::classify::{DayMetrics, SetterDailyMetrics};
use crate::error::{RevopsError, RevopsResult};
use crate::setter::Setter;

/// One setter's row in a daily record.
///
/// `attended` is populated from the same source row as `scheduled` when the
/// record comes from the sheet; the two are kept as separate fields and
/// nothing downstream assumes they are equal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetterRow {
    pub scheduled: i64,
    pub attended: i64,
    pub calls: i64,
}

/// Aggregate totals for one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTotals {
    pub meetings_scheduled: i64,
    pub meetings_attended: i64,
    pub reservations_held: i64,
    pub reservations_made: i64,
}

/// One reconciled day. Always fully shaped: numeric fields default to zero,
/// never null, and every setter is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub leads_created: i64,
    pub calls_made: i64,
    pub meetings_scheduled_total: i64,
    pub campaign_spend: i64,
    pub cost_per_lead: f64,
    pub setters: BTreeMap<Setter, SetterRow>,
    pub totals: DayTotals,
}

impl DailyRecord {
    /// A zero-valued record for `date` with every setter present.
    pub fn empty(date: NaiveDate) -> Self {
        let setters = Setter::ALL
            .iter()
            .map(|&s| (s, SetterRow::default()))
            .collect();

        DailyRecord {
            date,
            leads_created: 0,
            calls_made: 0,
            meetings_scheduled_total: 0,
            campaign_spend: 0,
            cost_per_lead: 0.0,
            setters,
            totals: DayTotals::default(),
        }
    }
}

/// The top-level artifact: the full historical series, chronological, one
/// entry per valid date column. Gaps are not filled; absent columns are
/// simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedOutput {
    pub generated_at: String,
    pub last_data_date: NaiveDate,
    pub day_count: usize,
    pub days: Vec<DailyRecord>,
}

impl ConsolidatedOutput {
    /// Wrap a series of daily records. An empty series is a structural
    /// failure: there is nothing sensible to consolidate.
    pub fn build(days: Vec<DailyRecord>, generated_at: String) -> RevopsResult<Self> {
        let last = days.last().ok_or(RevopsError::NoDataColumns)?;

        Ok(ConsolidatedOutput {
            generated_at,
            last_data_date: last.date,
            day_count: days.len(),
            days,
        })
    }

    pub fn to_json(&self) -> RevopsResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RevopsError::Serialization(e.to_string()))
    }

    pub fn from_json(content: &str) -> RevopsResult<Self> {
        serde_json::from_str(content).map_err(|e| RevopsError::Serialization(e.to_string()))
    }
}

/// The ad-hoc record of a same-day extraction run: live calendar metrics
/// merged with the externally supplied lead count. Field-wise union; the
/// lead count being unavailable (CRM pipeline failed) degrades to zero
/// rather than dropping the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractSnapshot {
    pub date: NaiveDate,
    pub leads_created: i64,
    pub meetings_scheduled: u32,
    pub meetings_attended: u32,
    pub meetings: BTreeMap<Setter, SetterDailyMetrics>,
}

impl ExtractSnapshot {
    pub fn build(metrics: &DayMetrics, leads_created: Option<i64>) -> Self {
        ExtractSnapshot {
            date: metrics.date,
            leads_created: leads_created.unwrap_or(0),
            meetings_scheduled: metrics.total_scheduled(),
            meetings_attended: metrics.total_attended(),
            meetings: metrics.setters.clone(),
        }
    }

    pub fn to_json(&self) -> RevopsResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RevopsError::Serialization(e.to_string()))
    }
}
