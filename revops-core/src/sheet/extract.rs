//! Row extraction: one sheet column → one `DailyRecord`.
//!
//! The row→field mapping lives in one explicit table. Changing the sheet
//! layout means editing `ROW_SCHEMA` and nothing else.

use super::SheetGrid;
use super::cell;
use crate::report::DailyRecord;
use crate::setter::Setter;

/// How a cell's text is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Int,
    Currency,
    Decimal,
}

/// Semantic destination of a source row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    TotalMeetingsScheduled,
    TotalMeetingsAttended,
    ReservationsHeld,
    ReservationsMade,
    Calls(Setter),
    Meetings(Setter),
    LeadsCreated,
    CallsMade,
    MeetingsScheduledTotal,
    CampaignSpend,
    CostPerLead,
}

/// The fixed row layout of the source sheet (zero-based row indices).
/// Every output field has exactly one source row.
pub const ROW_SCHEMA: &[(usize, Field, CellKind)] = &[
    (2, Field::TotalMeetingsScheduled, CellKind::Int),
    (3, Field::TotalMeetingsAttended, CellKind::Int),
    (4, Field::ReservationsHeld, CellKind::Int),
    (5, Field::ReservationsMade, CellKind::Int),
    (9, Field::Calls(Setter::Daniela), CellKind::Int),
    (10, Field::Meetings(Setter::Daniela), CellKind::Int),
    (11, Field::Calls(Setter::Teresa), CellKind::Int),
    (12, Field::Meetings(Setter::Teresa), CellKind::Int),
    (13, Field::Calls(Setter::Matias), CellKind::Int),
    (14, Field::Meetings(Setter::Matias), CellKind::Int),
    (15, Field::Calls(Setter::Robot), CellKind::Int),
    (16, Field::Meetings(Setter::Robot), CellKind::Int),
    (20, Field::LeadsCreated, CellKind::Int),
    (21, Field::CallsMade, CellKind::Int),
    (22, Field::MeetingsScheduledTotal, CellKind::Int),
    (23, Field::CampaignSpend, CellKind::Currency),
    (24, Field::CostPerLead, CellKind::Decimal),
];

enum CellValue {
    Int(i64),
    Decimal(f64),
}

impl CellKind {
    fn parse(self, text: &str) -> CellValue {
        match self {
            CellKind::Int => CellValue::Int(cell::parse_int(text)),
            CellKind::Currency => CellValue::Int(cell::parse_currency(text)),
            CellKind::Decimal => CellValue::Decimal(cell::parse_decimal(text)),
        }
    }
}

impl CellValue {
    fn as_int(&self) -> i64 {
        match *self {
            CellValue::Int(v) => v,
            CellValue::Decimal(v) => v as i64,
        }
    }

    fn as_decimal(&self) -> f64 {
        match *self {
            CellValue::Int(v) => v as f64,
            CellValue::Decimal(v) => v,
        }
    }
}

/// Build the record for one column.
///
/// A column whose date label is blank or does not parse is not a record;
/// this returns `None` rather than a zeroed day.
pub fn build_record(grid: &SheetGrid, col: usize) -> Option<DailyRecord> {
    let label = grid.date_label(col);
    if label.is_empty() {
        return None;
    }

    let date = cell::parse_date(label)?;
    let mut record = DailyRecord::empty(date);

    for &(row, field, kind) in ROW_SCHEMA {
        let value = kind.parse(grid.cell(row, col));
        apply(&mut record, field, &value);
    }

    Some(record)
}

fn apply(record: &mut DailyRecord, field: Field, value: &CellValue) {
    match field {
        Field::TotalMeetingsScheduled => record.totals.meetings_scheduled = value.as_int(),
        Field::TotalMeetingsAttended => record.totals.meetings_attended = value.as_int(),
        Field::ReservationsHeld => record.totals.reservations_held = value.as_int(),
        Field::ReservationsMade => record.totals.reservations_made = value.as_int(),
        Field::Calls(setter) => {
            record.setters.entry(setter).or_default().calls = value.as_int();
        }
        Field::Meetings(setter) => {
            // The sheet has no separate attended row; both fields come from
            // the meetings row. Populated by manual process, not by color.
            let row = record.setters.entry(setter).or_default();
            row.scheduled = value.as_int();
            row.attended = value.as_int();
        }
        Field::LeadsCreated => record.leads_created = value.as_int(),
        Field::CallsMade => record.calls_made = value.as_int(),
        Field::MeetingsScheduledTotal => record.meetings_scheduled_total = value.as_int(),
        Field::CampaignSpend => record.campaign_spend = value.as_int(),
        Field::CostPerLead => record.cost_per_lead = value.as_decimal(),
    }
}
