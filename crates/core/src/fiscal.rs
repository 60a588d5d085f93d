//! Fiscal period calendar and volume allocation logic.
//!
//! The planning year is divided into 13 fixed four-week periods. An annual
//! opportunity's estimated volume is spread evenly by day across the year and
//! summed per period, with the first and last periods pro-rated against the
//! opportunity's actual start and end dates.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::opportunity::OpportunityType;

// ---------------------------------------------------------------------------
// Fiscal calendar constants
// ---------------------------------------------------------------------------

/// Total days covered by the 13 fiscal periods (13 x 28).
pub const FISCAL_YEAR_DAYS: f64 = 364.0;

/// Date format used by the period window literals.
const WINDOW_FORMAT: &str = "%d-%m-%Y";

/// One fixed fiscal period window.
///
/// Start/end are stored as `DD-MM-YYYY` literals, matching the planning
/// calendar as published; [`FiscalPeriod::window`] resolves them to dates.
#[derive(Debug, Clone, Copy)]
pub struct FiscalPeriod {
    pub key: &'static str,
    pub start: &'static str,
    pub end: &'static str,
}

/// The 13 periods of the current planning year.
pub const FISCAL_PERIODS: [FiscalPeriod; 13] = [
    FiscalPeriod { key: "P1", start: "23-03-2025", end: "19-04-2025" },
    FiscalPeriod { key: "P2", start: "20-04-2025", end: "17-05-2025" },
    FiscalPeriod { key: "P3", start: "18-05-2025", end: "14-06-2025" },
    FiscalPeriod { key: "P4", start: "15-06-2025", end: "12-07-2025" },
    FiscalPeriod { key: "P5", start: "13-07-2025", end: "09-08-2025" },
    FiscalPeriod { key: "P6", start: "10-08-2025", end: "06-09-2025" },
    FiscalPeriod { key: "P7", start: "07-09-2025", end: "04-10-2025" },
    FiscalPeriod { key: "P8", start: "05-10-2025", end: "01-11-2025" },
    FiscalPeriod { key: "P9", start: "02-11-2025", end: "29-11-2025" },
    FiscalPeriod { key: "P10", start: "30-11-2025", end: "27-12-2025" },
    FiscalPeriod { key: "P11", start: "28-12-2025", end: "24-01-2026" },
    FiscalPeriod { key: "P12", start: "25-01-2026", end: "21-02-2026" },
    FiscalPeriod { key: "P13", start: "22-02-2026", end: "21-03-2026" },
];

impl FiscalPeriod {
    /// Resolve the window literals to an inclusive date range.
    ///
    /// Returns `None` when either literal does not parse; the allocator
    /// reports such a period as [`PeriodVolume::Unresolved`].
    pub fn window(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::parse_from_str(self.start, WINDOW_FORMAT).ok()?;
        let end = NaiveDate::parse_from_str(self.end, WINDOW_FORMAT).ok()?;
        Some((start, end))
    }
}

// ---------------------------------------------------------------------------
// Allocation result
// ---------------------------------------------------------------------------

/// Volume assigned to one fiscal period.
///
/// `Unresolved` serializes as the string `"-"`, the sentinel the dashboard
/// renders for a period whose window could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodVolume {
    Allocated(i64),
    Unresolved,
}

impl Serialize for PeriodVolume {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PeriodVolume::Allocated(v) => serializer.serialize_i64(*v),
            PeriodVolume::Unresolved => serializer.serialize_str("-"),
        }
    }
}

// ---------------------------------------------------------------------------
// Allocation logic
// ---------------------------------------------------------------------------

/// Distribute an annual opportunity's estimated volume across the 13 periods.
///
/// The total is spread evenly over the 364-day fiscal year and summed per
/// period by inclusive active-day count. The first period is pro-rated from
/// `likely_start` when it falls inside that window, and the last period is
/// pro-rated to `end_date` when it falls inside that window.
///
/// Returns an empty map when `total_volume` is zero/negative or the
/// opportunity is not annual: short-term opportunities are not spread across
/// the planning year.
pub fn allocate_volume(
    total_volume: f64,
    opportunity_type: Option<OpportunityType>,
    likely_start: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> IndexMap<&'static str, PeriodVolume> {
    let mut result = IndexMap::new();

    if total_volume <= 0.0 || opportunity_type != Some(OpportunityType::Annual) {
        return result;
    }

    let daily_volume = total_volume / FISCAL_YEAR_DAYS;
    let last = FISCAL_PERIODS.len() - 1;

    for (i, period) in FISCAL_PERIODS.iter().enumerate() {
        let Some((start, end)) = period.window() else {
            result.insert(period.key, PeriodVolume::Unresolved);
            continue;
        };

        let mut active_days = (end - start).num_days() + 1;

        // First period: count only from the opportunity's start date.
        if i == 0 {
            if let Some(likely) = likely_start {
                if likely >= start && likely <= end {
                    active_days = (end - likely).num_days() + 1;
                }
            }
        }

        // Last period: count only up to the opportunity's end date.
        if i == last {
            if let Some(until) = end_date {
                if until >= start && until <= end {
                    active_days = (until - start).num_days() + 1;
                }
            }
        }

        let allocated = (daily_volume * active_days as f64).round() as i64;
        result.insert(period.key, PeriodVolume::Allocated(allocated));
    }

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
