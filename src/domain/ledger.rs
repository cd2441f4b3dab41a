use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::catalog::ShiftCatalog;

/// Credit per worked holiday: 8 hours off the monthly obligation, since the
/// worker discharged that day by working the holiday instead.
pub const WORKED_HOLIDAY_CREDIT_MINUTES: i64 = 8 * 60;

/// Placeholder code for a mandatory rest day. Contributes no worked minutes
/// but is counted for reporting.
pub const REST_CODE: &str = "REST";

/// One worker-day cell of the stored schedule: up to three distinct shift
/// codes, already validated and canonically ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentEntry {
    pub worker_id: i64,
    pub day: u8,
    #[serde(default)]
    pub shift_codes: Vec<String>,
    #[serde(default)]
    pub locked: bool,
}

/// Coordinator-entered corrections for one worker-month. Never produced by
/// the solver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthAdjustment {
    pub worker_id: i64,
    #[serde(default)]
    pub worked_holiday_count: u32,
    #[serde(default)]
    pub extra_minutes: i64,
    #[serde(default)]
    pub reduced_minutes: i64,
}

/// The monthly hour reconciliation for one worker. `bank_minutes` is always
/// `previous_bank_minutes + delta_minutes`; it is recomputed, never stored on
/// its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyLedgerEntry {
    pub worker_id: i64,
    pub assigned_minutes: i64,
    pub target_minutes: i64,
    pub delta_minutes: i64,
    pub previous_bank_minutes: i64,
    pub bank_minutes: i64,
    pub rest_days: u32,
}

impl MonthlyLedgerEntry {
    /// Administrative override of the carried balance. Recomputes the bank
    /// from the unchanged delta; past months are never rewritten.
    pub fn set_previous_bank(&mut self, minutes: i64) {
        self.previous_bank_minutes = minutes;
        self.bank_minutes = minutes + self.delta_minutes;
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// An assignment references a shift code the catalog snapshot cannot
    /// resolve. The inputs are inconsistent; this is a caller bug, not a
    /// user-facing condition.
    #[error("Assignment references a shift code missing from the catalog: {0}")]
    Inconsistency(String),
}

/// Computes the month's hour statistics for one worker.
///
/// Total and side-effect-free: calling it again with the same inputs yields
/// the same entry, so the caller may recompute on every edit.
pub fn compute_stats(
    worker_id: i64,
    assignments: &[AssignmentEntry],
    adjustment: Option<&MonthAdjustment>,
    previous_bank_minutes: i64,
    target_minutes_base: i64,
    catalog: &ShiftCatalog,
) -> Result<MonthlyLedgerEntry, LedgerError> {
    let mut assigned_minutes: i64 = 0;
    let mut rest_days: u32 = 0;

    for entry in assignments.iter().filter(|e| e.worker_id == worker_id) {
        for code in &entry.shift_codes {
            if code == REST_CODE {
                rest_days += 1;
                continue;
            }
            let shift = catalog
                .resolve(code)
                .ok_or_else(|| LedgerError::Inconsistency(code.clone()))?;
            assigned_minutes += i64::from(shift.duration_minutes());
        }
    }

    let mut target_minutes = target_minutes_base;
    if let Some(adjustment) = adjustment {
        target_minutes -=
            WORKED_HOLIDAY_CREDIT_MINUTES * i64::from(adjustment.worked_holiday_count);
        target_minutes += adjustment.extra_minutes;
        target_minutes -= adjustment.reduced_minutes;
    }

    let delta_minutes = assigned_minutes - target_minutes;
    Ok(MonthlyLedgerEntry {
        worker_id,
        assigned_minutes,
        target_minutes,
        delta_minutes,
        previous_bank_minutes,
        bank_minutes: previous_bank_minutes + delta_minutes,
        rest_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{ShiftDefinition, ShiftType};
    use pretty_assertions::assert_eq;

    fn catalog() -> ShiftCatalog {
        ShiftCatalog::from_definitions([
            // 08:00-16:00
            ShiftDefinition::new("Piso 1", "M1", ShiftType::Morning, 480, 960),
            // 23:00-07:00, wraps midnight
            ShiftDefinition::new("Piso 1", "N1", ShiftType::Night, 1380, 420),
        ])
        .unwrap()
    }

    fn entry(worker_id: i64, day: u8, codes: &[&str]) -> AssignmentEntry {
        AssignmentEntry {
            worker_id,
            day,
            shift_codes: codes.iter().map(|s| s.to_string()).collect(),
            locked: false,
        }
    }

    #[test]
    fn sums_durations_with_midnight_wrap() {
        let assignments = vec![entry(1, 1, &["M1"]), entry(1, 2, &["N1"])];
        let stats = compute_stats(1, &assignments, None, 0, 0, &catalog()).unwrap();
        assert_eq!(stats.assigned_minutes, 480 + 480);
        assert_eq!(stats.rest_days, 0);
    }

    #[test]
    fn rest_placeholder_counts_days_but_no_minutes() {
        let assignments = vec![entry(1, 1, &["REST"]), entry(1, 2, &["M1"])];
        let stats = compute_stats(1, &assignments, None, 0, 0, &catalog()).unwrap();
        assert_eq!(stats.assigned_minutes, 480);
        assert_eq!(stats.rest_days, 1);
    }

    #[test]
    fn other_workers_entries_are_ignored() {
        let assignments = vec![entry(1, 1, &["M1"]), entry(2, 1, &["M1"])];
        let stats = compute_stats(1, &assignments, None, 0, 0, &catalog()).unwrap();
        assert_eq!(stats.assigned_minutes, 480);
    }

    #[test]
    fn worked_holiday_reduces_the_target() {
        // 160h assigned against a 160h base with one worked holiday.
        let assignments: Vec<AssignmentEntry> =
            (1..=20).map(|day| entry(1, day, &["M1"])).collect();
        let adjustment = MonthAdjustment {
            worker_id: 1,
            worked_holiday_count: 1,
            extra_minutes: 0,
            reduced_minutes: 0,
        };
        let stats =
            compute_stats(1, &assignments, Some(&adjustment), 0, 9600, &catalog()).unwrap();
        assert_eq!(stats.assigned_minutes, 9600);
        assert_eq!(stats.target_minutes, 9120);
        assert_eq!(stats.delta_minutes, 480);
        assert_eq!(stats.bank_minutes, 480);
    }

    #[test]
    fn manual_adjustments_move_the_target() {
        let adjustment = MonthAdjustment {
            worker_id: 1,
            worked_holiday_count: 0,
            extra_minutes: 120,
            reduced_minutes: 30,
        };
        let stats = compute_stats(1, &[], Some(&adjustment), 0, 9600, &catalog()).unwrap();
        assert_eq!(stats.target_minutes, 9600 + 120 - 30);
        assert_eq!(stats.delta_minutes, -stats.target_minutes);
    }

    #[test]
    fn bank_conserves_across_recomputation() {
        let assignments = vec![entry(1, 1, &["M1"])];
        let first = compute_stats(1, &assignments, None, -240, 600, &catalog()).unwrap();
        let second = compute_stats(1, &assignments, None, -240, 600, &catalog()).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.bank_minutes,
            first.previous_bank_minutes + first.assigned_minutes - first.target_minutes
        );
    }

    #[test]
    fn unknown_code_is_an_inconsistency() {
        let assignments = vec![entry(1, 1, &["GONE"])];
        assert_eq!(
            compute_stats(1, &assignments, None, 0, 0, &catalog()),
            Err(LedgerError::Inconsistency("GONE".to_string()))
        );
    }

    #[test]
    fn previous_bank_override_recomputes_the_bank_only() {
        let assignments = vec![entry(1, 1, &["M1"])];
        let mut stats = compute_stats(1, &assignments, None, 0, 600, &catalog()).unwrap();
        let delta = stats.delta_minutes;
        stats.set_previous_bank(1000);
        assert_eq!(stats.delta_minutes, delta);
        assert_eq!(stats.bank_minutes, 1000 + delta);
    }
}
