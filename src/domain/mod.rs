pub mod catalog;
pub mod cell;
pub mod constraint;
pub mod ledger;

pub use catalog::{CatalogError, ShiftCatalog, ShiftDefinition, ShiftType, MINUTES_PER_DAY};
pub use cell::{validate_cell, CellValidationError, WorkerCategory};
pub use constraint::{parse, ConstraintCode, ParseFailure, ShiftLetters};
pub use ledger::{
    compute_stats, AssignmentEntry, LedgerError, MonthAdjustment, MonthlyLedgerEntry, REST_CODE,
    WORKED_HOLIDAY_CREDIT_MINUTES,
};
