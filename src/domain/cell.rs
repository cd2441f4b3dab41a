use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::catalog::{ShiftCatalog, ShiftDefinition, ShiftType};

/// Category policy for multi-shift days. Operational assistants and
/// contracted nurses may only double up on Morning+Afternoon; everyone else
/// may take any type-distinct, non-overlapping combination, nights included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerCategory {
    Restricted,
    Unrestricted,
}

impl WorkerCategory {
    /// Maps the source system's category strings onto the policy split.
    pub fn from_category_code(category: &str) -> Self {
        if category == "ASSISTENTE_OPERACIONAL" || category.starts_with("CONTRATADO") {
            WorkerCategory::Restricted
        } else {
            WorkerCategory::Unrestricted
        }
    }
}

impl std::fmt::Display for WorkerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerCategory::Restricted => write!(f, "restricted"),
            WorkerCategory::Unrestricted => write!(f, "unrestricted"),
        }
    }
}

impl std::str::FromStr for WorkerCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "restricted" => Ok(WorkerCategory::Restricted),
            "unrestricted" => Ok(WorkerCategory::Unrestricted),
            _ => Err(format!("Invalid worker category: {}", s)),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellValidationError {
    #[error("Unknown shift code: {0}")]
    UnknownShiftCode(String),

    #[error("Cannot combine two shifts of type {0} on the same day")]
    DuplicateShiftType(ShiftType),

    #[error("Restricted categories may only combine a morning and an afternoon shift")]
    RestrictedCategoryViolation,

    #[error("Shifts {0} and {1} overlap on the same day")]
    OverlappingShifts(String, String),
}

impl CellValidationError {
    /// Stable machine-readable kind for API consumers.
    pub fn kind(&self) -> &'static str {
        match self {
            CellValidationError::UnknownShiftCode(_) => "UNKNOWN_SHIFT_CODE",
            CellValidationError::DuplicateShiftType(_) => "DUPLICATE_SHIFT_TYPE",
            CellValidationError::RestrictedCategoryViolation => "RESTRICTED_CATEGORY_VIOLATION",
            CellValidationError::OverlappingShifts(_, _) => "OVERLAPPING_SHIFTS",
        }
    }
}

fn intervals_overlap(a: &ShiftDefinition, b: &ShiftDefinition) -> bool {
    a.intervals().iter().any(|(start_a, end_a)| {
        b.intervals()
            .iter()
            .any(|(start_b, end_b)| start_a < end_b && start_b < end_a)
    })
}

/// Validates the set of shift codes proposed for one worker-day and returns
/// the canonical ordering to persist.
///
/// Pure and deterministic: the UI re-runs it on every edit and a server-side
/// re-validation must reach the same verdict. Validating an already accepted
/// ordering returns it unchanged.
pub fn validate_cell(
    catalog: &ShiftCatalog,
    category: WorkerCategory,
    codes: &[String],
) -> Result<Vec<String>, CellValidationError> {
    let mut unique: Vec<&str> = Vec::with_capacity(codes.len());
    for code in codes {
        if !unique.contains(&code.as_str()) {
            unique.push(code);
        }
    }

    // A single code (or an empty cell) is trivially valid.
    if unique.len() <= 1 {
        return Ok(unique.into_iter().map(String::from).collect());
    }

    let mut resolved: Vec<&ShiftDefinition> = Vec::with_capacity(unique.len());
    for code in &unique {
        match catalog.resolve(code) {
            Some(definition) => resolved.push(definition),
            None => return Err(CellValidationError::UnknownShiftCode(code.to_string())),
        }
    }

    let mut seen_types: Vec<ShiftType> = Vec::with_capacity(resolved.len());
    for definition in &resolved {
        if seen_types.contains(&definition.shift_type) {
            return Err(CellValidationError::DuplicateShiftType(
                definition.shift_type,
            ));
        }
        seen_types.push(definition.shift_type);
    }

    if category == WorkerCategory::Restricted {
        let morning_afternoon_only = seen_types.len() == 2
            && seen_types.contains(&ShiftType::Morning)
            && seen_types.contains(&ShiftType::Afternoon);
        if !morning_afternoon_only {
            return Err(CellValidationError::RestrictedCategoryViolation);
        }
    }

    for i in 0..resolved.len() {
        for j in (i + 1)..resolved.len() {
            if intervals_overlap(resolved[i], resolved[j]) {
                return Err(CellValidationError::OverlappingShifts(
                    resolved[i].code.clone(),
                    resolved[j].code.clone(),
                ));
            }
        }
    }

    resolved.sort_by(|a, b| {
        a.start_minute
            .cmp(&b.start_minute)
            .then_with(|| a.code.cmp(&b.code))
    });
    Ok(resolved
        .into_iter()
        .map(|definition| definition.code.clone())
        .collect())
}
