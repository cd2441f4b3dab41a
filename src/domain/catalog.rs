use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Tag describing which slot of the day a shift covers. A tag, not an
/// ordering: two shifts with the same tag never share a worker-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftType {
    #[serde(rename = "M")]
    Morning,
    #[serde(rename = "T")]
    Afternoon,
    #[serde(rename = "L")]
    Rest,
    #[serde(rename = "N")]
    Night,
}

impl ShiftType {
    pub const ALL: [ShiftType; 4] = [
        ShiftType::Morning,
        ShiftType::Afternoon,
        ShiftType::Rest,
        ShiftType::Night,
    ];

    pub fn letter(&self) -> char {
        match self {
            ShiftType::Morning => 'M',
            ShiftType::Afternoon => 'T',
            ShiftType::Rest => 'L',
            ShiftType::Night => 'N',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'M' => Some(ShiftType::Morning),
            'T' => Some(ShiftType::Afternoon),
            'L' => Some(ShiftType::Rest),
            'N' => Some(ShiftType::Night),
            _ => None,
        }
    }
}

impl std::fmt::Display for ShiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl std::str::FromStr for ShiftType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => ShiftType::from_letter(letter.to_ascii_uppercase())
                .ok_or_else(|| format!("Invalid shift type: {}", s)),
            _ => Err(format!("Invalid shift type: {}", s)),
        }
    }
}

/// One entry of the shift catalog. Times are minutes since midnight;
/// `end_minute <= start_minute` means the shift runs past midnight into
/// the following day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDefinition {
    pub code: String,
    pub shift_type: ShiftType,
    pub start_minute: u16,
    pub end_minute: u16,
    pub service: String,
}

impl ShiftDefinition {
    pub fn new(
        service: &str,
        code: &str,
        shift_type: ShiftType,
        start_minute: u16,
        end_minute: u16,
    ) -> Self {
        Self {
            code: code.to_string(),
            shift_type,
            start_minute,
            end_minute,
            service: service.to_string(),
        }
    }

    pub fn wraps_midnight(&self) -> bool {
        self.end_minute <= self.start_minute
    }

    /// Worked duration in minutes, midnight wrap included.
    pub fn duration_minutes(&self) -> u16 {
        if self.end_minute > self.start_minute {
            self.end_minute - self.start_minute
        } else {
            MINUTES_PER_DAY - self.start_minute + self.end_minute
        }
    }

    /// Time-of-day intervals covered by the shift, half-open. A wrapping
    /// shift splits into an evening and a morning piece; comparing the raw
    /// window instead gets the overlap check wrong.
    pub fn intervals(&self) -> Vec<(u16, u16)> {
        if self.end_minute > self.start_minute {
            vec![(self.start_minute, self.end_minute)]
        } else {
            vec![(self.start_minute, MINUTES_PER_DAY), (0, self.end_minute)]
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Shift definition has an empty code")]
    EmptyCode,

    #[error("Duplicate shift code in catalog: {0}")]
    DuplicateCode(String),

    #[error("Shift {code} has an out-of-range minute (start {start_minute}, end {end_minute})")]
    InvalidWindow {
        code: String,
        start_minute: u16,
        end_minute: u16,
    },
}

/// Immutable code-to-definition index. Built once per catalog snapshot and
/// never mutated in place; callers that need a newer catalog build a new one.
#[derive(Debug, Clone, Default)]
pub struct ShiftCatalog {
    shifts: HashMap<String, ShiftDefinition>,
}

impl ShiftCatalog {
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ShiftDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut shifts = HashMap::new();
        for definition in definitions {
            if definition.code.is_empty() {
                return Err(CatalogError::EmptyCode);
            }
            if definition.start_minute >= MINUTES_PER_DAY
                || definition.end_minute >= MINUTES_PER_DAY
            {
                return Err(CatalogError::InvalidWindow {
                    code: definition.code,
                    start_minute: definition.start_minute,
                    end_minute: definition.end_minute,
                });
            }
            if let Some(previous) = shifts.insert(definition.code.clone(), definition) {
                return Err(CatalogError::DuplicateCode(previous.code));
            }
        }
        Ok(Self { shifts })
    }

    pub fn resolve(&self, code: &str) -> Option<&ShiftDefinition> {
        self.shifts.get(code)
    }

    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    /// Definitions sorted by service then code, for stable listings.
    pub fn definitions(&self) -> Vec<ShiftDefinition> {
        let mut definitions: Vec<_> = self.shifts.values().cloned().collect();
        definitions.sort_by(|a, b| (&a.service, &a.code).cmp(&(&b.service, &b.code)));
        definitions
    }

    /// The service catalog the source system ships with, used to seed the
    /// store until an administrator uploads a replacement.
    pub fn default_catalog() -> Self {
        use ShiftType::*;

        let defs = [
            ShiftDefinition::new("SAP", "Ms", Morning, 8 * 60, 14 * 60),
            ShiftDefinition::new("SAP", "Ts", Afternoon, 14 * 60, 20 * 60),
            ShiftDefinition::new("SAP", "Ls", Rest, 20 * 60, 0),
            ShiftDefinition::new("SAP", "TLs", Rest, 14 * 60, 0),
            ShiftDefinition::new("Análises", "Ma", Morning, 450, 720),
            ShiftDefinition::new("Consulta Externa", "Me", Morning, 8 * 60, 14 * 60),
            ShiftDefinition::new("Consulta Externa", "Te", Afternoon, 14 * 60, 20 * 60),
            ShiftDefinition::new("Pequenas Cirurgias", "Mp", Morning, 8 * 60, 14 * 60),
            ShiftDefinition::new("Pequenas Cirurgias", "Tp", Afternoon, 14 * 60, 20 * 60),
            ShiftDefinition::new("Gastroenterologia", "Mg", Morning, 8 * 60, 14 * 60),
            ShiftDefinition::new("Gastroenterologia", "Tg", Afternoon, 14 * 60, 20 * 60),
            ShiftDefinition::new("Piso 1", "M1", Morning, 8 * 60, 14 * 60),
            ShiftDefinition::new("Piso 1", "T1", Afternoon, 14 * 60, 20 * 60),
            ShiftDefinition::new("Piso 1", "N1", Night, 20 * 60, 8 * 60),
            ShiftDefinition::new("Piso 3", "M3", Morning, 8 * 60, 14 * 60),
            ShiftDefinition::new("Piso 3", "T3", Afternoon, 14 * 60, 20 * 60),
            ShiftDefinition::new("Piso 3", "N3", Night, 20 * 60, 8 * 60),
            ShiftDefinition::new("Reforço", "MR", Morning, 10 * 60, 16 * 60),
            ShiftDefinition::new("Reforço", "MR2", Morning, 10 * 60, 16 * 60),
            ShiftDefinition::new("Reforço", "NR", Night, 20 * 60, 8 * 60),
        ];

        // The defaults are well-formed by construction.
        Self::from_definitions(defs).expect("default catalog is valid")
    }
}
