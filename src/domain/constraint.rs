use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::catalog::ShiftType;

/// `^(I)?([A-Z]+)$` — optional "indisponível" prefix, then the shift letters.
static COMBO_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(I)?([A-Z]+)$").expect("combo pattern compiles"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unrecognized constraint shorthand: {input}")]
pub struct ParseFailure {
    pub input: String,
}

/// Order-independent subset of the four shift letters, always rendered in
/// the canonical M, T, L, N order. May be empty (bare availability marker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShiftLetters(u8);

impl ShiftLetters {
    pub const EMPTY: ShiftLetters = ShiftLetters(0);

    fn bit(shift_type: ShiftType) -> u8 {
        match shift_type {
            ShiftType::Morning => 0b0001,
            ShiftType::Afternoon => 0b0010,
            ShiftType::Rest => 0b0100,
            ShiftType::Night => 0b1000,
        }
    }

    pub fn insert(&mut self, shift_type: ShiftType) {
        self.0 |= Self::bit(shift_type);
    }

    pub fn contains(&self, shift_type: ShiftType) -> bool {
        self.0 & Self::bit(shift_type) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = ShiftType> + '_ {
        ShiftType::ALL
            .into_iter()
            .filter(move |shift_type| self.contains(*shift_type))
    }

    /// Letters in canonical order, e.g. "MT" or "MLN".
    pub fn letters(&self) -> String {
        self.iter().map(|shift_type| shift_type.letter()).collect()
    }

    /// Keeps only letters from the {M,T,L,N} alphabet; `None` when any
    /// other character is present.
    fn from_letters(raw: &str) -> Option<Self> {
        let mut letters = ShiftLetters::EMPTY;
        for letter in raw.chars() {
            letters.insert(ShiftType::from_letter(letter)?);
        }
        Some(letters)
    }
}

impl std::fmt::Display for ShiftLetters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letters())
    }
}

/// The canonical availability / leave marker for one worker-day. Only the
/// parser constructs these; everything downstream stores and compares the
/// canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintCode {
    Vacation,
    Dispensation,
    Holiday,
    WorkedHoliday,
    DayOffRequest,
    RestRequest,
    RestOrDayOff,
    Available(ShiftLetters),
    Unavailable(ShiftLetters),
}

impl ConstraintCode {
    /// Canonical storage form ("FERIAS", "DISPONIVEL_MT", ...), matching
    /// the vocabulary the persistence collaborator already holds.
    pub fn canonical(&self) -> String {
        match self {
            ConstraintCode::Vacation => "FERIAS".to_string(),
            ConstraintCode::Dispensation => "DISPENSA".to_string(),
            ConstraintCode::Holiday => "FERIADO".to_string(),
            ConstraintCode::WorkedHoliday => "FERIADO_TRAB".to_string(),
            ConstraintCode::DayOffRequest => "PEDIDO_FOLGA".to_string(),
            ConstraintCode::RestRequest => "PEDIDO_DESCANSO".to_string(),
            ConstraintCode::RestOrDayOff => "PEDIDO_DESCANSO_FOLGA".to_string(),
            ConstraintCode::Available(letters) if letters.is_empty() => "DISPONIVEL".to_string(),
            ConstraintCode::Available(letters) => format!("DISPONIVEL_{}", letters),
            ConstraintCode::Unavailable(letters) if letters.is_empty() => {
                "INDISPONIVEL".to_string()
            }
            ConstraintCode::Unavailable(letters) => format!("INDISPONIVEL_{}", letters),
        }
    }

    /// The short form shown in (and accepted back from) schedule cells.
    pub fn to_shorthand(&self) -> String {
        match self {
            ConstraintCode::Vacation => "FERIAS".to_string(),
            ConstraintCode::Dispensation => "DS".to_string(),
            ConstraintCode::Holiday => "FER".to_string(),
            ConstraintCode::WorkedHoliday => "FT".to_string(),
            ConstraintCode::DayOffRequest => "F".to_string(),
            ConstraintCode::RestRequest => "D".to_string(),
            ConstraintCode::RestOrDayOff => "D/F".to_string(),
            ConstraintCode::Available(letters) if letters.is_empty() => "V".to_string(),
            ConstraintCode::Available(letters) => letters.letters(),
            ConstraintCode::Unavailable(letters) if letters.is_empty() => "I".to_string(),
            ConstraintCode::Unavailable(letters) => format!("I{}", letters),
        }
    }

    /// Human description, as the coordinator UI presents it.
    pub fn label(&self) -> String {
        match self {
            ConstraintCode::Vacation => "Férias (bloqueia)".to_string(),
            ConstraintCode::Dispensation => "Dispensa / DS".to_string(),
            ConstraintCode::Holiday => "Feriado".to_string(),
            ConstraintCode::WorkedHoliday => "Feriado trabalhado".to_string(),
            ConstraintCode::DayOffRequest => "Pedido de folga".to_string(),
            ConstraintCode::RestRequest => "Pedido descanso".to_string(),
            ConstraintCode::RestOrDayOff => "Descanso ou folga".to_string(),
            ConstraintCode::Available(letters) if letters.is_empty() => {
                "Disponível (parcial)".to_string()
            }
            ConstraintCode::Available(letters) => format!("Disponível ({})", letters),
            ConstraintCode::Unavailable(letters) if letters.is_empty() => {
                "Indisponível".to_string()
            }
            ConstraintCode::Unavailable(letters) => format!("Indisponível ({})", letters),
        }
    }
}

impl std::fmt::Display for ConstraintCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl std::str::FromStr for ConstraintCode {
    type Err = ParseFailure;

    /// Parses the canonical storage form only; free text goes through
    /// [`parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let failure = || ParseFailure {
            input: s.to_string(),
        };
        match s {
            "FERIAS" => Ok(ConstraintCode::Vacation),
            "DISPENSA" => Ok(ConstraintCode::Dispensation),
            "FERIADO" => Ok(ConstraintCode::Holiday),
            "FERIADO_TRAB" => Ok(ConstraintCode::WorkedHoliday),
            "PEDIDO_FOLGA" => Ok(ConstraintCode::DayOffRequest),
            "PEDIDO_DESCANSO" => Ok(ConstraintCode::RestRequest),
            "PEDIDO_DESCANSO_FOLGA" => Ok(ConstraintCode::RestOrDayOff),
            "DISPONIVEL" => Ok(ConstraintCode::Available(ShiftLetters::EMPTY)),
            "INDISPONIVEL" => Ok(ConstraintCode::Unavailable(ShiftLetters::EMPTY)),
            _ => {
                if let Some(letters) = s.strip_prefix("DISPONIVEL_") {
                    let letters = ShiftLetters::from_letters(letters).ok_or_else(failure)?;
                    if letters.is_empty() {
                        return Err(failure());
                    }
                    Ok(ConstraintCode::Available(letters))
                } else if let Some(letters) = s.strip_prefix("INDISPONIVEL_") {
                    let letters = ShiftLetters::from_letters(letters).ok_or_else(failure)?;
                    if letters.is_empty() {
                        return Err(failure());
                    }
                    Ok(ConstraintCode::Unavailable(letters))
                } else {
                    Err(failure())
                }
            }
        }
    }
}

impl Serialize for ConstraintCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> Deserialize<'de> for ConstraintCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Folds the accented characters the constraint vocabulary uses, so that
/// "Férias" and "FERIAS" normalize identically.
fn fold_diacritic(c: char) -> char {
    match c {
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ç' => 'C',
        other => other,
    }
}

fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .map(fold_diacritic)
        .collect()
}

/// Parses coordinator free text into a canonical constraint code.
///
/// `Ok(None)` means "no constraint" (blank input); `Err` means the text is
/// not part of the vocabulary and the field should be flagged, nothing more.
pub fn parse(raw: &str) -> Result<Option<ConstraintCode>, ParseFailure> {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return Ok(None);
    }

    if let Some(code) = lookup_alias(&normalized) {
        return Ok(Some(code));
    }

    // Stored canonical forms re-parse as themselves.
    if let Ok(code) = normalized.parse::<ConstraintCode>() {
        return Ok(Some(code));
    }

    let failure = || ParseFailure {
        input: raw.to_string(),
    };

    let captures = COMBO_PATTERN.captures(&normalized).ok_or_else(failure)?;
    let unavailable = captures.get(1).is_some();
    // Trailing plural "S" is tolerated ("Ls", "TLs"); S is not a shift letter
    // so stripping every S only ever removes the informal plural.
    let letters_raw: String = captures[2].chars().filter(|c| *c != 'S').collect();
    if letters_raw.is_empty() {
        return Err(failure());
    }
    let letters = ShiftLetters::from_letters(&letters_raw).ok_or_else(failure)?;
    if unavailable {
        Ok(Some(ConstraintCode::Unavailable(letters)))
    } else {
        Ok(Some(ConstraintCode::Available(letters)))
    }
}

fn lookup_alias(normalized: &str) -> Option<ConstraintCode> {
    let code = match normalized {
        "FERIAS" => ConstraintCode::Vacation,
        "FER" | "FERIADO" => ConstraintCode::Holiday,
        "FT" => ConstraintCode::WorkedHoliday,
        "DS" | "DESCANSO" | "DISPENSA" => ConstraintCode::Dispensation,
        "V" | "DISP" => ConstraintCode::Available(ShiftLetters::EMPTY),
        "I" | "INDISP" => ConstraintCode::Unavailable(ShiftLetters::EMPTY),
        "P" | "F" => ConstraintCode::DayOffRequest,
        "D" => ConstraintCode::RestRequest,
        "DF" | "D/F" => ConstraintCode::RestOrDayOff,
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn letters(raw: &str) -> ShiftLetters {
        ShiftLetters::from_letters(raw).unwrap()
    }

    #[test]
    fn blank_input_is_no_constraint() {
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn aliases_map_to_canonical_codes() {
        assert_eq!(parse("fer"), Ok(Some(ConstraintCode::Holiday)));
        assert_eq!(parse("FERIAS"), Ok(Some(ConstraintCode::Vacation)));
        assert_eq!(parse("Férias"), Ok(Some(ConstraintCode::Vacation)));
        assert_eq!(parse("ds"), Ok(Some(ConstraintCode::Dispensation)));
        assert_eq!(parse("d/f"), Ok(Some(ConstraintCode::RestOrDayOff)));
        assert_eq!(parse("p"), Ok(Some(ConstraintCode::DayOffRequest)));
        assert_eq!(
            parse("v"),
            Ok(Some(ConstraintCode::Available(ShiftLetters::EMPTY)))
        );
    }

    #[test]
    fn combo_letters_are_deduplicated_and_reordered() {
        assert_eq!(
            parse("mt"),
            Ok(Some(ConstraintCode::Available(letters("MT"))))
        );
        assert_eq!(
            parse("imn"),
            Ok(Some(ConstraintCode::Unavailable(letters("MN"))))
        );
        assert_eq!(
            parse("nmm"),
            Ok(Some(ConstraintCode::Available(letters("MN"))))
        );
        // Canonical order is M,T,L,N regardless of input order.
        assert_eq!(parse("nm").unwrap().unwrap().canonical(), "DISPONIVEL_MN");
    }

    #[test]
    fn informal_plurals_are_tolerated() {
        assert_eq!(
            parse("Ls"),
            Ok(Some(ConstraintCode::Available(letters("L"))))
        );
        assert_eq!(
            parse("TLs"),
            Ok(Some(ConstraintCode::Available(letters("TL"))))
        );
        assert_eq!(
            parse("iTLs"),
            Ok(Some(ConstraintCode::Unavailable(letters("TL"))))
        );
    }

    #[test]
    fn junk_is_a_parse_failure() {
        assert!(parse("xyz123").is_err());
        assert!(parse("MX").is_err());
        assert!(parse("is").is_err()); // plural strip leaves nothing
    }

    #[test]
    fn canonical_forms_reparse() {
        for canonical in [
            "FERIAS",
            "DISPENSA",
            "FERIADO",
            "FERIADO_TRAB",
            "PEDIDO_FOLGA",
            "PEDIDO_DESCANSO",
            "PEDIDO_DESCANSO_FOLGA",
            "DISPONIVEL",
            "INDISPONIVEL",
            "DISPONIVEL_MT",
            "INDISPONIVEL_MTLN",
        ] {
            let code = parse(canonical).unwrap().unwrap();
            assert_eq!(code.canonical(), canonical);
        }
    }

    #[test]
    fn shorthand_round_trips_over_the_whole_vocabulary() {
        let mut codes = vec![
            ConstraintCode::Vacation,
            ConstraintCode::Dispensation,
            ConstraintCode::Holiday,
            ConstraintCode::WorkedHoliday,
            ConstraintCode::DayOffRequest,
            ConstraintCode::RestRequest,
            ConstraintCode::RestOrDayOff,
            ConstraintCode::Available(ShiftLetters::EMPTY),
            ConstraintCode::Unavailable(ShiftLetters::EMPTY),
        ];
        // Every non-empty subset the combo grammar can produce.
        for bits in 1u8..16 {
            let mut subset = ShiftLetters::EMPTY;
            for shift_type in ShiftType::ALL {
                if bits & ShiftLetters::bit(shift_type) != 0 {
                    subset.insert(shift_type);
                }
            }
            codes.push(ConstraintCode::Available(subset));
            codes.push(ConstraintCode::Unavailable(subset));
        }

        for code in codes {
            assert_eq!(parse(&code.to_shorthand()), Ok(Some(code)));
        }
    }
}
