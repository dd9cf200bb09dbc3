//! Voter attribute vocabulary.
//!
//! The single source of wire codes and display labels for class levels,
//! academic tracks, extracurricular activities and sports. Administrator and
//! voter views both render from here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Year of study. Ordered from first-year licence to second-year master.
///
/// Serialized as its ordinal (`1..=5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ClassLevel {
    L1,
    L2,
    L3,
    M1,
    M2,
}

impl ClassLevel {
    pub const ALL: [ClassLevel; 5] = [
        ClassLevel::L1,
        ClassLevel::L2,
        ClassLevel::L3,
        ClassLevel::M1,
        ClassLevel::M2,
    ];

    /// Ordinal used on the wire (1 = L1 ... 5 = M2).
    pub fn ordinal(&self) -> u8 {
        match self {
            ClassLevel::L1 => 1,
            ClassLevel::L2 => 2,
            ClassLevel::L3 => 3,
            ClassLevel::M1 => 4,
            ClassLevel::M2 => 5,
        }
    }

    /// Looks up a level from its ordinal.
    pub fn from_ordinal(ordinal: u8) -> Result<Self, ValidationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.ordinal() == ordinal)
            .ok_or_else(|| ValidationError::out_of_range("class_level", 1, 5, ordinal as i64))
    }

    pub fn code(&self) -> &'static str {
        match self {
            ClassLevel::L1 => "L1",
            ClassLevel::L2 => "L2",
            ClassLevel::L3 => "L3",
            ClassLevel::M1 => "M1",
            ClassLevel::M2 => "M2",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClassLevel::L1 => "Licence 1",
            ClassLevel::L2 => "Licence 2",
            ClassLevel::L3 => "Licence 3",
            ClassLevel::M1 => "Master 1",
            ClassLevel::M2 => "Master 2",
        }
    }
}

impl TryFrom<u8> for ClassLevel {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_ordinal(value)
    }
}

impl From<ClassLevel> for u8 {
    fn from(level: ClassLevel) -> Self {
        level.ordinal()
    }
}

impl FromStr for ClassLevel {
    type Err = ValidationError;

    /// Accepts either the ordinal ("1") or the code ("L1").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(ordinal) = s.parse::<u8>() {
            return Self::from_ordinal(ordinal);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                ValidationError::invalid_format("class_level", format!("unknown class '{}'", s))
            })
    }
}

impl fmt::Display for ClassLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Academic track (filière).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mention {
    Info,
    Sa,
    Eco,
    Lea,
    St,
    Droit,
}

impl Mention {
    pub const ALL: [Mention; 6] = [
        Mention::Info,
        Mention::Sa,
        Mention::Eco,
        Mention::Lea,
        Mention::St,
        Mention::Droit,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Mention::Info => "INFO",
            Mention::Sa => "SA",
            Mention::Eco => "ECO",
            Mention::Lea => "LEA",
            Mention::St => "ST",
            Mention::Droit => "DROIT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mention::Info => "Informatique",
            Mention::Sa => "Sciences Agronomiques",
            Mention::Eco => "Économie et Commerce",
            Mention::Lea => "Langues Étrangères Appliquées",
            Mention::St => "Sciences de la Terre",
            Mention::Droit => "Droit",
        }
    }
}

impl FromStr for Mention {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::invalid_format("mention", format!("unknown mention '{}'", s))
            })
    }
}

impl fmt::Display for Mention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Extracurricular activity a student is enrolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Activity {
    Danse,
    Sport,
    Chant,
    Dessin,
    Slam,
}

impl Activity {
    pub const ALL: [Activity; 5] = [
        Activity::Danse,
        Activity::Sport,
        Activity::Chant,
        Activity::Dessin,
        Activity::Slam,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Activity::Danse => "DANSE",
            Activity::Sport => "SPORT",
            Activity::Chant => "CHANT",
            Activity::Dessin => "DESSIN",
            Activity::Slam => "SLAM",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Activity::Danse => "Danse",
            Activity::Sport => "Sport",
            Activity::Chant => "Chant",
            Activity::Dessin => "Dessin",
            Activity::Slam => "Slam",
        }
    }
}

impl FromStr for Activity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::invalid_format("activity", format!("unknown activity '{}'", s))
            })
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Sport practised, meaningful only alongside [`Activity::Sport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SportType {
    Foot,
    Basket,
    Volley,
    Pet,
}

impl SportType {
    pub const ALL: [SportType; 4] = [
        SportType::Foot,
        SportType::Basket,
        SportType::Volley,
        SportType::Pet,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            SportType::Foot => "FOOT",
            SportType::Basket => "BASKET",
            SportType::Volley => "VOLLEY",
            SportType::Pet => "PET",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SportType::Foot => "Football",
            SportType::Basket => "Basketball",
            SportType::Volley => "Volleyball",
            SportType::Pet => "Pétanque",
        }
    }
}

impl FromStr for SportType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::invalid_format("sport_type", format!("unknown sport '{}'", s))
            })
    }
}

impl fmt::Display for SportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_level_serializes_as_ordinal() {
        assert_eq!(serde_json::to_string(&ClassLevel::M1).unwrap(), "4");
        let level: ClassLevel = serde_json::from_str("2").unwrap();
        assert_eq!(level, ClassLevel::L2);
    }

    #[test]
    fn class_level_rejects_unknown_ordinal() {
        assert!(serde_json::from_str::<ClassLevel>("6").is_err());
        assert!(matches!(
            ClassLevel::from_ordinal(0),
            Err(ValidationError::OutOfRange { actual: 0, .. })
        ));
    }

    #[test]
    fn class_level_parses_ordinal_or_code() {
        assert_eq!("1".parse::<ClassLevel>().unwrap(), ClassLevel::L1);
        assert_eq!("m2".parse::<ClassLevel>().unwrap(), ClassLevel::M2);
        assert!("L9".parse::<ClassLevel>().is_err());
    }

    #[test]
    fn class_levels_are_ordered_by_year() {
        assert!(ClassLevel::L3 < ClassLevel::M1);
    }

    #[test]
    fn mention_uses_uppercase_wire_codes() {
        assert_eq!(serde_json::to_string(&Mention::Info).unwrap(), "\"INFO\"");
        let m: Mention = serde_json::from_str("\"DROIT\"").unwrap();
        assert_eq!(m, Mention::Droit);
    }

    #[test]
    fn every_code_parses_back() {
        for m in Mention::ALL {
            assert_eq!(m.code().parse::<Mention>().unwrap(), m);
        }
        for a in Activity::ALL {
            assert_eq!(a.code().parse::<Activity>().unwrap(), a);
        }
        for s in SportType::ALL {
            assert_eq!(s.code().parse::<SportType>().unwrap(), s);
        }
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(Mention::Eco.label(), "Économie et Commerce");
        assert_eq!(SportType::Pet.label(), "Pétanque");
        assert_eq!(ClassLevel::M1.label(), "Master 1");
    }

    #[test]
    fn unknown_activity_names_field() {
        let err = "JUDO".parse::<Activity>().unwrap_err();
        assert_eq!(err.field(), "activity");
    }
}
