//! Candidate entry on an election's ballot.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CandidateId, ValidationError};
use crate::domain::voter::{ClassLevel, Mention};

/// A person standing in an election.
///
/// Candidates are usually students themselves, so they may carry the same
/// academic attributes as voters. Those are informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_level: Option<ClassLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mention: Option<Mention>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
}

impl Candidate {
    pub fn new(id: CandidateId, name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("candidate_name"));
        }
        Ok(Self {
            id,
            name,
            class_level: None,
            mention: None,
            registration_number: None,
        })
    }

    pub fn with_class_level(mut self, level: ClassLevel) -> Self {
        self.class_level = Some(level);
        self
    }

    pub fn with_mention(mut self, mention: Mention) -> Self {
        self.mention = Some(mention);
        self
    }

    pub fn with_registration_number(mut self, number: impl Into<String>) -> Self {
        self.registration_number = Some(number.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_blank_name() {
        let id = CandidateId::new("c1").unwrap();
        assert_eq!(
            Candidate::new(id, "  ").unwrap_err(),
            ValidationError::empty_field("candidate_name")
        );
    }

    #[test]
    fn optional_attributes_are_skipped_when_absent() {
        let candidate = Candidate::new(CandidateId::new("c1").unwrap(), "Rakoto").unwrap();
        let json = serde_json::to_value(&candidate).unwrap();
        assert!(json.get("mention").is_none());
    }

    #[test]
    fn builders_set_attributes() {
        let candidate = Candidate::new(CandidateId::new("c2").unwrap(), "Rabe")
            .unwrap()
            .with_class_level(ClassLevel::L3)
            .with_mention(Mention::Droit)
            .with_registration_number("2021-DR-118");

        assert_eq!(candidate.class_level, Some(ClassLevel::L3));
        assert_eq!(candidate.registration_number.as_deref(), Some("2021-DR-118"));
    }
}
