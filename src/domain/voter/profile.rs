//! Voter profile - the attributes eligibility is decided on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Activity, ClassLevel, Mention, SportType};
use crate::domain::foundation::{ValidationError, VoterId};

/// Immutable snapshot of a voter's academic and extracurricular attributes.
///
/// # Invariant
///
/// `sport_type` is present if and only if `activities` contains
/// [`Activity::Sport`]. [`VoterProfile::new`] enforces it. Profiles read from
/// an external directory may violate it; they are evaluated as-is and callers
/// can assert with [`VoterProfile::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterProfile {
    voter_id: VoterId,
    class_level: ClassLevel,
    mention: Mention,
    #[serde(default)]
    activities: BTreeSet<Activity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sport_type: Option<SportType>,
}

impl VoterProfile {
    /// Creates a profile, rejecting a sport type without the sport activity
    /// and the sport activity without a sport type.
    pub fn new(
        voter_id: VoterId,
        class_level: ClassLevel,
        mention: Mention,
        activities: impl IntoIterator<Item = Activity>,
        sport_type: Option<SportType>,
    ) -> Result<Self, ValidationError> {
        let profile =
            Self::from_parts_unchecked(voter_id, class_level, mention, activities, sport_type);
        profile.check_invariants()?;
        Ok(profile)
    }

    /// Builds a profile without checking the sport invariant.
    pub fn from_parts_unchecked(
        voter_id: VoterId,
        class_level: ClassLevel,
        mention: Mention,
        activities: impl IntoIterator<Item = Activity>,
        sport_type: Option<SportType>,
    ) -> Self {
        Self {
            voter_id,
            class_level,
            mention,
            activities: activities.into_iter().collect(),
            sport_type,
        }
    }

    /// Verifies `sport_type.is_some() == activities.contains(Sport)`.
    pub fn check_invariants(&self) -> Result<(), ValidationError> {
        match (self.practises_sport(), self.sport_type) {
            (true, None) => Err(ValidationError::empty_field("sport_type")),
            (false, Some(sport)) => Err(ValidationError::invalid_format(
                "sport_type",
                format!("'{}' given but activities do not include SPORT", sport),
            )),
            _ => Ok(()),
        }
    }

    /// Returns a copy with new activities. The sport type is dropped when
    /// SPORT is no longer among them.
    pub fn with_activities(&self, activities: impl IntoIterator<Item = Activity>) -> Self {
        let activities: BTreeSet<Activity> = activities.into_iter().collect();
        let sport_type = if activities.contains(&Activity::Sport) {
            self.sport_type
        } else {
            None
        };
        Self {
            activities,
            sport_type,
            ..self.clone()
        }
    }

    /// Returns a copy with a new sport type, validated against activities.
    pub fn with_sport_type(&self, sport_type: Option<SportType>) -> Result<Self, ValidationError> {
        let profile = Self {
            sport_type,
            ..self.clone()
        };
        profile.check_invariants()?;
        Ok(profile)
    }

    pub fn voter_id(&self) -> &VoterId {
        &self.voter_id
    }

    pub fn class_level(&self) -> ClassLevel {
        self.class_level
    }

    pub fn mention(&self) -> Mention {
        self.mention
    }

    pub fn activities(&self) -> &BTreeSet<Activity> {
        &self.activities
    }

    pub fn sport_type(&self) -> Option<SportType> {
        self.sport_type
    }

    pub fn practises_sport(&self) -> bool {
        self.activities.contains(&Activity::Sport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> VoterId {
        VoterId::new("etu-001").unwrap()
    }

    #[test]
    fn new_accepts_sport_with_type() {
        let profile = VoterProfile::new(
            id(),
            ClassLevel::L2,
            Mention::Info,
            [Activity::Sport, Activity::Chant],
            Some(SportType::Basket),
        )
        .unwrap();

        assert!(profile.practises_sport());
        assert_eq!(profile.sport_type(), Some(SportType::Basket));
    }

    #[test]
    fn new_rejects_sport_without_type() {
        let err = VoterProfile::new(id(), ClassLevel::L1, Mention::Sa, [Activity::Sport], None)
            .unwrap_err();
        assert_eq!(err, ValidationError::empty_field("sport_type"));
    }

    #[test]
    fn new_rejects_type_without_sport() {
        let result = VoterProfile::new(
            id(),
            ClassLevel::L1,
            Mention::Sa,
            [Activity::Danse],
            Some(SportType::Foot),
        );
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn unchecked_keeps_malformed_profile() {
        let profile = VoterProfile::from_parts_unchecked(
            id(),
            ClassLevel::M1,
            Mention::Lea,
            [],
            Some(SportType::Volley),
        );
        assert_eq!(profile.sport_type(), Some(SportType::Volley));
        assert!(profile.check_invariants().is_err());
    }

    #[test]
    fn removing_sport_clears_sport_type() {
        let profile = VoterProfile::new(
            id(),
            ClassLevel::L3,
            Mention::St,
            [Activity::Sport],
            Some(SportType::Foot),
        )
        .unwrap();

        let updated = profile.with_activities([Activity::Slam]);
        assert_eq!(updated.sport_type(), None);
        assert!(updated.check_invariants().is_ok());
    }

    #[test]
    fn keeping_sport_keeps_sport_type() {
        let profile = VoterProfile::new(
            id(),
            ClassLevel::L3,
            Mention::St,
            [Activity::Sport],
            Some(SportType::Foot),
        )
        .unwrap();

        let updated = profile.with_activities([Activity::Sport, Activity::Dessin]);
        assert_eq!(updated.sport_type(), Some(SportType::Foot));
    }

    #[test]
    fn deserializes_wire_format() {
        let json = r#"{
            "voter_id": "etu-77",
            "class_level": 4,
            "mention": "ECO",
            "activities": ["SPORT"],
            "sport_type": "PET"
        }"#;
        let profile: VoterProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.class_level(), ClassLevel::M1);
        assert_eq!(profile.mention(), Mention::Eco);
        assert_eq!(profile.sport_type(), Some(SportType::Pet));
    }

    #[test]
    fn missing_activities_default_to_empty() {
        let json = r#"{"voter_id": "etu-78", "class_level": 1, "mention": "INFO"}"#;
        let profile: VoterProfile = serde_json::from_str(json).unwrap();
        assert!(profile.activities().is_empty());
        assert_eq!(profile.sport_type(), None);
    }
}
