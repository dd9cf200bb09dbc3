//! Eligibility evaluation.
//!
//! One pure function shared by every caller that needs to know whether a
//! voter may see or vote in an election.

use serde::Serialize;
use std::fmt;

use super::CriteriaSet;
use crate::domain::voter::VoterProfile;

/// One of the four independent checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityCheck {
    Class,
    Mention,
    Activity,
    Sport,
}

impl fmt::Display for EligibilityCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EligibilityCheck::Class => "class",
            EligibilityCheck::Mention => "mention",
            EligibilityCheck::Activity => "activity",
            EligibilityCheck::Sport => "sport",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of each check for one (criteria, voter) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EligibilityVerdict {
    pub class_ok: bool,
    pub mention_ok: bool,
    pub activity_ok: bool,
    pub sport_ok: bool,
}

impl EligibilityVerdict {
    pub fn is_eligible(&self) -> bool {
        self.class_ok && self.mention_ok && self.activity_ok && self.sport_ok
    }

    /// Checks that rejected the voter, in evaluation order.
    pub fn failed_checks(&self) -> Vec<EligibilityCheck> {
        [
            (self.class_ok, EligibilityCheck::Class),
            (self.mention_ok, EligibilityCheck::Mention),
            (self.activity_ok, EligibilityCheck::Activity),
            (self.sport_ok, EligibilityCheck::Sport),
        ]
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, check)| check)
        .collect()
    }
}

/// Runs all four checks.
///
/// The sport check only bites when the criteria list sport types under an
/// allowed SPORT activity and the voter practises sport; every other voter
/// passes it vacuously. Malformed profiles are evaluated as-is.
pub fn evaluate(criteria: &CriteriaSet, voter: &VoterProfile) -> EligibilityVerdict {
    let class_ok = criteria.allowed_classes.is_empty()
        || criteria.allowed_classes.contains(&voter.class_level());

    let mention_ok = criteria.allowed_mentions.is_empty()
        || criteria.allowed_mentions.contains(&voter.mention());

    let activity_ok = criteria.allowed_activities.is_empty()
        || !criteria
            .allowed_activities
            .is_disjoint(voter.activities());

    let sport_ok = if criteria.sport_filter_active() && voter.practises_sport() {
        voter
            .sport_type()
            .is_some_and(|sport| criteria.allowed_sport_types.contains(&sport))
    } else {
        true
    };

    EligibilityVerdict {
        class_ok,
        mention_ok,
        activity_ok,
        sport_ok,
    }
}

/// Returns true when the voter satisfies every check.
pub fn is_eligible(criteria: &CriteriaSet, voter: &VoterProfile) -> bool {
    evaluate(criteria, voter).is_eligible()
}
