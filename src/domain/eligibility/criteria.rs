//! Declarative eligibility criteria attached to an election.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::voter::{Activity, ClassLevel, Mention, SportType};

/// Four independent attribute filters.
///
/// An empty filter means "no restriction on this dimension", never "nobody
/// qualifies". `allowed_sport_types` only takes effect when
/// `allowed_activities` contains [`Activity::Sport`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaSet {
    pub allowed_classes: BTreeSet<ClassLevel>,
    pub allowed_mentions: BTreeSet<Mention>,
    pub allowed_activities: BTreeSet<Activity>,
    pub allowed_sport_types: BTreeSet<SportType>,
}

impl CriteriaSet {
    /// Criteria that admit every voter.
    pub fn open() -> Self {
        Self::default()
    }

    pub fn with_classes(mut self, classes: impl IntoIterator<Item = ClassLevel>) -> Self {
        self.allowed_classes = classes.into_iter().collect();
        self
    }

    pub fn with_mentions(mut self, mentions: impl IntoIterator<Item = Mention>) -> Self {
        self.allowed_mentions = mentions.into_iter().collect();
        self
    }

    pub fn with_activities(mut self, activities: impl IntoIterator<Item = Activity>) -> Self {
        self.allowed_activities = activities.into_iter().collect();
        self
    }

    pub fn with_sport_types(mut self, sports: impl IntoIterator<Item = SportType>) -> Self {
        self.allowed_sport_types = sports.into_iter().collect();
        self
    }

    /// True when the set admits every voter.
    pub fn is_unrestricted(&self) -> bool {
        self.allowed_classes.is_empty()
            && self.allowed_mentions.is_empty()
            && self.allowed_activities.is_empty()
    }

    /// True when the sport-type filter participates in evaluation.
    pub fn sport_filter_active(&self) -> bool {
        self.allowed_activities.contains(&Activity::Sport) && !self.allowed_sport_types.is_empty()
    }

    /// Returns a copy whose sport types are cleared when SPORT is not an
    /// allowed activity. Evaluation is identical before and after.
    pub fn normalized(&self) -> Self {
        let mut criteria = self.clone();
        if !criteria.allowed_activities.contains(&Activity::Sport) {
            criteria.allowed_sport_types.clear();
        }
        criteria
    }
}
