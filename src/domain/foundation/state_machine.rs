//! Transition table contract shared by `LifecycleState` and `VoteSessionState`.

use super::ValidationError;

/// A status enum with an explicit table of allowed moves.
///
/// ```ignore
/// let next = LifecycleState::ClosedUnpublished.transition_to(LifecycleState::ClosedPublished)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Every state reachable in one step, self-loops included.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns `target` when the move is in the table.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if !self.can_transition_to(&target) {
            return Err(ValidationError::invalid_format(
                "state_transition",
                format!("{:?} cannot move to {:?}", self, target),
            ));
        }
        Ok(target)
    }

    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Urn {
        Empty,
        Filling,
        Sealed,
    }

    impl StateMachine for Urn {
        fn can_transition_to(&self, target: &Self) -> bool {
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Urn::Empty => vec![Urn::Filling, Urn::Sealed],
                Urn::Filling => vec![Urn::Filling, Urn::Sealed],
                Urn::Sealed => vec![],
            }
        }
    }

    #[test]
    fn listed_moves_succeed() {
        assert_eq!(Urn::Empty.transition_to(Urn::Filling), Ok(Urn::Filling));
        assert_eq!(Urn::Filling.transition_to(Urn::Filling), Ok(Urn::Filling));
    }

    #[test]
    fn unlisted_moves_name_both_states() {
        let err = Urn::Sealed.transition_to(Urn::Filling).unwrap_err();
        assert_eq!(err.field(), "state_transition");
        assert!(err.to_string().contains("Sealed cannot move to Filling"));
    }

    #[test]
    fn a_state_without_exits_is_terminal() {
        assert!(Urn::Sealed.is_terminal());
        assert!(!Urn::Empty.is_terminal());
    }
}
