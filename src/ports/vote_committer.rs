//! Vote committer port - the authoritative at-most-once vote write.

use async_trait::async_trait;

use crate::domain::foundation::{CandidateId, ElectionId, VoterId};
use crate::domain::vote::{CommitError, Vote};

/// Records a vote.
///
/// Implementations enforce one vote per `(election, voter)` themselves,
/// whatever the client does, and report a second attempt as
/// [`CommitError::DuplicateVote`]. They also re-check that the election is
/// open and the voter eligible.
#[async_trait]
pub trait VoteCommitter: Send + Sync {
    async fn commit(
        &self,
        election_id: &ElectionId,
        voter_id: &VoterId,
        candidate_id: &CandidateId,
    ) -> Result<Vote, CommitError>;
}
