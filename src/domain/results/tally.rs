//! Tally compilation.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::domain::election::{Election, LifecycleState};
use crate::domain::foundation::{CandidateId, ElectionId, VoterId};
use crate::domain::vote::Vote;

/// Votes received by one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateTally {
    pub candidate_id: CandidateId,
    pub name: String,
    pub votes: u64,
    /// Share of the votes cast for listed candidates, in percent.
    pub share_percent: f64,
}

/// Results of one election, candidates in ballot order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsReport {
    pub election_id: ElectionId,
    pub election_name: String,
    pub state: LifecycleState,
    pub candidates: Vec<CandidateTally>,
    /// Every recorded vote, orphaned ones included.
    pub total_votes: u64,
    pub eligible_voters: u64,
    /// Share of the eligible voters who voted, never above 100. Ballots from
    /// voters the criteria no longer admit stay in the tally but not here.
    pub turnout_percent: f64,
    /// Candidates tied at the highest count. Empty when nobody voted.
    pub winners: Vec<CandidateId>,
    /// Votes for candidates no longer on the ballot.
    pub orphaned_votes: u64,
}

impl ResultsReport {
    /// Counts `votes` against the election's current candidate list.
    ///
    /// Votes belonging to another election are ignored. `eligible` is the
    /// set of voters the election admits now.
    pub fn compile(
        election: &Election,
        votes: &[Vote],
        eligible: &HashSet<VoterId>,
        state: LifecycleState,
    ) -> Self {
        let mut counts: HashMap<&CandidateId, u64> = HashMap::new();
        let mut total_votes = 0u64;
        let mut orphaned_votes = 0u64;
        let mut eligible_turnout = 0u64;

        for vote in votes.iter().filter(|v| v.election_id == election.id) {
            total_votes += 1;
            if eligible.contains(&vote.voter_id) {
                eligible_turnout += 1;
            }
            if election.has_candidate(&vote.candidate_id) {
                *counts.entry(&vote.candidate_id).or_default() += 1;
            } else {
                orphaned_votes += 1;
            }
        }

        let counted = total_votes - orphaned_votes;
        let candidates: Vec<CandidateTally> = election
            .candidates
            .iter()
            .map(|c| {
                let votes = counts.get(&c.id).copied().unwrap_or(0);
                CandidateTally {
                    candidate_id: c.id.clone(),
                    name: c.name.clone(),
                    votes,
                    share_percent: percent(votes, counted),
                }
            })
            .collect();

        let max = candidates.iter().map(|c| c.votes).max().unwrap_or(0);
        let winners = if max > 0 {
            candidates
                .iter()
                .filter(|c| c.votes == max)
                .map(|c| c.candidate_id.clone())
                .collect()
        } else {
            Vec::new()
        };

        Self {
            election_id: election.id,
            election_name: election.name.clone(),
            state,
            candidates,
            total_votes,
            eligible_voters: eligible.len() as u64,
            turnout_percent: percent(eligible_turnout, eligible.len() as u64),
            winners,
            orphaned_votes,
        }
    }

    /// `(candidate, count)` pairs in ballot order.
    pub fn counts(&self) -> Vec<(CandidateId, u64)> {
        self.candidates
            .iter()
            .map(|c| (c.candidate_id.clone(), c.votes))
            .collect()
    }

    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
