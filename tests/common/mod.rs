//! Shared wiring for integration tests: every port backed by the in-memory
//! adapters and one fixed clock.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use univote::adapters::{
    FixedClock, InMemoryElectionRepository, InMemoryEventBus, InMemoryVoteRepository,
    InMemoryVoterDirectory, ScriptedBiometricVerifier,
};
use univote::application::{
    CommitVoteHandler, CreateElectionCommand, CreateElectionHandler, StartVoteSessionCommand,
    StartVoteSessionHandler, VoteSession, VotingPorts,
};
use univote::domain::election::{Candidate, Election};
use univote::domain::eligibility::CriteriaSet;
use univote::domain::foundation::{CandidateId, ElectionId, Timestamp, VoterId};
use univote::domain::voter::{Activity, ClassLevel, Mention, SportType, VoterProfile};

pub fn ts(s: &str) -> Timestamp {
    Timestamp::parse_rfc3339(s).unwrap()
}

pub fn cid(s: &str) -> CandidateId {
    CandidateId::new(s).unwrap()
}

pub fn vid(s: &str) -> VoterId {
    VoterId::new(s).unwrap()
}

pub fn student(id: &str, class: ClassLevel, mention: Mention) -> VoterProfile {
    VoterProfile::new(vid(id), class, mention, [], None).unwrap()
}

pub fn athlete(id: &str, class: ClassLevel, sport: SportType) -> VoterProfile {
    VoterProfile::new(vid(id), class, Mention::Info, [Activity::Sport], Some(sport)).unwrap()
}

pub struct World {
    pub elections: Arc<InMemoryElectionRepository>,
    pub voters: Arc<InMemoryVoterDirectory>,
    pub votes: Arc<InMemoryVoteRepository>,
    pub bus: Arc<InMemoryEventBus>,
    pub clock: Arc<FixedClock>,
    pub biometric: Arc<ScriptedBiometricVerifier>,
}

impl World {
    pub fn new(now: &str, voters: impl IntoIterator<Item = VoterProfile>) -> Self {
        Self {
            elections: Arc::new(InMemoryElectionRepository::new()),
            voters: Arc::new(InMemoryVoterDirectory::with_profiles(voters)),
            votes: Arc::new(InMemoryVoteRepository::new()),
            bus: Arc::new(InMemoryEventBus::new()),
            clock: Arc::new(FixedClock::at(ts(now))),
            biometric: Arc::new(ScriptedBiometricVerifier::always_accept()),
        }
    }

    pub async fn create_election(
        &self,
        name: &str,
        start: &str,
        end: &str,
        criteria: CriteriaSet,
    ) -> Election {
        CreateElectionHandler::new(self.elections.clone(), self.bus.clone(), self.clock.clone())
            .handle(CreateElectionCommand {
                name: name.to_string(),
                start: ts(start),
                end: ts(end),
                criteria,
                candidates: vec![
                    Candidate::new(cid("c1"), "Rakoto").unwrap(),
                    Candidate::new(cid("c2"), "Rabe").unwrap(),
                ],
                actor: "admin".to_string(),
            })
            .await
            .unwrap()
            .election
    }

    pub fn committer(&self) -> Arc<CommitVoteHandler> {
        Arc::new(CommitVoteHandler::new(
            self.elections.clone(),
            self.voters.clone(),
            self.votes.clone(),
            self.bus.clone(),
            self.clock.clone(),
        ))
    }

    pub fn sessions(&self) -> StartVoteSessionHandler {
        StartVoteSessionHandler::new(
            VotingPorts {
                elections: self.elections.clone(),
                voters: self.voters.clone(),
                biometric: self.biometric.clone(),
                committer: self.committer(),
                clock: self.clock.clone(),
            },
            Duration::from_secs(5),
        )
    }

    pub async fn open_session(&self, election_id: ElectionId, voter: &str) -> VoteSession {
        match self
            .sessions()
            .handle(StartVoteSessionCommand {
                election_id,
                voter_id: vid(voter),
            })
            .await
        {
            Ok(session) => session,
            Err(e) => panic!("session for {} did not open: {}", voter, e),
        }
    }
}
