//! `univote check` - can this voter vote in this election right now?

use clap::Args;
use std::fmt;
use std::path::PathBuf;

use super::{instant, read_election, read_json, CliError};
use crate::domain::election::{ElectionPhase, LifecycleState};
use crate::domain::eligibility::EligibilityCheck;
use crate::domain::foundation::Timestamp;
use crate::domain::voter::VoterProfile;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Election export (JSON).
    #[arg(long)]
    pub election: PathBuf,

    /// Voter profile (JSON).
    #[arg(long)]
    pub voter: PathBuf,

    /// Evaluate at this instant (RFC 3339) instead of now.
    #[arg(long)]
    pub at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub election_name: String,
    pub voter_id: String,
    pub at: Timestamp,
    pub phase: ElectionPhase,
    pub state: LifecycleState,
    pub failed: Vec<EligibilityCheck>,
    /// Sport-invariant violation of the profile, reported but not fatal.
    pub profile_warning: Option<String>,
}

impl CheckReport {
    pub fn eligible(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn may_vote(&self) -> bool {
        self.eligible() && self.state.can_vote()
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "election:  {}", self.election_name)?;
        writeln!(f, "voter:     {}", self.voter_id)?;
        writeln!(f, "at:        {}", self.at)?;
        writeln!(f, "phase:     {}", self.phase)?;
        writeln!(f, "state:     {}", self.state)?;
        if self.eligible() {
            writeln!(f, "eligible:  yes")?;
        } else {
            let failed: Vec<String> = self.failed.iter().map(|c| c.to_string()).collect();
            writeln!(f, "eligible:  no (failed: {})", failed.join(", "))?;
        }
        if let Some(warning) = &self.profile_warning {
            writeln!(f, "warning:   {}", warning)?;
        }
        write!(f, "may vote:  {}", if self.may_vote() { "yes" } else { "no" })
    }
}

/// Evaluates one voter against one election.
pub fn run_check(args: &CheckArgs) -> Result<CheckReport, CliError> {
    let election = read_election(&args.election)?;
    let voter: VoterProfile = read_json(&args.voter)?;
    let at = instant(args.at);

    let verdict = election.eligibility(&voter);
    let report = CheckReport {
        election_name: election.name.clone(),
        voter_id: voter.voter_id().to_string(),
        at,
        phase: election.phase(at),
        state: election.lifecycle_state(at),
        failed: verdict.failed_checks(),
        profile_warning: voter.check_invariants().err().map(|e| e.to_string()),
    };

    tracing::info!(
        election_id = %election.id,
        voter_id = %voter.voter_id(),
        eligible = report.eligible(),
        state = %report.state,
        "eligibility checked"
    );
    Ok(report)
}
