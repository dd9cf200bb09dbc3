//! `univote tally` - administrator view of an election's results.

use clap::Args;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::PathBuf;

use super::{instant, read_election, read_json, CliError};
use crate::application::handlers::results::Audience;
use crate::domain::foundation::{Timestamp, VoterId};
use crate::domain::results::{ResultsError, ResultsReport};
use crate::domain::vote::Vote;
use crate::domain::voter::VoterProfile;

/// Arguments for the tally subcommand.
#[derive(Args, Debug)]
pub struct TallyArgs {
    /// Election export (JSON).
    #[arg(long)]
    pub election: PathBuf,

    /// Vote export (JSON array).
    #[arg(long)]
    pub votes: PathBuf,

    /// Voter directory export (JSON array), for turnout.
    #[arg(long)]
    pub voters: Option<PathBuf>,

    /// Evaluate at this instant (RFC 3339) instead of now.
    #[arg(long)]
    pub at: Option<Timestamp>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Rendered tally plus the report it came from.
#[derive(Debug, Clone)]
pub struct TallyOutput {
    pub report: ResultsReport,
    pub rendered: String,
}

/// Compiles results the way an administrator sees them: available once the
/// election is closed, published or not.
pub fn run_tally(args: &TallyArgs) -> Result<TallyOutput, CliError> {
    let election = read_election(&args.election)?;
    let votes: Vec<Vote> = read_json(&args.votes)?;
    let voters: Vec<VoterProfile> = match &args.voters {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    let at = instant(args.at);

    let state = election.lifecycle_state(at);
    if !Audience::Administrator.may_read(state) {
        return Err(ResultsError::NotAvailable { state }.into());
    }

    let eligible: HashSet<VoterId> = voters
        .iter()
        .filter(|v| election.admits(v))
        .map(|v| v.voter_id().clone())
        .collect();
    let report = ResultsReport::compile(&election, &votes, &eligible, state);

    let rendered = if args.json {
        serde_json::to_string_pretty(&report).map_err(CliError::Render)?
    } else {
        render_table(&report)
    };

    tracing::info!(
        election_id = %election.id,
        total_votes = report.total_votes,
        orphaned_votes = report.orphaned_votes,
        "tally compiled"
    );
    Ok(TallyOutput { report, rendered })
}

fn render_table(report: &ResultsReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", report.election_name, report.state);
    for c in &report.candidates {
        let marker = if report.winners.contains(&c.candidate_id) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "{} {:<24} {:>6} {:>6.1}%",
            marker, c.name, c.votes, c.share_percent
        );
    }
    let _ = writeln!(out, "total votes:  {}", report.total_votes);
    if report.orphaned_votes > 0 {
        let _ = writeln!(out, "orphaned:     {}", report.orphaned_votes);
    }
    if report.eligible_voters > 0 {
        let _ = writeln!(
            out,
            "turnout:      {:.1}% of {}",
            report.turnout_percent, report.eligible_voters
        );
    }
    if report.is_tie() {
        let _ = writeln!(out, "result:       tie");
    }
    out
}
