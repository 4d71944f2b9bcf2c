use std::fmt::{Display, Write as _};
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Local, TimeZone, Utc};
use colored::Colorize;
use twig_repo::{LogEntry, MergeOutcome, RepoError, RepoStatus, Repository};
use twig_store::Layout;
use twig_sync::SyncError;

use crate::cli::*;

/// Why a command stopped early.
#[derive(Debug)]
pub enum Failure {
    /// Expected outcome the user can act on; one line on stdout, exit 0.
    User(String),
    Fatal(anyhow::Error),
}

impl From<RepoError> for Failure {
    fn from(e: RepoError) -> Self {
        if e.is_user_error() {
            Self::User(e.to_string())
        } else {
            Self::Fatal(e.into())
        }
    }
}

impl From<SyncError> for Failure {
    fn from(e: SyncError) -> Self {
        if e.is_user_error() {
            Self::User(e.to_string())
        } else {
            Self::Fatal(e.into())
        }
    }
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot read the current directory")?;
    match execute(cli.command, &cwd) {
        Ok(output) => {
            print!("{output}");
            Ok(())
        }
        Err(Failure::User(message)) => {
            println!("{message}");
            Ok(())
        }
        Err(Failure::Fatal(e)) => Err(e),
    }
}

/// Run one command against the repository rooted at `root` and return
/// what it prints. State is flushed only when the command succeeds.
pub fn execute(command: Command, root: &Path) -> Result<String, Failure> {
    let mut repo = match command {
        Command::Init(ref args) => {
            let layout = if args.flat { Layout::Flat } else { Layout::Sharded };
            Repository::init(root, layout)?.flush()?;
            return Ok(String::new());
        }
        _ => Repository::open(root)?,
    };
    let output = match command {
        Command::Init(_) => return Err(RepoError::AlreadyInitialized.into()),
        Command::Add(args) => repo.add(&args.file).map(|()| String::new())?,
        Command::Commit(args) => repo.commit(&args.message).map(|_| String::new())?,
        Command::Rm(args) => repo.rm(&args.file).map(|()| String::new())?,
        Command::Log => render_log(&repo.log()?, &Local),
        Command::GlobalLog => render_log(&repo.global_log()?, &Local),
        Command::Find(args) => repo
            .find(&args.message)?
            .iter()
            .map(|id| format!("{id}\n"))
            .collect(),
        Command::Status => render_status(&repo.status()?),
        Command::Checkout(args) => {
            match (args.target, args.file) {
                (None, Some(file)) => repo.checkout_file(&file)?,
                (Some(commit), Some(file)) => repo.checkout_file_at(&commit, &file)?,
                (Some(branch), None) => repo.checkout_branch(&branch)?,
                (None, None) => return Err(Failure::User("Incorrect operands.".into())),
            }
            String::new()
        }
        Command::Branch(args) => repo.branch(&args.name).map(|()| String::new())?,
        Command::RmBranch(args) => repo.rm_branch(&args.name).map(|()| String::new())?,
        Command::Reset(args) => repo.reset(&args.commit).map(|_| String::new())?,
        Command::Merge(args) => render_merge(&repo.merge(&args.name)?),
        Command::AddRemote(args) => repo.add_remote(&args.name, &args.path).map(|()| String::new())?,
        Command::RmRemote(args) => repo.rm_remote(&args.name).map(|()| String::new())?,
        Command::Push(args) => {
            twig_sync::push(&mut repo, &args.remote, &args.branch)?;
            String::new()
        }
        Command::Fetch(args) => {
            twig_sync::fetch(&mut repo, &args.remote, &args.branch)?;
            String::new()
        }
        Command::Pull(args) => render_merge(&twig_sync::pull(&mut repo, &args.remote, &args.branch)?.merge),
    };
    repo.flush()?;
    Ok(output)
}

fn format_date<Tz>(timestamp: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp
        .with_timezone(zone)
        .format("%a %b %d %H:%M:%S %Y %z")
        .to_string()
}

/// `log` layout: one block per commit, merges list both parents
/// abbreviated to seven characters.
pub fn render_log<Tz>(entries: &[LogEntry], zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    for LogEntry { id, commit } in entries {
        let _ = writeln!(out, "===");
        let _ = writeln!(out, "{}", format!("commit {id}").yellow());
        if let (Some(parent), Some(merged)) = (commit.parent, commit.merge_parent) {
            let _ = writeln!(out, "Merge: {} {}", parent.abbrev(7), merged.abbrev(7));
        }
        let _ = writeln!(out, "Date: {}", format_date(&commit.timestamp, zone));
        let _ = writeln!(out, "{}", commit.message);
        let _ = writeln!(out);
    }
    out
}

pub fn render_status(status: &RepoStatus) -> String {
    let mut out = String::from("=== Branches ===\n");
    for branch in &status.branches {
        if *branch == status.current_branch {
            let _ = writeln!(out, "{}", format!("*{branch}").green());
        } else {
            let _ = writeln!(out, "{branch}");
        }
    }
    let sections = [
        ("Staged Files", status.staged.clone()),
        ("Removed Files", status.removed.clone()),
        (
            "Modifications Not Staged For Commit",
            status
                .unstaged
                .iter()
                .map(|change| format!("{} ({})", change.path, change.kind))
                .collect(),
        ),
        ("Untracked Files", status.untracked.clone()),
    ];
    for (title, lines) in sections {
        let _ = writeln!(out, "\n=== {title} ===");
        for line in lines {
            let _ = writeln!(out, "{line}");
        }
    }
    out.push('\n');
    out
}

fn render_merge(outcome: &MergeOutcome) -> String {
    match outcome {
        MergeOutcome::AlreadyMerged => "Given branch is an ancestor of the current branch.\n".into(),
        MergeOutcome::FastForwarded { .. } => "Current branch fast-forwarded.\n".into(),
        MergeOutcome::Merged { conflicts, .. } if !conflicts.is_empty() => {
            "Encountered a merge conflict.\n".into()
        }
        MergeOutcome::Merged { .. } => String::new(),
    }
}
