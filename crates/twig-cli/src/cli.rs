use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "twig", about = "twig: a small content-addressed version-control system", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a repository in the current directory
    Init(InitArgs),
    /// Stage a file for the next commit
    Add(FileArgs),
    /// Record the staged changes
    Commit(CommitArgs),
    /// Unstage a file, or stage its removal
    Rm(FileArgs),
    /// Show first-parent history of the current branch
    Log,
    /// Show every commit ever made
    GlobalLog,
    /// Print ids of commits with the given message
    Find(FindArgs),
    /// Show branches, staged and unstaged changes
    Status,
    /// Restore a file, or switch branches
    Checkout(CheckoutArgs),
    /// Create a branch at the current commit
    Branch(BranchArgs),
    /// Delete a branch
    RmBranch(BranchArgs),
    /// Check out a commit and move the current branch to it
    Reset(ResetArgs),
    /// Merge a branch into the current branch
    Merge(BranchArgs),
    /// Register another repository as a remote
    AddRemote(AddRemoteArgs),
    /// Forget a remote
    RmRemote(RemoteArgs),
    /// Send the current commit to a remote branch
    Push(SyncArgs),
    /// Copy a remote branch into remote/branch
    Fetch(SyncArgs),
    /// Fetch, then merge remote/branch
    Pull(SyncArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Store objects in one flat directory instead of sharding by prefix
    #[arg(long)]
    pub flat: bool,
}

#[derive(Args)]
pub struct FileArgs {
    pub file: String,
}

#[derive(Args)]
pub struct CommitArgs {
    pub message: String,
}

#[derive(Args)]
pub struct FindArgs {
    pub message: String,
}

/// `checkout -- <file>`, `checkout <commit> -- <file>` or `checkout <branch>`.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Branch name, or a commit id when a file follows `--`
    pub target: Option<String>,
    /// File to restore
    #[arg(last = true)]
    pub file: Option<String>,
}

#[derive(Args)]
pub struct BranchArgs {
    pub name: String,
}

#[derive(Args)]
pub struct ResetArgs {
    pub commit: String,
}

#[derive(Args)]
pub struct AddRemoteArgs {
    pub name: String,
    /// Root directory of the other repository
    pub path: String,
}

#[derive(Args)]
pub struct RemoteArgs {
    pub name: String,
}

#[derive(Args)]
pub struct SyncArgs {
    pub remote: String,
    pub branch: String,
}
