use twig_repo::MergeOutcome;
use twig_types::ObjectId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PushOutcome {
    pub branch: String,
    pub tip: ObjectId,
    pub commits_sent: usize,
    pub objects_sent: usize,
}

impl PushOutcome {
    pub fn is_up_to_date(&self) -> bool {
        self.commits_sent == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Local name of the remote-tracking branch, `remote/branch`.
    pub tracking_branch: String,
    pub tip: ObjectId,
    pub commits_received: usize,
    pub objects_received: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PullOutcome {
    pub fetch: FetchOutcome,
    pub merge: MergeOutcome,
}
