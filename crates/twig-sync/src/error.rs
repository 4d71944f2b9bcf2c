use thiserror::Error;
use twig_repo::RepoError;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("That remote does not have that branch.")]
    RemoteBranchNotFound,

    #[error("Please pull down remote changes before pushing.")]
    PullFirst,

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl SyncError {
    /// See [`RepoError::is_user_error`].
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::Repo(e) => e.is_user_error(),
            Self::RemoteBranchNotFound | Self::PullFirst => true,
        }
    }
}

impl From<twig_refs::RefError> for SyncError {
    fn from(e: twig_refs::RefError) -> Self {
        Self::Repo(RepoError::from(e))
    }
}

pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_forwards_to_repo_errors() {
        assert!(SyncError::PullFirst.is_user_error());
        assert!(SyncError::from(RepoError::RemoteDirNotFound).is_user_error());
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        assert!(!SyncError::from(RepoError::from(io)).is_user_error());
    }

    #[test]
    fn messages() {
        assert_eq!(
            SyncError::PullFirst.to_string(),
            "Please pull down remote changes before pushing."
        );
        assert_eq!(
            SyncError::from(RepoError::RemoteDirNotFound).to_string(),
            "Remote directory not found."
        );
    }
}
