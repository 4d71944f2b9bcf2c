//! Branch and remote name validation.
//!
//! Branch names become file names under `branches/` and `remotes/`, so
//! they are held to git-style rules:
//! - Must be non-empty
//! - Must not contain whitespace, `~`, `^`, `:`, `?`, `*`, `[`, `\`
//! - Must not contain `..`
//! - Must not start or end with `.` or `/`
//! - At most one `/`, separating a remote name from the remote's branch
//!
//! Remote names follow the same rules but may not contain `/` at all.

use crate::error::{RefError, Result};

/// Characters that are forbidden anywhere in a branch name.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '~', '^', ':', '?', '*', '[', '\\'];

fn invalid_branch(name: &str, reason: impl Into<String>) -> RefError {
    RefError::InvalidBranchName {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Validate a branch name, local (`master`) or remote-tracking
/// (`origin/master`).
///
/// # Examples
///
/// ```
/// use twig_refs::names::validate_branch_name;
///
/// assert!(validate_branch_name("master").is_ok());
/// assert!(validate_branch_name("origin/master").is_ok());
/// assert!(validate_branch_name("").is_err());
/// assert!(validate_branch_name("a/b/c").is_err());
/// ```
pub fn validate_branch_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid_branch(name, "branch name must not be empty"));
    }
    if let Some(ch) = FORBIDDEN_CHARS.iter().find(|ch| name.contains(**ch)) {
        return Err(invalid_branch(name, format!("contains forbidden character: {ch:?}")));
    }
    if name.contains("..") {
        return Err(invalid_branch(name, "must not contain '..'"));
    }
    if name.matches('/').count() > 1 {
        return Err(invalid_branch(name, "must contain at most one '/'"));
    }
    for component in name.split('/') {
        if component.is_empty() {
            return Err(invalid_branch(name, "must not start or end with '/'"));
        }
        if component.starts_with('.') || component.ends_with('.') {
            return Err(invalid_branch(name, "components must not start or end with '.'"));
        }
    }
    Ok(())
}

/// Validate the name of a branch created locally. Only fetch creates
/// `remote/branch` names.
pub fn validate_local_branch_name(name: &str) -> Result<()> {
    validate_branch_name(name)?;
    if name.contains('/') {
        return Err(invalid_branch(name, "local branch names must not contain '/'"));
    }
    Ok(())
}

/// Validate a remote name. Same rules as a branch component.
pub fn validate_remote_name(name: &str) -> Result<()> {
    if name.contains('/') {
        return Err(RefError::InvalidRemoteName {
            name: name.to_string(),
            reason: "must not contain '/'".into(),
        });
    }
    validate_branch_name(name).map_err(|e| match e {
        RefError::InvalidBranchName { name, reason } => RefError::InvalidRemoteName { name, reason },
        other => other,
    })
}

/// The name of the local branch tracking `branch` on `remote`.
pub fn tracking_branch(remote: &str, branch: &str) -> String {
    format!("{remote}/{branch}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        for name in ["master", "feature-x", "v1.0", "origin/master", "r/b_2"] {
            assert!(validate_branch_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn invalid_names() {
        for name in [
            "", "has space", "a..b", ".hidden", "trailing.", "/lead", "trail/", "a/b/c", "x:y",
            "star*",
        ] {
            assert!(
                matches!(validate_branch_name(name), Err(RefError::InvalidBranchName { .. })),
                "{name:?} should be invalid"
            );
        }
    }

    #[test]
    fn local_branches_forbid_slash() {
        assert!(validate_local_branch_name("dev").is_ok());
        assert!(matches!(
            validate_local_branch_name("origin/dev"),
            Err(RefError::InvalidBranchName { .. })
        ));
    }

    #[test]
    fn remote_names_forbid_slash() {
        assert!(validate_remote_name("origin").is_ok());
        assert!(matches!(
            validate_remote_name("a/b"),
            Err(RefError::InvalidRemoteName { .. })
        ));
        assert!(matches!(
            validate_remote_name(""),
            Err(RefError::InvalidRemoteName { .. })
        ));
    }

    #[test]
    fn tracking_names() {
        assert_eq!(tracking_branch("origin", "master"), "origin/master");
        assert!(validate_branch_name(&tracking_branch("origin", "master")).is_ok());
    }
}
