use crate::model::{CommitAuthor, Contributor, RepoCommit};
use crate::policy::ReportPolicy;
use std::collections::{HashMap, HashSet};

pub type ContributorMap = HashMap<String, Contributor>;

/// Fold one repository's commits into the running contributor map.
///
/// Identity comes from the linked platform account when there is one and
/// falls back to the raw author name otherwise; fallback identities carry no
/// profile URL and cannot be matched against the member list later. Bot
/// commits are dropped outright, and so is any commit authored strictly
/// before its author's staff cutoff: work done while on staff never counts,
/// work after leaving does.
pub fn add_commits(
    contributors: &mut ContributorMap,
    repo_full_name: &str,
    commits: &[RepoCommit],
    policy: &ReportPolicy,
) {
    for commit in commits {
        let (identity, url) = match commit.author_identity() {
            CommitAuthor::Linked { login, url } => (login, Some(url)),
            CommitAuthor::Unlinked { name } => (name, None),
        };

        if policy.is_ignored(&identity) {
            continue;
        }
        if let Some(cutoff) = policy.staff_cutoff(&identity) {
            if commit.authored_at() < cutoff {
                continue;
            }
        }

        let entry = contributors.entry(identity).or_default();
        entry.count += 1;
        if entry.url.is_none() {
            entry.url = url;
        }
        *entry.repos.entry(repo_full_name.to_string()).or_insert(0) += 1;
    }
}

/// Drop current organization members from the finished map. Membership is
/// checked as of now, regardless of when the commits were made.
pub fn drop_members(contributors: ContributorMap, members: &HashSet<String>) -> ContributorMap {
    contributors
        .into_iter()
        .filter(|(identity, _)| !members.contains(identity))
        .collect()
}
