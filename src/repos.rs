use crate::model::RepoSummary;
use crate::policy::ReportPolicy;
use chrono::{DateTime, Utc};

/// Outcome of the repository cut: repos whose commits will be read, and the
/// names of forks that were skipped (listed at the end of the run).
pub struct RepoSelection {
    pub included: Vec<RepoSummary>,
    pub ignored: Vec<String>,
}

/// Keep repositories pushed to since the window start, then divert forks
/// that are not on the allow-list into the ignored listing. A repository
/// last pushed before the window cannot hold in-range commits, so skipping
/// it saves the commit-listing calls entirely.
pub fn select(repos: Vec<RepoSummary>, start: DateTime<Utc>, policy: &ReportPolicy) -> RepoSelection {
    let mut included = Vec::new();
    let mut ignored = Vec::new();

    for repo in repos {
        let pushed_in_window = repo.pushed_at.is_some_and(|pushed| pushed >= start);
        if !pushed_in_window {
            continue;
        }

        if repo.fork && !policy.is_included_fork(&repo.name) {
            ignored.push(repo.name);
        } else {
            included.push(repo);
        }
    }

    RepoSelection { included, ignored }
}
