use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

/// A release tag as returned by the tag-listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub name: String,
    pub commit: CommitRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitRef {
    pub sha: String,
    pub url: String,
}

/// Response of the single-commit endpoint, trimmed to the fields we read.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub commit: CommitMeta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitMeta {
    pub author: GitSignature,
    pub committer: GitSignature,
}

/// Name and date recorded in the commit object itself, independent of any
/// platform account.
#[derive(Debug, Clone, Deserialize)]
pub struct GitSignature {
    pub name: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub full_name: String,
    pub fork: bool,
    pub pushed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub login: String,
}

/// One entry of a repository's commit listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoCommit {
    pub commit: CommitMeta,
    pub author: Option<Account>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub login: String,
    pub html_url: String,
}

/// Who authored a commit. The platform only links an account when the commit
/// email matches one; otherwise all we have is the raw name from the commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitAuthor {
    Linked { login: String, url: String },
    Unlinked { name: String },
}

impl RepoCommit {
    pub fn author_identity(&self) -> CommitAuthor {
        match &self.author {
            Some(account) => CommitAuthor::Linked {
                login: account.login.clone(),
                url: account.html_url.clone(),
            },
            None => CommitAuthor::Unlinked {
                name: self.commit.author.name.clone(),
            },
        }
    }

    pub fn authored_at(&self) -> DateTime<Utc> {
        self.commit.author.date
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Running totals for one contributor. Entries are only ever added while
/// commits are folded in; exclusion happens as a later pass.
#[derive(Debug, Clone, Default)]
pub struct Contributor {
    pub count: u32,
    pub url: Option<String>,
    pub repos: HashMap<String, u32>,
}
