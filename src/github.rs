use crate::error::{Result, StatsError};
use crate::model::{CommitDetail, DateRange, Member, RepoCommit, RepoSummary, Tag};
use crate::page::{Cursor, Page};
use chrono::SecondsFormat;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

const API_ROOT: &str = "https://api.github.com";
const PER_PAGE: u32 = 100;
const USER_AGENT: &str = concat!("orgstats/", env!("CARGO_PKG_VERSION"));

/// Thin facade over the GitHub REST API. Every list operation returns one
/// page plus a cursor for the next one; retry and backoff are left to the
/// HTTP client.
pub struct GithubClient {
    http: Client,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http, token })
    }

    pub fn tags(&self, repo: &str) -> Result<Page<Tag>> {
        self.get_page(&format!("{API_ROOT}/repos/{repo}/tags?per_page={PER_PAGE}"))
    }

    /// Resolve a tag's commit reference to the full commit object.
    pub fn commit_detail(&self, url: &str) -> Result<CommitDetail> {
        Ok(self.send(url)?.json()?)
    }

    pub fn org_repos(&self, org: &str) -> Result<Page<RepoSummary>> {
        self.get_page(&format!(
            "{API_ROOT}/orgs/{org}/repos?type=public&per_page={PER_PAGE}"
        ))
    }

    pub fn org_members(&self, org: &str) -> Result<Page<Member>> {
        self.get_page(&format!("{API_ROOT}/orgs/{org}/members?per_page={PER_PAGE}"))
    }

    /// List a repository's commits restricted to the report window. The API
    /// applies the date bounds; pagination is ours to follow.
    pub fn commits_between(&self, repo: &str, range: &DateRange) -> Result<Page<RepoCommit>> {
        let since = range.start.to_rfc3339_opts(SecondsFormat::Secs, true);
        let until = range.end.to_rfc3339_opts(SecondsFormat::Secs, true);
        self.get_page(&format!(
            "{API_ROOT}/repos/{repo}/commits?since={since}&until={until}&per_page={PER_PAGE}"
        ))
    }

    /// Fetch the page behind a cursor produced by an earlier list call.
    pub fn next_page<T: DeserializeOwned>(&self, cursor: &Cursor) -> Result<Page<T>> {
        self.get_page(cursor.as_str())
    }

    fn get_page<T: DeserializeOwned>(&self, url: &str) -> Result<Page<T>> {
        let resp = self.send(url)?;
        let next = next_cursor(&resp);
        let items = resp.json()?;
        Ok(Page { items, next })
    }

    fn send(&self, url: &str) -> Result<Response> {
        let mut req = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send()?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let url = resp.url().to_string();
            let body = resp.text().unwrap_or_default();
            return Err(StatsError::Api { status, url, body });
        }
        Ok(resp)
    }
}

fn next_cursor(resp: &Response) -> Option<Cursor> {
    let link = resp.headers().get(reqwest::header::LINK)?.to_str().ok()?;
    parse_next_link(link).map(Cursor::new)
}

/// Extract the `rel="next"` target from a Link response header.
fn parse_next_link(header: &str) -> Option<&str> {
    for part in header.split(',') {
        let mut sections = part.trim().split(';');
        let target = sections.next()?.trim();
        if sections.any(|section| section.trim() == "rel=\"next\"") {
            return target.strip_prefix('<')?.strip_suffix('>');
        }
    }
    None
}
