use crate::aggregate::{self, ContributorMap};
use crate::dates;
use crate::github::GithubClient;
use crate::model::{Contributor, DateRange, RepoCommit};
use crate::page;
use crate::policy::ReportPolicy;
use crate::repos;
use anyhow::Context;
use chrono::SecondsFormat;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;

/// Run the whole report: resolve the window, cut the repository list, fold
/// every included repository's commits, filter, and print. Nothing is
/// printed past the narration until the full aggregation has succeeded.
pub fn exec(
    client: &GithubClient,
    policy: &ReportPolicy,
    start_tag: &str,
    end_tag: Option<&str>,
    verbose: bool,
) -> anyhow::Result<()> {
    println!("Calculating start and end date...");
    let range = dates::resolve_range(client, &policy.main_repo, start_tag, end_tag)
        .context("Failed to resolve the report window")?;
    println!(
        "Counting contributions between {} and {}",
        range.start.to_rfc3339_opts(SecondsFormat::Secs, true),
        range.end.to_rfc3339_opts(SecondsFormat::Secs, true)
    );

    println!("Reading org members...");
    let members = member_logins(client, &policy.org)?;

    let all_repos = page::collect_all(client.org_repos(&policy.org)?, |c| client.next_page(c))
        .context("Failed to list organization repositories")?;
    let selection = repos::select(all_repos, range.start, policy);

    let mut contributors = ContributorMap::new();
    for repo in &selection.included {
        println!("Reading commits for {}...", repo.full_name);
        let commits = fetch_commits(client, &repo.full_name, &range)
            .with_context(|| format!("Failed to read commits for {}", repo.full_name))?;
        aggregate::add_commits(&mut contributors, &repo.full_name, &commits, policy);
    }

    if !selection.ignored.is_empty() {
        println!("\n{}", style("Ignored repositories:").bold());
        for name in &selection.ignored {
            println!("{name}");
        }
    }

    let contributors = aggregate::drop_members(contributors, &members);
    let ranked = rank(contributors);

    println!("\n\n{}", style(format!("Contributors ({}):", ranked.len())).bold());
    for (name, contributor) in &ranked {
        println!("{}", format_contributor(name, contributor, verbose));
    }

    Ok(())
}

fn member_logins(client: &GithubClient, org: &str) -> anyhow::Result<HashSet<String>> {
    let members = page::collect_all(client.org_members(org)?, |c| client.next_page(c))
        .context("Failed to list organization members")?;
    Ok(members.into_iter().map(|m| m.login).collect())
}

fn fetch_commits(
    client: &GithubClient,
    repo_full_name: &str,
    range: &DateRange,
) -> crate::error::Result<Vec<RepoCommit>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Paging commits for {repo_full_name}..."));

    let commits = page::collect_all(client.commits_between(repo_full_name, range)?, |cursor| {
        pb.inc(1);
        client.next_page(cursor)
    });

    pb.finish_and_clear();
    commits
}

/// Order contributors for display: ascending by (count, name), then
/// reversed. The reversal makes the tie-break on equal counts descending by
/// name; that quirk is kept for compatibility with existing report output.
pub fn rank(contributors: ContributorMap) -> Vec<(String, Contributor)> {
    let mut ranked: Vec<_> = contributors.into_iter().collect();
    ranked.sort_by(|(a_name, a), (b_name, b)| (a.count, a_name).cmp(&(b.count, b_name)));
    ranked.reverse();
    ranked
}

/// One display line: right-justified count, then a markdown link when a
/// profile URL is known or the bare identity otherwise. Verbose mode appends
/// the per-repository counts, largest first.
pub fn format_contributor(name: &str, contributor: &Contributor, verbose: bool) -> String {
    let count = format!("{:>3}", contributor.count);
    let mut text = match &contributor.url {
        Some(url) => format!("{count} [{name}]({url})"),
        None => format!("{count} {name}"),
    };

    if verbose {
        let mut repos: Vec<(&str, u32)> = contributor
            .repos
            .iter()
            .map(|(repo, n)| (repo.as_str(), *n))
            .collect();
        repos.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        text.push_str(&format!(" ({repos:?})"));
    }

    text
}
