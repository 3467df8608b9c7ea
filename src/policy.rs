use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;

/// Policy tables for one report run: which org to scan, which forks still
/// count, which logins are bots, and who was staff until when. Built once
/// at startup and passed by reference so tests can substitute their own.
#[derive(Debug, Clone)]
pub struct ReportPolicy {
    pub org: String,
    pub main_repo: String,
    pub included_forks: Vec<String>,
    pub ignored_logins: Vec<String>,
    pub staff_until: HashMap<String, DateTime<Utc>>,
}

impl ReportPolicy {
    pub fn discourse() -> Self {
        let staff_until = [
            ("riking", midnight(2021, 7, 14)),
            ("eviltrout", midnight(2022, 4, 11)),
            ("udan11", midnight(2022, 4, 11)),
            ("markvanlan", midnight(2022, 4, 25)),
            ("justindirose", midnight(2022, 5, 17)),
            ("hnb-ku", midnight(2022, 9, 15)),
            ("scossar", midnight(2022, 9, 15)),
            ("frank3manuel", midnight(2022, 11, 2)),
        ]
        .into_iter()
        .map(|(login, date)| (login.to_string(), date))
        .collect();

        Self {
            org: "discourse".to_string(),
            main_repo: "discourse/discourse".to_string(),
            included_forks: vec![
                "discourse-akismet".to_string(),
                "discourse-signatures".to_string(),
                "discourse-sitemap".to_string(),
            ],
            ignored_logins: vec![
                "dependabot[bot]".to_string(),
                "discourse-translator-bot".to_string(),
                "github-actions[bot]".to_string(),
            ],
            staff_until,
        }
    }

    pub fn is_ignored(&self, identity: &str) -> bool {
        self.ignored_logins.iter().any(|login| login == identity)
    }

    pub fn staff_cutoff(&self, identity: &str) -> Option<DateTime<Utc>> {
        self.staff_until.get(identity).copied()
    }

    pub fn is_included_fork(&self, repo_name: &str) -> bool {
        self.included_forks.iter().any(|name| name == repo_name)
    }
}

fn midnight(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    // All call sites pass literal valid dates.
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}
