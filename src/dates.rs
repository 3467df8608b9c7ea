use crate::error::{Result, StatsError};
use crate::github::GithubClient;
use crate::model::{DateRange, Tag};
use crate::page::{Cursor, Page};
use chrono::{DateTime, Utc};

/// Resolve the report window for a run: the committer date of the start tag
/// up to either the committer date of the end tag or, when no end tag was
/// given, the current time. The open end makes repeated runs drift; callers
/// wanting reproducible output must pass an end tag.
pub fn resolve_range(
    client: &GithubClient,
    repo: &str,
    start_tag: &str,
    end_tag: Option<&str>,
) -> Result<DateRange> {
    let first = client.tags(repo)?;
    let (start, end) = find_release_tags(first, |c| client.next_page(c), start_tag, end_tag)?;
    tag_dates(start, end, |tag| {
        Ok(client.commit_detail(&tag.commit.url)?.commit.committer.date)
    })
}

/// Locate the start tag and, when requested, the end tag by exact name.
/// Further pages are fetched only while a wanted tag is still missing; once
/// everything is found the remaining pages are left unread.
pub fn find_release_tags<F>(
    first: Page<Tag>,
    mut next_page: F,
    start_name: &str,
    end_name: Option<&str>,
) -> Result<(Tag, Option<Tag>)>
where
    F: FnMut(&Cursor) -> Result<Page<Tag>>,
{
    let mut start = None;
    let mut end = None;
    let mut page = first;

    loop {
        if start.is_none() {
            start = page.items.iter().find(|t| t.name == start_name).cloned();
        }
        if let Some(wanted) = end_name {
            if end.is_none() {
                end = page.items.iter().find(|t| t.name == wanted).cloned();
            }
        }

        let found_all = start.is_some() && (end_name.is_none() || end.is_some());
        if found_all {
            break;
        }
        match page.next.take() {
            Some(cursor) => page = next_page(&cursor)?,
            None => break,
        }
    }

    let start = start.ok_or_else(|| StatsError::TagNotFound {
        what: "start",
        name: start_name.to_string(),
    })?;
    if let Some(wanted) = end_name {
        if end.is_none() {
            return Err(StatsError::TagNotFound {
                what: "end",
                name: wanted.to_string(),
            });
        }
    }
    Ok((start, end))
}

fn tag_dates<F>(start: Tag, end: Option<Tag>, mut commit_date: F) -> Result<DateRange>
where
    F: FnMut(&Tag) -> Result<DateTime<Utc>>,
{
    let start_date = commit_date(&start)?;
    let end_date = match end {
        Some(tag) => commit_date(&tag)?,
        None => Utc::now(),
    };
    Ok(DateRange {
        start: start_date,
        end: end_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CommitRef;
    use chrono::{Duration, TimeZone};

    fn tag(name: &str) -> Tag {
        Tag {
            name: name.to_string(),
            commit: CommitRef {
                sha: format!("sha-{name}"),
                url: format!("https://api.example.com/commits/sha-{name}"),
            },
        }
    }

    fn tag_page(names: &[&str], next: Option<&str>) -> Page<Tag> {
        Page {
            items: names.iter().map(|n| tag(n)).collect(),
            next: next.map(Cursor::new),
        }
    }

    #[test]
    fn stops_paging_once_both_tags_found() {
        let mut fetches = 0;
        let (start, end) = find_release_tags(
            tag_page(&["v1.2", "v1.1"], Some("p2")),
            |cursor| {
                fetches += 1;
                Ok(match cursor.as_str() {
                    "p2" => tag_page(&["v1.0", "v0.9"], Some("p3")),
                    other => panic!("walked past the needed page: {other}"),
                })
            },
            "v1.0",
            Some("v1.1"),
        )
        .unwrap();

        assert_eq!(fetches, 1);
        assert_eq!(start.name, "v1.0");
        assert_eq!(end.unwrap().name, "v1.1");
    }

    #[test]
    fn no_end_tag_means_only_start_is_searched() {
        let (start, end) = find_release_tags(
            tag_page(&["v2.0"], Some("p2")),
            |_| panic!("start was on the first page"),
            "v2.0",
            None,
        )
        .unwrap();
        assert_eq!(start.name, "v2.0");
        assert!(end.is_none());
    }

    #[test]
    fn missing_start_tag_is_named_in_the_error() {
        let err = find_release_tags(
            tag_page(&["v1.0"], Some("p2")),
            |_| Ok(tag_page(&["v0.9"], None)),
            "v9.9",
            None,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Could not find start tag v9.9");
    }

    #[test]
    fn missing_end_tag_is_named_in_the_error() {
        let err = find_release_tags(tag_page(&["v1.0"], None), |_| unreachable!(), "v1.0", Some("v1.5"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Could not find end tag v1.5");
    }

    #[test]
    fn range_uses_committer_dates_of_both_tags() {
        let dates = [
            ("sha-v1.0", Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap()),
            ("sha-v1.1", Utc.with_ymd_and_hms(2022, 2, 1, 0, 0, 0).unwrap()),
        ];
        let range = tag_dates(tag("v1.0"), Some(tag("v1.1")), |t| {
            Ok(dates
                .iter()
                .find(|(sha, _)| *sha == t.commit.sha)
                .map(|(_, date)| *date)
                .unwrap())
        })
        .unwrap();

        assert_eq!(range.start, dates[0].1);
        assert_eq!(range.end, dates[1].1);
    }

    #[test]
    fn open_range_ends_now() {
        let before = Utc::now();
        let range = tag_dates(tag("v1.0"), None, |_| Ok(before - Duration::days(30))).unwrap();
        let after = Utc::now();

        assert!(range.end >= before && range.end <= after);
    }
}
