use crate::error::Result;

/// Opaque pointer to the next page of a list result. Holds the prefilled
/// next-link URL the API handed back, so the walker never needs to know how
/// any particular endpoint paginates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of a paginated list result.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<Cursor>,
}

/// Follow `next` cursors until the list is exhausted, concatenating pages in
/// order. Item order within and across pages is preserved.
pub fn collect_all<T, F>(first: Page<T>, mut next_page: F) -> Result<Vec<T>>
where
    F: FnMut(&Cursor) -> Result<Page<T>>,
{
    let mut items = first.items;
    let mut next = first.next;

    while let Some(cursor) = next {
        let page = next_page(&cursor)?;
        items.extend(page.items);
        next = page.next;
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;
    use pretty_assertions::assert_eq;

    fn page(items: &[u32], next: Option<&str>) -> Page<u32> {
        Page {
            items: items.to_vec(),
            next: next.map(Cursor::new),
        }
    }

    #[test]
    fn single_page_needs_no_fetches() {
        let collected = collect_all(page(&[1, 2, 3], None), |_| {
            panic!("no next page should be fetched")
        })
        .unwrap();
        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[test]
    fn concatenates_pages_in_order() {
        let collected = collect_all(page(&[1, 2], Some("p2")), |cursor| {
            Ok(match cursor.as_str() {
                "p2" => page(&[3], Some("p3")),
                "p3" => page(&[4, 5, 6], None),
                other => panic!("unexpected cursor {other}"),
            })
        })
        .unwrap();
        assert_eq!(collected, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn empty_trailing_page_is_fine() {
        let collected = collect_all(page(&[], Some("p2")), |_| Ok(page(&[], None))).unwrap();
        assert_eq!(collected, Vec::<u32>::new());
    }

    #[test]
    fn fetch_errors_propagate() {
        let result = collect_all(page(&[1], Some("p2")), |_| {
            Err(StatsError::Parse("boom".to_string()))
        });
        assert!(result.is_err());
    }
}
