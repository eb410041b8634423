use crate::core::{ContentBlock, ContentSource, Entry, Listing, PageQuery, PageRecord};
use crate::utils::error::Result;
use std::future::Future;

/// Walks a cursor-paginated endpoint to the end and returns every full record
/// in arrival order.
///
/// `fetch` is called with `None` first and then with each `next_cursor`.
/// Traversal stops once a page reports `has_more == false` or omits the next
/// cursor. Partial entries are dropped. The first error aborts the walk and
/// is returned as-is.
pub async fn collect_all<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Listing<T>>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut page_number = 0usize;

    loop {
        page_number += 1;
        let listing = fetch(cursor.take()).await?;
        let received = listing.results.len();

        let before = items.len();
        items.extend(listing.results.into_iter().filter_map(Entry::into_full));
        let skipped = received - (items.len() - before);

        tracing::debug!(
            "Fetched page {} with {} results ({} partial skipped), has_more={}",
            page_number,
            received,
            skipped,
            listing.has_more
        );

        cursor = if listing.has_more {
            listing.next_cursor
        } else {
            None
        };

        if cursor.is_none() {
            break;
        }
    }

    Ok(items)
}

pub async fn query_all_pages<S>(
    source: &S,
    data_source_id: &str,
    query: &PageQuery,
) -> Result<Vec<PageRecord>>
where
    S: ContentSource + ?Sized,
{
    collect_all(|cursor| async move {
        source
            .query_pages(data_source_id, query, cursor.as_deref())
            .await
    })
    .await
}

pub async fn list_all_blocks<S>(source: &S, page_id: &str) -> Result<Vec<ContentBlock>>
where
    S: ContentSource + ?Sized,
{
    collect_all(|cursor| async move { source.list_blocks(page_id, cursor.as_deref()).await })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ContentError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn page(items: &[u32], has_more: bool, next: Option<&str>) -> Listing<u32> {
        Listing {
            results: items.iter().map(|i| Entry::Full(*i)).collect(),
            has_more,
            next_cursor: next.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_walks_every_page_in_order() {
        let pages = vec![
            page(&[1, 2], true, Some("c1")),
            page(&[3], true, Some("c2")),
            page(&[4, 5], false, None),
        ];
        let calls = AtomicUsize::new(0);
        let seen_cursors = Mutex::new(Vec::new());

        let items = collect_all(|cursor| {
            let index = calls.fetch_add(1, Ordering::SeqCst);
            seen_cursors.lock().unwrap().push(cursor);
            let listing = pages[index].clone();
            async move { Ok(listing) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            *seen_cursors.lock().unwrap(),
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_single_page_issues_one_call() {
        let calls = AtomicUsize::new(0);
        let items = collect_all(|_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(page(&[7], false, Some("ignored"))) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![7]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stops_when_cursor_missing_despite_has_more() {
        let calls = AtomicUsize::new(0);
        let items = collect_all(|_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(page(&[1], true, None)) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_partial_entries_are_skipped_not_fatal() {
        let pages = vec![
            Listing {
                results: vec![
                    Entry::Full(1),
                    Entry::Partial(serde_json::json!({"object": "page", "id": "x"})),
                ],
                has_more: true,
                next_cursor: Some("c1".to_string()),
            },
            Listing {
                results: vec![Entry::Partial(serde_json::json!({})), Entry::Full(2)],
                has_more: false,
                next_cursor: None,
            },
        ];
        let calls = AtomicUsize::new(0);

        let items = collect_all(|_| {
            let listing = pages[calls.fetch_add(1, Ordering::SeqCst)].clone();
            async move { Ok(listing) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_error_aborts_without_partial_result() {
        let calls = AtomicUsize::new(0);
        let result: Result<Vec<u32>> = collect_all(|_| {
            let index = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if index == 0 {
                    Ok(page(&[1], true, Some("c1")))
                } else {
                    Err(ContentError::RateLimited {
                        service: "Notion".to_string(),
                    })
                }
            }
        })
        .await;

        assert!(matches!(result, Err(ContentError::RateLimited { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
