//! 依照 `links.next` 一頁一頁往下抓，直到沒有下一頁
//!
//! 每個 resource 內部的頁面是依序抓的：第 N 頁的 next 連結拿到之前不會發第 N+1 頁的請求。
//! 任何一頁失敗整個 fetch 就失敗，已經抓到的頁面直接丟掉。

use crate::{errors::AppError, structs::page::Page, utils::reqwest::get_json};
use async_trait::async_trait;
use futures::{stream, Stream, TryStreamExt};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

#[async_trait]
pub trait PageSource<T> {
    async fn fetch_page(&self, url: &Url) -> Result<Page<T>, AppError>;
}

/// 透過 reqwest 打遠端 API 的 PageSource
pub struct HttpPageSource<'a> {
    client: &'a Client,
}

impl<'a> HttpPageSource<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<T> PageSource<T> for HttpPageSource<'_>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch_page(&self, url: &Url) -> Result<Page<T>, AppError> {
        get_json(self.client, url).await
    }
}

struct Cursor {
    next: Option<Url>,
    fetched: usize,
}

/// 每次 poll 出一整頁的資料
pub fn paginate<'a, T, S>(
    source: &'a S,
    start: Url,
    max_pages: Option<usize>,
) -> impl Stream<Item = Result<Vec<T>, AppError>> + 'a
where
    S: PageSource<T> + Sync + ?Sized,
    T: 'a,
{
    let cursor = Cursor {
        next: Some(start),
        fetched: 0,
    };

    stream::try_unfold(cursor, move |cursor| next_page(source, cursor, max_pages))
}

async fn next_page<T, S>(
    source: &S,
    cursor: Cursor,
    max_pages: Option<usize>,
) -> Result<Option<(Vec<T>, Cursor)>, AppError>
where
    S: PageSource<T> + Sync + ?Sized,
{
    let Some(url) = cursor.next else {
        return Ok(None);
    };

    if let Some(max_pages) = max_pages {
        if cursor.fetched >= max_pages {
            return Err(AppError::PageLimitExceeded {
                url: url.to_string(),
                max_pages,
            });
        }
    }

    let page = source.fetch_page(&url).await?;
    let next = page
        .next_link()
        .map(|link| resolve_next_link(&url, link))
        .transpose()?;

    tracing::debug!(
        url = %url,
        items = page.data.len(),
        has_next = next.is_some(),
        "fetched page"
    );

    Ok(Some((
        page.data,
        Cursor {
            next,
            fetched: cursor.fetched + 1,
        },
    )))
}

/// 把所有頁面攤平成一個 Vec，頁面順序與頁內順序都保留
pub async fn fetch_all<T, S>(
    source: &S,
    start: Url,
    max_pages: Option<usize>,
) -> Result<Vec<T>, AppError>
where
    S: PageSource<T> + Sync + ?Sized,
{
    let (items, pages) = paginate(source, start.clone(), max_pages)
        .try_fold((Vec::new(), 0usize), |(mut items, pages), page| async move {
            items.extend(page);
            Ok((items, pages + 1))
        })
        .await?;

    tracing::info!(url = %start, pages, items = items.len(), "fetched all pages");

    Ok(items)
}

// next 可能是完整網址，也可能是 `/shifts?page=2` 這種相對路徑
fn resolve_next_link(current: &Url, link: &str) -> Result<Url, AppError> {
    current.join(link).map_err(|err| AppError::InvalidUrl {
        url: link.to_string(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::{collections::HashMap, sync::Mutex};

    /// 記住被請求過哪些 url 的假資料來源
    struct FakePages {
        pages: HashMap<String, Page<i64>>,
        failing: Vec<String>,
        requested: Mutex<Vec<String>>,
    }

    impl FakePages {
        fn new(pages: Vec<(&str, Page<i64>)>) -> Self {
            Self {
                pages: pages
                    .into_iter()
                    .map(|(url, page)| (url.to_string(), page))
                    .collect(),
                failing: Vec::new(),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn failing_at(mut self, url: &str) -> Self {
            self.failing.push(url.to_string());
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageSource<i64> for FakePages {
        async fn fetch_page(&self, url: &Url) -> Result<Page<i64>, AppError> {
            self.requested.lock().unwrap().push(url.to_string());

            if self.failing.contains(&url.to_string()) {
                return Err(AppError::UnexpectedStatus {
                    url: url.to_string(),
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                });
            }

            self.pages
                .get(url.as_str())
                .cloned()
                .ok_or_else(|| AppError::UnexpectedStatus {
                    url: url.to_string(),
                    status: StatusCode::NOT_FOUND,
                })
        }
    }

    fn start() -> Url {
        Url::parse("http://api.test/shifts").unwrap()
    }

    #[tokio::test]
    async fn single_empty_page() {
        let source = FakePages::new(vec![("http://api.test/shifts", Page::new(vec![], None))]);

        let items = fetch_all(&source, start(), None).await.unwrap();

        assert!(items.is_empty());
        assert_eq!(source.requested(), vec!["http://api.test/shifts"]);
    }

    #[tokio::test]
    async fn single_page() {
        let source = FakePages::new(vec![(
            "http://api.test/shifts",
            Page::new(vec![3, 1, 2], None),
        )]);

        let items = fetch_all(&source, start(), None).await.unwrap();

        assert_eq!(items, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn pages_are_concatenated_in_order() {
        let source = FakePages::new(vec![
            (
                "http://api.test/shifts",
                Page::new(vec![1, 2], Some("http://api.test/shifts?page=2")),
            ),
            (
                "http://api.test/shifts?page=2",
                Page::new(vec![], Some("/shifts?page=3")),
            ),
            ("http://api.test/shifts?page=3", Page::new(vec![9, 4], None)),
            // 不應該被請求
            ("http://api.test/shifts?page=4", Page::new(vec![100], None)),
        ]);

        let items = fetch_all(&source, start(), None).await.unwrap();

        assert_eq!(items, vec![1, 2, 9, 4]);
        assert_eq!(
            source.requested(),
            vec![
                "http://api.test/shifts",
                "http://api.test/shifts?page=2",
                "http://api.test/shifts?page=3",
            ]
        );
    }

    #[tokio::test]
    async fn paginate_yields_one_item_per_page() {
        let source = FakePages::new(vec![
            (
                "http://api.test/shifts",
                Page::new(vec![1], Some("?page=2")),
            ),
            ("http://api.test/shifts?page=2", Page::new(vec![2, 3], None)),
        ]);

        let pages: Vec<Vec<i64>> = paginate(&source, start(), None)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(pages, vec![vec![1], vec![2, 3]]);
    }

    #[tokio::test]
    async fn failure_on_later_page_discards_everything() {
        let source = FakePages::new(vec![
            (
                "http://api.test/shifts",
                Page::new(vec![1, 2], Some("/shifts?page=2")),
            ),
            (
                "http://api.test/shifts?page=2",
                Page::new(vec![3], Some("/shifts?page=3")),
            ),
            ("http://api.test/shifts?page=3", Page::new(vec![4], None)),
        ])
        .failing_at("http://api.test/shifts?page=2");

        let result = fetch_all(&source, start(), None).await;

        match result {
            Err(AppError::UnexpectedStatus { url, status }) => {
                assert_eq!(url, "http://api.test/shifts?page=2");
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            }
            other => panic!("expected status error, got {:?}", other),
        }
        assert_eq!(source.requested().len(), 2);
    }

    #[tokio::test]
    async fn page_limit_stops_endless_listing() {
        let source = FakePages::new(vec![(
            "http://api.test/shifts",
            Page::new(vec![1], Some("http://api.test/shifts")),
        )]);

        let result = fetch_all(&source, start(), Some(3)).await;

        assert!(matches!(
            result,
            Err(AppError::PageLimitExceeded { max_pages: 3, .. })
        ));
        assert_eq!(source.requested().len(), 3);
    }

    #[tokio::test]
    async fn page_limit_allows_exact_page_count() {
        let source = FakePages::new(vec![
            (
                "http://api.test/shifts",
                Page::new(vec![1], Some("/shifts?page=2")),
            ),
            ("http://api.test/shifts?page=2", Page::new(vec![2], None)),
        ]);

        let items = fetch_all(&source, start(), Some(2)).await.unwrap();

        assert_eq!(items, vec![1, 2]);
    }

    #[test]
    fn next_links_resolve_against_current_page() {
        let current = Url::parse("http://api.test/shifts?page=1").unwrap();
        assert_eq!(
            resolve_next_link(&current, "/shifts?page=2").unwrap().as_str(),
            "http://api.test/shifts?page=2"
        );
        assert_eq!(
            resolve_next_link(&current, "http://other.test/shifts?page=2")
                .unwrap()
                .as_str(),
            "http://other.test/shifts?page=2"
        );
        assert!(matches!(
            resolve_next_link(&current, "http://[::1"),
            Err(AppError::InvalidUrl { .. })
        ));
    }
}
