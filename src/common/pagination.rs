use axum::http::Uri;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Page-number pagination parameters shared by all list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// 1-based page number
    pub page: Option<u64>,
    /// Results per page, capped at 100 (default 20)
    pub page_size: Option<u64>,
}

impl Pagination {
    pub fn page(self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(self) -> u64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(self) -> u64 {
        (self.page() - 1) * self.page_size()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListInfo {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results_per_page: u64,
}

/// Standard list envelope: `{"info": {...}, "results": [...]}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListEnvelope<T> {
    pub info: ListInfo,
    pub results: Vec<T>,
}

impl<T> ListEnvelope<T> {
    /// Wrap one shaped page. `uri` is the original request URI; next and
    /// previous links are that URI with the `page` parameter substituted.
    pub fn new(uri: &Uri, pagination: Pagination, count: u64, results: Vec<T>) -> Self {
        let page = pagination.page();
        let page_size = pagination.page_size();
        let total_pages = count.div_ceil(page_size);

        let next = (page < total_pages).then(|| with_page(uri, page + 1));
        let previous = (page > 1 && count > 0).then(|| with_page(uri, page - 1));

        Self {
            info: ListInfo {
                count,
                next,
                previous,
                results_per_page: results.len() as u64,
            },
            results,
        }
    }
}

/// Rebuild the request's path and query with the `page` parameter replaced.
fn with_page(uri: &Uri, page: u64) -> String {
    let mut pairs: Vec<String> = uri
        .query()
        .unwrap_or("")
        .split('&')
        .filter(|pair| !pair.is_empty() && !pair.starts_with("page=") && *pair != "page")
        .map(str::to_owned)
        .collect();
    pairs.push(format!("page={page}"));
    format!("{}?{}", uri.path(), pairs.join("&"))
}
