//! Pagination types for list endpoints.

use axum::http::Uri;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY, MAX_PAGE_NUMBER, MAX_PAGE_SIZE,
};
use crate::domain::{Category, Client, Employee, Order, Product, Supplier, UserResponse};

/// Sort direction for list endpoints
///
/// Parsed case-insensitively; anything other than `asc` sorts descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }
}

impl<'de> Deserialize<'de> for SortDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(SortDirection::parse(&raw))
    }
}

/// Pagination and sorting query parameters, shared by every list endpoint
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number, starting at 0 (at most 1000000)
    #[serde(default = "default_page", deserialize_with = "bounded_page")]
    pub page: u64,
    /// Items per page (capped at 100)
    #[serde(default = "default_size")]
    pub size: u64,
    /// Column to sort by; unknown columns fall back to `id`
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// `asc` or `desc`, any case
    #[serde(default)]
    #[param(value_type = String)]
    pub direction: SortDirection,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn default_sort_by() -> String {
    DEFAULT_SORT_BY.to_string()
}

fn bounded_page<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let page = u64::deserialize(deserializer)?;
    if page > MAX_PAGE_NUMBER {
        return Err(serde::de::Error::custom(format!(
            "page must not exceed {}",
            MAX_PAGE_NUMBER
        )));
    }
    Ok(page)
}

impl PaginationParams {
    /// Page number as used in queries, never above [`MAX_PAGE_NUMBER`]
    pub fn page_index(&self) -> u64 {
        self.page.min(MAX_PAGE_NUMBER)
    }

    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        self.page_index() * self.limit()
    }

    /// Get limit capped at maximum, never zero
    pub fn limit(&self) -> u64 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn is_descending(&self) -> bool {
        self.direction == SortDirection::Desc
    }

    /// Replace an unknown `sort_by` with the default column, so the page
    /// reports the column the rows were really sorted by.
    pub fn sortable_by(mut self, columns: &[&str]) -> Self {
        if !columns.contains(&self.sort_by.as_str()) {
            self.sort_by = default_sort_by();
        }
        self
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
            sort_by: default_sort_by(),
            direction: SortDirection::Asc,
        }
    }
}

/// One page of results plus the metadata needed to fetch the next one
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(
    OrderPage = Paginated<Order>,
    CategoryPage = Paginated<Category>,
    ProductPage = Paginated<Product>,
    ClientPage = Paginated<Client>,
    UserPage = Paginated<UserResponse>,
    SupplierPage = Paginated<Supplier>,
    EmployeePage = Paginated<Employee>
)]
pub struct Paginated<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub sort_by: String,
    pub direction: SortDirection,
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(content: Vec<T>, params: &PaginationParams, total_elements: u64) -> Self {
        let size = params.limit();
        Self {
            content,
            page: params.page,
            size,
            total_elements,
            total_pages: total_elements.div_ceil(size),
            sort_by: params.sort_by.clone(),
            direction: params.direction,
        }
    }

    /// Convert each item, keeping the page metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            sort_by: self.sort_by,
            direction: self.direction,
        }
    }

    /// `link` header value with `next`, `prev`, `first` and `last` relations
    /// for the request at `uri`. Other query parameters are carried over.
    pub fn link_header(&self, uri: &Uri) -> String {
        let kept: Vec<&str> = uri
            .query()
            .unwrap_or_default()
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter(|pair| !pair.starts_with("page=") && !pair.starts_with("size="))
            .collect();

        let href = |page: u64| {
            let mut query = kept.join("&");
            if !query.is_empty() {
                query.push('&');
            }
            format!("<{}?{}page={}&size={}>", uri.path(), query, page, self.size)
        };

        let last = self.total_pages.saturating_sub(1);
        let mut links = Vec::new();
        if self.page < last {
            links.push(format!("{}; rel=\"next\"", href(self.page + 1)));
        }
        if self.page > 0 {
            links.push(format!("{}; rel=\"prev\"", href(self.page - 1)));
            links.push(format!("{}; rel=\"first\"", href(0)));
        }
        if self.page < last {
            links.push(format!("{}; rel=\"last\"", href(last)));
        }
        links.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: u64, size: u64) -> PaginationParams {
        PaginationParams {
            page,
            size,
            ..Default::default()
        }
    }

    fn query(raw: &str) -> Result<PaginationParams, axum::extract::rejection::QueryRejection> {
        let uri: Uri = format!("/items?{}", raw).parse().unwrap();
        axum::extract::Query::try_from_uri(&uri).map(|q| q.0)
    }

    #[test]
    fn test_offset_is_zero_based() {
        assert_eq!(params(0, 10).offset(), 0);
        assert_eq!(params(3, 10).offset(), 30);
    }

    #[test]
    fn test_limit_is_capped() {
        assert_eq!(params(0, 1000).limit(), MAX_PAGE_SIZE);
        assert_eq!(params(0, 0).limit(), 1);
    }

    #[test]
    fn test_huge_page_is_rejected() {
        assert!(query("page=18446744073709551615").is_err());
        assert!(query(&format!("page={}", MAX_PAGE_NUMBER + 1)).is_err());
        assert_eq!(
            query(&format!("page={}", MAX_PAGE_NUMBER)).unwrap().page,
            MAX_PAGE_NUMBER
        );
    }

    #[test]
    fn test_offset_never_overflows() {
        let p = params(u64::MAX, u64::MAX);
        assert_eq!(p.page_index(), MAX_PAGE_NUMBER);
        assert_eq!(p.offset(), MAX_PAGE_NUMBER * MAX_PAGE_SIZE);
        assert!(p.offset() <= i64::MAX as u64);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = Paginated::new(vec![1, 2, 3], &params(0, 3), 7);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.size, 3);

        let empty: Paginated<u8> = Paginated::new(vec![], &params(0, 10), 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Paginated::new(vec![1, 2], &params(1, 2), 4).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_elements, 4);
    }

    #[test]
    fn test_direction_is_case_insensitive() {
        assert_eq!(query("direction=ASC").unwrap().direction, SortDirection::Asc);
        assert_eq!(query("direction=DESC").unwrap().direction, SortDirection::Desc);
        assert_eq!(query("direction=desc").unwrap().direction, SortDirection::Desc);
        assert_eq!(query("direction=sideways").unwrap().direction, SortDirection::Desc);
        assert_eq!(query("").unwrap().direction, SortDirection::Asc);
    }

    #[test]
    fn test_unknown_sort_column_falls_back_to_id() {
        let p = query("sort_by=bogus").unwrap().sortable_by(&["id", "name"]);
        assert_eq!(p.sort_by, "id");

        let p = query("sort_by=name").unwrap().sortable_by(&["id", "name"]);
        assert_eq!(p.sort_by, "name");
    }

    #[test]
    fn test_link_header_middle_page() {
        let page = Paginated::new(vec![1], &params(1, 10), 35);
        let uri: Uri = "/api/products?page=1&size=10&name=lap".parse().unwrap();

        assert_eq!(
            page.link_header(&uri),
            "</api/products?name=lap&page=2&size=10>; rel=\"next\", \
             </api/products?name=lap&page=0&size=10>; rel=\"prev\", \
             </api/products?name=lap&page=0&size=10>; rel=\"first\", \
             </api/products?name=lap&page=3&size=10>; rel=\"last\""
        );
    }

    #[test]
    fn test_link_header_single_page_is_empty() {
        let page = Paginated::new(vec![1], &params(0, 10), 3);
        let uri: Uri = "/api/orders".parse().unwrap();
        assert_eq!(page.link_header(&uri), "");
    }
}
