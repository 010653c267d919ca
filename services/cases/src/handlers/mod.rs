use causelist_domain::pagination::PageRequest;

pub mod case;
pub mod dashboard;
pub mod document;
pub mod event;
pub mod user;

/// Build a `PageRequest` from optional query params, falling back to the
/// shared defaults.
pub(crate) fn page_request(per_page: Option<u32>, page: Option<u32>) -> PageRequest {
    let defaults = PageRequest::default();
    PageRequest {
        per_page: per_page.unwrap_or(defaults.per_page),
        page: page.unwrap_or(defaults.page),
    }
}
