use serde::Serialize;

/// Pagination metadata echoed back to list callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
}

/// A page of records plus its metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub meta: PageMeta,
    pub data: Vec<T>,
}
