use crate::domain::pagination::Page;
use serde::{Deserialize, Serialize};

/// Offset page returned to the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct PageDto<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub page_number: u32,
    pub page_size: u32,
}

impl<T> PageDto<T> {
    pub fn from_page<U>(page: Page<U>) -> Self
    where
        U: Into<T>,
    {
        let total_pages = page.total_pages();
        let page = page.map(Into::into);
        Self {
            content: page.content,
            total_elements: page.total_elements,
            total_pages,
            page_number: page.page_number,
            page_size: page.page_size,
        }
    }
}
