use crate::domain::errors::{DomainError, DomainResult};

/// Zero-based page request. Construction validates bounds so repositories can
/// assume a non-negative page and a size within `1..=max_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    pub fn new(page: i64, size: i64, max_size: u32) -> DomainResult<Self> {
        if page < 0 {
            return Err(DomainError::Validation("page must not be negative".into()));
        }
        if size <= 0 {
            return Err(DomainError::Validation("size must be positive".into()));
        }
        if size > i64::from(max_size) {
            return Err(DomainError::Validation(format!(
                "size must not exceed {max_size}"
            )));
        }
        let page = u32::try_from(page)
            .map_err(|_| DomainError::Validation("page is out of range".into()))?;

        Ok(Self {
            page,
            size: size as u32,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub page_number: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: u64, request: PageRequest) -> Self {
        Self {
            content,
            total_elements,
            page_number: request.page(),
            page_size: request.size(),
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    pub fn total_pages(&self) -> u32 {
        if self.total_elements == 0 || self.page_size == 0 {
            0
        } else {
            ((self.total_elements - 1) / u64::from(self.page_size) + 1) as u32
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_page_and_bad_sizes() {
        assert!(PageRequest::new(-1, 10, 100).is_err());
        assert!(PageRequest::new(0, 0, 100).is_err());
        assert!(PageRequest::new(0, 101, 100).is_err());
        assert!(PageRequest::new(0, 100, 100).is_ok());
    }

    #[test]
    fn offset_is_page_times_size() {
        let req = PageRequest::new(3, 25, 100).unwrap();
        assert_eq!(req.offset(), 75);
        assert_eq!(req.limit(), 25);
    }

    #[test]
    fn total_pages_rounds_up() {
        let req = PageRequest::new(0, 10, 100).unwrap();
        assert_eq!(Page::<()>::new(vec![], 0, req).total_pages(), 0);
        assert_eq!(Page::<()>::new(vec![], 10, req).total_pages(), 1);
        assert_eq!(Page::<()>::new(vec![], 11, req).total_pages(), 2);
    }
}
