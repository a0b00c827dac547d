/// A request for one page of a keyed scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    /// Exclusive start key; the page begins after this key.
    pub after: Option<String>,
}

impl PageRequest {
    pub fn new(limit: usize) -> Self {
        Self { limit, after: None }
    }

    pub fn after(mut self, key: impl Into<String>) -> Self {
        self.after = Some(key.into());
        self
    }
}

/// One page of results and the cursor for the next page, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_builder() {
        let request = PageRequest::new(5).after("rust");
        assert_eq!(request.limit, 5);
        assert_eq!(request.after.as_deref(), Some("rust"));
    }

    #[test]
    fn test_has_more_follows_cursor() {
        let last: Page<u8> = Page {
            items: vec![1],
            next_cursor: None,
        };
        assert!(!last.has_more());

        let more: Page<u8> = Page {
            items: vec![1],
            next_cursor: Some("a".to_string()),
        };
        assert!(more.has_more());
    }
}
