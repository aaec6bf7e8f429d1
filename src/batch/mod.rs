pub mod counties;
pub mod provinces;
pub mod report;

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use crate::osm::download::{BoundarySource, FetchError};

    /// Answers queries with canned documents. A query containing one of the
    /// `failing` markers gets a non-JSON error instead.
    pub struct CannedSource {
        pub response: serde_json::Value,
        pub failing: Vec<String>,
        pub queries: RefCell<Vec<String>>,
    }

    impl CannedSource {
        pub fn new(response: serde_json::Value) -> Self {
            Self {
                response,
                failing: Vec::new(),
                queries: RefCell::new(Vec::new()),
            }
        }

        pub fn failing_on(mut self, marker: &str) -> Self {
            self.failing.push(marker.to_string());
            self
        }
    }

    impl BoundarySource for CannedSource {
        fn fetch(&self, query: &str) -> Result<serde_json::Value, FetchError> {
            self.queries.borrow_mut().push(query.to_string());
            if self.failing.iter().any(|marker| query.contains(marker.as_str())) {
                let err = serde_json::from_str::<serde_json::Value>("<html>rate limited</html>")
                    .unwrap_err();
                return Err(FetchError::NotJson(err));
            }
            Ok(self.response.clone())
        }
    }
}
