use reqwest::Method;

/// Endpoints of the remote todo API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoEndpoint {
    FetchTodos,
}

impl TodoEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            TodoEndpoint::FetchTodos => "/todos",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            TodoEndpoint::FetchTodos => Method::GET,
        }
    }

    pub fn headers(&self) -> &'static [(&'static str, &'static str)] {
        &[("Content-Type", "application/json")]
    }

    /// Absolute URL of this endpoint under `base_url`
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}
