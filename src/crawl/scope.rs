// src/crawl/scope.rs
// =============================================================================
// Which URLs a crawl is allowed to touch.
//
// The scope is derived once from the seed URL:
// - origin: scheme + host + port must match exactly
// - path prefix: the candidate's path must sit under the seed's path
//
// Prefix matching respects path segments. With a seed path of "/docs",
// "/docs", "/docs/" and "/docs/intro" are in scope but "/docs-old" is not.
// With a seed path of "/docs/" the bare "/docs" is out of scope.
// =============================================================================

use url::{Origin, Url};

#[derive(Debug, Clone)]
pub struct ScopeFilter {
    origin: Origin,
    path_prefix: String,
}

impl ScopeFilter {
    pub fn from_seed(seed: &Url) -> Self {
        Self {
            origin: seed.origin(),
            path_prefix: seed.path().to_string(),
        }
    }

    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    pub fn allows(&self, url: &Url) -> bool {
        url.origin() == self.origin && self.contains_path(url.path())
    }

    fn contains_path(&self, path: &str) -> bool {
        let prefix = self.path_prefix.as_str();

        if prefix.ends_with('/') {
            return path.starts_with(prefix);
        }

        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}
