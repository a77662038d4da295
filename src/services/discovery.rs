//! Dependent discovery.
//!
//! Any source that can answer "given a module, return up to N candidate
//! project identities" fits behind `DependentSource`. The default one reads
//! the importers tab of a pkg.go.dev-style index page.

use crate::domain::constants::{DEFAULT_DISCOVERY_LIMIT, DISCOVERY_HTTP_TIMEOUT_SECS};
use crate::domain::errors::DeptestError;
use crate::domain::models::Project;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use std::time::Duration;

pub trait DependentSource {
    fn fetch_dependents(&self, module: &str, limit: usize) -> anyhow::Result<Vec<Project>>;
}

pub struct PkgGoDevSource {
    base_url: String,
    timeout: Duration,
}

impl PkgGoDevSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DISCOVERY_HTTP_TIMEOUT_SECS),
        }
    }

    fn fetch_page(&self, module: &str) -> Result<String, DeptestError> {
        let fail = |reason: String| DeptestError::DiscoveryFetch {
            module: module.to_string(),
            reason,
        };
        let url = importers_url(&self.base_url, module).map_err(|e| fail(e.to_string()))?;
        tracing::debug!(%url, "fetching dependents page");
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| fail(e.to_string()))?;
        let resp = client.get(url).send().map_err(|e| fail(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(fail(format!("index returned status {}", status.as_u16())));
        }
        resp.text().map_err(|e| fail(e.to_string()))
    }
}

impl DependentSource for PkgGoDevSource {
    fn fetch_dependents(&self, module: &str, limit: usize) -> anyhow::Result<Vec<Project>> {
        let html = self.fetch_page(module)?;
        let found = parse_dependents(&html, limit);
        if found.is_empty() {
            return Err(DeptestError::NoDependents(module.to_string()).into());
        }
        Ok(found)
    }
}

pub fn importers_url(base_url: &str, module: &str) -> anyhow::Result<reqwest::Url> {
    let base = reqwest::Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
    let mut url = base.join(module.trim_start_matches('/'))?;
    url.set_query(Some("tab=importedby"));
    Ok(url)
}

fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"<a href="/(github\.com/[^"]+)"[^>]*>"#).expect("valid dependents regex")
    })
}

/// First `limit` distinct project links in page order. A limit of zero
/// means the default.
pub fn parse_dependents(html: &str, limit: usize) -> Vec<Project> {
    let limit = if limit == 0 {
        DEFAULT_DISCOVERY_LIMIT
    } else {
        limit
    };
    let mut seen = HashSet::new();
    link_pattern()
        .captures_iter(html)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .filter(|path| !path.contains('?'))
        .filter(|path| seen.insert(path.to_string()))
        .take(limit)
        .map(Project::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
  <a href="/github.com/sirupsen/logrus?tab=versions">versions</a>
  <a href="/github.com/acme/api" class="u-breakWord">github.com/acme/api</a>
  <a href="/github.com/acme/cli">github.com/acme/cli</a>
  <a href="/github.com/acme/api" class="dup">again</a>
  <a href="/golang.org/x/tools">not github</a>
  <a href="/github.com/acme/worker/v2" data-test-id="x">github.com/acme/worker/v2</a>
</body></html>
"#;

    fn ids(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|p| p.import_path.as_str()).collect()
    }

    #[test]
    fn parses_distinct_github_links_in_order() {
        let got = parse_dependents(PAGE, 10);
        assert_eq!(
            ids(&got),
            vec!["github.com/acme/api", "github.com/acme/cli", "github.com/acme/worker/v2"]
        );
        assert!(got.iter().all(|p| p.synopsis.is_empty()));
    }

    #[test]
    fn respects_limit_and_zero_means_default() {
        assert_eq!(ids(&parse_dependents(PAGE, 1)), vec!["github.com/acme/api"]);
        assert_eq!(parse_dependents(PAGE, 0).len(), 3);

        let many: String = (0..15)
            .map(|i| format!("<a href=\"/github.com/o/r{}\">x</a>\n", i))
            .collect();
        assert_eq!(parse_dependents(&many, 0).len(), 10);
    }

    #[test]
    fn empty_page_has_no_dependents() {
        assert!(parse_dependents("<html></html>", 10).is_empty());
    }

    #[test]
    fn importers_url_keeps_module_path() {
        let url = importers_url("https://pkg.go.dev", "github.com/sirupsen/logrus").expect("url");
        assert_eq!(
            url.as_str(),
            "https://pkg.go.dev/github.com/sirupsen/logrus?tab=importedby"
        );
        let url = importers_url("http://127.0.0.1:8080/", "/example.com/m").expect("url");
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/example.com/m?tab=importedby");
    }

    #[test]
    fn unreachable_index_is_a_discovery_error() {
        let source = PkgGoDevSource::new("http://127.0.0.1:9");
        let err = source
            .fetch_dependents("github.com/x/y", 5)
            .expect_err("nothing listens on the discard port");
        let typed = err.downcast_ref::<DeptestError>().expect("typed");
        assert_eq!(typed.code(), "DISCOVERY_ERROR");
    }
}
