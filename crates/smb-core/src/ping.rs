//! Search engine ping fan-out.
//!
//! One task per target on a `JoinSet`; each runs a blocking curl GET under
//! its own timeout. No retries, and a failed target never affects the
//! others.

use std::time::Duration;
use tokio::task::JoinSet;

/// Substitution point in a ping URL template.
pub const PLACEHOLDER: &str = "%s";

/// Endpoints pinged after any caller-supplied targets.
pub const DEFAULT_TARGETS: [&str; 2] = [
    "http://www.google.com/webmasters/tools/ping?sitemap=%s",
    "http://www.bing.com/webmaster/ping.aspx?siteMap=%s",
];

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Extra time the outer timeout grants curl to give up on its own.
const JOIN_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, thiserror::Error)]
pub enum PingError {
    #[error("template {0:?} has no %s substitution point")]
    MissingPlaceholder(String),
    #[error("request failed: {0}")]
    Curl(#[from] curl::Error),
    #[error("HTTP {0}")]
    Http(u32),
    #[error("no response within {0:?}")]
    TimedOut(Duration),
    #[error("ping task failed: {0}")]
    Task(String),
}

/// Result of pinging one target.
#[derive(Debug)]
pub struct PingOutcome {
    /// The template as configured.
    pub target: String,
    /// HTTP status on success.
    pub result: Result<u32, PingError>,
}

impl PingOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// `extra` followed by `DEFAULT_TARGETS`.
pub fn with_default_targets(extra: &[String]) -> Vec<String> {
    extra
        .iter()
        .cloned()
        .chain(DEFAULT_TARGETS.iter().map(|t| t.to_string()))
        .collect()
}

/// Fill `template`'s substitution point with the form-encoded `location`.
pub fn ping_url(template: &str, location: &str) -> Result<String, PingError> {
    if !template.contains(PLACEHOLDER) {
        return Err(PingError::MissingPlaceholder(template.to_string()));
    }
    let encoded: String = url::form_urlencoded::byte_serialize(location.as_bytes()).collect();
    Ok(template.replacen(PLACEHOLDER, &encoded, 1))
}

/// Ping every target with the index `location`. Outcomes come back in
/// completion order, one per target.
pub async fn ping_all(location: &str, targets: &[String], timeout: Duration) -> Vec<PingOutcome> {
    let mut join_set = JoinSet::new();
    for target in targets {
        let target = target.clone();
        let location = location.to_string();
        join_set.spawn(async move {
            let result = ping_one(&target, &location, timeout).await;
            PingOutcome { target, result }
        });
    }

    let mut outcomes = Vec::with_capacity(targets.len());
    while let Some(res) = join_set.join_next().await {
        match res {
            Ok(outcome) => {
                match &outcome.result {
                    Ok(code) => tracing::debug!(ping = %outcome.target, code, "ping ok"),
                    Err(e) => tracing::debug!(ping = %outcome.target, "ping failed: {}", e),
                }
                outcomes.push(outcome);
            }
            Err(e) => tracing::warn!("ping task join: {}", e),
        }
    }
    outcomes
}

async fn ping_one(template: &str, location: &str, timeout: Duration) -> Result<u32, PingError> {
    let url = ping_url(template, location)?;
    let task = tokio::task::spawn_blocking(move || get(&url, timeout));
    match tokio::time::timeout(timeout + JOIN_GRACE, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join)) => Err(PingError::Task(join.to_string())),
        Err(_) => Err(PingError::TimedOut(timeout)),
    }
}

/// Blocking GET; the body is discarded. Runs in the current thread.
fn get(url: &str, timeout: Duration) -> Result<u32, PingError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(5)?;
    easy.connect_timeout(timeout)?;
    easy.timeout(timeout)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| Ok(data.len()))?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(PingError::Http(code));
    }
    Ok(code)
}
