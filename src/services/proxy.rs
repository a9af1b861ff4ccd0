use std::time::Duration;

use serde_json::Value;
use tokio::time::{sleep, timeout, Instant};

use crate::config::UpstreamSettings;
use crate::core::payload::{normalize_upstream, RelayBody};
use crate::models::LoadingResponse;
use crate::services::query::{strip_cache_busting, CacheBuster};
use crate::services::upstream::{ThemeSource, UpstreamError};

/// Timing policy of the recommendation proxy
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyPolicy {
    pub direct_timeout: Duration,
    pub attempt_timeout: Duration,
    pub total_timeout: Duration,
    /// Stop polling once this close to `total_timeout`
    pub early_exit_margin: Duration,
    /// Failed attempts before "still loading" replies are allowed
    pub grace_attempts: u32,
    pub backoff_base: Duration,
    pub backoff_step: Duration,
    pub backoff_cap: Duration,
}

impl ProxyPolicy {
    /// `min(base + step * attempt, cap)`
    pub fn backoff(&self, attempt: u32) -> Duration {
        (self.backoff_base + self.backoff_step * attempt).min(self.backoff_cap)
    }
}

impl Default for ProxyPolicy {
    fn default() -> Self {
        Self::from(&UpstreamSettings::default())
    }
}

impl From<&UpstreamSettings> for ProxyPolicy {
    fn from(settings: &UpstreamSettings) -> Self {
        Self {
            direct_timeout: Duration::from_millis(settings.direct_timeout_ms),
            attempt_timeout: Duration::from_millis(settings.attempt_timeout_ms),
            total_timeout: Duration::from_millis(settings.total_timeout_ms),
            early_exit_margin: Duration::from_millis(settings.early_exit_margin_ms),
            grace_attempts: settings.grace_attempts,
            backoff_base: Duration::from_millis(settings.backoff_base_ms),
            backoff_step: Duration::from_millis(settings.backoff_step_ms),
            backoff_cap: Duration::from_millis(settings.backoff_cap_ms),
        }
    }
}

/// Why the proxy answered with mock data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockReason {
    /// Stopped polling inside the early-exit margin
    EarlyExit,
    /// The whole time budget ran out
    DeadlineElapsed,
}

/// What the proxy handler should send back
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyOutcome {
    Resolved(RelayBody),
    /// HTTP 202: the caller should ask again
    StillLoading(LoadingResponse),
    Mock(MockReason),
}

#[derive(Debug)]
enum ProxyState {
    DirectAttempt,
    Polling { attempt: u32 },
    Resolved(Value),
    StillLoading(LoadingResponse),
    EarlyExit,
    MockFallback,
}

/// Relays recommendation queries with a direct attempt followed by polling
///
/// # Phases
/// 1. One direct GET bounded by `direct_timeout`
/// 2. Cache-busted polling with per-attempt timeouts and capped backoff
///
/// A single deadline is fixed on entry. Nothing is waited on past the
/// early-exit point (`deadline - early_exit_margin`); reaching it answers
/// with mock data.
pub struct ThemeProxy<S> {
    source: S,
    policy: ProxyPolicy,
}

impl<S: ThemeSource> ThemeProxy<S> {
    pub fn new(source: S, policy: ProxyPolicy) -> Self {
        Self { source, policy }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn policy(&self) -> &ProxyPolicy {
        &self.policy
    }

    pub async fn relay(&self, params: &[(String, String)]) -> ProxyOutcome {
        let started = Instant::now();
        let deadline = started + self.policy.total_timeout;
        let early_exit_at = deadline
            .checked_sub(self.policy.early_exit_margin)
            .unwrap_or(started)
            .max(started);
        let params = strip_cache_busting(params);

        let mut state = ProxyState::DirectAttempt;
        loop {
            state = match state {
                ProxyState::DirectAttempt => {
                    let budget = self.policy.direct_timeout.min(remaining(early_exit_at));
                    match self.attempt(&params, None, budget).await {
                        Ok(body) => {
                            tracing::info!("Got direct response from recommendation service");
                            ProxyState::Resolved(body)
                        }
                        Err(e) => {
                            tracing::info!("Direct attempt failed ({}), falling back to polling", e);
                            ProxyState::Polling { attempt: 1 }
                        }
                    }
                }
                ProxyState::Polling { attempt } => {
                    self.poll(&params, attempt, started, deadline, early_exit_at)
                        .await
                }
                ProxyState::Resolved(body) => {
                    return ProxyOutcome::Resolved(normalize_upstream(body));
                }
                ProxyState::StillLoading(loading) => {
                    return ProxyOutcome::StillLoading(loading);
                }
                ProxyState::EarlyExit => {
                    tracing::warn!(
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Approaching timeout limit, returning mock data early"
                    );
                    return ProxyOutcome::Mock(MockReason::EarlyExit);
                }
                ProxyState::MockFallback => {
                    tracing::error!(
                        "Recommendation request timed out after {:?}, returning mock data",
                        self.policy.total_timeout
                    );
                    return ProxyOutcome::Mock(MockReason::DeadlineElapsed);
                }
            };
        }
    }

    /// One polling attempt and the transition it leads to
    async fn poll(
        &self,
        params: &[(String, String)],
        attempt: u32,
        started: Instant,
        deadline: Instant,
        early_exit_at: Instant,
    ) -> ProxyState {
        let now = Instant::now();
        if now >= deadline {
            return ProxyState::MockFallback;
        }
        if now >= early_exit_at {
            return ProxyState::EarlyExit;
        }

        let buster = CacheBuster::fresh();
        let budget = self.policy.attempt_timeout.min(early_exit_at - now);
        tracing::info!(attempt, request_id = %buster.request_id(), "Polling attempt");

        let error = match self.attempt(params, Some(&buster), budget).await {
            Ok(body) => {
                tracing::info!(attempt, "Received data from polling attempt");
                return ProxyState::Resolved(body);
            }
            Err(e) => e,
        };

        if error.is_unavailable() {
            tracing::info!(attempt, "Received {}, retrying", error);
        } else {
            tracing::warn!(attempt, "Attempt failed: {}, retrying", error);
        }

        sleep(self.policy.backoff(attempt).min(remaining(early_exit_at))).await;

        if error.allows_loading_reply() && attempt >= self.policy.grace_attempts && attempt % 2 == 0 {
            let elapsed = started.elapsed().as_secs();
            tracing::info!(attempt, elapsed, "Still processing, asking caller to retry");
            return ProxyState::StillLoading(LoadingResponse::new(attempt, elapsed));
        }

        let now = Instant::now();
        if now >= deadline {
            return ProxyState::MockFallback;
        }
        if now >= early_exit_at {
            return ProxyState::EarlyExit;
        }

        ProxyState::Polling { attempt: attempt + 1 }
    }

    async fn attempt(
        &self,
        params: &[(String, String)],
        buster: Option<&CacheBuster>,
        budget: Duration,
    ) -> Result<Value, UpstreamError> {
        if budget.is_zero() {
            return Err(UpstreamError::Timeout(budget));
        }

        match timeout(budget, self.source.fetch_themes(params, buster)).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout(budget)),
        }
    }
}

fn remaining(until: Instant) -> Duration {
    until.saturating_duration_since(Instant::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    enum Reply {
        Json(Value),
        Status(u16),
        Hang,
    }

    /// Answers each call with the next scripted reply, repeating the last one
    struct ScriptedSource {
        replies: Mutex<VecDeque<Reply>>,
        calls: Mutex<Vec<(Vec<(String, String)>, Option<String>)>>,
    }

    impl ScriptedSource {
        fn new(replies: Vec<Reply>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(Vec<(String, String)>, Option<String>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ThemeSource for ScriptedSource {
        async fn fetch_themes(
            &self,
            params: &[(String, String)],
            buster: Option<&CacheBuster>,
        ) -> Result<Value, UpstreamError> {
            self.calls
                .lock()
                .unwrap()
                .push((params.to_vec(), buster.map(CacheBuster::request_id)));
            let reply = {
                let mut replies = self.replies.lock().unwrap();
                if replies.len() > 1 {
                    replies.pop_front()
                } else {
                    replies.front().cloned()
                }
            };

            match reply.unwrap_or(Reply::Hang) {
                Reply::Json(body) => Ok(body),
                Reply::Status(code) => {
                    let status = StatusCode::from_u16(code).unwrap();
                    if code == 503 || code == 504 {
                        Err(UpstreamError::Unavailable(status))
                    } else {
                        Err(UpstreamError::Http(status))
                    }
                }
                Reply::Hang => std::future::pending().await,
            }
        }
    }

    fn themes_body() -> Value {
        json!([{ "gift_theme": "Books", "match_score": 90, "id": "b1" }])
    }

    fn query() -> Vec<(String, String)> {
        vec![
            ("age".to_string(), "30".to_string()),
            ("_t".to_string(), "1".to_string()),
            ("_r".to_string(), "client".to_string()),
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn test_direct_attempt_resolves() {
        let proxy = ThemeProxy::new(ScriptedSource::new(vec![Reply::Json(themes_body())]), ProxyPolicy::default());

        let outcome = proxy.relay(&query()).await;

        match outcome {
            ProxyOutcome::Resolved(RelayBody::Themes(set)) => {
                assert_eq!(set.themes[0].gift_theme, "Books");
                assert!(!set.is_mock_data);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        let calls = proxy.source().calls();
        assert_eq!(calls.len(), 1);
        // Direct attempt: caller's cache-busting stripped, no request id
        assert_eq!(calls[0].0, vec![("age".to_string(), "30".to_string())]);
        assert!(calls[0].1.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_polling_retries_unavailable() {
        let source = ScriptedSource::new(vec![
            Reply::Status(503),
            Reply::Status(503),
            Reply::Status(504),
            Reply::Status(503),
            Reply::Json(json!({ "themes": [{ "gift_theme": "Tea" }] })),
        ]);
        let proxy = ThemeProxy::new(source, ProxyPolicy::default());

        let outcome = proxy.relay(&query()).await;

        assert!(matches!(outcome, ProxyOutcome::Resolved(RelayBody::Themes(_))));
        let calls = proxy.source().calls();
        assert_eq!(calls.len(), 5);
        // Every polling attempt carries its own request id
        let ids: Vec<String> = calls[1..].iter().map(|c| c.1.clone().unwrap()).collect();
        for (i, id) in ids.iter().enumerate() {
            assert!(!ids[i + 1..].contains(id));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_still_loading_after_grace() {
        let proxy = ThemeProxy::new(ScriptedSource::new(vec![Reply::Status(500)]), ProxyPolicy::default());

        let outcome = proxy.relay(&query()).await;

        match outcome {
            ProxyOutcome::StillLoading(loading) => {
                assert_eq!(loading.status, "loading");
                assert_eq!(loading.attempt, 2);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        // direct + two polling attempts
        assert_eq!(proxy.source().calls().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_service_exits_early_with_mock() {
        let policy = ProxyPolicy::default();
        let proxy = ThemeProxy::new(ScriptedSource::new(vec![Reply::Hang]), policy.clone());

        let started = Instant::now();
        let outcome = proxy.relay(&query()).await;
        let elapsed = started.elapsed();

        assert_eq!(outcome, ProxyOutcome::Mock(MockReason::EarlyExit));
        assert!(elapsed < policy.total_timeout);
        assert!(elapsed >= policy.total_timeout - policy.early_exit_margin);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeouts_never_short_circuit_to_loading() {
        let proxy = ThemeProxy::new(ScriptedSource::new(vec![Reply::Hang]), ProxyPolicy::default());

        let outcome = proxy.relay(&query()).await;

        assert_eq!(outcome, ProxyOutcome::Mock(MockReason::EarlyExit));
        // direct (6s) + polls ending at 16s, 27.3s, 38.9s and the early-exit point (45s)
        assert_eq!(proxy.source().calls().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unavailable_never_short_circuits_to_loading() {
        let proxy = ThemeProxy::new(ScriptedSource::new(vec![Reply::Status(504)]), ProxyPolicy::default());

        let outcome = proxy.relay(&query()).await;

        assert_eq!(outcome, ProxyOutcome::Mock(MockReason::EarlyExit));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_margin_runs_to_deadline() {
        let policy = ProxyPolicy {
            early_exit_margin: Duration::ZERO,
            grace_attempts: u32::MAX,
            total_timeout: Duration::from_secs(20),
            ..ProxyPolicy::default()
        };
        let proxy = ThemeProxy::new(ScriptedSource::new(vec![Reply::Hang]), policy);

        let started = Instant::now();
        let outcome = proxy.relay(&query()).await;

        assert_eq!(outcome, ProxyOutcome::Mock(MockReason::DeadlineElapsed));
        assert!(started.elapsed() >= Duration::from_secs(20));
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = ProxyPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_millis(1300));
        assert_eq!(policy.backoff(3), Duration::from_millis(1900));
        assert_eq!(policy.backoff(50), Duration::from_millis(3000));
    }

    #[test]
    fn test_unusable_body_is_relayed() {
        let body = json!({ "status": "loading" });
        assert_eq!(normalize_upstream(body.clone()), RelayBody::Passthrough(body));
    }
}
