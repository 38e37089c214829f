//! Patton client: builds payloads, dispatches them and maps the responses.

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use patton_core::{
    BannerResult, BannerType, DependencyResult, PattonError, QueryInput, Result, SourceType,
};
use patton_parser::{build_banner_payload, build_dependency_payload};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{PattonConfig, RunningConfig};
use crate::response::{map_banner_response, map_dependency_response, read_body};
use crate::session::Session;

pub const CHECK_DEPENDENCIES_PATH: &str = "/api/v1/check-dependencies?cpeDetailed=1";
pub const CHECK_BANNERS_PATH: &str = "/api/v1/check-banners";

/// Client for a Patton server.
///
/// Owns its HTTP session. Requests issued through `&self` may run
/// concurrently; `close_session` needs `&mut self`, so it cannot race them.
pub struct PattonClient {
    config: PattonConfig,
    session: Session,
}

impl PattonClient {
    pub fn new(config: PattonConfig) -> Result<Self> {
        let connect_timeout = config.server.connect_timeout_secs.map(Duration::from_secs);
        let session = Session::open(connect_timeout)?;
        Ok(Self { config, session })
    }

    /// Use a caller-provided `reqwest::Client` as the session.
    pub fn with_http_client(config: PattonConfig, client: reqwest::Client) -> Self {
        Self {
            config,
            session: Session::from_client(client),
        }
    }

    pub fn config(&self) -> &PattonConfig {
        &self.config
    }

    /// Fresh per-query configuration snapshot
    pub fn get_config(
        &self,
        source_type: Option<SourceType>,
        banner_type: Option<BannerType>,
    ) -> RunningConfig {
        self.config.running_config(source_type, banner_type)
    }

    pub async fn check_dependencies(&self, query: impl Into<QueryInput>) -> Result<DependencyResult> {
        self.check_dependencies_in_patton(query.into(), self.get_config(None, None))
            .await
    }

    pub async fn check_dependencies_with(
        &self,
        query: impl Into<QueryInput>,
        source_type: SourceType,
    ) -> Result<DependencyResult> {
        self.check_dependencies_in_patton(query.into(), self.get_config(Some(source_type), None))
            .await
    }

    pub async fn check_banners(&self, query: impl Into<QueryInput>) -> Result<BannerResult> {
        self.check_banners_in_patton(query.into(), self.get_config(None, None))
            .await
    }

    pub async fn check_banners_with(
        &self,
        query: impl Into<QueryInput>,
        banner_type: BannerType,
    ) -> Result<BannerResult> {
        self.check_banners_in_patton(query.into(), self.get_config(None, Some(banner_type)))
            .await
    }

    /// Check several dependency queries concurrently; results keep submission order.
    pub async fn check_dependencies_batch<I, Q>(&self, queries: I) -> Result<Vec<DependencyResult>>
    where
        I: IntoIterator<Item = Q>,
        Q: Into<QueryInput>,
    {
        let pending = queries
            .into_iter()
            .map(|query| self.check_dependencies(query))
            .collect::<Vec<_>>();
        self.run_batch(pending).await
    }

    /// Check several banner queries concurrently; results keep submission order.
    pub async fn check_banners_batch<I, Q>(&self, queries: I) -> Result<Vec<BannerResult>>
    where
        I: IntoIterator<Item = Q>,
        Q: Into<QueryInput>,
    {
        let pending = queries
            .into_iter()
            .map(|query| self.check_banners(query))
            .collect::<Vec<_>>();
        self.run_batch(pending).await
    }

    /// Release the HTTP session. Calling it again is a no-op.
    pub fn close_session(&mut self) {
        if self.session.close() {
            info!("Patton client session has been closed");
        } else {
            debug!("Patton client session was already closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        !self.session.is_open()
    }

    /// Every request runs to completion. Without `skip_on_fail` the first
    /// failure in submission order is returned.
    async fn run_batch<T, F>(&self, pending: Vec<F>) -> Result<Vec<T>>
    where
        T: Default,
        F: Future<Output = Result<T>>,
    {
        let results = join_all(pending).await;
        if !self.get_config(None, None).skip_on_fail {
            return results.into_iter().collect();
        }

        Ok(results
            .into_iter()
            .enumerate()
            .map(|(index, result)| {
                result.unwrap_or_else(|e| {
                    warn!("Skipping failed query {}: {}", index, e);
                    T::default()
                })
            })
            .collect())
    }

    async fn check_dependencies_in_patton(
        &self,
        query: QueryInput,
        running: RunningConfig,
    ) -> Result<DependencyResult> {
        let built = build_dependency_payload(&query, running.source_type)?;
        for warning in &built.warnings {
            warn!("{}", warning);
        }

        let body = self
            .do_api_query(
                &built.payload,
                built.payload.libraries.len(),
                CHECK_DEPENDENCIES_PATH,
                &running,
            )
            .await?;
        map_dependency_response(&body)
    }

    async fn check_banners_in_patton(
        &self,
        query: QueryInput,
        running: RunningConfig,
    ) -> Result<BannerResult> {
        let payload = build_banner_payload(&query, running.banner_type)?;

        let body = self
            .do_api_query(&payload, payload.len(), CHECK_BANNERS_PATH, &running)
            .await?;
        map_banner_response(&body)
    }

    /// Performs one POST using the shared session
    async fn do_api_query<P: Serialize>(
        &self,
        payload: &P,
        items: usize,
        path: &str,
        running: &RunningConfig,
    ) -> Result<String> {
        let client = self.session.client()?;
        let url = running.endpoint(path);

        if running.quiet_mode {
            debug!("Sending {} items to {}", items, url);
        } else {
            info!("Sending {} items to {}", items, url);
        }

        let response = client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    PattonError::Client(e)
                } else {
                    PattonError::Connection(e)
                }
            })?;

        read_body(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patton_core::OutputFormat;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_invalid_query_fails_before_network() {
        // Nothing listens on the default host in tests; the error must come first.
        let client = PattonClient::new(PattonConfig::default()).unwrap();
        let err = client.check_dependencies("   ").await.unwrap_err();
        assert!(matches!(err, PattonError::InvalidFormat(_)));
    }

    #[tokio::test]
    async fn test_requests_after_close_fail() {
        let mut client = PattonClient::new(PattonConfig::default()).unwrap();
        client.close_session();
        client.close_session();
        assert!(client.is_closed());

        let err = client.check_banners(["nginx/1.14.0"]).await.unwrap_err();
        assert!(matches!(err, PattonError::SessionClosed));
    }

    #[test]
    fn test_get_config_applies_overrides() {
        let mut config = PattonConfig::default()
            .with_quiet_mode(false)
            .with_skip_on_fail(true);
        config.query.display_format = OutputFormat::Json;

        let client = PattonClient::new(config).unwrap();
        let running = client.get_config(Some(SourceType::Nodejs), Some(BannerType::Ftp));
        assert_eq!(running.source_type, SourceType::Nodejs);
        assert_eq!(running.banner_type, BannerType::Ftp);
        assert!(!running.quiet_mode);
        assert!(running.skip_on_fail);
        assert_eq!(running.display_format, OutputFormat::Json);
    }

    struct CountingPayload {
        serialized: Arc<AtomicUsize>,
    }

    impl Serialize for CountingPayload {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
            self.serialized.fetch_add(1, Ordering::SeqCst);
            serializer.serialize_unit()
        }
    }

    #[tokio::test]
    async fn test_payload_is_serialized_once_per_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/check-banners"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(2)
            .mount(&server)
            .await;

        for quiet in [true, false] {
            let client = PattonClient::new(
                PattonConfig::default()
                    .with_host(server.uri())
                    .with_quiet_mode(quiet),
            )
            .unwrap();
            let serialized = Arc::new(AtomicUsize::new(0));
            let payload = CountingPayload {
                serialized: Arc::clone(&serialized),
            };

            let running = client.get_config(None, None);
            client
                .do_api_query(&payload, 1, CHECK_BANNERS_PATH, &running)
                .await
                .unwrap();
            assert_eq!(serialized.load(Ordering::SeqCst), 1);
        }
    }
}
