use std::{
    env,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{
    Client,
    header::{self, HeaderMap, HeaderName, HeaderValue},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    analysis::{
        adapters::wire::{decode_analysis_body, excerpt, map_http_error},
        error::{AnalysisError, network_error, schema_error, server_error},
        ports::ReasoningBoundary,
        types::{AnalysisRequest, AnalysisResult},
    },
    config::{CredentialRef, ReasoningBoundaryConfig},
};

/// Reasoning boundary reached over HTTP: `POST {endpoint}{analyze_path}`.
#[derive(Clone)]
pub struct HttpReasoningBoundary {
    client: Client,
    analyze_url: String,
    health_url: String,
    headers: HeaderMap,
    request_timeout: Option<Duration>,
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: String,
}

impl HttpReasoningBoundary {
    pub fn from_config(config: &ReasoningBoundaryConfig) -> Result<Self> {
        let endpoint = config.endpoint.trim().trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(anyhow!("reasoning.endpoint cannot be empty"));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms.max(1)))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .context("failed to build http client for reasoning boundary")?;

        Ok(Self {
            client,
            analyze_url: format!("{endpoint}{}", config.analyze_path),
            health_url: format!("{endpoint}{}", config.health_path),
            headers: build_headers(config)?,
            request_timeout: config.request_timeout_ms.map(Duration::from_millis),
        })
    }

    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }

    /// Liveness probe against the service's health route.
    pub async fn health(&self) -> Result<(), AnalysisError> {
        let mut req_builder = self.client.get(&self.health_url).headers(self.headers.clone());
        if let Some(timeout) = self.request_timeout {
            req_builder = req_builder.timeout(timeout);
        }

        let response = req_builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| network_error(format!("failed to read health response: {err}")))?;
        if !(200..300).contains(&status) {
            return Err(map_http_error(status, &body));
        }

        let health: HealthBody = serde_json::from_str(&body)
            .map_err(|err| schema_error(format!("health response is malformed: {err}")))?;
        if health.status != "ok" {
            return Err(server_error(format!(
                "reasoning service reported status '{}'",
                health.status
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ReasoningBoundary for HttpReasoningBoundary {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let request_id = Uuid::now_v7().to_string();
        let request_started_at = Instant::now();
        tracing::debug!(
            target: "analysis.http",
            request_id = %request_id,
            url = %self.analyze_url,
            events = ?request.events,
            companies = ?request.companies,
            "analysis_http_dispatch"
        );

        let mut req_builder = self
            .client
            .post(&self.analyze_url)
            .headers(self.headers.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-request-id", request_id.as_str())
            .json(&request);
        if let Some(timeout) = self.request_timeout {
            req_builder = req_builder.timeout(timeout);
        }

        let response = match req_builder.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(
                    target: "analysis.http",
                    request_id = %request_id,
                    elapsed_ms = request_started_at.elapsed().as_millis() as u64,
                    error = %err,
                    "analysis_http_error"
                );
                return Err(map_transport_error(err));
            }
        };

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| {
            network_error(format!("connection dropped while reading analysis body: {err}"))
        })?;
        tracing::debug!(
            target: "analysis.http",
            request_id = %request_id,
            status = status,
            body_bytes = body.len(),
            elapsed_ms = request_started_at.elapsed().as_millis() as u64,
            "analysis_http_response"
        );

        if !(200..300).contains(&status) {
            tracing::debug!(
                target: "analysis.http",
                request_id = %request_id,
                status = status,
                body = %excerpt(&body),
                "analysis_http_non_success"
            );
            return Err(map_http_error(status, &body));
        }

        decode_analysis_body(&body)
    }
}

fn map_transport_error(err: reqwest::Error) -> AnalysisError {
    if err.is_timeout() {
        return network_error(format!("reasoning service call timed out: {err}"));
    }
    if err.is_connect() {
        return network_error(format!("could not connect to reasoning service: {err}"));
    }
    network_error(format!("reasoning service request failed: {err}"))
}

fn build_headers(config: &ReasoningBoundaryConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (key, value) in &config.headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .with_context(|| format!("invalid header name '{key}' in reasoning.headers"))?;
        let value = HeaderValue::from_str(value)
            .with_context(|| format!("invalid value for header '{key}' in reasoning.headers"))?;
        headers.insert(name, value);
    }

    if let Some(auth_header) = resolve_auth_header(&config.credential)? {
        let mut value = HeaderValue::from_str(&auth_header)
            .context("credential cannot be encoded as an authorization header")?;
        value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, value);
    }

    Ok(headers)
}

fn resolve_auth_header(credential: &CredentialRef) -> Result<Option<String>> {
    match credential {
        CredentialRef::Env { var } => {
            let token = env::var(var)
                .with_context(|| format!("missing credential environment variable {var}"))?;
            Ok(Some(format!("Bearer {token}")))
        }
        CredentialRef::InlineToken { token } => {
            if token.trim().is_empty() {
                return Err(anyhow!("inline credential token cannot be empty"));
            }
            Ok(Some(format!("Bearer {token}")))
        }
        CredentialRef::None => Ok(None),
    }
}
