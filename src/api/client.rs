use super::error::{ExecutionFailure, TopologyError, TransportFault};
use super::logging::{emit_debug_payload, emit_decode_error};
use crate::batch::Command;
use crate::config::Config;
use crate::types::{Disk, ExecuteResponse};
use crate::util::is_local_endpoint_url;
use anyhow::Result;
use bytes::Bytes;
use reqwest::StatusCode;
use serde_json::Value;
#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
pub trait MockResponder: Send + Sync {
    fn respond(&self, route: EngineRoute, payload: Option<&Value>) -> MockReply;
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub enum MockReply {
    Json { status: u16, body: String },
    TransportFault(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineRoute {
    Execute,
    Disks,
}

impl EngineRoute {
    pub fn path(self) -> &'static str {
        match self {
            EngineRoute::Execute => "/execute",
            EngineRoute::Disks => "/discos",
        }
    }

    fn method(self) -> &'static str {
        match self {
            EngineRoute::Execute => "POST",
            EngineRoute::Disks => "GET",
        }
    }
}

struct RawReply {
    url: String,
    status: StatusCode,
    body: Bytes,
}

/// HTTP client for the disk engine's two endpoints.
#[derive(Clone)]
pub struct EngineClient {
    http: reqwest::Client,
    config: Config,
    #[cfg(test)]
    mock_responder: Option<Arc<dyn MockResponder>>,
}

impl EngineClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            config: config.clone(),
            #[cfg(test)]
            mock_responder: None,
        })
    }

    #[cfg(test)]
    pub fn new_mock(mock_responder: Arc<dyn MockResponder>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: Config {
                engine_url: crate::config::ENGINE_URL.to_string(),
                log_path: std::path::PathBuf::from("/tmp/dcon-test.log"),
                log_filter: "debug".to_string(),
                debug_payload: false,
            },
            mock_responder: Some(mock_responder),
        }
    }

    pub fn engine_url(&self) -> &str {
        &self.config.engine_url
    }

    /// Submits `batch` in order and returns the engine's message log.
    pub async fn execute(&self, batch: &[Command]) -> Result<Vec<String>, ExecutionFailure> {
        let payload = serde_json::to_value(batch)
            .map_err(|error| ExecutionFailure::Decode(error.to_string()))?;
        let reply = self.send(EngineRoute::Execute, Some(&payload)).await?;
        if !reply.status.is_success() {
            tracing::warn!(url = %reply.url, status = %reply.status, "execute rejected by engine");
            return Err(ExecutionFailure::Status(reply.status));
        }

        let response: ExecuteResponse = serde_json::from_slice(&reply.body).map_err(|error| {
            emit_decode_error(&reply.url, &reply.body, &error);
            ExecutionFailure::Decode(error.to_string())
        })?;
        if let Some(engine_error) = response.engine_error() {
            tracing::warn!(url = %reply.url, engine_error, "engine reported a command error");
        }

        let messages = response.into_messages();
        tracing::info!(
            commands = batch.len(),
            messages = messages.len(),
            "execute completed"
        );
        Ok(messages)
    }

    /// Fetches the disk topology. An empty (or `null`) list is an error.
    pub async fn fetch_disks(&self) -> Result<Vec<Disk>, TopologyError> {
        let reply = self.send(EngineRoute::Disks, None).await?;
        if !reply.status.is_success() {
            tracing::warn!(url = %reply.url, status = %reply.status, "topology rejected by engine");
            return Err(TopologyError::Status(reply.status));
        }

        let disks: Option<Vec<Disk>> = serde_json::from_slice(&reply.body).map_err(|error| {
            emit_decode_error(&reply.url, &reply.body, &error);
            TopologyError::Decode(error.to_string())
        })?;
        let disks = disks.unwrap_or_default();
        if disks.is_empty() {
            return Err(TopologyError::Empty);
        }

        tracing::info!(disks = disks.len(), "topology fetched");
        Ok(disks)
    }

    async fn send(
        &self,
        route: EngineRoute,
        payload: Option<&Value>,
    ) -> Result<RawReply, TransportFault> {
        let request_url = self.config.endpoint(route.path());
        if self.config.debug_payload {
            emit_debug_payload(route.method(), &request_url, payload);
        }

        #[cfg(test)]
        {
            if let Some(responder) = &self.mock_responder {
                return match responder.respond(route, payload) {
                    MockReply::Json { status, body } => Ok(RawReply {
                        url: request_url,
                        status: StatusCode::from_u16(status)
                            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                        body: Bytes::from(body),
                    }),
                    MockReply::TransportFault(detail) => Err(TransportFault {
                        url: request_url,
                        detail,
                    }),
                };
            }
        }

        let mut request = match route {
            EngineRoute::Execute => self.http.post(&request_url),
            EngineRoute::Disks => self.http.get(&request_url),
        }
        .header("content-type", "application/json");
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = request
            .send()
            .await
            .map_err(|error| map_transport_error(error, &request_url))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(error, &request_url))?;

        Ok(RawReply {
            url: request_url,
            status,
            body,
        })
    }
}

fn map_transport_error(error: reqwest::Error, request_url: &str) -> TransportFault {
    let detail = if error.is_connect() && is_local_endpoint_url(request_url) {
        format!("{error}. ¿Está el motor en ejecución?")
    } else if error.is_timeout() {
        format!("tiempo de espera agotado: {error}")
    } else {
        error.to_string()
    };
    tracing::warn!(url = request_url, %detail, "engine request failed");
    TransportFault {
        url: request_url.to_string(),
        detail,
    }
}
