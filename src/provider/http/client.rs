// ABOUTME: HTTP client implementing the provider capability traits.
// ABOUTME: Bearer-token REST client with a configurable endpoint.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::net::IpAddr;
use std::time::Duration;

use crate::provider::traits::{
    ActionOps, ActionRecord, FloatingIpOps, FloatingIpRecord, InstanceOps, InstanceRecord,
    StateOps,
};
use crate::provider::ProviderError;
use crate::types::{ActionId, FleetTag, InstanceId, StateMap};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the provider's REST API.
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

// Response envelopes. The API wraps every payload in a single-key object.

#[derive(Deserialize)]
struct InstancesEnvelope {
    instances: Vec<InstanceRecord>,
}

#[derive(Deserialize)]
struct InstanceEnvelope {
    instance: InstanceRecord,
}

#[derive(Deserialize)]
struct FloatingIpsEnvelope {
    floating_ips: Vec<FloatingIpRecord>,
}

#[derive(Deserialize)]
struct FloatingIpEnvelope {
    floating_ip: FloatingIpRecord,
}

#[derive(Deserialize)]
struct ActionEnvelope {
    action: ActionRecord,
}

#[derive(Deserialize)]
struct StateEnvelope {
    state: StateMap,
}

impl ApiClient {
    pub fn new(endpoint: &str, token: String) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: endpoint.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.token)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ProviderError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ProviderError> {
        let response = self
            .client
            .delete(self.url(path))
            .bearer_auth(&self.token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(ProviderError::NotFound),
            status => Err(api_error(status, response).await),
        }
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        match response.status() {
            status if status.is_success() => {
                response.json().await.map_err(|e| ProviderError::Decode(e.to_string()))
            }
            StatusCode::NOT_FOUND => Err(ProviderError::NotFound),
            status => Err(api_error(status, response).await),
        }
    }
}

async fn api_error(status: StatusCode, response: reqwest::Response) -> ProviderError {
    let message = response.text().await.unwrap_or_default();
    ProviderError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl InstanceOps for ApiClient {
    async fn list_by_tag(&self, tag: &FleetTag) -> Result<Vec<InstanceRecord>, ProviderError> {
        let envelope: InstancesEnvelope = self
            .get(&format!("/v2/instances?tag_name={}", tag.as_str()))
            .await?;
        Ok(envelope.instances)
    }

    async fn get_instance(
        &self,
        id: InstanceId,
    ) -> Result<Option<InstanceRecord>, ProviderError> {
        match self.get::<InstanceEnvelope>(&format!("/v2/instances/{id}")).await {
            Ok(envelope) => Ok(Some(envelope.instance)),
            Err(ProviderError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn delete_instance(&self, id: InstanceId) -> Result<(), ProviderError> {
        self.delete(&format!("/v2/instances/{id}")).await
    }
}

#[async_trait]
impl StateOps for ApiClient {
    async fn instance_state(&self, id: InstanceId) -> Result<StateMap, ProviderError> {
        let envelope: StateEnvelope = self.get(&format!("/v2/instances/{id}/state")).await?;
        Ok(envelope.state)
    }
}

#[async_trait]
impl FloatingIpOps for ApiClient {
    async fn list_floating_ips(&self) -> Result<Vec<FloatingIpRecord>, ProviderError> {
        let envelope: FloatingIpsEnvelope = self.get("/v2/floating_ips").await?;
        Ok(envelope.floating_ips)
    }

    async fn create_floating_ip(
        &self,
        instance: InstanceId,
    ) -> Result<FloatingIpRecord, ProviderError> {
        let body = serde_json::json!({ "instance_id": instance.value() });
        let envelope: FloatingIpEnvelope = self.post("/v2/floating_ips", &body).await?;
        Ok(envelope.floating_ip)
    }

    async fn reassign_floating_ip(
        &self,
        ip: IpAddr,
        instance: InstanceId,
    ) -> Result<ActionRecord, ProviderError> {
        let body = serde_json::json!({
            "type": "assign",
            "instance_id": instance.value(),
        });
        let envelope: ActionEnvelope = self
            .post(&format!("/v2/floating_ips/{ip}/actions"), &body)
            .await?;
        Ok(envelope.action)
    }
}

#[async_trait]
impl ActionOps for ApiClient {
    async fn get_action(&self, id: ActionId) -> Result<ActionRecord, ProviderError> {
        let envelope: ActionEnvelope = self.get(&format!("/v2/actions/{id}")).await?;
        Ok(envelope.action)
    }
}
