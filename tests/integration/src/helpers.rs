//! Test helpers for integration tests
//!
//! Provides the test server and response assertions.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use users_api::{create_app, AppState};
use users_common::{
    ActivityModelConfig, AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment,
    ServerConfig,
};
use users_db::MemoryStore;
use users_service::ServiceContext;

/// Test server instance that manages lifecycle
///
/// The server task is aborted when the instance is dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    context: ServiceContext,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server over a fresh in-memory store
    pub async fn start() -> Result<Self> {
        let config = test_config();
        let context = ServiceContext::in_memory(MemoryStore::new(), &config.activity_model);
        Self::start_with_context(context, config).await
    }

    /// Start a server over an existing service context
    ///
    /// The context stays reachable through [`TestServer::context`] so tests
    /// can seed records the HTTP surface cannot create.
    pub async fn start_with_context(context: ServiceContext, config: AppConfig) -> Result<Self> {
        let app = create_app(AppState::new(context.clone(), config));

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            context,
            handle,
        })
    }

    /// Service context shared with the running server
    pub fn context(&self) -> &ServiceContext {
        &self.context
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    pub async fn patch<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.patch(self.url(path)).json(body).send().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Configuration for an in-memory server on an ephemeral port
pub fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "users-api-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig::in_memory(),
        cors: CorsConfig::default(),
        activity_model: ActivityModelConfig {
            trees: 20,
            ..ActivityModelConfig::default()
        },
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
