//! Test helpers.
//!
//! Mock implementations of the solver's trait seams.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::RwLock;

use variomedia_dns01_client::{ClientError, TxtRecordClient, TxtRecordRequest};

use crate::error::SolverResult;
use crate::traits::{SecretStore, TxtClientFactory};
use crate::types::SecretData;

// ===== MockSecretStore =====

pub struct MockSecretStore {
    secrets: RwLock<HashMap<(String, String), SecretData>>,
}

impl MockSecretStore {
    pub fn new() -> Self {
        Self {
            secrets: RwLock::new(HashMap::new()),
        }
    }

    /// Stores a single-field secret.
    pub async fn put(&self, namespace: &str, name: &str, field: &str, value: &[u8]) {
        let mut data = SecretData::new();
        data.insert(field.to_string(), value.to_vec());
        self.secrets
            .write()
            .await
            .insert((namespace.to_string(), name.to_string()), data);
    }
}

#[async_trait]
impl SecretStore for MockSecretStore {
    async fn get(&self, namespace: &str, name: &str) -> SolverResult<Option<SecretData>> {
        Ok(self
            .secrets
            .read()
            .await
            .get(&(namespace.to_string(), name.to_string()))
            .cloned())
    }
}

// ===== MockTxtRecordClient =====

/// Scriptable record client: captures mutations, optionally fails the
/// next one.
pub struct MockTxtRecordClient {
    pub created: RwLock<Vec<TxtRecordRequest>>,
    pub deleted: RwLock<Vec<String>>,
    create_error: RwLock<Option<ClientError>>,
    delete_error: RwLock<Option<ClientError>>,
    next_record_id: RwLock<u64>,
}

impl MockTxtRecordClient {
    pub fn new() -> Self {
        Self {
            created: RwLock::new(Vec::new()),
            deleted: RwLock::new(Vec::new()),
            create_error: RwLock::new(None),
            delete_error: RwLock::new(None),
            next_record_id: RwLock::new(0),
        }
    }
}

#[async_trait]
impl TxtRecordClient for MockTxtRecordClient {
    async fn create_or_update_txt_record(
        &self,
        req: &TxtRecordRequest,
    ) -> variomedia_dns01_client::Result<String> {
        if let Some(e) = self.create_error.write().await.take() {
            return Err(e);
        }
        self.created.write().await.push(req.clone());
        let mut id = self.next_record_id.write().await;
        *id += 1;
        Ok(format!("https://api.variomedia.de/dns-records/{}", *id))
    }

    async fn delete_txt_record(&self, record_url: &str) -> variomedia_dns01_client::Result<()> {
        if let Some(e) = self.delete_error.write().await.take() {
            return Err(e);
        }
        self.deleted.write().await.push(record_url.to_string());
        Ok(())
    }
}

// ===== MockClientFactory =====

/// Hands every caller the same mock client and records which API keys
/// were asked for.
pub struct MockClientFactory {
    pub client: Arc<MockTxtRecordClient>,
    keys: Mutex<Vec<String>>,
}

impl MockClientFactory {
    pub fn new() -> Self {
        Self {
            client: Arc::new(MockTxtRecordClient::new()),
            keys: Mutex::new(Vec::new()),
        }
    }

    /// Fails the next create call with `error`.
    pub async fn fail_next_create(&self, error: ClientError) {
        *self.client.create_error.write().await = Some(error);
    }

    /// Fails the next delete call with `error`.
    pub async fn fail_next_delete(&self, error: ClientError) {
        *self.client.delete_error.write().await = Some(error);
    }

    /// API keys seen so far, in call order.
    pub fn keys_seen(&self) -> Vec<String> {
        self.keys.lock().expect("keys mutex poisoned").clone()
    }
}

impl TxtClientFactory for MockClientFactory {
    fn client_for(&self, api_key: &str) -> Arc<dyn TxtRecordClient> {
        self.keys
            .lock()
            .expect("keys mutex poisoned")
            .push(api_key.to_string());
        self.client.clone()
    }
}
