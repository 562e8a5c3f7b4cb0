//! Record client construction seam

use std::sync::Arc;

use variomedia_dns01_client::{TxtRecordClient, VariomediaClient};

/// Builds a record client bound to one API key.
///
/// Each configured domain may carry its own key, so Present and CleanUp
/// construct a client per operation rather than holding a single one.
pub trait TxtClientFactory: Send + Sync {
    /// Returns a client authenticating with `api_key`.
    fn client_for(&self, api_key: &str) -> Arc<dyn TxtRecordClient>;
}

/// Factory producing live [`VariomediaClient`] instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariomediaClientFactory;

impl TxtClientFactory for VariomediaClientFactory {
    fn client_for(&self, api_key: &str) -> Arc<dyn TxtRecordClient> {
        Arc::new(VariomediaClient::new(api_key))
    }
}
