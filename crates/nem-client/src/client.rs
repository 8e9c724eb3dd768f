//! Async HTTP client for the NIS API.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use nem_transaction::RequestAnnounce;

use crate::error::ClientError;
use crate::types::{
    AccountMetaDataPair, MosaicArray, MosaicDefinitionMetaDataPair, MosaicDefinitionPage,
    NemAnnounceResult, NemClientConfig, OwnedMosaic,
};

/// HTTP client for a NIS node.
///
/// Every method issues one request (except
/// [`namespace_mosaic_definition_from_name`](Self::namespace_mosaic_definition_from_name),
/// which pages) and deserializes the JSON response into the matching
/// model from [`types`](crate::types).
#[derive(Debug, Clone)]
pub struct NemApiClient {
    /// Client configuration.
    config: NemClientConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl NemApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: NemClientConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// Create a new client for the given NIS host URL.
    pub fn with_host(host_url: &str) -> Self {
        Self::new(NemClientConfig {
            host_url: host_url.to_string(),
        })
    }

    /// Retrieve account data by address.
    pub async fn account_get(&self, address: &str) -> Result<AccountMetaDataPair, ClientError> {
        self.get("/account/get", &[("address", address)]).await
    }

    /// Retrieve account data by hex public key.
    pub async fn account_get_from_public_key(
        &self,
        public_key: &str,
    ) -> Result<AccountMetaDataPair, ClientError> {
        self.get("/account/get/from-public-key", &[("publicKey", public_key)])
            .await
    }

    /// List the mosaics an account owns.
    pub async fn account_mosaic_owned(
        &self,
        address: &str,
    ) -> Result<Vec<OwnedMosaic>, ClientError> {
        let array: MosaicArray = self
            .get("/account/mosaic/owned", &[("address", address)])
            .await?;
        Ok(array.data)
    }

    /// Get one page of mosaic definitions under a namespace.
    ///
    /// # Arguments
    /// * `namespace` - The namespace id.
    /// * `id` - Topmost database id to page from; `None` returns the most
    ///   recent definitions.
    /// * `page_size` - Definitions per page (server default 25, max 100).
    pub async fn namespace_mosaic_definition_page(
        &self,
        namespace: &str,
        id: Option<i64>,
        page_size: Option<u32>,
    ) -> Result<MosaicDefinitionPage, ClientError> {
        let mut queries: Vec<(&str, String)> = vec![("namespace", namespace.to_string())];
        if let Some(id) = id {
            queries.push(("id", id.to_string()));
        }
        if let Some(page_size) = page_size {
            queries.push(("pagesize", page_size.to_string()));
        }
        self.get("/namespace/mosaic/definition/page", &queries).await
    }

    /// Find a mosaic definition by namespace and name.
    ///
    /// NIS has no direct lookup, so this pages through
    /// `/namespace/mosaic/definition/page` until the name is found.
    /// Returns `Ok(None)` when the namespace holds no such mosaic.
    pub async fn namespace_mosaic_definition_from_name(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<MosaicDefinitionMetaDataPair>, ClientError> {
        let mut id = None;
        loop {
            let page = self
                .namespace_mosaic_definition_page(namespace, id, Some(100))
                .await?;
            if let Some(found) = page.data.iter().find(|pair| pair.mosaic.id.name == name) {
                return Ok(Some(found.clone()));
            }
            match page.data.last() {
                Some(last) => id = Some(last.meta.id),
                None => return Ok(None),
            }
        }
    }

    /// Announce a signed transaction to the network.
    pub async fn transaction_announce(
        &self,
        request: &RequestAnnounce,
    ) -> Result<NemAnnounceResult, ClientError> {
        self.post("/transaction/announce", request).await
    }

    /// Perform a GET request against the NIS API and deserialize the
    /// response.
    async fn get<T, Q>(&self, path: &str, queries: &[(&str, Q)]) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: AsRef<str>,
    {
        let url = format!("{}{}", self.config.host_url, path);
        debug!(%url, "get request");

        let mut request = self.client.get(&url);
        for (key, value) in queries {
            request = request.query(&[(key, value.as_ref())]);
        }
        let resp = request.send().await?;
        self.read_response(resp).await
    }

    /// Perform a POST request with a JSON body against the NIS API and
    /// deserialize the response.
    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.host_url, path);
        debug!(%url, "post request");

        let resp = self.client.post(&url).json(body).send().await?;
        self.read_response(resp).await
    }

    async fn read_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status_code: status.as_u16(),
                message,
            });
        }

        let text = resp.text().await?;
        debug!(response = %text, "response body");
        let parsed = serde_json::from_str(&text)?;
        Ok(parsed)
    }
}
