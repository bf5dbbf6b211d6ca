use std::marker::PhantomData;

use reqwest::{Client, Response, Url};
use store::{ApiConfig, Entity, EntityId, Remote, ResourceError};
use tracing::{debug, warn};

use crate::error::ApiError;

/// Shared HTTP client bound to a backend base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Remote for entity type `E` at `<base_url>/api/<E::RESOURCE>`.
    pub fn resource<E: Entity>(&self) -> RestRemote<E> {
        RestRemote {
            client: self.client.clone(),
            collection_url: format!("{}/api/{}", self.base_url, E::RESOURCE),
            _entity: PhantomData,
        }
    }
}

/// REST implementation of [`Remote`] for one resource.
pub struct RestRemote<E> {
    client: Client,
    collection_url: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for RestRemote<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            collection_url: self.collection_url.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> PartialEq for RestRemote<E> {
    fn eq(&self, other: &Self) -> bool {
        self.collection_url == other.collection_url
    }
}

impl<E: Entity> RestRemote<E> {
    pub fn new(base_url: &str) -> Self {
        ApiClient::new(base_url).resource()
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    /// `<collection_url>/<id>` with the id percent-encoded as one path
    /// segment, so `/`, `?` and `#` in string ids stay inside the path.
    fn item_url(&self, id: &EntityId) -> Result<Url, ApiError> {
        let invalid = |reason: String| ApiError::Url {
            url: self.collection_url.clone(),
            reason,
        };
        let mut url = Url::parse(&self.collection_url).map_err(|err| invalid(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot hold path segments".to_string()))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }

    async fn send(
        method: &'static str,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Response, ApiError> {
        debug!(method, url, "sending request");
        let response = request.send().await.map_err(|source| ApiError::Request {
            method,
            url: url.to_string(),
            source,
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                method,
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }

    async fn body(method: &'static str, url: &str, response: Response) -> Result<String, ApiError> {
        response.text().await.map_err(|source| ApiError::Request {
            method,
            url: url.to_string(),
            source,
        })
    }

    fn decode<T: serde::de::DeserializeOwned>(url: &str, text: &str) -> Result<T, ApiError> {
        serde_json::from_str(text).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

impl<E: Entity> Remote<E> for RestRemote<E> {
    async fn list(&self) -> Result<Vec<E>, ResourceError> {
        let url = &self.collection_url;
        let response = Self::send("GET", url, self.client.get(url)).await?;
        let text = Self::body("GET", url, response).await?;
        Ok(Self::decode(url, &text)?)
    }

    async fn create(&self, draft: &E::Draft) -> Result<E, ResourceError> {
        let url = &self.collection_url;
        let response = Self::send("POST", url, self.client.post(url).json(draft)).await?;
        let text = Self::body("POST", url, response).await?;
        Ok(Self::decode(url, &text)?)
    }

    async fn update(&self, id: &EntityId, draft: &E::Draft) -> Result<Option<E>, ResourceError> {
        let url = self.item_url(id)?;
        let request = self.client.put(url.clone()).json(draft);
        let response = Self::send("PUT", url.as_str(), request).await?;
        let text = Self::body("PUT", url.as_str(), response).await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        match Self::decode::<E>(url.as_str(), &text) {
            Ok(entity) => Ok(Some(entity)),
            Err(err) => {
                warn!("ignoring update response: {err}");
                Ok(None)
            }
        }
    }

    async fn delete(&self, id: &EntityId) -> Result<(), ResourceError> {
        let url = self.item_url(id)?;
        Self::send("DELETE", url.as_str(), self.client.delete(url.clone())).await?;
        Ok(())
    }
}
