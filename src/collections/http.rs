use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::CollectionClient;
use super::dto::{Envelope, EnvelopeError};
use crate::error::AppError;
use crate::models::Document;

pub(crate) fn build_client() -> Result<Client, AppError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))
}

/// [`CollectionClient`] for a REST document store:
/// `GET/POST {path}` and `PUT/DELETE {path}/{_id}`.
pub struct RestCollectionClient<T> {
    client: Client,
    url: String,
    api_token: Option<String>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Document> RestCollectionClient<T> {
    pub fn new(client: Client, base_url: &str, path: &str, api_token: Option<String>) -> Self {
        let url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Self {
            client,
            url,
            api_token,
            _record: PhantomData,
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.api_token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    fn record_url(&self, key: &str) -> String {
        format!("{}/{}", self.url, key)
    }

    async fn read<R: DeserializeOwned>(&self, response: Response) -> Result<R, AppError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::Remote {
                collection: T::COLLECTION,
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope<R> = serde_json::from_str(&body).map_err(|e| AppError::Decode {
            collection: T::COLLECTION,
            message: e.to_string(),
        })?;

        envelope.into_inner().map_err(|e| match e {
            EnvelopeError::Rejected(message) => AppError::Remote {
                collection: T::COLLECTION,
                status: status.as_u16(),
                body: message,
            },
            EnvelopeError::Malformed(message) => AppError::Decode {
                collection: T::COLLECTION,
                message,
            },
        })
    }
}

#[async_trait]
impl<T: Document> CollectionClient<T> for RestCollectionClient<T> {
    async fn list_all(&self) -> Result<Vec<T>, AppError> {
        debug!("GET {}", self.url);
        let response = self.request(Method::GET, &self.url).send().await?;
        self.read(response).await
    }

    async fn create(&self, payload: &T) -> Result<T, AppError> {
        debug!("POST {}", self.url);
        let response = self
            .request(Method::POST, &self.url)
            .json(payload)
            .send()
            .await?;
        self.read(response).await
    }

    async fn update(&self, key: &str, payload: &T) -> Result<T, AppError> {
        let url = self.record_url(key);
        debug!("PUT {}", url);
        let response = self.request(Method::PUT, &url).json(payload).send().await?;
        self.read(response).await
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        let url = self.record_url(key);
        debug!("DELETE {}", url);
        let response = self.request(Method::DELETE, &url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Failed to read {} delete response: {}", T::COLLECTION, e);
                    format!("<unreadable body: {}>", e)
                }
            };
            return Err(AppError::Remote {
                collection: T::COLLECTION,
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
