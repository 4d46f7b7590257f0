//! Cloud Firestore over its v1 REST API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use residency::collections;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, info};
use url::Url;

use super::credentials::{ResolvedCredentials, TokenSource};
use super::value::{decode_fields, document_id, encode_fields};
use super::{Document, DocumentStore, StoreError};

const FIRESTORE_ENDPOINT: &str = "https://firestore.googleapis.com";
const LIST_PAGE_SIZE: &str = "300";

/// Token the emulator accepts in place of real credentials.
const EMULATOR_TOKEN: &str = "owner";

#[derive(Debug, Deserialize)]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<RawDocument>,
    next_page_token: Option<String>,
}

#[derive(Debug)]
enum Auth {
    Emulator,
    ServiceAccount(TokenSource),
}

/// Document store backed by Cloud Firestore or the Firestore emulator.
#[derive(Debug)]
pub struct FirestoreStore {
    client: Client,
    documents_url: Url,
    auth: Auth,
}

impl FirestoreStore {
    /// Creates a store and checks that the database answers an authorized
    /// request, so bad credentials or an unreachable host fail here rather
    /// than on the first write.
    pub async fn open(credentials: ResolvedCredentials, database: &str) -> Result<Self, StoreError> {
        let store = Self::new(credentials, database)?;
        store.check_connection().await?;

        info!("Connected to Firestore at {}", store.documents_url);
        Ok(store)
    }

    /// Creates a store without contacting the server.
    pub fn new(credentials: ResolvedCredentials, database: &str) -> Result<Self, StoreError> {
        let endpoint = match &credentials {
            ResolvedCredentials::Emulator { host, .. } => format!("http://{host}"),
            ResolvedCredentials::ServiceAccount(_) => FIRESTORE_ENDPOINT.to_string(),
        };

        let mut documents_url = Url::parse(&endpoint)?;
        documents_url
            .path_segments_mut()
            .map_err(|()| StoreError::Codec(format!("{endpoint} is not a base URL")))?
            .extend([
                "v1",
                "projects",
                credentials.project_id(),
                "databases",
                database,
                "documents",
            ]);

        let auth = match credentials {
            ResolvedCredentials::Emulator { .. } => Auth::Emulator,
            ResolvedCredentials::ServiceAccount(key) => Auth::ServiceAccount(TokenSource::new(key)),
        };

        Ok(Self {
            client: Client::new(),
            documents_url,
            auth,
        })
    }

    /// Builds a URL below the documents root. Each segment is percent-encoded,
    /// so ids may contain `/`, `#`, `?` or spaces.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.documents_url.clone();
        // new() only accepts http(s) endpoints, which always have a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    fn document_url(&self, collection: &str, id: &str) -> Url {
        self.url(&[collection, id])
    }

    /// Lists a single document of the users collection. Missing or empty
    /// collections still answer 200, so only auth, network and database
    /// errors fail.
    async fn check_connection(&self) -> Result<(), StoreError> {
        debug!("LIST {} (connection check)", collections::USERS);

        let request = self
            .client
            .get(self.url(&[collections::USERS]))
            .query(&[("pageSize", "1")]);
        self.send(request, collections::USERS).await?;
        Ok(())
    }

    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, StoreError> {
        let token = match &self.auth {
            Auth::Emulator => EMULATOR_TOKEN.to_string(),
            Auth::ServiceAccount(tokens) => tokens.token(&self.client).await?,
        };
        Ok(request.bearer_auth(token))
    }

    /// Sends a request and turns any non-success status into an error.
    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response, StoreError> {
        let resp = self.authorized(request).await?.send().await?;
        check_status(resp, path).await
    }
}

async fn check_status(resp: Response, path: &str) -> Result<Response, StoreError> {
    if resp.status().is_success() {
        return Ok(resp);
    }

    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status,
        path: path.to_string(),
        body,
    })
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let path = format!("{collection}/{id}");
        debug!("GET {path}");

        let request = self.client.get(self.document_url(collection, id));
        let resp = self.authorized(request).await?.send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let raw: RawDocument = check_status(resp, &path).await?.json().await?;
        decode_fields(&raw.fields).map(Some)
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> Result<(), StoreError> {
        let path = format!("{collection}/{id}");
        debug!("PATCH {path}");

        // PATCH without an update mask replaces the whole document, creating it if needed.
        let body = json!({ "fields": encode_fields(&document) });
        let request = self.client.patch(self.document_url(collection, id)).json(&body);
        self.send(request, &path).await?;
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<(String, Document)>, StoreError> {
        let url = self.url(&[collection]);
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            debug!("LIST {collection} (page token: {page_token:?})");

            let mut request = self.client.get(url.clone()).query(&[("pageSize", LIST_PAGE_SIZE)]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let page: ListResponse = self.send(request, collection).await?.json().await?;
            for raw in page.documents {
                let id = document_id(&raw.name)
                    .ok_or_else(|| StoreError::Codec(format!("bad document name {}", raw.name)))?
                    .to_string();
                documents.push((id, decode_fields(&raw.fields)?));
            }

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(documents)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let path = format!("{collection}/{id}");
        debug!("DELETE {path}");

        let request = self.client.delete(self.document_url(collection, id));
        self.send(request, &path).await?;
        Ok(())
    }
}
