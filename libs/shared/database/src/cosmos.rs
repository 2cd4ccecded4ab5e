use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::Deserialize;
use serde_json::Value;
use sha2::Sha256;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::error::DatabaseError;
use crate::filter::Filter;
use crate::store::{DocumentStore, Page};

type HmacSha256 = Hmac<Sha256>;

const API_VERSION: &str = "2018-12-31";
const CONTINUATION_HEADER: &str = "x-ms-continuation";

/// Cosmos DB (SQL API) REST client, authenticated with the account master key.
/// Based on: https://learn.microsoft.com/rest/api/cosmos-db/querying-cosmosdb-resources-using-the-rest-api
pub struct CosmosClient {
    client: Client,
    endpoint: String,
    master_key: Vec<u8>,
    database: String,
    page_size: u32,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(rename = "Documents", default)]
    documents: Vec<Value>,
}

impl CosmosClient {
    pub fn new(config: &AppConfig) -> Result<Self, DatabaseError> {
        Self::from_connection_string(
            &config.cosmosdb_connection,
            &config.cosmosdb_database_name,
            config.cosmosdb_page_size,
        )
    }

    /// Accepts the portal format `AccountEndpoint=https://...;AccountKey=...;`
    pub fn from_connection_string(
        connection_string: &str,
        database: &str,
        page_size: u32,
    ) -> Result<Self, DatabaseError> {
        let mut endpoint = None;
        let mut account_key = None;

        for part in connection_string.split(';').filter(|p| !p.trim().is_empty()) {
            let (key, value) = part.trim().split_once('=').ok_or_else(|| {
                DatabaseError::InvalidConnectionString(format!("malformed segment '{}'", part))
            })?;

            match key.to_ascii_lowercase().as_str() {
                "accountendpoint" => endpoint = Some(value.trim_end_matches('/').to_string()),
                "accountkey" => account_key = Some(value.to_string()),
                _ => {}
            }
        }

        let endpoint = endpoint.ok_or_else(|| {
            DatabaseError::InvalidConnectionString("AccountEndpoint is missing".to_string())
        })?;
        let account_key = account_key.ok_or_else(|| {
            DatabaseError::InvalidConnectionString("AccountKey is missing".to_string())
        })?;
        let master_key = STANDARD.decode(account_key.as_bytes()).map_err(|e| {
            DatabaseError::InvalidConnectionString(format!("AccountKey is not base64: {}", e))
        })?;

        Ok(Self {
            client: Client::new(),
            endpoint,
            master_key,
            database: database.to_string(),
            page_size,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn collection_link(&self, collection: &str) -> String {
        format!("dbs/{}/colls/{}", self.database, collection)
    }

    /// Master key token for one request, already url-encoded for the
    /// `Authorization` header.
    pub fn authorization_token(
        &self,
        verb: &str,
        resource_type: &str,
        resource_link: &str,
        date: &str,
    ) -> Result<String, DatabaseError> {
        let payload = format!(
            "{}\n{}\n{}\n{}\n\n",
            verb.to_lowercase(),
            resource_type.to_lowercase(),
            resource_link,
            date.to_lowercase()
        );

        let mut mac = HmacSha256::new_from_slice(&self.master_key)
            .map_err(|e| DatabaseError::InvalidConnectionString(e.to_string()))?;
        mac.update(payload.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        Ok(urlencoding::encode(&format!("type=master&ver=1.0&sig={}", signature)).into_owned())
    }

    fn get_headers(
        &self,
        collection_link: &str,
        continuation: Option<&str>,
    ) -> Result<HeaderMap, DatabaseError> {
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        let token = self.authorization_token("POST", "docs", collection_link, &date)?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, header_value(&token)?);
        headers.insert("x-ms-date", header_value(&date)?);
        headers.insert("x-ms-version", HeaderValue::from_static(API_VERSION));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/query+json"));
        headers.insert("x-ms-documentdb-isquery", HeaderValue::from_static("True"));
        headers.insert(
            "x-ms-documentdb-query-enablecrosspartition",
            HeaderValue::from_static("True"),
        );
        headers.insert("x-ms-max-item-count", header_value(&self.page_size.to_string())?);

        if let Some(token) = continuation {
            headers.insert(CONTINUATION_HEADER, header_value(token)?);
        }

        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, DatabaseError> {
    HeaderValue::from_str(value).map_err(|e| DatabaseError::InvalidHeader(e.to_string()))
}

#[async_trait]
impl DocumentStore for CosmosClient {
    async fn fetch_page(
        &self,
        collection: &str,
        filter: &Filter,
        continuation: Option<&str>,
    ) -> Result<Page, DatabaseError> {
        let collection_link = self.collection_link(collection);
        let url = format!("{}/{}/docs", self.endpoint, collection_link);
        let body = serde_json::to_vec(&filter.to_query())?;

        debug!("Querying {} (continuation: {})", url, continuation.is_some());

        let response = self
            .client
            .post(&url)
            .headers(self.get_headers(&collection_link, continuation)?)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let next = response
            .headers()
            .get(CONTINUATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Cosmos DB query failed ({}): {}", status, error_text);
            return Err(DatabaseError::QueryFailed {
                collection: collection.to_string(),
                status: status.as_u16(),
                message: error_text,
            });
        }

        let payload = response.json::<QueryResponse>().await?;

        Ok(Page {
            documents: payload.documents,
            continuation: next,
        })
    }
}
