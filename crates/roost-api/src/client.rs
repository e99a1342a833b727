// Async HTTP client for the apartment collection resource.
//
// Base path: {base_url}/apartments
// One request per call. Nothing is retried and nothing is swallowed.

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{ApartmentBody, ApartmentResponse, PriceSort};

const COLLECTION: &str = "apartments";

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the apartment listing REST API.
///
/// Speaks plain JSON against `{base_url}/apartments`. Error responses are
/// normalized into [`Error::Api`] with an ordered list of messages, whatever
/// shape the server chose for its body.
pub struct ApartmentClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApartmentClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` using the given transport settings.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Ensure the base path ends with a slash so `join` appends instead of
    /// replacing the last segment (`https://host/api` → `https://host/api/`).
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn collection_url(&self) -> Result<Url, Error> {
        Ok(self.base_url.join(COLLECTION)?)
    }

    /// `{base}/apartments/{id}` with `id` percent-encoded as one segment.
    fn item_url(&self, id: &str) -> Result<Url, Error> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(id);
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        Error::Api {
            status: status.as_u16(),
            messages: error_messages(status, &raw),
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// `GET /apartments?priceSort={asc|desc}&rooms={n}`
    ///
    /// `rooms` is omitted from the query entirely when `None`.
    pub async fn list_apartments(
        &self,
        sort: PriceSort,
        rooms: Option<i64>,
    ) -> Result<Vec<ApartmentResponse>, Error> {
        let mut params = vec![("priceSort", sort.as_str().to_owned())];
        if let Some(rooms) = rooms {
            params.push(("rooms", rooms.to_string()));
        }
        self.get_with_params(self.collection_url()?, &params).await
    }

    /// `GET /apartments/{id}`
    pub async fn get_apartment(&self, id: &str) -> Result<ApartmentResponse, Error> {
        self.get(self.item_url(id)?).await
    }

    /// `POST /apartments`
    pub async fn create_apartment(&self, body: &ApartmentBody) -> Result<ApartmentResponse, Error> {
        self.post(self.collection_url()?, body).await
    }

    /// `PUT /apartments/{id}`
    pub async fn update_apartment(
        &self,
        id: &str,
        body: &ApartmentBody,
    ) -> Result<ApartmentResponse, Error> {
        self.put(self.item_url(id)?, body).await
    }

    /// `DELETE /apartments/{id}`: any 2xx (200 with or without a body, 204)
    /// counts as success.
    pub async fn delete_apartment(&self, id: &str) -> Result<(), Error> {
        self.delete(self.item_url(id)?).await
    }
}

// ── Error body normalization ─────────────────────────────────────────

/// Flatten an error body into an ordered list of messages.
///
/// Accepted shapes: empty, plain text, a JSON string, an array of strings
/// (field-level messages), or an object whose `message`/`errors`/`error`
/// key holds either of those. Anything else is kept verbatim.
fn error_messages(status: StatusCode, raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return vec![status.to_string()];
    }

    let messages = match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => ["message", "errors", "error"]
            .iter()
            .find_map(|key| map.get(*key))
            .map(flatten_value)
            .unwrap_or_else(|| vec![trimmed.to_owned()]),
        Ok(value) => flatten_value(&value),
        Err(_) => vec![trimmed.to_owned()],
    };

    if messages.is_empty() {
        vec![status.to_string()]
    } else {
        messages
    }
}

fn flatten_value(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(flatten_value).collect(),
        Value::Object(map) => map
            .get("message")
            .map_or_else(|| vec![value.to_string()], flatten_value),
        other => vec![other.to_string()],
    }
}
