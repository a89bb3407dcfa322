use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ClientError, Result};
use crate::MarketplaceClient;

/// A successful response body: parsed JSON when the server said so, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    Json(serde_json::Value),
    Text(String),
}

impl ApiBody {
    /// Decodes into `T`. Text bodies are tried as JSON as well, since some
    /// endpoints answer JSON without the matching content type.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            ApiBody::Json(value) => Ok(serde_json::from_value(value)?),
            ApiBody::Text(text) => Ok(serde_json::from_str(&text)?),
        }
    }

    /// Flattens the body into a display message.
    pub fn into_message(self) -> String {
        match self {
            ApiBody::Json(serde_json::Value::String(s)) => s,
            ApiBody::Json(value) => value.to_string(),
            ApiBody::Text(text) => text,
        }
    }
}

impl MarketplaceClient {
    /// Sends one request to `api_base + endpoint` and surfaces non-2xx responses as errors.
    pub async fn api_call<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<ApiBody> {
        let url = format!("{}{}", self.api_base, endpoint);
        log::info!("Making API call: {} {}", method, url);

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            let payload = serde_json::to_string(body)?;
            log::debug!("Request body: {}", payload);
            request = request.body(payload);
        }

        Self::read_response(request).await
    }

    /// Multipart variant of [`Self::api_call`] for the image upload endpoints.
    /// The form's own boundary content type replaces the JSON default.
    pub async fn api_call_multipart(
        &self,
        method: Method,
        endpoint: &str,
        form: Form,
    ) -> Result<ApiBody> {
        let url = format!("{}{}", self.api_base, endpoint);
        log::info!("Making multipart API call: {} {}", method, url);
        Self::read_response(self.client.request(method, &url).multipart(form)).await
    }

    async fn read_response(request: RequestBuilder) -> Result<ApiBody> {
        let response = request.send().await.map_err(|e| {
            log::error!("API call failed: {}", e);
            ClientError::from(e)
        })?;

        let status = response.status();
        log::info!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("API error response: {}", error_text);
            let message = if error_text.is_empty() {
                format!("HTTP error! status: {}", status.as_u16())
            } else {
                error_text
            };
            return Err(ClientError::Http { status, message });
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);

        if is_json {
            let data = response.json::<serde_json::Value>().await?;
            log::debug!("Response data: {}", data);
            Ok(ApiBody::Json(data))
        } else {
            let text = response.text().await?;
            log::debug!("Response text: {}", text);
            Ok(ApiBody::Text(text))
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.api_call::<()>(Method::GET, endpoint, None)
            .await?
            .decode()
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.api_call(method, endpoint, Some(body)).await?.decode()
    }

    /// Bodiless POST/DELETE style calls whose answer is a confirmation message.
    pub(crate) async fn send_empty(&self, method: Method, endpoint: &str) -> Result<String> {
        Ok(self
            .api_call::<()>(method, endpoint, None)
            .await?
            .into_message())
    }

    pub(crate) async fn send_empty_json<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
    ) -> Result<T> {
        self.api_call::<()>(method, endpoint, None).await?.decode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_reads_json_from_text_bodies() {
        let body = ApiBody::Text(r#"{"id": 4}"#.to_string());
        let value: serde_json::Value = body.decode().unwrap();
        assert_eq!(value, json!({"id": 4}));
    }

    #[test]
    fn decode_fails_on_plain_text() {
        let body = ApiBody::Text("Property deleted successfully".to_string());
        assert!(matches!(
            body.decode::<serde_json::Value>(),
            Err(ClientError::Decode(_))
        ));
    }

    #[test]
    fn into_message_unwraps_json_strings() {
        assert_eq!(ApiBody::Json(json!("done")).into_message(), "done");
        assert_eq!(ApiBody::Json(json!({"ok": true})).into_message(), r#"{"ok":true}"#);
        assert_eq!(ApiBody::Text("plain".into()).into_message(), "plain");
    }
}
