// ============================================================================
// TRANSPORT - Petición/respuesta HTTP crudas (sin lógica de sesión)
// ============================================================================

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::error::ApiError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

#[derive(Clone, PartialEq, Debug)]
pub enum RequestBody {
    Json(String),
    Form(String),
}

impl RequestBody {
    pub fn content_type(&self) -> &'static str {
        match self {
            RequestBody::Json(_) => "application/json",
            RequestBody::Form(_) => "application/x-www-form-urlencoded",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RequestBody::Json(s) | RequestBody::Form(s) => s,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post_form(url: impl Into<String>, form_body: String) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(RequestBody::Form(form_body)),
        }
    }

    pub fn post_json<B: Serialize>(url: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        Ok(Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(RequestBody::Json(serde_json::to_string(body)?)),
        })
    }

    pub fn put_json<B: Serialize>(url: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        Ok(Self {
            method: HttpMethod::Put,
            url: url.into(),
            headers: Vec::new(),
            body: Some(RequestBody::Json(serde_json::to_string(body)?)),
        })
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    #[cfg(test)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Respuesta cruda: el llamador decide cómo interpretarla
#[derive(Clone, PartialEq, Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: None,
            content_disposition: None,
            body: body.into(),
        }
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.starts_with("application/json"))
            .unwrap_or(false)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(ApiError::from)
    }

    /// Texto de error del servidor: `{"detail": "..."}` o `{"message": "..."}`.
    /// Los `detail` de validación (listas) no cuentan.
    pub fn detail(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        ["detail", "message"]
            .iter()
            .filter_map(|key| value.get(*key))
            .find_map(|v| v.as_str().map(str::to_string))
            .filter(|s| !s.trim().is_empty())
    }
}

/// Envío de peticiones. En el navegador es `fetch`; en tests, un doble en memoria.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Transport real sobre `fetch` (gloo-net)
#[derive(Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
            HttpMethod::Put => Request::put(&request.url),
        };
        let builder = request
            .headers
            .iter()
            .fold(builder, |b, (name, value)| b.header(name, value));

        let prepared = match request.body {
            Some(body) => builder
                .header("Content-Type", body.content_type())
                .body(body.as_str().to_string())?,
            None => builder.build()?,
        };

        let response = prepared.send().await?;
        let headers = response.headers();

        Ok(ApiResponse {
            status: response.status(),
            content_type: headers.get("content-type"),
            content_disposition: headers.get("content-disposition"),
            body: response.binary().await?,
        })
    }
}
