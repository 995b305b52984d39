use crate::models::Product;
use axum::{
    body::Bytes,
    extract::rejection::JsonRejection,
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};

/// Body of `POST /products`. Missing fields are accepted and stay absent.
#[derive(Debug, Default, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl CreateProductRequest {
    /// Decode a create body leniently.
    ///
    /// A body that is empty, or not declared as JSON, reads as `{}`. A JSON
    /// body that fails to parse is still rejected.
    pub fn from_body(headers: &HeaderMap, body: &Bytes) -> Result<Self, JsonRejection> {
        if !is_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Json::<Self>::from_bytes(body).map(|Json(request)| request)
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Wire shape of a listed product: always exactly `id`, `name`, `category`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductResponse {
    pub id: String,
    pub name: Option<String>,
    pub category: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            category: product.category,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub const OK: Self = Self { status: "ok" };
    pub const CREATED: Self = Self { status: "created" };
}
