//! Wire types for the GraphQL slug lookup, the bypass relay, and the
//! product detail record.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// GraphQL: getMappingByPageSlug
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct MappingVariables<'a> {
    #[serde(rename = "pageSlug")]
    pub page_slug: &'a str,
    pub locale: &'a str,
}

#[derive(Debug, Serialize)]
pub struct PersistedQueryExtensions<'a> {
    #[serde(rename = "persistedQuery")]
    pub persisted_query: PersistedQuery<'a>,
}

#[derive(Debug, Serialize)]
pub struct PersistedQuery<'a> {
    pub version: u32,
    #[serde(rename = "sha256Hash")]
    pub sha256_hash: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct MappingResponse {
    pub data: MappingData,
}

#[derive(Debug, Deserialize)]
pub struct MappingData {
    #[serde(rename = "StorePageMapping")]
    pub store_page_mapping: StorePageMapping,
}

#[derive(Debug, Deserialize)]
pub struct StorePageMapping {
    /// Kept raw: a falsy mapping means "unmapped", anything else must be a
    /// [`PageMapping`].
    #[serde(default)]
    pub mapping: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct PageMapping {
    #[serde(rename = "productId")]
    pub product_id: String,
}

// ---------------------------------------------------------------------------
// Bypass relay
// ---------------------------------------------------------------------------

/// Command body posted to the relay.
#[derive(Debug, Serialize)]
pub struct RelayCommand<'a> {
    pub cmd: &'a str,
    pub session: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
}

/// Envelope returned for every relay command.
#[derive(Debug, Deserialize)]
pub struct RelayResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub solution: Option<RelaySolution>,
}

/// Result of a `request.get` command: the fetched page as the relay's browser saw it.
#[derive(Debug, Deserialize)]
pub struct RelaySolution {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    pub response: String,
}

// ---------------------------------------------------------------------------
// Product detail
// ---------------------------------------------------------------------------

/// Product record from the storefront detail API.
///
/// Only the fields the preview reads are typed; everything else is ignored.
/// `media` is kept loosely typed because its entries vary in shape.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDetail {
    pub title: String,
    #[serde(rename = "shortDescription")]
    pub short_description: String,
    #[serde(default)]
    pub media: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub branding: Option<Branding>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Branding {
    #[serde(default)]
    pub light: Option<BrandingTheme>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrandingTheme {
    /// Usually a hex string, but passed through whatever its JSON type.
    #[serde(rename = "accentColor", default)]
    pub accent_color: Option<serde_json::Value>,
}

/// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` count as absent.
pub(crate) fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
