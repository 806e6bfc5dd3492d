//! Slug-to-product lookup against the storefront GraphQL endpoint.
//!
//! The lookup is a persisted query: the request carries only the operation
//! name, the variables, and the precomputed hash of the query text.

use reqwest::{Client, Url};

use crate::error::StoreError;
use crate::types::{
    is_truthy, MappingResponse, MappingVariables, PageMapping, PersistedQuery,
    PersistedQueryExtensions,
};

pub const MAPPING_OPERATION: &str = "getMappingByPageSlug";
pub const MAPPING_QUERY_HASH: &str =
    "781fd69ec8116125fa8dc245c0838198cdf5283e31647d08dfa27f45ee8b1f30";

/// Client for the storefront GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    client: Client,
    endpoint: Url,
}

impl GraphqlClient {
    /// Wraps a shared `reqwest::Client` for the given GraphQL endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidUrl`] if `endpoint` does not parse.
    pub fn new(client: Client, endpoint: &str) -> Result<Self, StoreError> {
        let endpoint = Url::parse(endpoint).map_err(|e| StoreError::InvalidUrl {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self { client, endpoint })
    }

    /// Looks up the product mapped to the storefront page `slug` in `locale`.
    ///
    /// Returns `Ok(None)` when the page has no mapping (missing, `null`, `{}`,
    /// or an empty product id). A mapping without `productId` is a shape error.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Http`] on network failure.
    /// - [`StoreError::UnexpectedStatus`] on a non-2xx response.
    /// - [`StoreError::Deserialize`] if the body lacks `data.StorePageMapping`,
    ///   or a present mapping lacks a string `productId`.
    pub async fn resolve_product_id(
        &self,
        locale: &str,
        slug: &str,
    ) -> Result<Option<String>, StoreError> {
        let url = self.mapping_url(locale, slug)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: MappingResponse =
            serde_json::from_str(&body).map_err(|e| StoreError::Deserialize {
                context: format!("{MAPPING_OPERATION}(locale={locale}, slug={slug})"),
                source: e,
            })?;

        let product_id = match parsed.data.store_page_mapping.mapping {
            Some(raw) if is_truthy(&raw) => {
                let mapping: PageMapping =
                    serde_json::from_value(raw).map_err(|e| StoreError::Deserialize {
                        context: format!(
                            "{MAPPING_OPERATION} mapping (locale={locale}, slug={slug})"
                        ),
                        source: e,
                    })?;
                Some(mapping.product_id).filter(|id| !id.is_empty())
            }
            _ => None,
        };

        tracing::debug!(locale, slug, product_id = ?product_id, "store page mapping resolved");
        Ok(product_id)
    }

    /// Builds the GET URL carrying the persisted-query parameters.
    fn mapping_url(&self, locale: &str, slug: &str) -> Result<Url, StoreError> {
        let variables = serde_json::to_string(&MappingVariables {
            page_slug: slug,
            locale,
        })
        .map_err(|e| StoreError::Encode {
            context: format!("{MAPPING_OPERATION} variables"),
            source: e,
        })?;
        let extensions = serde_json::to_string(&PersistedQueryExtensions {
            persisted_query: PersistedQuery {
                version: 1,
                sha256_hash: MAPPING_QUERY_HASH,
            },
        })
        .map_err(|e| StoreError::Encode {
            context: format!("{MAPPING_OPERATION} extensions"),
            source: e,
        })?;

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("operationName", MAPPING_OPERATION)
            .append_pair("variables", &variables)
            .append_pair("extensions", &extensions);
        Ok(url)
    }
}
