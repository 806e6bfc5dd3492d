//! The two lookups a preview needs, behind one narrow trait.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::StoreError;
use crate::extract::extract_pre_text;
use crate::graphql::GraphqlClient;
use crate::relay::RelayClient;
use crate::types::ProductDetail;

/// Source of storefront product data.
///
/// The server depends only on this trait so the relay mechanism can be swapped
/// or replaced by an in-memory double in tests.
pub trait ProductCatalog: Send + Sync + 'static {
    /// Product id mapped to the storefront page, or `None` when unmapped.
    fn resolve_slug(
        &self,
        locale: &str,
        slug: &str,
    ) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Full product record for `product_id` in `locale`.
    fn fetch_product_detail(
        &self,
        product_id: &str,
        locale: &str,
    ) -> impl Future<Output = Result<ProductDetail, StoreError>> + Send;

    /// Name of the upstream session this catalog fetches through, if any.
    fn session_name(&self) -> Option<&str> {
        None
    }
}

/// Builds the single outbound HTTP client shared by every collaborator.
///
/// `timeout_secs = None` leaves requests without an overall deadline.
///
/// # Errors
///
/// Returns [`StoreError::Http`] if the underlying `reqwest::Client`
/// cannot be constructed.
pub fn build_http_client(user_agent: &str, timeout_secs: Option<u64>) -> Result<Client, StoreError> {
    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent);
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Production catalog: GraphQL for the slug mapping, the bypass relay for the
/// product detail API.
#[derive(Debug, Clone)]
pub struct EgsCatalog {
    graphql: GraphqlClient,
    relay: RelayClient,
    product_api_url: Url,
    country: String,
}

impl EgsCatalog {
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidUrl`] if `product_api_url` does not parse
    /// or cannot take path segments.
    pub fn new(
        graphql: GraphqlClient,
        relay: RelayClient,
        product_api_url: &str,
        country: &str,
    ) -> Result<Self, StoreError> {
        let parsed = Url::parse(product_api_url).map_err(|e| StoreError::InvalidUrl {
            url: product_api_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl {
                url: product_api_url.to_owned(),
                reason: "URL cannot take path segments".to_string(),
            });
        }
        Ok(Self {
            graphql,
            relay,
            product_api_url: parsed,
            country: country.to_owned(),
        })
    }

    #[must_use]
    pub fn relay(&self) -> &RelayClient {
        &self.relay
    }

    /// Detail API URL: `{base}/{product_id}?country={country}&locale={locale}&store=EGS`.
    #[must_use]
    pub fn product_url(&self, product_id: &str, locale: &str) -> Url {
        let mut url = self.product_api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(product_id);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("country", &self.country)
            .append_pair("locale", locale)
            .append_pair("store", "EGS");
        url
    }
}

impl ProductCatalog for EgsCatalog {
    async fn resolve_slug(&self, locale: &str, slug: &str) -> Result<Option<String>, StoreError> {
        self.graphql.resolve_product_id(locale, slug).await
    }

    async fn fetch_product_detail(
        &self,
        product_id: &str,
        locale: &str,
    ) -> Result<ProductDetail, StoreError> {
        let url = self.product_url(product_id, locale);
        let html = self.relay.request_get(url.as_str()).await?;
        let json = extract_pre_text(&html).ok_or_else(|| StoreError::MissingPreBlock {
            url: url.to_string(),
        })?;

        serde_json::from_str(&json).map_err(|e| StoreError::Deserialize {
            context: format!("product detail {product_id} ({locale})"),
            source: e,
        })
    }

    fn session_name(&self) -> Option<&str> {
        Some(self.relay.session())
    }
}
