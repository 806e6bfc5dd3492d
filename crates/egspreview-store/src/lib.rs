pub mod catalog;
pub mod error;
pub mod extract;
pub mod graphql;
pub mod product;
pub mod relay;
pub mod types;

pub use catalog::{build_http_client, EgsCatalog, ProductCatalog};
pub use error::StoreError;
pub use graphql::GraphqlClient;
pub use relay::RelayClient;
pub use types::ProductDetail;
