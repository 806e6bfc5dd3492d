//! GET /{locale}/p/{slug} — Open Graph preview of a storefront product page.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Extension,
};
use egspreview_core::PreviewInfo;
use egspreview_store::{ProductCatalog, StoreError};

use crate::middleware::RequestId;
use crate::render::render_preview;

use super::AppState;

pub(super) async fn get_store_preview<C: ProductCatalog>(
    State(state): State<AppState<C>>,
    Extension(req_id): Extension<RequestId>,
    Path((locale, slug)): Path<(String, String)>,
) -> Response {
    match resolve_preview(state.catalog.as_ref(), &locale, &slug).await {
        Ok(Some(info)) => Html(render_preview(&info)).into_response(),
        Ok(None) => {
            tracing::info!(request_id = %req_id.0, locale = %locale, slug = %slug, "no product mapped to store page");
            let placeholder = PreviewInfo::placeholder(&locale, &slug);
            (StatusCode::NOT_FOUND, Html(render_preview(&placeholder))).into_response()
        }
        Err(error) => {
            tracing::error!(
                request_id = %req_id.0,
                locale = %locale,
                slug = %slug,
                shape_error = error.is_shape_error(),
                error = %error,
                "store preview failed"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Slug lookup, then detail fetch, then field extraction. `Ok(None)` means
/// the page has no product mapping.
async fn resolve_preview<C: ProductCatalog>(
    catalog: &C,
    locale: &str,
    slug: &str,
) -> Result<Option<PreviewInfo>, StoreError> {
    let Some(product_id) = catalog.resolve_slug(locale, slug).await? else {
        return Ok(None);
    };

    let detail = catalog.fetch_product_detail(&product_id, locale).await?;
    let info = detail.into_preview(&product_id, locale, slug)?;
    tracing::debug!(locale, slug, product_id = %product_id, "store preview resolved");
    Ok(Some(info))
}
