//! Image and color selection for a [`ProductDetail`], and its conversion into
//! a [`PreviewInfo`].

use std::borrow::Cow;

use egspreview_core::{store_page_url, PreviewInfo, DEFAULT_THEME_COLOR};
use serde_json::Value;

use crate::error::StoreError;
use crate::types::{is_truthy, ProductDetail};

const PRIMARY_IMAGE_KEY: &str = "card16x9";
const FALLBACK_IMAGE_KEY: &str = "logo";

impl ProductDetail {
    /// Source URL of the preview image.
    ///
    /// Uses the `card16x9` asset when present and truthy, otherwise `logo`.
    /// There is no further fallback: when the chosen asset is missing or has no
    /// string `imageSrc`, this is an upstream shape error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingImage`] when no usable asset exists.
    pub fn preview_image(&self, product_id: &str) -> Result<&str, StoreError> {
        let asset = self
            .media
            .get(PRIMARY_IMAGE_KEY)
            .filter(|v| is_truthy(v))
            .or_else(|| self.media.get(FALLBACK_IMAGE_KEY));

        asset
            .and_then(|a| a.get("imageSrc"))
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::MissingImage {
                product_id: product_id.to_owned(),
            })
    }

    /// Light-theme accent color, or [`DEFAULT_THEME_COLOR`] when absent or
    /// `null`. Non-string values are rendered as their JSON text.
    #[must_use]
    pub fn theme_color(&self) -> Cow<'_, str> {
        let accent = self
            .branding
            .as_ref()
            .and_then(|b| b.light.as_ref())
            .and_then(|l| l.accent_color.as_ref());

        match accent {
            None | Some(Value::Null) => Cow::Borrowed(DEFAULT_THEME_COLOR),
            Some(Value::String(s)) => Cow::Borrowed(s),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }

    /// Builds the preview for the storefront page `/{locale}/p/{slug}`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingImage`] when neither image asset is usable.
    pub fn into_preview(
        self,
        product_id: &str,
        locale: &str,
        slug: &str,
    ) -> Result<PreviewInfo, StoreError> {
        let image = self.preview_image(product_id)?.to_owned();
        let color = self.theme_color().into_owned();

        Ok(PreviewInfo {
            url: store_page_url(locale, slug),
            locale: locale.to_owned(),
            title: self.title,
            description: self.short_description,
            image,
            color,
        })
    }
}
