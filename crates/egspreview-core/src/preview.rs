//! Rendering input for a storefront link preview.

/// Public storefront origin used for canonical page URLs.
pub const STORE_BASE_URL: &str = "https://store.epicgames.com";

/// Theme color used when a product has no accent color, and on the placeholder page.
pub const DEFAULT_THEME_COLOR: &str = "#000000";

/// Canonical storefront URL for a product page: `{STORE_BASE_URL}/{locale}/p/{slug}`.
///
/// Both parts are inserted verbatim.
#[must_use]
pub fn store_page_url(locale: &str, slug: &str) -> String {
    format!("{STORE_BASE_URL}/{locale}/p/{slug}")
}

/// The six values interpolated into the Open Graph template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewInfo {
    pub url: String,
    pub locale: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub color: String,
}

impl PreviewInfo {
    /// Preview served when no product maps to the requested page: empty text
    /// fields, no image, black theme color.
    #[must_use]
    pub fn placeholder(locale: &str, slug: &str) -> Self {
        Self {
            url: store_page_url(locale, slug),
            locale: locale.to_owned(),
            title: String::new(),
            description: String::new(),
            image: String::new(),
            color: DEFAULT_THEME_COLOR.to_owned(),
        }
    }
}
