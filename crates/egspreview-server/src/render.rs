//! Open Graph / Twitter meta page.

use egspreview_core::PreviewInfo;

/// Renders the link-preview document for `info`.
///
/// Values are interpolated verbatim; nothing is HTML-escaped.
#[must_use]
pub fn render_preview(info: &PreviewInfo) -> String {
    format!(
        r#"
    <!DOCTYPE html>
    <html lang="en">
        <head>
            <meta property="og:url" content="{url}"/>
            <meta property="og:site_name" content="Epic Games Store"/>
            <meta property="og:locale" content="{locale}"/>
            <meta property="og:type" content="website"/>
            <meta property="og:title" content="{title}"/>
            <meta property="og:description" content="{description}"/>
            <meta property="og:image" content="{image}"/>
            <meta name="twitter:card" content="summary_large_image"/>
            <meta name="theme-color" content="{color}"/>
        </head>
        <body></body>
    </html>
    "#,
        url = info.url,
        locale = info.locale,
        title = info.title,
        description = info.description,
        image = info.image,
        color = info.color,
    )
}
