//! Font content-type resolution by file extension.

/// Content type for a font asset URL, by extension. The CDN serves fonts
/// as `application/octet-stream`, which browsers refuse to apply.
pub fn content_type_for(url: &str) -> &'static str {
    if url.ends_with(".woff") {
        "font/woff"
    } else if url.ends_with(".woff2") {
        "font/woff2"
    } else if url.ends_with(".ttf") {
        "font/ttf"
    } else if url.ends_with(".eot") {
        "application/vnd.ms-fontobject"
    } else {
        "application/octet-stream"
    }
}
