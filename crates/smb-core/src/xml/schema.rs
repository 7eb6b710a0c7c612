//! Namespace declarations for the two document roots.

pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

pub const SITEMAP_INDEX_SCHEMA_LOCATION: &str = "http://www.sitemaps.org/schemas/sitemap/0.9 \
     http://www.sitemaps.org/schemas/sitemap/0.9/siteindex.xsd";

pub const URLSET_SCHEMA_LOCATION: &str = "http://www.sitemaps.org/schemas/sitemap/0.9 \
     http://www.sitemaps.org/schemas/sitemap/0.9/sitemap.xsd";

/// Extension namespaces declared on every `urlset`, used or not.
pub const URLSET_NAMESPACES: [(&str, &str); 7] = [
    ("xmlns:image", "http://www.google.com/schemas/sitemap-image/1.1"),
    ("xmlns:video", "http://www.google.com/schemas/sitemap-video/1.1"),
    ("xmlns:geo", "http://www.google.com/geo/schemas/sitemap/1.0"),
    ("xmlns:news", "http://www.google.com/schemas/sitemap-news/0.9"),
    ("xmlns:mobile", "http://www.google.com/schemas/sitemap-mobile/1.0"),
    ("xmlns:pagemap", "http://www.google.com/schemas/sitemap-pagemap/1.0"),
    ("xmlns:xhtml", "http://www.w3.org/1999/xhtml"),
];

pub(crate) fn urlset_attributes() -> Vec<(&'static str, &'static str)> {
    let mut attrs = Vec::with_capacity(URLSET_NAMESPACES.len() + 3);
    attrs.push(("xmlns:xsi", XSI_NS));
    attrs.push(("xmlns", SITEMAP_NS));
    attrs.extend(URLSET_NAMESPACES);
    attrs.push(("xsi:schemaLocation", URLSET_SCHEMA_LOCATION));
    attrs
}

pub(crate) fn index_attributes() -> [(&'static str, &'static str); 3] {
    [
        ("xmlns:xsi", XSI_NS),
        ("xmlns", SITEMAP_NS),
        ("xsi:schemaLocation", SITEMAP_INDEX_SCHEMA_LOCATION),
    ]
}
