//! File naming for the "download all images" bundle.

/// Delay between consecutive image fetches, in milliseconds.
pub const DEFAULT_DOWNLOAD_DELAY_MS: u64 = 300;

/// Extension used when the image url has none.
pub const FALLBACK_EXTENSION: &str = "png";

/// Extension of the last path segment of `url`, ignoring query and fragment.
pub fn url_extension(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let file = path.rsplit('/').next().unwrap_or_default();
    match file.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext,
        _ => FALLBACK_EXTENSION,
    }
}

/// Make `name` usable as a single archive path segment or header filename.
pub fn sanitize_segment(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | '"' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect()
}

/// Bundle entry name: `{title}-{name or 1-based index}.{extension}`.
pub fn variant_filename(title: &str, variant_name: &str, index: usize, url: &str) -> String {
    let label = if variant_name.is_empty() {
        (index + 1).to_string()
    } else {
        variant_name.to_string()
    };
    sanitize_segment(&format!("{title}-{label}.{}", url_extension(url)))
}
