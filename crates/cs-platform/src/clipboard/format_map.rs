use cs_core::ClipboardFormat;

/// Map a platform representation name onto the well-known format it
/// carries, or `None` when it has no canonical counterpart.
///
/// Covers macOS UTIs, X11/Wayland MIME targets and the Windows names
/// reported by `clipboard-rs`.
pub fn canonical_format(platform_name: &str) -> Option<ClipboardFormat> {
    let lower = platform_name.to_ascii_lowercase();
    let canonical = match lower.as_str() {
        "public.utf8-plain-text" | "utf8_string" | "string" | "text" | "cf_unicodetext"
        | "text/plain" | "text/plain;charset=utf-8" => ClipboardFormat::text_plain(),
        "public.html" | "text/html" | "html format" => ClipboardFormat::text_html(),
        "public.rtf" | "text/rtf" | "application/rtf" | "rich text format" => {
            ClipboardFormat::text_rtf()
        }
        "public.png" | "image/png" | "png" => ClipboardFormat::new(ClipboardFormat::PNG),
        "public.tiff" | "image/tiff" | "nexttiff" => ClipboardFormat::new(ClipboardFormat::TIFF),
        "public.jpeg" | "image/jpeg" | "jfif" => ClipboardFormat::new(ClipboardFormat::JPEG),
        "public.file-url" | "text/uri-list" | "cf_hdrop" => ClipboardFormat::file_url(),
        _ => return None,
    };
    Some(canonical)
}

/// Canonical view of the platform names, order preserved, duplicates
/// dropped. Unknown names pass through unchanged.
pub(crate) fn canonicalize_all<I, S>(platform_names: I) -> Vec<ClipboardFormat>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut formats: Vec<ClipboardFormat> = Vec::new();
    for name in platform_names {
        let name = name.as_ref();
        let format = canonical_format(name).unwrap_or_else(|| ClipboardFormat::new(name));
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    formats
}
