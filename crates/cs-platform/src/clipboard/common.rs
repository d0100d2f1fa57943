use anyhow::{anyhow, Context, Result};
use clipboard_rs::common::RustImage;
use clipboard_rs::{Clipboard, ClipboardContent, ClipboardContext, ContentFormat, RustImageData};
use cs_core::{ClipboardFormat, ClipboardWriteItem};

use super::format_map::{canonical_format, canonicalize_all};

/// Clipboard operations shared by every platform, expressed against
/// `clipboard-rs`.
pub struct CommonClipboardImpl;

fn map_clipboard_err<T>(
    result: std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T> {
    result.map_err(|e| anyhow!(e))
}

impl CommonClipboardImpl {
    pub fn available_formats(ctx: &ClipboardContext) -> Result<Vec<ClipboardFormat>> {
        let platform_names = map_clipboard_err(ctx.available_formats())?;
        let mut formats = canonicalize_all(&platform_names);

        // clipboard-rs converts any native bitmap to PNG on read
        if ctx.has(ContentFormat::Image) && !formats.iter().any(ClipboardFormat::is_image) {
            formats.push(ClipboardFormat::new(ClipboardFormat::PNG));
        }
        if ctx.has(ContentFormat::Files) && !formats.contains(&ClipboardFormat::file_url()) {
            formats.push(ClipboardFormat::file_url());
        }
        Ok(formats)
    }

    pub fn read_string(ctx: &ClipboardContext, format: &ClipboardFormat) -> Result<Option<String>> {
        match format.as_str() {
            ClipboardFormat::TEXT => read_if(ctx, ContentFormat::Text, |ctx| ctx.get_text()),
            ClipboardFormat::HTML => read_if(ctx, ContentFormat::Html, |ctx| ctx.get_html()),
            ClipboardFormat::RTF => read_if(ctx, ContentFormat::Rtf, |ctx| ctx.get_rich_text()),
            ClipboardFormat::FILE_URL => read_file_urls(ctx),
            _ => Ok(Self::read_bytes(ctx, format)?.and_then(|bytes| String::from_utf8(bytes).ok())),
        }
    }

    pub fn read_bytes(ctx: &ClipboardContext, format: &ClipboardFormat) -> Result<Option<Vec<u8>>> {
        if let Some(platform_name) = platform_name_for(ctx, format)? {
            let bytes = map_clipboard_err(ctx.get_buffer(&platform_name))
                .with_context(|| format!("read clipboard buffer {platform_name}"))?;
            return Ok(Some(bytes));
        }

        match format.as_str() {
            ClipboardFormat::PNG if ctx.has(ContentFormat::Image) => {
                let image = map_clipboard_err(ctx.get_image()).context("read clipboard image")?;
                let png = map_clipboard_err(image.to_png()).context("convert clipboard image")?;
                Ok(Some(png.get_bytes().to_vec()))
            }
            ClipboardFormat::TEXT | ClipboardFormat::HTML | ClipboardFormat::RTF
            | ClipboardFormat::FILE_URL => {
                Ok(Self::read_string(ctx, format)?.map(String::into_bytes))
            }
            _ => Ok(None),
        }
    }

    pub fn write_items(ctx: &ClipboardContext, items: Vec<ClipboardWriteItem>) -> Result<()> {
        let contents = items
            .into_iter()
            .map(to_clipboard_content)
            .collect::<Result<Vec<_>>>()?;
        map_clipboard_err(ctx.set(contents)).context("write clipboard contents")
    }

    pub fn write_text(ctx: &ClipboardContext, text: &str) -> Result<()> {
        map_clipboard_err(ctx.set_text(text.to_string())).context("write clipboard text")
    }

    pub fn clear(ctx: &ClipboardContext) -> Result<()> {
        map_clipboard_err(ctx.clear()).context("clear clipboard")
    }
}

fn read_if(
    ctx: &ClipboardContext,
    kind: ContentFormat,
    read: impl FnOnce(
        &ClipboardContext,
    ) -> std::result::Result<String, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<Option<String>> {
    if !ctx.has(kind) {
        return Ok(None);
    }
    map_clipboard_err(read(ctx)).map(Some)
}

fn read_file_urls(ctx: &ClipboardContext) -> Result<Option<String>> {
    if !ctx.has(ContentFormat::Files) {
        return Ok(None);
    }
    let files = map_clipboard_err(ctx.get_files()).context("read clipboard files")?;
    let urls: Vec<String> = files.iter().map(|file| as_file_url(file)).collect();
    Ok(Some(urls.join("\n")))
}

/// Some platforms report plain paths instead of `file://` URLs.
fn as_file_url(file: &str) -> String {
    if file.contains("://") {
        file.to_string()
    } else {
        format!("file://{}", file.replace(' ', "%20"))
    }
}

fn platform_name_for(ctx: &ClipboardContext, format: &ClipboardFormat) -> Result<Option<String>> {
    // text-like formats are better served by the typed getters
    if matches!(
        format.as_str(),
        ClipboardFormat::TEXT | ClipboardFormat::HTML | ClipboardFormat::RTF | ClipboardFormat::FILE_URL
    ) {
        return Ok(None);
    }
    let platform_names = map_clipboard_err(ctx.available_formats())?;
    Ok(platform_names.into_iter().find(|name| {
        name == format.as_str() || canonical_format(name).as_ref() == Some(format)
    }))
}

fn to_clipboard_content(item: ClipboardWriteItem) -> Result<ClipboardContent> {
    Ok(match item {
        ClipboardWriteItem::Text(text) => ClipboardContent::Text(text),
        ClipboardWriteItem::Html(html) => ClipboardContent::Html(html),
        ClipboardWriteItem::Rtf(bytes) => {
            ClipboardContent::Rtf(String::from_utf8_lossy(&bytes).into_owned())
        }
        ClipboardWriteItem::Image(bytes) => {
            ClipboardContent::Image(RustImageData::from_bytes(&bytes).map_err(|e| anyhow!(e))?)
        }
        ClipboardWriteItem::FileUrl(url) => ClipboardContent::Files(vec![url]),
        ClipboardWriteItem::Raw { format, bytes } => {
            ClipboardContent::Other(format.as_str().to_string(), bytes)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_file_url_prefixes_paths() {
        assert_eq!(as_file_url("/tmp/a b.txt"), "file:///tmp/a%20b.txt");
        assert_eq!(as_file_url("file:///tmp/x"), "file:///tmp/x");
    }

    #[test]
    fn test_to_clipboard_content_maps_items() {
        assert!(matches!(
            to_clipboard_content(ClipboardWriteItem::Text("hi".into())).unwrap(),
            ClipboardContent::Text(text) if text == "hi"
        ));
        assert!(matches!(
            to_clipboard_content(ClipboardWriteItem::Rtf(b"{\\rtf1}".to_vec())).unwrap(),
            ClipboardContent::Rtf(rtf) if rtf == "{\\rtf1}"
        ));
        assert!(matches!(
            to_clipboard_content(ClipboardWriteItem::Raw {
                format: ClipboardFormat::new("com.example.custom"),
                bytes: vec![1, 2],
            })
            .unwrap(),
            ClipboardContent::Other(name, bytes) if name == "com.example.custom" && bytes == vec![1, 2]
        ));
        assert!(to_clipboard_content(ClipboardWriteItem::Image(b"not an image".to_vec())).is_err());
    }
}
