//! MIME type module
//!
//! Extension to Content-Type lookup, plus the charset/bare-type split used by
//! content descriptors.

use std::fmt;

/// Content-Type for a known extension, `None` otherwise
///
/// # Examples
/// ```
/// use yarhs_content::http::mime::lookup_content_type;
/// assert_eq!(lookup_content_type(Some("html")), Some("text/html; charset=utf-8"));
/// assert_eq!(lookup_content_type(Some("mp4")), Some("video/mp4"));
/// assert_eq!(lookup_content_type(None), None);
/// ```
pub fn lookup_content_type(extension: Option<&str>) -> Option<&'static str> {
    let ext = extension.map(str::to_ascii_lowercase);
    let content_type = match ext.as_deref()? {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "txt" | "md" => "text/plain; charset=utf-8",
        "xml" => "application/xml",
        "js" | "mjs" => "application/javascript",
        "json" => "application/json",
        "wasm" => "application/wasm",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mp3" => "audio/mpeg",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" | "gzip" => "application/gzip",
        _ => return None,
    };
    Some(content_type)
}

/// Known MIME types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeType {
    TextHtml,
    TextCss,
    TextPlain,
    ApplicationXml,
    ApplicationJavascript,
    ApplicationJson,
    ApplicationWasm,
    ImagePng,
    ImageJpeg,
    ImageGif,
    ImageSvg,
    ImageIcon,
    ImageWebp,
    VideoMp4,
    VideoWebm,
    AudioMpeg,
    FontWoff,
    FontWoff2,
    ApplicationPdf,
    ApplicationZip,
    ApplicationGzip,
    OctetStream,
}

impl MimeType {
    const ALL: [Self; 22] = [
        Self::TextHtml,
        Self::TextCss,
        Self::TextPlain,
        Self::ApplicationXml,
        Self::ApplicationJavascript,
        Self::ApplicationJson,
        Self::ApplicationWasm,
        Self::ImagePng,
        Self::ImageJpeg,
        Self::ImageGif,
        Self::ImageSvg,
        Self::ImageIcon,
        Self::ImageWebp,
        Self::VideoMp4,
        Self::VideoWebm,
        Self::AudioMpeg,
        Self::FontWoff,
        Self::FontWoff2,
        Self::ApplicationPdf,
        Self::ApplicationZip,
        Self::ApplicationGzip,
        Self::OctetStream,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TextHtml => "text/html",
            Self::TextCss => "text/css",
            Self::TextPlain => "text/plain",
            Self::ApplicationXml => "application/xml",
            Self::ApplicationJavascript => "application/javascript",
            Self::ApplicationJson => "application/json",
            Self::ApplicationWasm => "application/wasm",
            Self::ImagePng => "image/png",
            Self::ImageJpeg => "image/jpeg",
            Self::ImageGif => "image/gif",
            Self::ImageSvg => "image/svg+xml",
            Self::ImageIcon => "image/x-icon",
            Self::ImageWebp => "image/webp",
            Self::VideoMp4 => "video/mp4",
            Self::VideoWebm => "video/webm",
            Self::AudioMpeg => "audio/mpeg",
            Self::FontWoff => "font/woff",
            Self::FontWoff2 => "font/woff2",
            Self::ApplicationPdf => "application/pdf",
            Self::ApplicationZip => "application/zip",
            Self::ApplicationGzip => "application/gzip",
            Self::OctetStream => "application/octet-stream",
        }
    }

    /// Look up a bare content type (no parameters), case-insensitively
    ///
    /// Returns `None` for types outside the known table.
    pub fn lookup(bare: &str) -> Option<Self> {
        let bare = bare.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(bare))
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extract the charset parameter from a Content-Type value
///
/// # Examples
/// ```
/// use yarhs_content::http::mime::charset_from_content_type;
/// assert_eq!(charset_from_content_type("text/html; charset=utf-8"), Some("utf-8"));
/// assert_eq!(charset_from_content_type("image/png"), None);
/// ```
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    let (_, params) = content_type.split_once(';')?;
    params.split(';').find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches('"');
        (!value.is_empty()).then_some(value)
    })
}

/// Content-Type without its parameter section
///
/// # Examples
/// ```
/// use yarhs_content::http::mime::content_type_without_charset;
/// assert_eq!(content_type_without_charset("text/css; charset=utf-8"), "text/css");
/// assert_eq!(content_type_without_charset("image/png"), "image/png");
/// ```
pub fn content_type_without_charset(content_type: &str) -> &str {
    content_type
        .split_once(';')
        .map_or(content_type, |(bare, _)| bare)
        .trim()
}
