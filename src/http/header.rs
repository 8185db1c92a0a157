//! Content header mapping
//!
//! Turns descriptor metadata into `Content-Type`, `Content-Length`,
//! `Last-Modified` and `ETag` fields. Absent metadata omits the header.

use crate::content::HttpContent;
use crate::error::{ContentError, Result};
use hyper::header::{
    HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE, ETAG, LAST_MODIFIED,
};

/// Collect the content headers of a descriptor
pub fn content_headers<C: HttpContent + ?Sized>(content: &C) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    if let Some(content_type) = content.content_type() {
        headers.insert(CONTENT_TYPE, header_value("Content-Type", content_type)?);
    }
    if let Some(length) = content.content_length() {
        headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
    }
    if let Some(last_modified) = content.last_modified_value() {
        headers.insert(LAST_MODIFIED, header_value("Last-Modified", &last_modified)?);
    }
    if let Some(etag) = content.etag() {
        headers.insert(ETAG, header_value("ETag", etag)?);
    }

    Ok(headers)
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|source| ContentError::InvalidHeader { name, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ResourceContent;
    use crate::resource::MemoryResource;

    #[test]
    fn test_all_headers_present() {
        let resource = MemoryResource::with_last_modified("a.css", "body{}", 784_111_777_000);
        let content = ResourceContent::with_etag(resource, Some("text/css; charset=utf-8"), true);
        let headers = content_headers(&content).unwrap();

        assert_eq!(headers[CONTENT_TYPE], "text/css; charset=utf-8");
        assert_eq!(headers[CONTENT_LENGTH], "6");
        assert_eq!(headers[LAST_MODIFIED], "Sun, 06 Nov 1994 08:49:37 GMT");
        assert_eq!(headers[ETAG], content.etag().unwrap());
        content.release();
    }

    #[test]
    fn test_absent_metadata_omits_headers() {
        let content = ResourceContent::new(MemoryResource::new("blob", "xyz"), None);
        let headers = content_headers(&content).unwrap();

        assert!(!headers.contains_key(CONTENT_TYPE));
        assert!(!headers.contains_key(LAST_MODIFIED));
        assert!(!headers.contains_key(ETAG));
        assert_eq!(headers[CONTENT_LENGTH], "3");
        content.release();
    }

    #[test]
    fn test_invalid_content_type_is_error() {
        let content = ResourceContent::new(MemoryResource::new("bad", "x"), Some("text/plain\n"));
        let err = content_headers(&content).unwrap_err();
        assert!(matches!(
            err,
            ContentError::InvalidHeader {
                name: "Content-Type",
                ..
            }
        ));
        content.release();
    }
}
