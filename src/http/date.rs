//! HTTP date formatting (RFC 7231 IMF-fixdate)

use chrono::{DateTime, Utc};

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Convert epoch milliseconds to a timestamp, `None` for negative values
pub fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    if millis < 0 {
        return None;
    }
    DateTime::from_timestamp_millis(millis)
}

/// Format a timestamp for `Last-Modified` / `Date` headers
///
/// # Examples
/// ```
/// use chrono::DateTime;
/// use yarhs_content::http::date::format_http_date;
/// let t = DateTime::from_timestamp(784_111_777, 0).unwrap();
/// assert_eq!(format_http_date(&t), "Sun, 06 Nov 1994 08:49:37 GMT");
/// ```
pub fn format_http_date(time: &DateTime<Utc>) -> String {
    time.format(HTTP_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_millis() {
        assert!(from_epoch_millis(-1).is_none());
        let t = from_epoch_millis(0).unwrap();
        assert_eq!(format_http_date(&t), "Thu, 01 Jan 1970 00:00:00 GMT");
    }

    #[test]
    fn test_millis_truncated() {
        let t = from_epoch_millis(784_111_777_999).unwrap();
        assert_eq!(format_http_date(&t), "Sun, 06 Nov 1994 08:49:37 GMT");
    }
}
