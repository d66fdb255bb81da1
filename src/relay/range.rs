//! Range negotiation.
//!
//! # Responsibilities
//! - Parse the inbound `Range` header against the probed total size
//! - Clamp the requested window to the resource bounds
//! - Decide between full-stream and partial-stream delivery
//!
//! # Design Decisions
//! - Negotiation never fails: anything unparseable degrades to Full mode
//!   silently, matching how the provider's own players behave
//! - A starting offset is mandatory; the suffix form `bytes=-500` is
//!   treated as malformed and degrades to Full
//! - Multi-range requests are not supported; only the first range
//!   expression is honored

/// An inclusive byte window within a resource of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes the window covers. Reported as Content-Length on
    /// partial responses. Never zero: the window is inclusive on both ends.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Render the window as an outbound `Range` header value.
    pub fn to_header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

/// How the relay will deliver the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamMode {
    /// Stream the entire body, status 200.
    Full,
    /// Stream the negotiated window, status 206.
    Partial(ByteRange),
}

/// Decide the delivery mode for a request.
///
/// `Full` whenever there is no Range header, the total size is unknown, or
/// the header cannot be parsed into a satisfiable single range.
pub fn negotiate(range_header: Option<&str>, total_size: Option<u64>) -> StreamMode {
    let (Some(header), Some(total)) = (range_header, total_size) else {
        return StreamMode::Full;
    };

    match parse_single_range(header, total) {
        Some(range) => StreamMode::Partial(range),
        None => StreamMode::Full,
    }
}

/// Parse `bytes=<start>-[<end>]` against a known total size.
///
/// Returns `None` for anything malformed or unsatisfiable; the caller
/// falls back to Full mode.
fn parse_single_range(header: &str, total: u64) -> Option<ByteRange> {
    let spec = header.trim().strip_prefix("bytes=")?;

    // Trailing comma-separated expressions are ignored.
    let first = spec.split(',').next()?.trim();

    let (start_str, end_str) = first.split_once('-')?;

    // Mandatory start: rejects the suffix form `bytes=-N`.
    let start: u64 = start_str.trim().parse().ok()?;
    if start >= total {
        return None;
    }

    let end = match end_str.trim() {
        "" => total - 1,
        s => s.parse::<u64>().ok()?.min(total - 1),
    };

    if start > end {
        return None;
    }

    Some(ByteRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_header_is_full() {
        assert_eq!(negotiate(None, Some(1000)), StreamMode::Full);
    }

    #[test]
    fn test_unknown_size_ignores_range() {
        assert_eq!(negotiate(Some("bytes=0-99"), None), StreamMode::Full);
    }

    #[test]
    fn test_bounded_range() {
        let mode = negotiate(Some("bytes=0-499"), Some(1000));
        assert_eq!(
            mode,
            StreamMode::Partial(ByteRange { start: 0, end: 499 })
        );
        if let StreamMode::Partial(r) = mode {
            assert_eq!(r.len(), 500);
        }
    }

    #[test]
    fn test_open_ended_range_resolves_to_last_byte() {
        assert_eq!(
            negotiate(Some("bytes=900-"), Some(1000)),
            StreamMode::Partial(ByteRange {
                start: 900,
                end: 999
            })
        );
    }

    #[test]
    fn test_end_clamped_to_size() {
        assert_eq!(
            negotiate(Some("bytes=500-5000"), Some(1000)),
            StreamMode::Partial(ByteRange {
                start: 500,
                end: 999
            })
        );
    }

    #[test]
    fn test_start_past_end_of_resource_is_full() {
        assert_eq!(negotiate(Some("bytes=1000-"), Some(1000)), StreamMode::Full);
        assert_eq!(negotiate(Some("bytes=2000-2999"), Some(1000)), StreamMode::Full);
    }

    #[test]
    fn test_inverted_range_is_full() {
        assert_eq!(negotiate(Some("bytes=500-100"), Some(1000)), StreamMode::Full);
    }

    #[test]
    fn test_suffix_form_is_full() {
        assert_eq!(negotiate(Some("bytes=-500"), Some(1000)), StreamMode::Full);
    }

    #[test]
    fn test_garbage_is_full() {
        assert_eq!(negotiate(Some("bytes=abc-def"), Some(1000)), StreamMode::Full);
        assert_eq!(negotiate(Some("items=0-10"), Some(1000)), StreamMode::Full);
        assert_eq!(negotiate(Some("bytes="), Some(1000)), StreamMode::Full);
    }

    #[test]
    fn test_multi_range_honors_first_expression() {
        assert_eq!(
            negotiate(Some("bytes=0-99,200-299"), Some(1000)),
            StreamMode::Partial(ByteRange { start: 0, end: 99 })
        );
    }

    #[test]
    fn test_single_byte_range() {
        let mode = negotiate(Some("bytes=999-999"), Some(1000));
        assert_eq!(
            mode,
            StreamMode::Partial(ByteRange {
                start: 999,
                end: 999
            })
        );
        if let StreamMode::Partial(r) = mode {
            assert_eq!(r.len(), 1);
        }
    }

    #[test]
    fn test_header_value_rendering() {
        let range = ByteRange { start: 64, end: 127 };
        assert_eq!(range.to_header_value(), "bytes=64-127");
    }
}
