use crate::error::ProtocolError;

/// A parsed response status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// The version token, e.g. "HTTP/1.0".
    pub version: String,
    /// The numeric status code.
    pub code: u16,
    /// The reason phrase, possibly empty.
    pub reason: String,
}

/// Parses a response status line of the form `VERSION CODE REASON`.
///
/// The version token must start with `HTTP/` and the code must parse as a
/// u16. The reason phrase is optional. The caller decides what to do with
/// the code; this function does not require 200.
pub fn parse_status_line(line: &str) -> Result<StatusLine, ProtocolError> {
    let mut parts = line.splitn(3, ' ');

    let version = parts.next().ok_or(ProtocolError::InvalidStatusLine)?;
    let code = parts.next().ok_or(ProtocolError::InvalidStatusLine)?;
    let reason = parts.next().unwrap_or("");

    if !version.starts_with("HTTP/") {
        return Err(ProtocolError::InvalidVersion);
    }

    let code: u16 = code
        .trim()
        .parse()
        .map_err(|_| ProtocolError::InvalidStatusLine)?;

    Ok(StatusLine {
        version: version.to_string(),
        code,
        reason: reason.trim().to_string(),
    })
}

/// Splits one header line at the first `:`, trimming both sides.
///
/// Returns `None` for lines without a `:`; such lines are skipped by the
/// caller rather than treated as fatal.
pub fn parse_header_line(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    Some((name.trim(), value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ok_status_line() {
        let status = parse_status_line("HTTP/1.0 200 OK").unwrap();

        assert_eq!(status.version, "HTTP/1.0");
        assert_eq!(status.code, 200);
        assert_eq!(status.reason, "OK");
    }

    #[test]
    fn parse_status_line_without_reason() {
        let status = parse_status_line("HTTP/1.0 200").unwrap();

        assert_eq!(status.code, 200);
        assert_eq!(status.reason, "");
    }

    #[test]
    fn reject_bad_version_prefix() {
        let result = parse_status_line("FOO/1.0 200 OK");

        assert!(matches!(result, Err(ProtocolError::InvalidVersion)));
    }

    #[test]
    fn header_line_without_colon_is_skipped() {
        assert_eq!(parse_header_line("not a header"), None);
    }
}
