//! Result filename derivation for job downloads.
//!
//! The server names the result file through a `Content-Disposition` header;
//! this module extracts that name (common cases of the disposition grammar
//! only) and provides the deterministic per-job fallback used when the
//! header is absent or unusable.

use std::path::{Component, Path};

/// Parses a `Content-Disposition` header value to extract the filename.
///
/// Handles the common cases:
/// - `attachment; filename="example.docx"`
/// - `attachment; filename=example.docx`
/// - `attachment; filename*=UTF-8''example%20file.docx` (RFC 5987)
///
/// Percent-escapes are decoded in both the `filename*` and plain `filename`
/// branches (the service percent-encodes non-ASCII names in either form).
/// Multiple parameters beyond the first match, non-UTF-8 charsets, and
/// continuation-encoded filenames are not handled.
pub(crate) fn filename_from_disposition(header: &str) -> Option<String> {
    // Attribute names are case-insensitive; byte offsets into the ASCII
    // lowercased copy are valid offsets into the original.
    let lower = header.to_ascii_lowercase();

    // Try filename*= first (RFC 5987 encoded)
    if let Some(pos) = lower.find("filename*=") {
        let value = header[pos + 10..].trim();
        // Format: charset'language'encoded_value; tolerate a bare value too
        let encoded = match value.find("''") {
            Some(quote_pos) => &value[quote_pos + 2..],
            None => value,
        };
        let end = encoded.find(';').unwrap_or(encoded.len());
        let encoded_name = encoded[..end].trim().trim_matches('"');
        if !encoded_name.is_empty()
            && let Ok(decoded) = urlencoding::decode(encoded_name)
        {
            return Some(decoded.into_owned());
        }
    }

    // Try regular filename=
    if let Some(pos) = lower.find("filename=") {
        let value = header[pos + 9..].trim();

        let raw = if let Some(stripped) = value.strip_prefix('"') {
            let end = stripped.find('"')?;
            &stripped[..end]
        } else {
            let end = value.find(';').unwrap_or(value.len());
            value[..end].trim()
        };

        if !raw.is_empty() {
            let decoded = urlencoding::decode(raw).map_or_else(|_| raw.to_string(), |d| d.into_owned());
            return Some(decoded);
        }
    }

    None
}

/// Deterministic fallback name when no disposition filename is available.
pub(crate) fn fallback_result_filename(job_id: &str) -> String {
    if job_id.is_empty() {
        "result.docx".to_string()
    } else {
        format!("{job_id}.docx")
    }
}

/// Sanitizes a filename for filesystem safety.
///
/// Replaces path separators, characters invalid on common filesystems
/// (`/ \ : * ? " < > |`) and control characters with `_`, and rewrites dot
/// segments so the name cannot escape the output directory.
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }

    if is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized
            .chars()
            .map(|c| if c == '.' { '_' } else { c })
            .collect()
    }
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_disposition_quoted_filename() {
        let header = r#"attachment; filename="a b.docx""#;
        assert_eq!(filename_from_disposition(header), Some("a b.docx".to_string()));
    }

    #[test]
    fn test_disposition_unquoted_filename() {
        let header = "attachment; filename=report.docx";
        assert_eq!(
            filename_from_disposition(header),
            Some("report.docx".to_string())
        );
    }

    #[test]
    fn test_disposition_filename_with_trailing_parameter() {
        let header = r#"attachment; filename="report.docx"; size=1234"#;
        assert_eq!(
            filename_from_disposition(header),
            Some("report.docx".to_string())
        );
    }

    #[test]
    fn test_disposition_rfc5987_utf8_filename() {
        let header = "attachment; filename*=UTF-8''r%C3%A9sum%C3%A9.docx";
        assert_eq!(
            filename_from_disposition(header),
            Some("résumé.docx".to_string())
        );
    }

    #[test]
    fn test_disposition_rfc5987_preferred_over_plain() {
        let header = r#"attachment; filename="plain.docx"; filename*=UTF-8''encoded.docx"#;
        assert_eq!(
            filename_from_disposition(header),
            Some("encoded.docx".to_string())
        );
    }

    #[test]
    fn test_disposition_percent_escapes_decoded_in_plain_filename() {
        let header = r#"attachment; filename="a%20b.docx""#;
        assert_eq!(filename_from_disposition(header), Some("a b.docx".to_string()));
    }

    #[test]
    fn test_disposition_case_insensitive_attribute() {
        let header = r#"Attachment; Filename="Upper.docx""#;
        assert_eq!(
            filename_from_disposition(header),
            Some("Upper.docx".to_string())
        );
    }

    #[test]
    fn test_disposition_without_filename_attribute() {
        assert_eq!(filename_from_disposition("attachment"), None);
    }

    #[test]
    fn test_fallback_uses_job_id() {
        assert_eq!(fallback_result_filename("j1"), "j1.docx");
    }

    #[test]
    fn test_fallback_empty_job_id() {
        assert_eq!(fallback_result_filename(""), "result.docx");
    }

    #[test]
    fn test_sanitize_removes_separators_and_invalid_chars() {
        assert_eq!(sanitize_filename("a/b.docx"), "a_b.docx");
        assert_eq!(sanitize_filename("a\\b.docx"), "a_b.docx");
        assert_eq!(sanitize_filename("a:b*c?.docx"), "a_b_c_.docx");
    }

    #[test]
    fn test_sanitize_preserves_spaces_and_unicode() {
        assert_eq!(sanitize_filename("a b.docx"), "a b.docx");
        assert_eq!(sanitize_filename("résumé.docx"), "résumé.docx");
    }

    #[test]
    fn test_sanitize_rewrites_dot_segments() {
        assert_eq!(sanitize_filename("."), "_");
        assert_eq!(sanitize_filename(".."), "__");
    }

    #[test]
    fn test_sanitize_traversal_attempt_stays_flat() {
        let sanitized = sanitize_filename("../../etc/passwd");
        assert!(!sanitized.contains('/'));
        assert!(!Path::new(&sanitized)
            .components()
            .any(|c| c == Component::ParentDir));
    }
}
