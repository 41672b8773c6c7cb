//! Published checksum file parsing.
//!
//! Release pipelines publish either a bare SHA-256 digest or `sha256sum`
//! output (`<digest>  <filename>`); both reduce to the first token of the
//! first non-blank line. Digests are compared lowercase.

use url::Url;

use crate::error::FetchError;

const SHA256_HEX_LEN: usize = 64;

/// Extract the expected digest from a fetched checksum file body.
pub(crate) fn parse_expected(body: &str, url: &Url) -> Result<String, FetchError> {
    let token = body
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .and_then(|line| line.split_whitespace().next());

    let Some(token) = token else {
        return Err(FetchError::InvalidChecksum {
            url: url.to_string(),
            reason: "checksum file is empty".to_string(),
        });
    };

    if token.len() != SHA256_HEX_LEN || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(FetchError::InvalidChecksum {
            url: url.to_string(),
            reason: format!("`{token}` is not a SHA-256 digest"),
        });
    }

    Ok(token.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";

    fn url() -> Url {
        Url::parse("https://example.com/tool.tar.gz.sha256").unwrap()
    }

    #[test]
    fn test_parse_bare_digest() {
        assert_eq!(parse_expected(DIGEST, &url()).unwrap(), DIGEST);
    }

    #[test]
    fn test_parse_sha256sum_line() {
        let body = format!("{DIGEST}  tool.tar.gz\n");
        assert_eq!(parse_expected(&body, &url()).unwrap(), DIGEST);
    }

    #[test]
    fn test_parse_skips_leading_blank_lines() {
        let body = format!("\n\n  {DIGEST}\n");
        assert_eq!(parse_expected(&body, &url()).unwrap(), DIGEST);
    }

    #[test]
    fn test_parse_normalizes_case() {
        let body = DIGEST.to_ascii_uppercase();
        assert_eq!(parse_expected(&body, &url()).unwrap(), DIGEST);
    }

    #[test]
    fn test_parse_rejects_empty_file() {
        let err = parse_expected("", &url()).unwrap_err();
        assert!(matches!(err, FetchError::InvalidChecksum { .. }));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let err = parse_expected("deadbeef", &url()).unwrap_err();
        assert!(matches!(err, FetchError::InvalidChecksum { .. }));
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let body = "z".repeat(SHA256_HEX_LEN);
        let err = parse_expected(&body, &url()).unwrap_err();
        match err {
            FetchError::InvalidChecksum { url, .. } => {
                assert_eq!(url, "https://example.com/tool.tar.gz.sha256");
            }
            other => panic!("expected InvalidChecksum, got {other:?}"),
        }
    }
}
