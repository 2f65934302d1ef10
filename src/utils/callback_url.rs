use std::borrow::Cow;

/// `code` and `state` extracted from an OAuth redirect URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: String,
    pub state: String,
}

/// Extract the OAuth `code` and `state` parameters from a pasted redirect.
///
/// Accepts either a full URL (`https://host/callback?code=...&state=...`) or
/// a bare query string (`code=...&state=...`), with or without a leading `?`.
/// Values are percent-decoded. Returns `None` when either required parameter
/// is missing or empty; the caller treats that as the fixed
/// "missing parameters" error without consuming the one-shot guard.
pub fn parse_callback_params(input: &str) -> Option<CallbackParams> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    // Everything after '?' when a full URL was pasted, else the input itself.
    let query = match input.split_once('?') {
        Some((_, query)) => query,
        None => input,
    };
    // A fragment never carries OAuth parameters in this flow.
    let query = query.split('#').next().unwrap_or(query);

    let mut code = None;
    let mut state = None;
    for pair in query.split('&') {
        let (key, value) = match pair.split_once('=') {
            Some(kv) => kv,
            None => continue,
        };
        match key {
            "code" => code = decode_non_empty(value),
            "state" => state = decode_non_empty(value),
            _ => {}
        }
    }

    Some(CallbackParams {
        code: code?,
        state: state?,
    })
}

fn decode_non_empty(value: &str) -> Option<String> {
    let decoded = urlencoding::decode(value).unwrap_or(Cow::Borrowed(value));
    if decoded.is_empty() {
        None
    } else {
        Some(decoded.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url() {
        let params = parse_callback_params(
            "http://127.0.0.1:8000/callback?code=abc123&state=xyz789",
        )
        .unwrap();
        assert_eq!(params.code, "abc123");
        assert_eq!(params.state, "xyz789");
    }

    #[test]
    fn test_bare_query_string() {
        let params = parse_callback_params("code=abc&state=xyz").unwrap();
        assert_eq!(params.code, "abc");
        assert_eq!(params.state, "xyz");

        let params = parse_callback_params("?state=xyz&code=abc").unwrap();
        assert_eq!(params.code, "abc");
    }

    #[test]
    fn test_percent_decoding() {
        let params =
            parse_callback_params("code=a%2Fb%3D&state=s%20t").unwrap();
        assert_eq!(params.code, "a/b=");
        assert_eq!(params.state, "s t");
    }

    #[test]
    fn test_missing_either_param() {
        assert!(parse_callback_params("code=abc").is_none());
        assert!(parse_callback_params("state=xyz").is_none());
        assert!(parse_callback_params("http://x/callback?code=abc").is_none());
        assert!(parse_callback_params("").is_none());
        assert!(parse_callback_params("   ").is_none());
    }

    #[test]
    fn test_empty_values_rejected() {
        assert!(parse_callback_params("code=&state=xyz").is_none());
        assert!(parse_callback_params("code=abc&state=").is_none());
    }

    #[test]
    fn test_fragment_stripped() {
        let params =
            parse_callback_params("http://x/cb?code=abc&state=xyz#frag").unwrap();
        assert_eq!(params.state, "xyz");
    }

    #[test]
    fn test_unrelated_params_ignored() {
        let params =
            parse_callback_params("foo=1&code=abc&bar=2&state=xyz").unwrap();
        assert_eq!(params.code, "abc");
        assert_eq!(params.state, "xyz");
    }
}
