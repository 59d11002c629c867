use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use crate::{Identity, Result, SurrealError};

/// Builds the `Authorization: Basic ...` value for a user/password pair.
pub(crate) fn basic_authorization(user: &str, pass: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")))
}

/// Derives every identity-bound request header.
pub(crate) fn build_headers(identity: &Identity) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(5);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let mut authorization =
        header_value("Authorization", &basic_authorization(&identity.user, &identity.pass))?;
    authorization.set_sensitive(true);
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(
        HeaderName::from_static("ns"),
        header_value("NS", &identity.namespace)?,
    );
    headers.insert(
        HeaderName::from_static("db"),
        header_value("DB", &identity.database)?,
    );
    Ok(headers)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|err| SurrealError::InvalidHeader(format!("{name}: {err}")))
}

#[cfg(test)]
mod tests {
    use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};

    use crate::{auth, Identity, SurrealError};

    #[test]
    fn basic_authorization_encodes_credentials() {
        assert_eq!(
            auth::basic_authorization("root", "root"),
            "Basic cm9vdDpyb290"
        );
    }

    #[test]
    fn headers_carry_identity() {
        let headers = auth::build_headers(&Identity::new("root", "root", "test", "app"))
            .expect("must build headers");
        assert_eq!(headers[AUTHORIZATION], "Basic cm9vdDpyb290");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert_eq!(headers["ns"], "test");
        assert_eq!(headers["db"], "app");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[ACCEPT], "application/json");
    }

    #[test]
    fn control_characters_are_rejected() {
        let err = auth::build_headers(&Identity::new("root", "root", "te\nst", "app"))
            .expect_err("must fail");
        assert!(matches!(err, SurrealError::InvalidHeader(_)));
    }
}
