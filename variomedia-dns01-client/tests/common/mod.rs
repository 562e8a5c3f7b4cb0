//! Shared test helpers.

#![allow(dead_code)]

use variomedia_dns01_client::VariomediaClient;

/// Skips the test when an environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Asserts that a `Result` is `Ok` and unwraps it (failing the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Generates a unique host label for live test records.
pub fn generate_test_host() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_acme-challenge-test-{}", &uuid.to_string()[..8])
}

/// Builds a client against the live API from environment variables.
pub fn live_client() -> Option<(VariomediaClient, String)> {
    let api_key = std::env::var("VARIOMEDIA_API_TOKEN").ok()?;
    let zone = std::env::var("TEST_ZONE_NAME").ok()?;
    Some((
        VariomediaClient::new(api_key),
        zone.trim_end_matches('.').to_string(),
    ))
}
