//! Environment driven configuration.
//!
//! All values are read through [dotenvy], so a `.env` file in the current or
//! a parent directory is honored.

mod log_storage;
mod server;

pub use self::log_storage::LogStorageConfig;
pub use self::server::Server;

use anyhow::Context;
use std::error::Error;
use std::str::FromStr;

/// Reads an environment variable, returning `Ok(None)` if it is not set.
fn var(key: &str) -> anyhow::Result<Option<String>> {
    match dotenvy::var(key) {
        Ok(content) => Ok(Some(content)),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
        Err(error) => Err(error.into()),
    }
}

/// Reads and parses an environment variable, returning `Ok(None)` if it is
/// not set.
fn var_parsed<R>(key: &str) -> anyhow::Result<Option<R>>
where
    R: FromStr,
    R::Err: Error + Send + Sync + 'static,
{
    var(key)?
        .map(|content| {
            content
                .parse()
                .with_context(|| format!("Failed to parse {key} environment variable"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_none, assert_ok, assert_some_eq};
    use insta::assert_snapshot;

    // `std::env::set_var` is unsafe in edition 2024 and affects the whole
    // process, so every test uses its own variable name.

    #[test]
    fn test_var() {
        unsafe { std::env::set_var("ACCESS_LOG_STATS_TEST_VAR", "foo") };
        assert_some_eq!(assert_ok!(var("ACCESS_LOG_STATS_TEST_VAR")), "foo");

        assert_none!(assert_ok!(var("ACCESS_LOG_STATS_TEST_VAR_UNSET")));
    }

    #[test]
    fn test_var_parsed() {
        unsafe { std::env::set_var("ACCESS_LOG_STATS_TEST_PARSED", "42") };
        let value = assert_ok!(var_parsed::<u16>("ACCESS_LOG_STATS_TEST_PARSED"));
        assert_some_eq!(value, 42);

        let value = assert_ok!(var_parsed::<u16>("ACCESS_LOG_STATS_TEST_PARSED_UNSET"));
        assert_none!(value);

        unsafe { std::env::set_var("ACCESS_LOG_STATS_TEST_INVALID", "foo") };
        let error = assert_err!(var_parsed::<u16>("ACCESS_LOG_STATS_TEST_INVALID"));
        assert_snapshot!(error, @"Failed to parse ACCESS_LOG_STATS_TEST_INVALID environment variable");
    }
}
