//! Connection string secrets
//!
//! The PostgreSQL connection string is the only credential nad-ch reads. It is
//! held in a [`SecretString`], which zeroes its memory on drop and prints as
//! `[REDACTED]` under `Debug`. Anything shown to a user or written to a log goes
//! through [`SecretValue::redacted`].
//!
//! ```rust
//! use nad_ch::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let dsn = secret_string("postgresql://nad:pw@localhost/nad".to_string());
//! assert!(dsn.expose_secret().has_scheme(&["postgresql", "postgres"]));
//! assert_eq!(dsn.expose_secret().redacted(), "postgresql://***@localhost/nad");
//! assert!(!format!("{dsn:?}").contains("pw"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Credential-bearing string, only reachable through `expose_secret()`
#[derive(Clone, Debug, Zeroize, Serialize, Deserialize)]
#[serde(transparent)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Returns `true` for an empty value
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the value is a URL with one of `schemes`
    pub fn has_scheme(&self, schemes: &[&str]) -> bool {
        self.0
            .split_once("://")
            .is_some_and(|(scheme, _)| schemes.contains(&scheme))
    }

    /// The value with its credentials masked
    ///
    /// URL user info is replaced with `***`. A value that is not a URL, such as
    /// a `key=value` connection string, is masked entirely.
    pub fn redacted(&self) -> String {
        match self.0.split_once("://") {
            Some((scheme, rest)) => match rest.rsplit_once('@') {
                Some((_, host)) => format!("{scheme}://***@{host}"),
                None => self.0.clone(),
            },
            None => "***".to_string(),
        }
    }
}

/// A connection string that is zeroed on drop and redacted in `Debug`
pub type SecretString = Secret<SecretValue>;

/// Wrap a String in a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use test_case::test_case;

    #[test_case("postgresql://nad:hunter2@db:5432/nad_ch", "postgresql://***@db:5432/nad_ch" ; "password")]
    #[test_case("postgres://nad@db/nad_ch", "postgres://***@db/nad_ch" ; "user only")]
    #[test_case("postgresql://n@d:p@ss@db/nad_ch", "postgresql://***@db/nad_ch" ; "at sign in password")]
    #[test_case("postgresql://db/nad_ch", "postgresql://db/nad_ch" ; "no credentials")]
    #[test_case("host=db password=hunter2", "***" ; "key value form")]
    fn test_redacted(input: &str, expected: &str) {
        let secret = secret_string(input.to_string());
        assert_eq!(secret.expose_secret().redacted(), expected);
    }

    #[test]
    fn test_has_scheme() {
        let schemes = ["postgresql", "postgres"];
        assert!(secret_string("postgres://db".to_string())
            .expose_secret()
            .has_scheme(&schemes));
        assert!(!secret_string("mysql://db".to_string())
            .expose_secret()
            .has_scheme(&schemes));
        assert!(!secret_string("postgresql".to_string())
            .expose_secret()
            .has_scheme(&schemes));
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = secret_string("postgresql://nad:hunter2@db/nad_ch".to_string());
        assert!(!format!("{secret:?}").contains("hunter2"));
    }

    #[test]
    fn test_toml_field_round_trip() {
        #[derive(Serialize, Deserialize)]
        struct Section {
            connection_string: SecretString,
        }

        let section: Section =
            toml::from_str(r#"connection_string = "postgresql://a:b@h/db""#).unwrap();
        assert_eq!(
            section.connection_string.expose_secret(),
            "postgresql://a:b@h/db"
        );

        let text = toml::to_string(&section).unwrap();
        assert!(text.contains("postgresql://a:b@h/db"));
    }
}
