//! Process settings loaded via OrthoConfig.
//!
//! Values come from an optional config file, `GHC_*` environment variables,
//! and command-line flags, in increasing precedence. The two boolean switches
//! have no command-line flag.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Deserializer};

use crate::domain::ports::StaticFeatureFlagFetcher;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Settings controlling how the GHC API server starts.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GHC")]
pub struct AppSettings {
    /// Interface to bind, defaulting to every IPv4 interface.
    pub host: Option<IpAddr>,
    /// Port to bind.
    pub port: Option<u16>,
    /// File holding the session signing key material.
    pub session_key_file: Option<PathBuf>,
    /// Allow a generated session key when the key file is unreadable.
    ///
    /// Boolean CLI flags always report a value, so these switches come from
    /// the file and environment layers only.
    #[ortho_config(default = false, skip_cli)]
    pub session_allow_ephemeral: bool,
    /// Send the session cookie with the `Secure` attribute.
    #[ortho_config(skip_cli)]
    pub cookie_secure: Option<bool>,
    /// Feature flag keys enabled for every caller.
    ///
    /// The environment layer splits `a,b` into a list; a lone key stays a
    /// string.
    #[serde(default, deserialize_with = "flag_keys")]
    pub enabled_flags: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagKeys {
    List(Vec<String>),
    Csv(String),
}

fn flag_keys<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let keys = Option::<FlagKeys>::deserialize(deserializer)?;
    Ok(keys.map(|keys| match keys {
        FlagKeys::List(keys) => keys,
        FlagKeys::Csv(raw) => raw.split(',').map(|key| key.trim().to_owned()).collect(),
    }))
}

impl AppSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        let host = self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT))
    }

    /// Path of the session key file, falling back to the mounted secret.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Whether the session cookie is marked `Secure`; on unless disabled.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Build the static flag evaluator from `enabled_flags`, ignoring blanks.
    ///
    /// # Examples
    /// ```
    /// use ghc_api::settings::AppSettings;
    ///
    /// let settings = AppSettings {
    ///     host: None,
    ///     port: None,
    ///     session_key_file: None,
    ///     session_allow_ephemeral: false,
    ///     cookie_secure: None,
    ///     enabled_flags: Some(vec!["gun_safe".to_owned(), " ".to_owned()]),
    /// };
    /// assert!(settings.flag_fetcher().is_enabled("gun_safe"));
    /// ```
    pub fn flag_fetcher(&self) -> StaticFeatureFlagFetcher {
        StaticFeatureFlagFetcher::new(
            self.enabled_flags
                .iter()
                .flatten()
                .map(|key| key.trim())
                .filter(|key| !key.is_empty()),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 6] = [
        "GHC_HOST",
        "GHC_PORT",
        "GHC_SESSION_KEY_FILE",
        "GHC_SESSION_ALLOW_EPHEMERAL",
        "GHC_COOKIE_SECURE",
        "GHC_ENABLED_FLAGS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("ghc-api")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(KEYS.map(|key| (key, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080".parse().expect("addr"));
        assert_eq!(
            settings.session_key_file(),
            PathBuf::from(DEFAULT_SESSION_KEY_FILE)
        );
        assert!(!settings.session_allow_ephemeral);
        assert!(settings.cookie_secure());
        assert!(!settings.flag_fetcher().is_enabled("gun_safe"));
    }

    #[rstest]
    fn comma_separated_flags_enable_each_key() {
        let _guard = lock_env([
            ("GHC_HOST", None),
            ("GHC_PORT", None),
            ("GHC_SESSION_KEY_FILE", None),
            ("GHC_SESSION_ALLOW_EPHEMERAL", None),
            ("GHC_COOKIE_SECURE", None),
            ("GHC_ENABLED_FLAGS", Some("gun_safe, boat_shipment".to_owned())),
        ]);

        let flags = load_from_empty_args().flag_fetcher();
        assert!(flags.is_enabled("gun_safe"));
        assert!(flags.is_enabled("boat_shipment"));
        assert!(!flags.is_enabled("mobile_home"));
    }

    #[rstest]
    fn cli_port_wins_without_resetting_env_switches() {
        let _guard = lock_env([
            ("GHC_HOST", None),
            ("GHC_PORT", Some("9090".to_owned())),
            ("GHC_SESSION_KEY_FILE", None),
            ("GHC_SESSION_ALLOW_EPHEMERAL", Some("true".to_owned())),
            ("GHC_COOKIE_SECURE", Some("false".to_owned())),
            ("GHC_ENABLED_FLAGS", None),
        ]);

        let settings = AppSettings::load_from_iter([
            OsString::from("ghc-api"),
            OsString::from("--port"),
            OsString::from("7000"),
        ])
        .expect("config should load");
        assert_eq!(settings.bind_addr().port(), 7000);
        assert!(settings.session_allow_ephemeral);
        assert!(!settings.cookie_secure());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("GHC_HOST", Some("127.0.0.1".to_owned())),
            ("GHC_PORT", Some("9090".to_owned())),
            ("GHC_SESSION_KEY_FILE", Some("/tmp/key".to_owned())),
            ("GHC_SESSION_ALLOW_EPHEMERAL", Some("true".to_owned())),
            ("GHC_COOKIE_SECURE", Some("false".to_owned())),
            ("GHC_ENABLED_FLAGS", Some("gun_safe".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "127.0.0.1:9090".parse().expect("addr"));
        assert_eq!(settings.session_key_file(), PathBuf::from("/tmp/key"));
        assert!(settings.session_allow_ephemeral);
        assert!(!settings.cookie_secure());
        assert!(settings.flag_fetcher().is_enabled("gun_safe"));
    }
}
