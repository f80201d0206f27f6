//! Native Host Capabilities
//!
//! Abstractions over the environment the document runs in: the outbound
//! message primitive exposed by a WebView host, the ambient facts the bridge
//! used to read from globals (native presence, theme), and the browser
//! affordances used when no native host is present.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{error::Result, platform::PlatformSendSync};

/// Color scheme reported by the native host in `THEME_CHANGED` notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
    System,
}

impl ColorScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
            ColorScheme::System => "system",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            "system" => Ok(ColorScheme::System),
            other => Err(format!("unknown color scheme: {other}")),
        }
    }
}

/// Theme preference chosen by the user inside the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    /// Follow whatever the host reports.
    #[default]
    System,
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            other => Err(format!("unknown theme preference: {other}")),
        }
    }
}

/// Outbound primitive provided by the native host.
///
/// On Android/iOS WebViews this is `window.ReactNativeWebView.postMessage`.
/// The primitive is best-effort: implementations should not retry or buffer.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::host::NativeTransport;
///
/// fn ping(transport: &dyn NativeTransport) {
///     transport.post_message(r#"{"type":"EXIT_APP","payload":{}}"#).ok();
/// }
/// ```
pub trait NativeTransport: PlatformSendSync {
    /// Hand a JSON-encoded envelope to the host.
    fn post_message(&self, message: &str) -> Result<()>;
}

/// Ambient facts about the hosting document.
///
/// Replaces lookups of `window.isNativeApp` and application theme state so
/// the runtime can be exercised without a document.
pub trait HostEnvironment: PlatformSendSync {
    /// Whether a native host is present and able to receive messages.
    fn is_native_host_available(&self) -> bool;

    /// The user's current theme preference.
    fn theme_preference(&self) -> ThemePreference;

    /// Re-apply the visual theme using the latest host color scheme.
    fn apply_theme(&self, system_scheme: Option<ColorScheme>);

    /// Make the host's latest color scheme visible to the page.
    ///
    /// Called on every scheme change whatever the user's preference, with the
    /// host's payload as sent, unrecognized names included. `None` means the
    /// host sent no text. Hosts without a place to publish it can ignore it.
    fn publish_system_scheme(&self, raw: Option<&str>) {
        let _ = raw;
    }
}

/// Browser affordances substituted for native calls when no host is present.
pub trait BrowserFallback: PlatformSendSync {
    /// Open a URL through normal browser navigation (new tab/window).
    fn open_url(&self, url: &str) -> Result<()>;

    /// Trigger a client-side download of `content` saved as `file_name`.
    fn download_file(&self, file_name: &str, content: &str, mime_type: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_scheme_round_trip_names() {
        for scheme in [ColorScheme::Light, ColorScheme::Dark, ColorScheme::System] {
            assert_eq!(scheme.as_str().parse::<ColorScheme>(), Ok(scheme));
        }
        assert!("sepia".parse::<ColorScheme>().is_err());
    }

    #[test]
    fn test_color_scheme_serde_lowercase() {
        let json = serde_json::to_string(&ColorScheme::Dark).unwrap();
        assert_eq!(json, "\"dark\"");
        let parsed: ColorScheme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(parsed, ColorScheme::Light);
    }

    #[test]
    fn test_theme_preference_defaults_to_system() {
        assert_eq!(ThemePreference::default(), ThemePreference::System);
        assert_eq!("dark".parse::<ThemePreference>(), Ok(ThemePreference::Dark));
    }
}
