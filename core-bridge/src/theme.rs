//! System color scheme tracking
//!
//! The host reports OS theme changes with `THEME_CHANGED`. Every report is
//! kept here and published to the page; the page's theme is only re-applied
//! when the user chose to follow the system.

use bridge_traits::{ColorScheme, HostEnvironment, ThemePreference};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

#[derive(Debug, Default)]
struct SchemeReport {
    scheme: Option<ColorScheme>,
    raw: Option<String>,
}

pub struct ThemeState {
    environment: Arc<dyn HostEnvironment>,
    last: Mutex<SchemeReport>,
}

impl ThemeState {
    pub fn new(environment: Arc<dyn HostEnvironment>) -> Self {
        Self {
            environment,
            last: Mutex::new(SchemeReport::default()),
        }
    }

    /// Last scheme reported by the host.
    pub fn system_scheme(&self) -> Option<ColorScheme> {
        self.last.lock().unwrap_or_else(PoisonError::into_inner).scheme
    }

    /// Last payload text the host reported, recognized or not.
    pub fn reported_scheme(&self) -> Option<String> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .raw
            .clone()
    }

    /// Store and publish the host's report, then re-apply the theme if the
    /// user follows the system.
    ///
    /// Returns whether the theme was re-applied.
    pub fn on_system_scheme_changed(
        &self,
        scheme: Option<ColorScheme>,
        raw: Option<&str>,
    ) -> bool {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = SchemeReport {
            scheme,
            raw: raw.map(str::to_string),
        };
        self.environment.publish_system_scheme(raw);

        if self.environment.theme_preference() != ThemePreference::System {
            debug!(?scheme, "System scheme stored; explicit theme preference kept");
            return false;
        }

        self.environment.apply_theme(scheme);
        true
    }
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("system_scheme", &self.reported_scheme())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Environment {}
        impl HostEnvironment for Environment {
            fn is_native_host_available(&self) -> bool;
            fn theme_preference(&self) -> ThemePreference;
            fn apply_theme(&self, system_scheme: Option<ColorScheme>);
        }
    }

    #[test]
    fn test_reapplies_under_system_preference() {
        let mut env = MockEnvironment::new();
        env.expect_theme_preference()
            .return_const(ThemePreference::System);
        env.expect_apply_theme()
            .with(eq(Some(ColorScheme::Dark)))
            .times(1)
            .return_const(());

        let theme = ThemeState::new(Arc::new(env));
        assert!(theme.on_system_scheme_changed(Some(ColorScheme::Dark), Some("dark")));
        assert_eq!(theme.system_scheme(), Some(ColorScheme::Dark));
    }

    #[test]
    fn test_explicit_preference_only_stores() {
        let mut env = MockEnvironment::new();
        env.expect_theme_preference()
            .return_const(ThemePreference::Light);
        env.expect_apply_theme().never();

        let theme = ThemeState::new(Arc::new(env));
        assert!(!theme.on_system_scheme_changed(Some(ColorScheme::Dark), Some("dark")));
        assert_eq!(theme.system_scheme(), Some(ColorScheme::Dark));
    }

    /// Records what was published, under a fixed preference.
    struct Publisher {
        preference: ThemePreference,
        published: Mutex<Vec<Option<String>>>,
    }

    impl HostEnvironment for Publisher {
        fn is_native_host_available(&self) -> bool {
            true
        }

        fn theme_preference(&self) -> ThemePreference {
            self.preference
        }

        fn apply_theme(&self, _system_scheme: Option<ColorScheme>) {}

        fn publish_system_scheme(&self, raw: Option<&str>) {
            self.published.lock().unwrap().push(raw.map(str::to_string));
        }
    }

    #[test]
    fn test_publishes_whatever_the_preference() {
        for preference in [ThemePreference::Dark, ThemePreference::System] {
            let env = Arc::new(Publisher {
                preference,
                published: Mutex::new(Vec::new()),
            });
            let theme = ThemeState::new(env.clone());

            theme.on_system_scheme_changed(Some(ColorScheme::Light), Some("light"));
            theme.on_system_scheme_changed(None, Some("sepia"));

            assert_eq!(
                *env.published.lock().unwrap(),
                vec![Some("light".to_string()), Some("sepia".to_string())]
            );
            assert_eq!(theme.system_scheme(), None);
            assert_eq!(theme.reported_scheme().as_deref(), Some("sepia"));
        }
    }
}
