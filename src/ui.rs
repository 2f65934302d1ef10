use std::fmt;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    Home,
    Login,
    Callback,
    Dashboard,
}

/// Authentication request lifecycle on the login screen.
///
/// Created when the screen mounts and mutated only by that screen's own
/// request lifecycle. `Success` is transient: a successful login immediately
/// navigates to the callback screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Callback exchange lifecycle.
///
/// Transitions only `AwaitingInput` -> `Loading` and
/// `Loading` -> {`Success` | `Error`}. A failed exchange re-arms the one-shot
/// guard, allowing a fresh cycle on the next submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallbackPhase {
    #[default]
    AwaitingInput,
    Loading,
    Success,
    Error,
}

/// Post language sent to the generation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ja,
    En,
}

impl Language {
    /// Wire value used in request bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Ja => "ja",
            Language::En => "en",
        }
    }

    /// Flip between the two supported languages.
    pub fn toggled(self) -> Self {
        match self {
            Language::Ja => Language::En,
            Language::En => Language::Ja,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Language::Ja => "Japanese (ja)",
            Language::En => "English (en)",
        };
        write!(f, "{label}")
    }
}

impl std::str::FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ja" | "japanese" => Ok(Language::Ja),
            "en" | "english" => Ok(Language::En),
            other => anyhow::bail!("Unsupported language '{other}' (expected 'ja' or 'en')"),
        }
    }
}
