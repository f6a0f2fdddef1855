use std::time::Duration;

pub const DEFAULT_IMAGE: &str = "docker.io/localstack/localstack";

/// Time given to the emulator after start/stop before returning.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(5);

const IMAGE_ENV: &str = "LSTACK_IMAGE";
const SETTLE_SECS_ENV: &str = "LSTACK_SETTLE_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentSettings {
    pub image: String,
    pub settle_delay: Duration,
}

impl Default for EnvironmentSettings {
    fn default() -> Self {
        EnvironmentSettings {
            image: DEFAULT_IMAGE.to_string(),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl EnvironmentSettings {
    /// Defaults, overridden by `LSTACK_IMAGE` and `LSTACK_SETTLE_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = EnvironmentSettings::default();

        if let Some(image) = lookup(IMAGE_ENV).filter(|v| !v.trim().is_empty()) {
            settings.image = image.trim().to_string();
        }

        if let Some(raw) = lookup(SETTLE_SECS_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => settings.settle_delay = Duration::from_secs(secs),
                Err(_) => logging::warning(&format!(
                    "Ignoring {}={}: not a number of seconds",
                    SETTLE_SECS_ENV, raw
                )),
            }
        }

        settings
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = EnvironmentSettings::from_lookup(lookup_from(&[]));
        assert_eq!(settings, EnvironmentSettings::default());
        assert_eq!(settings.image, "docker.io/localstack/localstack");
        assert_eq!(settings.settle_delay, Duration::from_secs(5));
    }

    #[test]
    fn test_overrides() {
        let settings = EnvironmentSettings::from_lookup(lookup_from(&[
            ("LSTACK_IMAGE", "localstack/localstack:0.10.9"),
            ("LSTACK_SETTLE_SECS", "12"),
        ]));
        assert_eq!(settings.image, "localstack/localstack:0.10.9");
        assert_eq!(settings.settle_delay, Duration::from_secs(12));
    }

    #[test]
    fn test_bad_settle_value_keeps_default() {
        let settings =
            EnvironmentSettings::from_lookup(lookup_from(&[("LSTACK_SETTLE_SECS", "soon")]));
        assert_eq!(settings.settle_delay, DEFAULT_SETTLE_DELAY);
    }
}
