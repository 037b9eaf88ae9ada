use crate::consts::{DEFAULT_MAX_CONCURRENT_RESOLUTIONS, MAX_CONCURRENT_RESOLUTIONS_ENV};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedConfig {
    /// Upper bound on post detail fetches in flight for one page
    pub max_concurrent_resolutions: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_concurrent_resolutions: DEFAULT_MAX_CONCURRENT_RESOLUTIONS,
        }
    }
}

impl FeedConfig {
    pub fn with_max_concurrent_resolutions(max_concurrent_resolutions: usize) -> Self {
        Self {
            max_concurrent_resolutions: max_concurrent_resolutions.max(1),
        }
    }

    /// Reads overrides from the environment, malformed values fall back to defaults
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(MAX_CONCURRENT_RESOLUTIONS_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return Self::default();
        };
        match raw.trim().parse::<usize>() {
            Ok(max) if max > 0 => Self::with_max_concurrent_resolutions(max),
            _ => {
                log::warn!("ignoring invalid {MAX_CONCURRENT_RESOLUTIONS_ENV}={raw:?}");
                Self::default()
            }
        }
    }

    pub fn fan_out_for(&self, candidates: usize) -> usize {
        candidates.min(self.max_concurrent_resolutions).max(1)
    }
}
