//! Pipeline configuration.

/// Configuration parameters for a planning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Upper bound on itinerary days.
    pub max_days: u32,

    /// Trip length used when no usable return date is given.
    pub fallback_days: u32,

    /// Nights assumed for hotel totals.
    pub stay_nights: u32,

    /// Origin used when the request omits one.
    pub default_origin: String,

    /// Interests used when the request omits them.
    pub default_interests: Vec<String>,

    /// Fixed run seed. When unset every run draws a fresh seed.
    pub seed: Option<u64>,

    /// Run worker stages on the blocking pool.
    pub concurrent: bool,
}

impl PipelineConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        max_days: u32,
        fallback_days: u32,
        stay_nights: u32,
        default_origin: impl Into<String>,
        default_interests: Vec<String>,
        seed: Option<u64>,
        concurrent: bool,
    ) -> Self {
        Self {
            max_days,
            fallback_days,
            stay_nights,
            default_origin: default_origin.into(),
            default_interests,
            seed,
            concurrent,
        }
    }

    /// Same configuration with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_days: 7,
            fallback_days: 3,
            stay_nights: 3,
            default_origin: "NYC".to_string(),
            default_interests: ["culture", "food", "history"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            seed: None,
            concurrent: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PipelineConfig::default();

        assert_eq!(config.max_days, 7);
        assert_eq!(config.fallback_days, 3);
        assert_eq!(config.stay_nights, 3);
        assert_eq!(config.default_origin, "NYC");
        assert_eq!(config.default_interests, vec!["culture", "food", "history"]);
        assert_eq!(config.seed, None);
        assert!(config.concurrent);
    }

    #[test]
    fn custom_config() {
        let config = PipelineConfig::new(5, 2, 4, "Chennai", vec![], Some(9), false);

        assert_eq!(config.max_days, 5);
        assert_eq!(config.fallback_days, 2);
        assert_eq!(config.stay_nights, 4);
        assert_eq!(config.default_origin, "Chennai");
        assert!(config.default_interests.is_empty());
        assert_eq!(config.seed, Some(9));
        assert!(!config.concurrent);
    }

    #[test]
    fn with_seed() {
        assert_eq!(PipelineConfig::default().with_seed(42).seed, Some(42));
    }
}
