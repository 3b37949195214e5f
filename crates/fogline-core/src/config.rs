//! Extraction window and cadence configuration.
//!
//! [`ExtractionConfig`] is the full configuration surface consumed by the
//! core pipeline: the in-game time window to record and the cache flush
//! cadence. [`validate()`](ExtractionConfig::validate) checks structural
//! invariants up front so runs never fail half-way on a bad window.

use crate::error::ConfigError;

/// Inclusive in-game time window, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeWindow {
    /// First second to record.
    pub start: f64,
    /// Last second to record; the first step past it ends the run.
    pub end: f64,
}

impl TimeWindow {
    /// Whether `time` falls inside the window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }
}

/// Configuration for one replay extraction.
///
/// The defaults mirror a full competitive game: record from the start,
/// stop after two hours, persist every 20th step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtractionConfig {
    /// In-game time to start recording, in seconds.
    pub start_time: f64,
    /// In-game time to stop recording and end the run, in seconds.
    pub end_time: f64,
    /// Cache flush cadence, in simulation steps.
    ///
    /// The observation cache is refreshed every step but only flushed to
    /// the unit log every `interval` steps — sparse sampling that always
    /// reflects the freshest state as of the sampled step.
    pub interval: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            end_time: 7200.0,
            interval: 20,
        }
    }
}

impl ExtractionConfig {
    /// Check structural invariants: finite bounds, ordered window,
    /// non-zero interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for value in [self.start_time, self.end_time] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteWindow { value });
            }
        }
        if self.start_time < 0.0 || self.start_time >= self.end_time {
            return Err(ConfigError::InvalidWindow {
                start: self.start_time,
                end: self.end_time,
            });
        }
        if self.interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    /// The configured window as a [`TimeWindow`].
    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert_eq!(ExtractionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_inverted_window() {
        let config = ExtractionConfig {
            start_time: 600.0,
            end_time: 60.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidWindow {
                start: 600.0,
                end: 60.0
            })
        );
    }

    #[test]
    fn rejects_nan_bound() {
        let config = ExtractionConfig {
            start_time: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteWindow { .. })
        ));
    }

    #[test]
    fn rejects_zero_interval() {
        let config = ExtractionConfig {
            interval: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = ExtractionConfig::default().window();
        assert!(window.contains(0.0));
        assert!(window.contains(7200.0));
        assert!(!window.contains(7200.5));
    }
}
