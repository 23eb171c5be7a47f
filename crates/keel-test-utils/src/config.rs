//! Stress harness configuration.

use keel_core::Alignment;

use crate::bump::HeaderedBump;
use crate::error::FixtureError;

/// Parameters for a reproducible allocation stress run.
///
/// Validated by [`StressConfig::validate`] before a plan is generated; the
/// same config always produces the same request sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StressConfig {
    /// Generator seed. 0 is remapped to 1 by the generator.
    pub seed: u32,

    /// Number of allocation requests in the plan.
    pub iterations: usize,

    /// Largest request size in bytes. Sizes are drawn from `1..=max_size`.
    pub max_size: u32,

    /// Alignments requests choose from. Each must be a power of two no
    /// larger than [`HeaderedBump::MAX_ALIGNMENT`].
    pub alignments: Vec<usize>,

    /// Size of the fixture's backing buffer in bytes.
    pub capacity: usize,
}

impl StressConfig {
    /// Default request count.
    pub const DEFAULT_ITERATIONS: usize = 10_000;

    /// Default largest request size.
    pub const DEFAULT_MAX_SIZE: u32 = 256;

    /// Default alignment menu.
    pub const DEFAULT_ALIGNMENTS: [usize; 7] = [1, 2, 4, 8, 16, 32, 64];

    /// Default backing buffer size: 1 MiB.
    pub const DEFAULT_CAPACITY: usize = 1 << 20;

    /// Default config for `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            iterations: Self::DEFAULT_ITERATIONS,
            max_size: Self::DEFAULT_MAX_SIZE,
            alignments: Self::DEFAULT_ALIGNMENTS.to_vec(),
            capacity: Self::DEFAULT_CAPACITY,
        }
    }

    /// Check every field and return the alignment menu in validated form.
    pub fn validate(&self) -> Result<Vec<Alignment>, FixtureError> {
        if self.iterations == 0 {
            return Err(FixtureError::InvalidConfig {
                reason: "iterations must be non-zero".into(),
            });
        }
        if self.max_size == 0 {
            return Err(FixtureError::InvalidConfig {
                reason: "max_size must be non-zero".into(),
            });
        }
        if self.capacity == 0 {
            return Err(FixtureError::InvalidConfig {
                reason: "capacity must be non-zero".into(),
            });
        }
        if self.alignments.is_empty() {
            return Err(FixtureError::InvalidConfig {
                reason: "alignments must not be empty".into(),
            });
        }
        self.alignments
            .iter()
            .map(|&a| {
                let alignment = Alignment::new(a)?;
                if alignment.get() > HeaderedBump::MAX_ALIGNMENT {
                    return Err(FixtureError::InvalidConfig {
                        reason: format!(
                            "alignment {a} exceeds maximum {}",
                            HeaderedBump::MAX_ALIGNMENT
                        ),
                    });
                }
                Ok(alignment)
            })
            .collect()
    }
}

impl Default for StressConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_core::AlignError;

    #[test]
    fn default_config_is_valid() {
        let alignments = StressConfig::default().validate().unwrap();
        assert_eq!(alignments.len(), 7);
        assert_eq!(alignments[6].get(), 64);
    }

    #[test]
    fn rejects_zero_fields() {
        let mut config = StressConfig::default();
        config.iterations = 0;
        assert!(matches!(
            config.validate(),
            Err(FixtureError::InvalidConfig { .. })
        ));

        let mut config = StressConfig::default();
        config.max_size = 0;
        assert!(config.validate().is_err());

        let mut config = StressConfig::default();
        config.capacity = 0;
        assert!(config.validate().is_err());

        let mut config = StressConfig::default();
        config.alignments.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_power_of_two_alignment() {
        let mut config = StressConfig::default();
        config.alignments = vec![8, 24];
        assert_eq!(
            config.validate(),
            Err(FixtureError::InvalidAlignment(AlignError::NotPowerOfTwo {
                value: 24
            }))
        );
    }

    #[test]
    fn rejects_oversized_alignment() {
        let mut config = StressConfig::default();
        config.alignments = vec![HeaderedBump::MAX_ALIGNMENT * 2];
        assert!(matches!(
            config.validate(),
            Err(FixtureError::InvalidConfig { .. })
        ));
    }
}
