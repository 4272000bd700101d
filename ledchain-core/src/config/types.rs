//! Configuration type definitions

use ledchain_protocol::{MAX_DEVICES, MAX_INTENSITY};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Chain configuration
///
/// Applied once when the chain is built. The power-on sequence always runs
/// first; `intensity` and `start_active` are applied on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChainConfig {
    /// Number of chips in the cascade (clamped to 1-8)
    pub device_count: u8,
    /// Brightness written to every device after init (0-15)
    pub intensity: Option<u8>,
    /// Leave shutdown mode after init
    pub start_active: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            device_count: 1,
            intensity: None,
            start_active: false,
        }
    }
}

impl ChainConfig {
    /// Configuration for `device_count` chips with the default start-up
    pub fn new(device_count: u8) -> Self {
        Self {
            device_count,
            ..Self::default()
        }
    }

    /// Set the start-up brightness
    pub fn with_intensity(mut self, level: u8) -> Self {
        self.intensity = Some(level);
        self
    }

    /// Leave shutdown mode once initialized
    pub fn active(mut self) -> Self {
        self.start_active = true;
        self
    }

    /// Device count clamped to what the hardware supports
    pub fn clamped_device_count(&self) -> u8 {
        self.device_count.clamp(1, MAX_DEVICES as u8)
    }

    /// Start-up intensity if it is in range
    pub fn valid_intensity(&self) -> Option<u8> {
        self.intensity.filter(|&level| level <= MAX_INTENSITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChainConfig::default();
        assert_eq!(config.device_count, 1);
        assert_eq!(config.intensity, None);
        assert!(!config.start_active);
    }

    #[test]
    fn test_device_count_clamping() {
        assert_eq!(ChainConfig::new(0).clamped_device_count(), 1);
        assert_eq!(ChainConfig::new(4).clamped_device_count(), 4);
        assert_eq!(ChainConfig::new(8).clamped_device_count(), 8);
        assert_eq!(ChainConfig::new(20).clamped_device_count(), 8);
    }

    #[test]
    fn test_intensity_out_of_range_is_ignored() {
        assert_eq!(ChainConfig::new(1).with_intensity(15).valid_intensity(), Some(15));
        assert_eq!(ChainConfig::new(1).with_intensity(16).valid_intensity(), None);
    }

    #[test]
    fn test_builder() {
        let config = ChainConfig::new(3).with_intensity(4).active();
        assert_eq!(config.device_count, 3);
        assert_eq!(config.intensity, Some(4));
        assert!(config.start_active);
    }
}
