//! Monthly Scribe volume estimation from practice list size.

use super::bands::{Band, BandMatch, BandTable};

/// Estimate for list sizes below the lowest band.
pub const LOW_FALLBACK_VOLUME: u32 = 200;

/// Estimate for list sizes at or above the highest band.
pub const HIGH_FALLBACK_VOLUME: u32 = 750;

/// Estimate when no band relationship can be established.
pub const DEFAULT_VOLUME: u32 = 500;

/// Observed average monthly Scribes per list-size range.
pub const DEFAULT_VOLUME_BANDS: [Band<u32>; 24] = [
    Band::new(2_000, 4_000, 259),
    Band::new(4_000, 6_000, 328),
    Band::new(6_000, 8_000, 344),
    Band::new(8_000, 10_000, 387),
    Band::new(10_000, 12_000, 397),
    Band::new(12_000, 14_000, 482),
    Band::new(14_000, 16_000, 556),
    Band::new(16_000, 18_000, 595),
    Band::new(18_000, 20_000, 483),
    Band::new(20_000, 22_000, 476),
    Band::new(22_000, 24_000, 1165),
    Band::new(24_000, 26_000, 531),
    Band::new(26_000, 28_000, 574),
    Band::new(28_000, 30_000, 534),
    Band::new(30_000, 32_000, 976),
    Band::new(32_000, 34_000, 601),
    Band::new(34_000, 36_000, 130),
    Band::new(36_000, 38_000, 233),
    Band::new(38_000, 40_000, 248),
    Band::new(40_000, 42_000, 480),
    Band::new(46_000, 48_000, 695),
    Band::new(48_000, 50_000, 2681),
    Band::new(52_000, 54_000, 713),
    Band::new(54_000, 56_000, 728),
];

/// Banded monthly volume estimator with gap interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeEstimator {
    bands: BandTable<u32>,
    low_fallback: u32,
    high_fallback: u32,
    default_volume: u32,
}

impl Default for VolumeEstimator {
    fn default() -> Self {
        Self::new(
            DEFAULT_VOLUME_BANDS.to_vec(),
            LOW_FALLBACK_VOLUME,
            HIGH_FALLBACK_VOLUME,
            DEFAULT_VOLUME,
        )
    }
}

impl VolumeEstimator {
    pub fn new(
        bands: Vec<Band<u32>>,
        low_fallback: u32,
        high_fallback: u32,
        default_volume: u32,
    ) -> Self {
        Self {
            bands: BandTable::new(bands),
            low_fallback,
            high_fallback,
            default_volume,
        }
    }

    /// Estimate monthly Scribes for a list size.
    ///
    /// Gaps between bands take the mean of the two neighbouring averages,
    /// rounded half up.
    pub fn estimate(&self, list_size: i64) -> u32 {
        match self.bands.locate(list_size) {
            BandMatch::Within(band) => band.value,
            BandMatch::Below => self.low_fallback,
            BandMatch::Above => self.high_fallback,
            BandMatch::Between(lower, upper) => {
                ((f64::from(lower.value) + f64::from(upper.value)) / 2.0).round() as u32
            }
            BandMatch::Unplaced => self.default_volume,
        }
    }
}

/// Estimate monthly Scribes with the default bands.
pub fn estimate_monthly_volume(list_size: i64) -> u32 {
    VolumeEstimator::default().estimate(list_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_band_start_middle_and_end() {
        let estimator = VolumeEstimator::default();
        for band in DEFAULT_VOLUME_BANDS.iter() {
            let mid = (band.min + band.max) / 2;
            assert_eq!(estimator.estimate(band.min), band.value, "min of {:?}", band);
            assert_eq!(estimator.estimate(mid), band.value, "mid of {:?}", band);
            assert_eq!(estimator.estimate(band.max - 1), band.value, "max-1 of {:?}", band);
        }
    }

    #[test]
    fn test_boundary_belongs_to_upper_band() {
        assert_eq!(estimate_monthly_volume(3_999), 259);
        assert_eq!(estimate_monthly_volume(4_000), 328);
        assert_eq!(estimate_monthly_volume(8_500), 387);
        assert_eq!(estimate_monthly_volume(22_000), 1165);
    }

    #[test]
    fn test_low_and_high_fallbacks() {
        assert_eq!(estimate_monthly_volume(1_999), 200);
        assert_eq!(estimate_monthly_volume(0), 200);
        assert_eq!(estimate_monthly_volume(-500), 200);
        assert_eq!(estimate_monthly_volume(56_000), 750);
        assert_eq!(estimate_monthly_volume(95_000), 750);
    }

    #[test]
    fn test_gap_42000_to_46000() {
        // (480 + 695) / 2 = 587.5, rounds up
        assert_eq!(estimate_monthly_volume(41_999), 480);
        assert_eq!(estimate_monthly_volume(42_000), 588);
        assert_eq!(estimate_monthly_volume(45_000), 588);
        assert_eq!(estimate_monthly_volume(45_999), 588);
        assert_eq!(estimate_monthly_volume(46_000), 695);
    }

    #[test]
    fn test_gap_50000_to_52000() {
        // (2681 + 713) / 2 = 1697
        assert_eq!(estimate_monthly_volume(49_999), 2681);
        assert_eq!(estimate_monthly_volume(50_000), 1697);
        assert_eq!(estimate_monthly_volume(51_999), 1697);
        assert_eq!(estimate_monthly_volume(52_000), 713);
    }

    #[test]
    fn test_empty_table_uses_default() {
        let estimator = VolumeEstimator::new(Vec::new(), 1, 2, 500);
        assert_eq!(estimator.estimate(10_000), 500);
    }

    #[test]
    fn test_custom_fallbacks() {
        let estimator = VolumeEstimator::new(vec![Band::new(100, 200, 10)], 5, 50, 99);
        assert_eq!(estimator.estimate(50), 5);
        assert_eq!(estimator.estimate(150), 10);
        assert_eq!(estimator.estimate(200), 50);
    }
}
