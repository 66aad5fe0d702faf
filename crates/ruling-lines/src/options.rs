//! Line finder options

use crate::error::{LineError, LineResult};
use crate::scan::ScanSettings;

/// Options controlling [`LineFinder`](crate::LineFinder)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFinderOptions {
    /// Settings handed to the raw scanner
    pub scan: ScanSettings,
    /// Share of the widest candidates considered fat, in percent, rounded up (default: 25)
    pub fat_line_percent: u32,
    /// Minimum thickness of a fat line in pixels (default: 25)
    pub fat_line_cutoff: u32,
    /// Share of the original length a re-found line must cover (default: 85)
    pub fat_line_overlap_percent: u32,
    /// Largest across-gap between stacked fragments that still merge (default: 3)
    pub intersection_allowance: u32,
    /// Largest position difference of in-line fragments (default: 3)
    pub in_line_tolerance: u32,
    /// Largest lengthwise gap bridged between in-line fragments (default: 50)
    pub bridge_gap: u32,
    /// Whether to extend fragments past their ends (default: true)
    pub extend_fragments: bool,
    /// Scan rows probed around the tracking center while extending (default: 5)
    pub extension_band: u32,
    /// Consecutive black samples needed to commit an extension (default: 20)
    pub extension_min_run: u32,
    /// Largest white gap crossed while extending (default: 10)
    pub extension_max_gap: u32,
    /// Growth of the step through white pixels, in percent per sample (default: 25)
    pub telescope_percent: u32,
}

impl Default for LineFinderOptions {
    fn default() -> Self {
        Self {
            scan: ScanSettings::default(),
            fat_line_percent: 25,
            fat_line_cutoff: 25,
            fat_line_overlap_percent: 85,
            intersection_allowance: 3,
            in_line_tolerance: 3,
            bridge_gap: 50,
            extend_fragments: true,
            extension_band: 5,
            extension_min_run: 20,
            extension_max_gap: 10,
            telescope_percent: 25,
        }
    }
}

impl LineFinderOptions {
    /// Set the raw scan settings
    pub fn with_scan(mut self, scan: ScanSettings) -> Self {
        self.scan = scan;
        self
    }

    /// Set the fat-line thresholds
    pub fn with_fat_lines(mut self, percent: u32, cutoff: u32, overlap_percent: u32) -> Self {
        self.fat_line_percent = percent;
        self.fat_line_cutoff = cutoff;
        self.fat_line_overlap_percent = overlap_percent;
        self
    }

    /// Set the stacked-merge allowance
    pub fn with_intersection_allowance(mut self, allowance: u32) -> Self {
        self.intersection_allowance = allowance;
        self
    }

    /// Set the in-line position tolerance
    pub fn with_in_line_tolerance(mut self, tolerance: u32) -> Self {
        self.in_line_tolerance = tolerance;
        self
    }

    /// Set the largest bridged gap
    pub fn with_bridge_gap(mut self, gap: u32) -> Self {
        self.bridge_gap = gap;
        self
    }

    /// Enable or disable fragment extension
    pub fn with_extend_fragments(mut self, extend: bool) -> Self {
        self.extend_fragments = extend;
        self
    }

    /// Set the extension band, minimum run and maximum gap
    pub fn with_extension(mut self, band: u32, min_run: u32, max_gap: u32) -> Self {
        self.extension_band = band;
        self.extension_min_run = min_run;
        self.extension_max_gap = max_gap;
        self
    }

    /// Set the telescoping rate
    pub fn with_telescope_percent(mut self, percent: u32) -> Self {
        self.telescope_percent = percent;
        self
    }

    /// Check that every option is in range
    pub fn validate(&self) -> LineResult<()> {
        self.scan.validate()?;
        for (name, value) in [
            ("fat_line_percent", self.fat_line_percent),
            ("fat_line_overlap_percent", self.fat_line_overlap_percent),
        ] {
            if value > 100 {
                return Err(LineError::InvalidOption(format!(
                    "{name} must be 0..=100, got {value}"
                )));
            }
        }
        if self.extension_band == 0 {
            return Err(LineError::InvalidOption(
                "extension_band must be at least 1".to_string(),
            ));
        }
        if self.extension_min_run == 0 {
            return Err(LineError::InvalidOption(
                "extension_min_run must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = LineFinderOptions::default();
        assert_eq!(opts.fat_line_percent, 25);
        assert_eq!(opts.fat_line_cutoff, 25);
        assert_eq!(opts.fat_line_overlap_percent, 85);
        assert!(opts.extend_fragments);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_builder_and_validate() {
        let opts = LineFinderOptions::default()
            .with_bridge_gap(5)
            .with_extension(3, 10, 4);
        assert_eq!(opts.bridge_gap, 5);
        assert_eq!(opts.extension_band, 3);
        assert!(opts.validate().is_ok());

        assert!(LineFinderOptions::default().with_fat_lines(120, 25, 85).validate().is_err());
        assert!(LineFinderOptions::default().with_extension(0, 20, 10).validate().is_err());
        let bad_scan = ScanSettings::default().with_min_line_length(0);
        assert!(LineFinderOptions::default().with_scan(bad_scan).validate().is_err());
    }
}
