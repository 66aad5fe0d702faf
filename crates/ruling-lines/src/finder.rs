//! Line finder
//!
//! [`LineFinder`] turns a page into a clean, ordered set of [`LineRect`]s:
//!
//! 1. raw scan through the configured [`RawLineScanner`]
//! 2. fat-line correction
//! 3. fragment merging
//! 4. fragment extension (optional), followed by another merge
//! 5. sorting by position, then by start along the line

use std::cmp::Reverse;

use crate::error::LineResult;
use crate::extend::{ExtensionRules, extend_line};
use crate::merge::{MergeRules, merge_lines};
use crate::options::LineFinderOptions;
use crate::scan::{RawLineScanner, RunLineScanner};
use ruling_core::{IdGenerator, LineRect, Orientation, PixelProbe, Rect, Window};

/// One line-detection session
///
/// Owns the id generator; every line it reports carries an id unique
/// within the session.
pub struct LineFinder {
    options: LineFinderOptions,
    scanner: Box<dyn RawLineScanner>,
    ids: IdGenerator,
}

impl std::fmt::Debug for LineFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineFinder")
            .field("options", &self.options)
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}

impl LineFinder {
    /// Create a finder using the built-in [`RunLineScanner`]
    pub fn new(options: LineFinderOptions) -> LineResult<Self> {
        Self::with_scanner(options, Box::new(RunLineScanner))
    }

    /// Create a finder using a custom raw scanner
    pub fn with_scanner(
        options: LineFinderOptions,
        scanner: Box<dyn RawLineScanner>,
    ) -> LineResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            scanner,
            ids: IdGenerator::new(),
        })
    }

    /// The options in use
    pub fn options(&self) -> &LineFinderOptions {
        &self.options
    }

    /// The session's id generator
    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Find all lines of one orientation.
    ///
    /// Scanner errors are returned unchanged.
    pub fn find_lines(
        &mut self,
        probe: &dyn PixelProbe,
        orientation: Orientation,
    ) -> LineResult<Vec<LineRect>> {
        let raw = self.scanner.scan(probe, orientation, &self.options.scan)?;
        let raw_count = raw.len();
        let mut lines: Vec<LineRect> = raw
            .into_iter()
            .map(|rect| LineRect::new(rect, orientation, &mut self.ids))
            .collect();

        let corrected = self.correct_fat_lines(probe, &mut lines)?;
        let mut lines = self.merge_lines(lines);
        if self.options.extend_fragments {
            lines = self.extend_lines(probe, lines);
        }
        sort_lines(&mut lines);

        log::debug!(
            "{:?}: {} raw, {} fat corrected, {} lines",
            orientation,
            raw_count,
            corrected,
            lines.len()
        );
        Ok(lines)
    }

    /// Find horizontal and vertical lines, in that order
    pub fn find_all_lines(
        &mut self,
        probe: &dyn PixelProbe,
    ) -> LineResult<(Vec<LineRect>, Vec<LineRect>)> {
        let horizontal = self.find_lines(probe, Orientation::Horizontal)?;
        let vertical = self.find_lines(probe, Orientation::Vertical)?;
        Ok((horizontal, vertical))
    }

    /// Replace fat lines with the thinner line found by a stricter re-scan.
    ///
    /// Only the widest `fat_line_percent` of the lines (rounded up) that are
    /// thicker than `fat_line_cutoff` are considered. Returns how many lines
    /// were replaced.
    pub fn correct_fat_lines(
        &mut self,
        probe: &dyn PixelProbe,
        lines: &mut [LineRect],
    ) -> LineResult<usize> {
        if lines.is_empty() {
            return Ok(0);
        }
        let mut order: Vec<usize> = (0..lines.len()).collect();
        order.sort_by_key(|&i| Reverse(lines[i].line_width()));
        let considered = (lines.len() * self.options.fat_line_percent as usize).div_ceil(100);
        let cutoff = self.options.fat_line_cutoff as i32;
        let settings = self.options.scan.with_halved_wall();

        let mut corrected = 0;
        for &i in order.iter().take(considered) {
            let original = lines[i].clone();
            if original.line_width() <= cutoff {
                break;
            }
            let orientation = original.orientation();
            let window = Window::new(probe, original.rect());
            let best = self
                .scanner
                .scan(&window, orientation, &settings)?
                .iter()
                .map(|r| window.to_parent(r))
                .max_by_key(|r| length_overlap(orientation, r, &original));

            let Some(rect) = best else {
                log::trace!("fat line {:?} {:?}: nothing re-found", original.id(), original.rect());
                continue;
            };
            let replacement = LineRect::new(rect, orientation, &mut self.ids);
            let overlap = replacement.length_overlap(&original) as i64;
            if overlap * 100 >= self.options.fat_line_overlap_percent as i64 * original.length() as i64 {
                log::trace!(
                    "fat line {:?} {:?} -> {:?} {:?}",
                    original.id(),
                    original.rect(),
                    replacement.id(),
                    replacement.rect()
                );
                lines[i].assign(&replacement)?;
                corrected += 1;
            }
        }
        Ok(corrected)
    }

    /// Merge fragments with the configured rules
    pub fn merge_lines(&self, lines: Vec<LineRect>) -> Vec<LineRect> {
        merge_lines(lines, &MergeRules::from(&self.options))
    }

    /// Extend every line past its ends, then merge again.
    ///
    /// An extended line replaces its original under a new id and keeps the
    /// across edges widened by the drifting tracking center.
    pub fn extend_lines(&mut self, probe: &dyn PixelProbe, lines: Vec<LineRect>) -> Vec<LineRect> {
        let rules = ExtensionRules::from(&self.options);
        let mut extended = 0;
        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            match extend_line(probe, &line, &rules) {
                Some(rect) => {
                    extended += 1;
                    out.push(LineRect::new(rect, line.orientation(), &mut self.ids));
                }
                None => out.push(line),
            }
        }
        log::debug!("extension: {} of {} lines grew", extended, out.len());
        if extended > 0 {
            self.merge_lines(out)
        } else {
            out
        }
    }
}

fn length_overlap(orientation: Orientation, rect: &Rect, line: &LineRect) -> i32 {
    let (start, end) = orientation.length_range(rect);
    end.min(line.length_end()) - start.max(line.length_start())
}

/// Sort lines by position, then by start along the line
pub fn sort_lines(lines: &mut [LineRect]) {
    lines.sort_by_key(|l| (l.position(), l.length_start()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LineError;
    use crate::scan::ScanSettings;
    use ruling_core::{Pix, PixMut, PixelOp};

    struct FailingScanner;

    impl RawLineScanner for FailingScanner {
        fn scan(
            &self,
            _probe: &dyn PixelProbe,
            _orientation: Orientation,
            _settings: &ScanSettings,
        ) -> LineResult<Vec<Rect>> {
            Err(LineError::ScanFailure("region engine out of memory".to_string()))
        }
    }

    struct FixedScanner(Vec<Rect>);

    impl RawLineScanner for FixedScanner {
        fn scan(
            &self,
            _probe: &dyn PixelProbe,
            _orientation: Orientation,
            _settings: &ScanSettings,
        ) -> LineResult<Vec<Rect>> {
            Ok(self.0.clone())
        }
    }

    fn blank() -> Pix {
        Pix::new(500, 300).unwrap()
    }

    #[test]
    fn test_scan_failure_passes_through() {
        let mut finder =
            LineFinder::with_scanner(LineFinderOptions::default(), Box::new(FailingScanner)).unwrap();
        let err = finder.find_lines(&blank(), Orientation::Horizontal).unwrap_err();
        assert!(matches!(&err, LineError::ScanFailure(m) if m == "region engine out of memory"));
        assert_eq!(err.to_string(), "region engine out of memory");
    }

    #[test]
    fn test_invalid_options_rejected() {
        let opts = LineFinderOptions::default().with_extension(0, 20, 10);
        assert!(matches!(LineFinder::new(opts), Err(LineError::InvalidOption(_))));
    }

    #[test]
    fn test_output_sorted_and_merged() {
        let scanner = FixedScanner(vec![
            Rect::new_unchecked(10, 200, 300, 202),
            Rect::new_unchecked(320, 50, 400, 52),
            Rect::new_unchecked(10, 50, 300, 52),
            Rect::new_unchecked(10, 200, 300, 202),
        ]);
        let opts = LineFinderOptions::default().with_extend_fragments(false);
        let mut finder = LineFinder::with_scanner(opts, Box::new(scanner)).unwrap();
        let lines = finder.find_lines(&blank(), Orientation::Horizontal).unwrap();
        let rects: Vec<Rect> = lines.iter().map(LineRect::rect).collect();
        assert_eq!(
            rects,
            vec![
                Rect::new_unchecked(10, 50, 400, 52),
                Rect::new_unchecked(10, 200, 300, 202),
            ]
        );
        assert_eq!(finder.ids().last_assigned(), 4);
    }

    #[test]
    fn test_fat_line_percent_rounds_up() {
        // 25 % of three lines rounds up to one
        let mut pm = PixMut::new(500, 300).unwrap();
        pm.render_rect(&Rect::new_unchecked(20, 100, 420, 110), PixelOp::Set)
            .unwrap();
        let pix: Pix = pm.into();
        let scanner = FixedScanner(vec![Rect::new_unchecked(20, 100, 420, 110)]);
        let mut finder =
            LineFinder::with_scanner(LineFinderOptions::default(), Box::new(scanner)).unwrap();
        let mut ids = IdGenerator::new();
        let mut lines = vec![
            LineRect::new(Rect::new_unchecked(20, 80, 420, 130), Orientation::Horizontal, &mut ids),
            LineRect::new(Rect::new_unchecked(20, 10, 420, 12), Orientation::Horizontal, &mut ids),
            LineRect::new(Rect::new_unchecked(20, 20, 420, 22), Orientation::Horizontal, &mut ids),
        ];
        let fixed = finder.correct_fat_lines(&pix, &mut lines).unwrap();
        assert_eq!(fixed, 1);
        // the fixed scanner answers in window coordinates
        assert_eq!(lines[0].rect(), Rect::new_unchecked(40, 180, 440, 190));
    }

    #[test]
    fn test_fat_line_needs_overlap() {
        let pix = blank();
        let scanner = FixedScanner(vec![Rect::new_unchecked(0, 20, 100, 30)]);
        let mut finder =
            LineFinder::with_scanner(LineFinderOptions::default(), Box::new(scanner)).unwrap();
        let mut ids = IdGenerator::new();
        let fat = LineRect::new(Rect::new_unchecked(20, 80, 420, 130), Orientation::Horizontal, &mut ids);
        let mut lines = vec![fat.clone()];
        assert_eq!(finder.correct_fat_lines(&pix, &mut lines).unwrap(), 0);
        assert_eq!(lines[0], fat);
    }

    #[test]
    fn test_extended_line_replaces_original() {
        let mut pm = PixMut::new(500, 300).unwrap();
        pm.render_rect(&Rect::new_unchecked(20, 100, 300, 103), PixelOp::Set)
            .unwrap();
        pm.render_rect(&Rect::new_unchecked(300, 102, 348, 105), PixelOp::Set)
            .unwrap();
        let pix: Pix = pm.into();
        let scanner = FixedScanner(vec![Rect::new_unchecked(20, 100, 300, 103)]);
        let mut finder =
            LineFinder::with_scanner(LineFinderOptions::default(), Box::new(scanner)).unwrap();
        let lines = finder.find_lines(&pix, Orientation::Horizontal).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].rect(), Rect::new_unchecked(20, 100, 348, 104));
        // raw line 1, extended line 2
        assert_eq!(lines[0].id().0, 2);
        assert_eq!(finder.ids().last_assigned(), 2);
    }

    #[test]
    fn test_find_all_lines_on_ruled_box() {
        let mut pm = PixMut::new(500, 300).unwrap();
        pm.render_rect_outline(&Rect::new_unchecked(50, 40, 450, 260), 2, PixelOp::Set)
            .unwrap();
        let pix: Pix = pm.into();
        let mut finder = LineFinder::new(LineFinderOptions::default()).unwrap();
        let (h, v) = finder.find_all_lines(&pix).unwrap();
        assert_eq!(
            h.iter().map(LineRect::rect).collect::<Vec<_>>(),
            vec![
                Rect::new_unchecked(50, 40, 450, 42),
                Rect::new_unchecked(50, 258, 450, 260),
            ]
        );
        assert_eq!(
            v.iter().map(LineRect::rect).collect::<Vec<_>>(),
            vec![
                Rect::new_unchecked(50, 40, 52, 260),
                Rect::new_unchecked(448, 40, 450, 260),
            ]
        );
        let mut all_ids: Vec<_> = h.iter().chain(&v).map(LineRect::id).collect();
        all_ids.sort();
        all_ids.dedup();
        assert_eq!(all_ids.len(), 4);
    }
}
