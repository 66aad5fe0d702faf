//! Raw line scan
//!
//! The first stage of line finding turns pixels into candidate rectangles.
//! The stage is pluggable through [`RawLineScanner`]; [`RunLineScanner`] is
//! the built-in run-length implementation.
//!
//! # Algorithm
//!
//! Scan rows run along the line direction (image rows for horizontal
//! lines, image columns for vertical ones):
//!
//! 1. Collect the black runs of each scan row, bridging white gaps of up to
//!    `gap_length` pixels. Runs of at least `min_line_length` are core runs.
//! 2. Core runs on consecutive scan rows stack into one candidate when they
//!    overlap by more than half of the shorter run. A candidate survives up
//!    to `variance` scan rows without a matching core run.
//! 3. Candidates thicker than `max_line_width` are blobs and are dropped.
//! 4. Scan rows touching a candidate whose black pixels, bridging gaps of up
//!    to `wall`, cover `wall_percent` of its length are wall rows and are
//!    absorbed into it.

use crate::error::{LineError, LineResult};
use ruling_core::{Orientation, PixelProbe, Rect};

/// Settings of one raw scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    /// Largest white gap bridged inside a run (default: 3)
    pub gap_length: u32,
    /// Thickest core accepted as a line (default: 20)
    pub max_line_width: u32,
    /// Shortest run accepted as a line (default: 50)
    pub min_line_length: u32,
    /// Largest gap bridged when measuring wall rows (default: 10)
    pub wall: u32,
    /// Coverage in percent that makes a neighbouring row a wall row (default: 75)
    pub wall_percent: u32,
    /// Scan rows without a core run tolerated inside a line (default: 2)
    pub variance: u32,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            gap_length: 3,
            max_line_width: 20,
            min_line_length: 50,
            wall: 10,
            wall_percent: 75,
            variance: 2,
        }
    }
}

impl ScanSettings {
    /// Set the largest bridged gap
    pub fn with_gap_length(mut self, gap: u32) -> Self {
        self.gap_length = gap;
        self
    }

    /// Set the thickest accepted line
    pub fn with_max_line_width(mut self, width: u32) -> Self {
        self.max_line_width = width;
        self
    }

    /// Set the shortest accepted line
    pub fn with_min_line_length(mut self, length: u32) -> Self {
        self.min_line_length = length;
        self
    }

    /// Set the wall tolerance and coverage percentage
    pub fn with_wall(mut self, wall: u32, percent: u32) -> Self {
        self.wall = wall;
        self.wall_percent = percent;
        self
    }

    /// Set the number of tolerated missing scan rows
    pub fn with_variance(mut self, variance: u32) -> Self {
        self.variance = variance;
        self
    }

    /// The same settings with the wall tolerance halved
    pub fn with_halved_wall(self) -> Self {
        Self {
            wall: self.wall / 2,
            ..self
        }
    }

    /// Check that every setting is in range
    pub fn validate(&self) -> LineResult<()> {
        if self.min_line_length == 0 {
            return Err(LineError::InvalidOption(
                "min_line_length must be at least 1".to_string(),
            ));
        }
        if self.max_line_width == 0 {
            return Err(LineError::InvalidOption(
                "max_line_width must be at least 1".to_string(),
            ));
        }
        if self.wall_percent > 100 {
            return Err(LineError::InvalidOption(format!(
                "wall_percent must be 0..=100, got {}",
                self.wall_percent
            )));
        }
        Ok(())
    }
}

/// Source of raw candidate line rectangles
///
/// Implementations report rects in the probe's coordinate system. Errors
/// are passed through the line finder unchanged.
pub trait RawLineScanner: Send + Sync {
    /// Scan `probe` for lines running in `orientation`
    fn scan(
        &self,
        probe: &dyn PixelProbe,
        orientation: Orientation,
        settings: &ScanSettings,
    ) -> LineResult<Vec<Rect>>;
}

/// Built-in run-length line scanner
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLineScanner;

/// A line being assembled from stacked core runs
#[derive(Debug)]
struct Candidate {
    start: i32,
    end: i32,
    last_run: (i32, i32),
    first_row: i32,
    last_row: i32,
}

impl Candidate {
    fn new(run: (i32, i32), row: i32) -> Self {
        Self {
            start: run.0,
            end: run.1,
            last_run: run,
            first_row: row,
            last_row: row,
        }
    }

    fn absorb(&mut self, run: (i32, i32), row: i32) {
        self.start = self.start.min(run.0);
        self.end = self.end.max(run.1);
        self.last_run = if self.last_row == row {
            (self.last_run.0.min(run.0), self.last_run.1.max(run.1))
        } else {
            run
        };
        self.last_row = row;
    }
}

/// Whether two runs overlap by more than half of the shorter one
fn runs_stack(a: (i32, i32), b: (i32, i32)) -> bool {
    let overlap = a.1.min(b.1) - a.0.max(b.0);
    let shorter = (a.1 - a.0).min(b.1 - b.0);
    overlap > 0 && overlap * 2 > shorter
}

/// Black runs of one scan row within `[from, to)`, bridging gaps up to `bridge`
fn row_runs(
    probe: &dyn PixelProbe,
    orientation: Orientation,
    across: i32,
    (from, to): (i32, i32),
    bridge: i32,
) -> Vec<(i32, i32)> {
    let mut runs = Vec::new();
    let mut current: Option<(i32, i32)> = None;

    for along in from..to {
        let (x, y) = orientation.to_xy(along, across);
        if !probe.is_black(x, y) {
            continue;
        }
        current = match current {
            Some((start, end)) if along - end <= bridge => Some((start, along + 1)),
            Some(run) => {
                runs.push(run);
                Some((along, along + 1))
            }
            None => Some((along, along + 1)),
        };
    }
    runs.extend(current);
    runs
}

impl RunLineScanner {
    fn is_wall_row(
        probe: &dyn PixelProbe,
        orientation: Orientation,
        across: i32,
        extent: (i32, i32),
        settings: &ScanSettings,
    ) -> bool {
        let length = (extent.1 - extent.0) as i64;
        let covered: i64 = row_runs(probe, orientation, across, extent, settings.wall as i32)
            .iter()
            .map(|(s, e)| (e - s) as i64)
            .sum();
        covered > 0 && covered * 100 >= settings.wall_percent as i64 * length
    }

    fn finish(
        probe: &dyn PixelProbe,
        orientation: Orientation,
        settings: &ScanSettings,
        rows: (i32, i32),
        cand: &Candidate,
    ) -> Option<Rect> {
        let thickness = cand.last_row - cand.first_row + 1;
        if thickness > settings.max_line_width as i32 {
            log::trace!(
                "dropping blob {}..{} x {}..={} ({} rows thick)",
                cand.start,
                cand.end,
                cand.first_row,
                cand.last_row,
                thickness
            );
            return None;
        }

        let extent = (cand.start, cand.end);
        let mut top = cand.first_row;
        while top > rows.0 && Self::is_wall_row(probe, orientation, top - 1, extent, settings) {
            top -= 1;
        }
        let mut bottom = cand.last_row + 1;
        while bottom < rows.1 && Self::is_wall_row(probe, orientation, bottom, extent, settings) {
            bottom += 1;
        }
        Some(orientation.make_rect(extent, (top, bottom)))
    }
}

impl RawLineScanner for RunLineScanner {
    fn scan(
        &self,
        probe: &dyn PixelProbe,
        orientation: Orientation,
        settings: &ScanSettings,
    ) -> LineResult<Vec<Rect>> {
        settings.validate()?;

        let bounds = probe.bounds();
        let along = orientation.length_range(&bounds);
        let rows = orientation.width_range(&bounds);
        let gap = settings.gap_length as i32;
        let min_length = settings.min_line_length as i32;
        let variance = settings.variance as i32;

        let mut active: Vec<Candidate> = Vec::new();
        let mut finished: Vec<Candidate> = Vec::new();

        for row in rows.0..rows.1 {
            for run in row_runs(probe, orientation, row, along, gap) {
                if run.1 - run.0 < min_length {
                    continue;
                }
                match active.iter_mut().find(|c| runs_stack(c.last_run, run)) {
                    Some(cand) => cand.absorb(run, row),
                    None => active.push(Candidate::new(run, row)),
                }
            }

            let (stale, live): (Vec<_>, Vec<_>) = active
                .into_iter()
                .partition(|c| row - c.last_row > variance);
            finished.extend(stale);
            active = live;
        }
        finished.extend(active);

        let mut rects: Vec<Rect> = finished
            .iter()
            .filter_map(|c| Self::finish(probe, orientation, settings, rows, c))
            .collect();
        rects.sort_by_key(|r| {
            let (ws, _) = orientation.width_range(r);
            let (ls, _) = orientation.length_range(r);
            (ws, ls)
        });

        log::debug!(
            "raw scan: {} {:?} candidates in {}x{}",
            rects.len(),
            orientation,
            bounds.width(),
            bounds.height()
        );
        Ok(rects)
    }
}
