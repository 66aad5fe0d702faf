//! Fragment extension
//!
//! A line the raw scan reported may stop short of the printed rule: the
//! rule thins out, breaks, or drifts off its row. Extension walks outward
//! from each end along a narrow band that follows the rule and moves the
//! end forward whenever it finds enough black again.
//!
//! # State machine
//!
//! ```text
//!            black                 run >= min_run
//! Scanning ---------> Scanning ---------------------> Committed
//!    |  ^                                                |
//!    |  | black                                          | black / white
//!    v  |                                                v
//! GapAccumulating --- gap > max_gap ---------------> Aborted
//!         or distance past the committed end > bridge_gap,
//!         or the sample leaves the image
//! ```
//!
//! Every white sample widens the step (telescoping); black resets it to 1.

use crate::options::LineFinderOptions;
use ruling_core::{LineRect, PixelProbe, Rect};

/// Parameters of fragment extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionRules {
    /// Scan rows probed around the tracking center
    pub band: i32,
    /// Consecutive black samples needed to commit
    pub min_run: i32,
    /// Largest accumulated white gap
    pub max_gap: i32,
    /// Farthest a sample may lie beyond the committed end
    pub bridge_gap: i32,
    /// Step growth per white sample, in percent
    pub telescope_percent: i32,
}

impl From<&LineFinderOptions> for ExtensionRules {
    fn from(opts: &LineFinderOptions) -> Self {
        Self {
            band: opts.extension_band as i32,
            min_run: opts.extension_min_run as i32,
            max_gap: opts.extension_max_gap as i32,
            bridge_gap: opts.bridge_gap as i32,
            telescope_percent: opts.telescope_percent as i32,
        }
    }
}

/// State of the walk after a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionState {
    /// On black, not yet enough of it to commit
    Scanning,
    /// On white, counting the gap
    GapAccumulating,
    /// The end moved to the current sample
    Committed,
    /// The walk is over
    Aborted,
}

/// Which end of a line to extend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    /// The low end along the running direction
    Start,
    /// The high end along the running direction
    End,
}

/// Walk state for one end of one line
#[derive(Debug)]
struct Tracker {
    rules: ExtensionRules,
    dir: i32,
    /// Outermost committed sample
    edge: i32,
    center: i32,
    width: (i32, i32),
    run: i32,
    gap: i32,
    white_streak: i32,
    step: i32,
    extended: bool,
}

impl Tracker {
    fn new(line: &LineRect, end: LineEnd, rules: ExtensionRules) -> Self {
        let (dir, edge) = match end {
            LineEnd::Start => (-1, line.length_start()),
            LineEnd::End => (1, line.length_end() - 1),
        };
        Self {
            rules,
            dir,
            edge,
            center: line.position(),
            width: (line.width_start(), line.width_end()),
            run: 0,
            gap: 0,
            white_streak: 0,
            step: 1,
            extended: false,
        }
    }

    /// Scan rows sampled at the current tracking center
    fn band(&self) -> std::ops::RangeInclusive<i32> {
        let below = (self.rules.band - 1) / 2;
        let above = self.rules.band - 1 - below;
        (self.center - below)..=(self.center + above)
    }

    fn first_sample(&self) -> i32 {
        self.edge + self.dir
    }

    fn next_sample(&self, along: i32) -> i32 {
        along + self.dir * self.step
    }

    /// Feed one sample: the scan rows of the band that were black at `along`
    fn observe(&mut self, along: i32, black_rows: &[i32]) -> ExtensionState {
        let state = if black_rows.is_empty() {
            self.run = 0;
            self.white_streak += 1;
            self.gap += self.step;
            self.step = 1 + self.white_streak * self.rules.telescope_percent / 100;
            if self.gap > self.rules.max_gap {
                return ExtensionState::Aborted;
            }
            ExtensionState::GapAccumulating
        } else {
            self.run += 1;
            self.gap = 0;
            self.white_streak = 0;
            self.step = 1;
            let mean = black_rows.iter().sum::<i32>().div_euclid(black_rows.len() as i32);
            self.center += (mean - self.center).signum();

            if self.run >= self.rules.min_run {
                self.edge = along;
                self.width = (self.width.0.min(self.center), self.width.1.max(self.center + 1));
                self.extended = true;
                ExtensionState::Committed
            } else {
                ExtensionState::Scanning
            }
        };

        if (along - self.edge) * self.dir > self.rules.bridge_gap {
            return ExtensionState::Aborted;
        }
        state
    }
}

/// Extend one end of `line`.
///
/// Returns the grown rect, or `None` when nothing was committed.
pub fn extend_end(
    probe: &dyn PixelProbe,
    line: &LineRect,
    end: LineEnd,
    rules: &ExtensionRules,
) -> Option<Rect> {
    let orientation = line.orientation();
    let mut tracker = Tracker::new(line, end, *rules);
    let mut along = tracker.first_sample();

    loop {
        let (x, y) = orientation.to_xy(along, tracker.center);
        if !probe.contains(x, y) {
            break;
        }
        let black_rows: Vec<i32> = tracker
            .band()
            .filter(|&across| {
                let (x, y) = orientation.to_xy(along, across);
                probe.is_black(x, y)
            })
            .collect();
        if tracker.observe(along, &black_rows) == ExtensionState::Aborted {
            break;
        }
        along = tracker.next_sample(along);
    }

    if !tracker.extended {
        return None;
    }
    let length = match end {
        LineEnd::Start => (tracker.edge, line.length_end()),
        LineEnd::End => (line.length_start(), tracker.edge + 1),
    };
    log::trace!(
        "extended {:?} {:?} at {:?} to {:?}",
        line.id(),
        line.rect(),
        end,
        length
    );
    Some(orientation.make_rect(length, tracker.width))
}

/// Extend both ends of `line`; `None` when neither end moved.
pub fn extend_line(probe: &dyn PixelProbe, line: &LineRect, rules: &ExtensionRules) -> Option<Rect> {
    let mut current = line.clone();
    let mut changed = false;
    for end in [LineEnd::End, LineEnd::Start] {
        if let Some(rect) = extend_end(probe, &current, end, rules) {
            current.set_rect(rect);
            changed = true;
        }
    }
    changed.then(|| current.rect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruling_core::{IdGenerator, Orientation, Pix, PixMut, PixelOp};

    fn rules() -> ExtensionRules {
        ExtensionRules::from(&LineFinderOptions::default())
    }

    fn page(rects: &[Rect]) -> Pix {
        let mut pm = PixMut::new(500, 300).unwrap();
        for r in rects {
            pm.render_rect(r, PixelOp::Set).unwrap();
        }
        pm.into()
    }

    fn line(rect: Rect) -> LineRect {
        LineRect::new(rect, Orientation::Horizontal, &mut IdGenerator::new())
    }

    #[test]
    fn test_telescoping_steps() {
        let line = line(Rect::new_unchecked(0, 10, 100, 13));
        let mut t = Tracker::new(&line, LineEnd::End, rules());
        let mut steps = Vec::new();
        for along in 100..106 {
            assert_eq!(t.observe(along, &[]), ExtensionState::GapAccumulating);
            steps.push(t.step);
        }
        assert_eq!(steps, vec![1, 1, 1, 2, 2, 2]);
        assert_eq!(t.gap, 8);
        // black resets the step and the gap
        assert_eq!(t.observe(106, &[11]), ExtensionState::Scanning);
        assert_eq!((t.step, t.gap), (1, 0));
    }

    #[test]
    fn test_commit_after_min_run() {
        let line = line(Rect::new_unchecked(0, 10, 100, 13));
        let mut t = Tracker::new(&line, LineEnd::End, rules());
        for along in 100..119 {
            assert_eq!(t.observe(along, &[11]), ExtensionState::Scanning);
        }
        assert_eq!(t.observe(119, &[11]), ExtensionState::Committed);
        assert_eq!(t.edge, 119);
        assert_eq!(t.observe(120, &[11]), ExtensionState::Committed);
    }

    #[test]
    fn test_gap_abort() {
        let line = line(Rect::new_unchecked(0, 10, 100, 13));
        let mut t = Tracker::new(&line, LineEnd::End, rules());
        let mut along = t.first_sample();
        let mut last = ExtensionState::Scanning;
        while last != ExtensionState::Aborted {
            last = t.observe(along, &[]);
            along = t.next_sample(along);
        }
        assert!(t.gap > 10);
        assert!(!t.extended);
    }

    #[test]
    fn test_extend_across_break() {
        let pix = page(&[
            Rect::new_unchecked(20, 100, 300, 103),
            Rect::new_unchecked(308, 100, 348, 103),
        ]);
        let l = line(Rect::new_unchecked(20, 100, 300, 103));
        assert_eq!(
            extend_end(&pix, &l, LineEnd::End, &rules()),
            Some(Rect::new_unchecked(20, 100, 348, 103))
        );
        assert_eq!(extend_end(&pix, &l, LineEnd::Start, &rules()), None);
        assert_eq!(
            extend_line(&pix, &l, &rules()),
            Some(Rect::new_unchecked(20, 100, 348, 103))
        );
    }

    #[test]
    fn test_extend_backward() {
        let pix = page(&[
            Rect::new_unchecked(40, 100, 80, 103),
            Rect::new_unchecked(86, 100, 300, 103),
        ]);
        let l = line(Rect::new_unchecked(86, 100, 300, 103));
        assert_eq!(
            extend_end(&pix, &l, LineEnd::Start, &rules()),
            Some(Rect::new_unchecked(40, 100, 300, 103))
        );
    }

    #[test]
    fn test_gap_too_wide() {
        let pix = page(&[
            Rect::new_unchecked(20, 100, 300, 103),
            Rect::new_unchecked(312, 100, 360, 103),
        ]);
        let l = line(Rect::new_unchecked(20, 100, 300, 103));
        assert_eq!(extend_end(&pix, &l, LineEnd::End, &rules()), None);
    }

    #[test]
    fn test_bridge_gap_limits_distance() {
        let pix = page(&[
            Rect::new_unchecked(20, 100, 300, 103),
            Rect::new_unchecked(308, 100, 348, 103),
        ]);
        let l = line(Rect::new_unchecked(20, 100, 300, 103));
        let short = ExtensionRules {
            bridge_gap: 15,
            ..rules()
        };
        assert_eq!(extend_end(&pix, &l, LineEnd::End, &short), None);
    }

    #[test]
    fn test_center_drifts_one_pixel_per_sample() {
        let pix = page(&[
            Rect::new_unchecked(20, 100, 300, 103),
            Rect::new_unchecked(300, 102, 348, 105),
        ]);
        let l = line(Rect::new_unchecked(20, 100, 300, 103));
        assert_eq!(
            extend_end(&pix, &l, LineEnd::End, &rules()),
            Some(Rect::new_unchecked(20, 100, 348, 104))
        );
    }

    #[test]
    fn test_stops_at_image_edge() {
        let pix = page(&[Rect::new_unchecked(450, 100, 500, 103)]);
        let l = line(Rect::new_unchecked(450, 100, 500, 103));
        assert_eq!(extend_end(&pix, &l, LineEnd::End, &rules()), None);
    }
}
