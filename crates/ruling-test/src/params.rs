//! Numbered checks for regression tests

use ruling_core::{LineRect, Pix, Rect};

/// Bookkeeping for one `*_reg` test
///
/// Every comparison bumps the check number and returns whether it held.
/// Nothing panics here: failures are collected and the test asserts on
/// [`RegParams::cleanup`].
pub struct RegParams {
    /// Short name, printed as `<name>_reg`
    pub test_name: String,
    index: usize,
    failures: Vec<String>,
}

impl RegParams {
    /// Start a test run and install test logging.
    pub fn new(test_name: &str) -> Self {
        crate::init_logging();
        eprintln!("\n==== {test_name}_reg ====");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            failures: Vec::new(),
        }
    }

    /// Number of the last check
    pub fn index(&self) -> usize {
        self.index
    }

    /// Advance the check number and record `detail` unless `ok`.
    fn record(&mut self, ok: bool, detail: impl FnOnce() -> String) -> bool {
        self.index += 1;
        if !ok {
            let msg = format!("{}_reg #{}: {}", self.test_name, self.index, detail());
            eprintln!("{msg}");
            self.failures.push(msg);
        }
        ok
    }

    /// `actual` must be within `delta` of `expected`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        let diff = (expected - actual).abs();
        self.record(diff <= delta, || {
            format!("got {actual}, want {expected} (diff {diff} > {delta})")
        })
    }

    /// Same length, and every edge of every rect within `delta`.
    pub fn compare_rects(&mut self, expected: &[Rect], actual: &[Rect], delta: i32) -> bool {
        let mismatch = if expected.len() != actual.len() {
            Some(format!(
                "{} rects, want {}\n  got  {actual:?}\n  want {expected:?}",
                actual.len(),
                expected.len()
            ))
        } else {
            expected
                .iter()
                .zip(actual)
                .enumerate()
                .map(|(i, (e, a))| (i, e, a, edge_distance(e, a)))
                .find(|&(.., off)| off > delta)
                .map(|(i, e, a, off)| format!("rect {i} is {a:?}, want {e:?} (off by {off})"))
        };
        self.record(mismatch.is_none(), || mismatch.unwrap_or_default())
    }

    /// [`compare_rects`](Self::compare_rects) on the rects of `actual`.
    pub fn compare_lines(&mut self, expected: &[Rect], actual: &[LineRect], delta: i32) -> bool {
        let rects: Vec<Rect> = actual.iter().map(LineRect::rect).collect();
        self.compare_rects(expected, &rects, delta)
    }

    /// Pixel-exact page comparison.
    pub fn compare_pix(&mut self, expected: &Pix, actual: &Pix) -> bool {
        let mismatch = if (expected.width(), expected.height()) != (actual.width(), actual.height()) {
            Some(format!(
                "page is {}x{}, want {}x{}",
                actual.width(),
                actual.height(),
                expected.width(),
                expected.height()
            ))
        } else {
            (0..expected.height())
                .find(|&y| expected.row_data(y) != actual.row_data(y))
                .map(|y| format!("pages differ in row {y}"))
        };
        self.record(mismatch.is_none(), || mismatch.unwrap_or_default())
    }

    /// A named boolean check.
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.record(condition, || format!("failed: {what}"))
    }

    /// Print the summary; `true` when every check held.
    pub fn cleanup(self) -> bool {
        let passed = self.is_success();
        if passed {
            eprintln!("{}_reg: {} checks passed\n", self.test_name, self.index);
        } else {
            eprintln!(
                "{}_reg: {} of {} checks failed",
                self.test_name,
                self.failures.len(),
                self.index
            );
            for failure in &self.failures {
                eprintln!("  {failure}");
            }
            eprintln!();
        }
        passed
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

/// Largest difference between matching edges
fn edge_distance(a: &Rect, b: &Rect) -> i32 {
    [
        a.left - b.left,
        a.top - b.top,
        a.right - b.right,
        a.bottom - b.bottom,
    ]
    .into_iter()
    .map(i32::abs)
    .max()
    .unwrap_or(0)
}
