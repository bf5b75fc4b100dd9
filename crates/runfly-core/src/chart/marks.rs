// ── Mark derivation and hit-testing ──

use std::num::FpCategory;

use crate::model::{RunId, RunRecord};

use super::scale::{LinearScale, TimeScale};
use super::{X_RANGE, Y_RANGE};

/// One plotted run: identity plus projected surface position.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub run_id: RunId,
    /// Index into the dataset this model was derived from.
    pub run_index: usize,
    pub cx: f64,
    pub cy: f64,
}

/// Everything a renderer needs for one chart frame: both scales and
/// the filtered mark sequence. Derived whole from `(runs, metric)` on
/// every input change, never patched incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub metric: String,
    pub x_scale: Option<TimeScale>,
    pub y_scale: Option<LinearScale>,
    pub marks: Vec<Mark>,
}

/// Zero and NaN are treated as absent, exactly like missing values.
/// A legitimately-zero metric therefore never plots; see the matching
/// test before relying on that.
fn plottable(value: f64) -> bool {
    !matches!(value.classify(), FpCategory::Zero | FpCategory::Nan)
}

impl ChartModel {
    pub fn derive(runs: &[RunRecord], metric: &str) -> Self {
        let x_scale = TimeScale::fit(runs.iter().map(|r| r.date_created), X_RANGE);
        // The y domain fits over every resolvable value — zeroes
        // included — even though zero-valued records are not plotted.
        let y_scale = LinearScale::fit_padded(
            runs.iter().filter_map(|r| r.metric_value(metric)),
            Y_RANGE,
        );

        let marks = match (&x_scale, &y_scale) {
            (Some(x), Some(y)) => runs
                .iter()
                .enumerate()
                .filter_map(|(run_index, run)| {
                    let value = run.metric_value(metric).filter(|v| plottable(*v))?;
                    Some(Mark {
                        run_id: run.id.clone(),
                        run_index,
                        cx: x.project(run.date_created),
                        cy: y.project(value),
                    })
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            metric: metric.to_owned(),
            x_scale,
            y_scale,
            marks,
        }
    }

    /// True when there is nothing to plot — the renderer shows its
    /// "data not available" notice instead of axes and marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Topmost mark within `radius` of a surface point. Later marks
    /// draw over earlier ones, so the search runs back to front.
    pub fn hit_test(&self, x: f64, y: f64, radius: f64) -> Option<&Mark> {
        self.marks.iter().rev().find(|m| {
            let dx = m.cx - x;
            let dy = m.cy - y;
            dx.mul_add(dx, dy * dy) <= radius * radius
        })
    }
}
