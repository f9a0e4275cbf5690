use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::foundation::error::{GlissadeError, GlissadeResult};

/// Declarative numeric counter ramp from zero to `end_value`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CounterSpec {
    /// Final displayed value.
    pub end_value: f64,
    /// Ramp duration in milliseconds.
    pub duration_ms: f64,
    /// Unit label rendered next to the number by the view layer.
    #[serde(default)]
    pub unit: Option<String>,
}

impl CounterSpec {
    /// Counter reaching `end_value` over `duration_ms`.
    pub fn new(end_value: f64, duration_ms: f64) -> Self {
        Self {
            end_value,
            duration_ms,
            unit: None,
        }
    }

    /// Same spec with a unit label.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Validate static invariants.
    pub fn validate(&self) -> GlissadeResult<()> {
        if !self.end_value.is_finite() || self.end_value < 0.0 {
            return Err(GlissadeError::animation(
                "counter end value must be finite and >= 0",
            ));
        }
        if !(self.duration_ms > 0.0) {
            return Err(GlissadeError::animation("counter duration must be > 0"));
        }
        Ok(())
    }

    /// Format `value` with this counter's derived precision: one decimal
    /// place when the end value is below 10, whole integer otherwise.
    pub fn format(&self, value: f64) -> String {
        if self.end_value < 10.0 {
            format!("{value:.1}")
        } else {
            format!("{}", value.round() as i64)
        }
    }
}

/// One emitted counter sample.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterFrame {
    /// Numeric value for this frame.
    pub value: f64,
    /// Value formatted per the spec's precision rule.
    pub text: String,
}

/// Callback receiving counter samples; the view layer renders `text`.
pub type CounterSink = Rc<RefCell<dyn FnMut(&CounterFrame)>>;

/// Handle to one running counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CounterId(u64);

struct CounterRun {
    spec: CounterSpec,
    sink: CounterSink,
    frame: u64,
    total_frames: u64,
    increment: f64,
}

/// Frame-stepped counter sub-engine.
///
/// The frame budget is fixed when a counter starts, from the measured
/// rendering cadence: `total_frames = duration / frame_interval`. Each tick
/// advances one frame and emits `min(ceil(frame × increment), end)`, a
/// linear ramp that never overshoots and converges within the budget even
/// under frame-rate jitter. The terminal frame emits exactly `end_value`
/// once; nothing is emitted after.
#[derive(Default)]
pub struct CounterEngine {
    runs: BTreeMap<CounterId, CounterRun>,
    next: u64,
}

impl CounterEngine {
    /// Empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a counter; emits the formatted zero sample immediately.
    pub fn start(
        &mut self,
        spec: &CounterSpec,
        frame_interval_ms: f64,
        sink: CounterSink,
    ) -> GlissadeResult<CounterId> {
        spec.validate()?;
        if !(frame_interval_ms > 0.0) {
            return Err(GlissadeError::animation("frame interval must be > 0"));
        }
        let total_frames = (spec.duration_ms / frame_interval_ms).round().max(1.0) as u64;
        let increment = spec.end_value / total_frames as f64;
        let id = CounterId(self.next);
        self.next += 1;
        tracing::debug!(counter = id.0, total_frames, "counter start");

        (&mut *sink.borrow_mut())(&CounterFrame {
            value: 0.0,
            text: spec.format(0.0),
        });
        self.runs.insert(
            id,
            CounterRun {
                spec: spec.clone(),
                sink,
                frame: 0,
                total_frames,
                increment,
            },
        );
        Ok(id)
    }

    /// Stop a counter; no further samples are emitted.
    pub fn cancel(&mut self, id: CounterId) {
        self.runs.remove(&id);
    }

    /// Whether a counter is still running.
    pub fn is_active(&self, id: CounterId) -> bool {
        self.runs.contains_key(&id)
    }

    /// Number of running counters.
    pub fn active_count(&self) -> usize {
        self.runs.len()
    }

    /// Advance every counter by one frame.
    pub fn tick(&mut self) {
        let mut done: Vec<CounterId> = Vec::new();
        for (&id, run) in &mut self.runs {
            run.frame += 1;
            if run.frame >= run.total_frames {
                (&mut *run.sink.borrow_mut())(&CounterFrame {
                    value: run.spec.end_value,
                    text: run.spec.format(run.spec.end_value),
                });
                done.push(id);
                continue;
            }
            let value = (run.frame as f64 * run.increment).ceil().min(run.spec.end_value);
            (&mut *run.sink.borrow_mut())(&CounterFrame {
                value,
                text: run.spec.format(value),
            });
        }
        for id in done {
            self.runs.remove(&id);
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/counter.rs"]
mod tests;
