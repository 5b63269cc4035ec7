//! Progress reporting for long sampling loops.
//!
//! [`Progress`] counts the steps of a loop of known length and times them
//! with a [`StepTimer`] (last step and exponential moving average). With the
//! `progress` feature an `indicatif` bar shows both; without it they go to
//! `tracing::debug!` every thousand steps and at the end.
use std::time::{Duration, Instant};

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

/// Duration of the last step and its moving average, `avg ← α·dt + (1 − α)·avg`.
#[derive(Debug, Clone)]
pub struct StepTimer {
    started: Instant,
    smoothing: f64,
    average: Option<Duration>,
}

impl StepTimer {
    pub fn new(smoothing: f64) -> Self {
        StepTimer {
            started: Instant::now(),
            smoothing: smoothing.clamp(f64::EPSILON, 1.0),
            average: None,
        }
    }

    /// Close the current step and start the next one.
    pub fn tick(&mut self) -> Duration {
        let step = self.started.elapsed();
        self.started = Instant::now();
        self.average = Some(match self.average {
            None => step,
            Some(avg) => avg.mul_f64(1.0 - self.smoothing) + step.mul_f64(self.smoothing),
        });
        step
    }

    /// Zero until the first tick.
    pub fn average(&self) -> Duration {
        self.average.unwrap_or_default()
    }
}

/// Whole µs or ms below a second, seconds with two decimals above.
pub fn short_duration(d: Duration) -> String {
    match d.as_micros() {
        us @ 0..=999 => format!("{us}µs"),
        1_000..=999_999 => format!("{}ms", d.as_millis()),
        _ => format!("{:.2}s", d.as_secs_f64()),
    }
}

/// Number of steps between two log lines when no bar is drawn.
#[cfg(not(feature = "progress"))]
const LOG_EVERY: u64 = 1_000;

/// Step counter for a loop of known length.
pub struct Progress {
    label: &'static str,
    total: u64,
    done: u64,
    timer: StepTimer,
    #[cfg(feature = "progress")]
    bar: ProgressBar,
}

impl Progress {
    pub fn new(label: &'static str, total: u64) -> Self {
        #[cfg(feature = "progress")]
        let bar = {
            let bar = ProgressBar::new(total.max(1));
            bar.set_style(
                ProgressStyle::with_template(
                    "{bar:40.cyan/blue} {pos}/{len} ({percent:>3}%) \
                 | {per_sec} | ETA {eta_precise} | {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar.enable_steady_tick(Duration::from_millis(200));
            bar
        };

        Progress {
            label,
            total,
            done: 0,
            timer: StepTimer::new(0.2),
            #[cfg(feature = "progress")]
            bar,
        }
    }

    /// Record one finished step.
    pub fn inc(&mut self) {
        let last = self.timer.tick();
        let avg = self.timer.average();
        self.done += 1;

        #[cfg(feature = "progress")]
        {
            self.bar.set_message(format!(
                "{}: last {}, avg {}",
                self.label,
                short_duration(last),
                short_duration(avg)
            ));
            self.bar.inc(1);
        }

        #[cfg(not(feature = "progress"))]
        {
            if self.done % LOG_EVERY == 0 || self.done == self.total {
                tracing::debug!(
                    label = self.label,
                    done = self.done,
                    total = self.total,
                    last = %short_duration(last),
                    avg = %short_duration(avg),
                    "progress"
                );
            }
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn done(&self) -> u64 {
        self.done
    }

    pub fn finish(self) {
        #[cfg(feature = "progress")]
        {
            self.bar.disable_steady_tick();
            self.bar.finish_and_clear();
        }
        tracing::debug!(label = self.label, steps = self.done, "finished");
    }
}

#[cfg(test)]
mod progress_bar_test {
    use super::*;

    #[test]
    fn test_short_duration() {
        assert_eq!(short_duration(Duration::from_micros(253)), "253µs");
        assert_eq!(short_duration(Duration::from_millis(42)), "42ms");
        assert_eq!(short_duration(Duration::from_millis(3140)), "3.14s");
    }

    #[test]
    fn test_step_timer_average() {
        let mut timer = StepTimer::new(0.5);
        assert_eq!(timer.average(), Duration::ZERO);
        let first = timer.tick();
        assert_eq!(timer.average(), first);
        let second = timer.tick();
        let expected = first.mul_f64(0.5) + second.mul_f64(0.5);
        assert_eq!(timer.average(), expected);
    }

    #[test]
    fn test_progress_counts() {
        let mut progress = Progress::new("test", 3);
        for _ in 0..3 {
            progress.inc();
        }
        assert_eq!(progress.done(), 3);
        progress.finish();
    }
}
