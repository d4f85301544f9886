//! Timing oracle prober.
//!
//! Demonstrates the methodology of a timing attack against a comparison
//! function running in the same process. Each candidate is timed once by
//! default; real network attacks need repeated sampling and outlier
//! rejection, which this prober only approximates through `samples`
//! (median of N calls).

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use crate::config::TimingConfig;
use crate::errors::CrackError;
use crate::wordlist::Charset;

#[derive(Debug, Clone, Serialize)]
pub struct PositionTiming {
    pub accepted: char,
    pub slowest: Duration,
    pub fastest: Duration,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub discovered: String,
    pub positions: Vec<PositionTiming>,
    /// True when a position showed no usable timing signal.
    pub stopped_early: bool,
}

pub struct TimingProbe {
    charset: Charset,
    max_length: usize,
    threshold: f64,
    samples: usize,
}

impl TimingProbe {
    pub fn new(charset: Charset, max_length: usize) -> Self {
        Self { charset, max_length, threshold: 0.10, samples: 1 }
    }

    pub fn from_config(config: &TimingConfig) -> Result<Self, CrackError> {
        Ok(Self::new(Charset::new(&config.charset)?, config.max_length)
            .with_threshold(config.threshold)
            .with_samples(config.samples))
    }

    /// Minimum relative gap between slowest and fastest candidate.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples.max(1);
        self
    }

    fn measure<F>(&self, compare: &mut F, candidate: &str, target: &str) -> Duration
    where
        F: FnMut(&str, &str) -> bool,
    {
        let mut timings: Vec<Duration> = (0..self.samples)
            .map(|_| {
                let start = Instant::now();
                let _ = compare(candidate, target);
                start.elapsed()
            })
            .collect();
        timings.sort();
        timings[timings.len() / 2]
    }

    /// Grow the secret one character at a time, keeping the character whose
    /// comparison took longest as long as it stands out from the fastest.
    pub fn run<F>(&self, mut compare: F, target: &str) -> ProbeReport
    where
        F: FnMut(&str, &str) -> bool,
    {
        let mut discovered = String::new();
        let mut positions = Vec::new();
        let mut stopped_early = false;

        for position in 0..self.max_length {
            let mut timings: Vec<(char, Duration)> = self
                .charset
                .chars()
                .iter()
                .map(|&c| {
                    let candidate = format!("{}{}", discovered, c);
                    (c, self.measure(&mut compare, &candidate, target))
                })
                .collect();
            // Stable sort: equal durations keep charset order
            timings.sort_by(|a, b| b.1.cmp(&a.1));

            let (Some(&(best, slowest)), Some(&(_, fastest))) = (timings.first(), timings.last()) else {
                break;
            };

            if slowest > fastest.mul_f64(1.0 + self.threshold) {
                discovered.push(best);
                positions.push(PositionTiming { accepted: best, slowest, fastest });
                info!(position, progress = %discovered, "Timing probe accepted character");
            } else {
                debug!(position, ?slowest, ?fastest, "No timing signal, stopping");
                stopped_early = true;
                break;
            }
        }

        ProbeReport { discovered, positions, stopped_early }
    }
}

/// Best-effort prefix of `target` inferred from how long `compare` takes.
pub fn probe<F>(compare: F, target: &str, charset: &Charset, max_length: usize) -> String
where
    F: FnMut(&str, &str) -> bool,
{
    TimingProbe::new(charset.clone(), max_length).run(compare, target).discovered
}
