//! Frame-time and lag statistics.

use crate::Tick;

/// Number of presented frames discarded before sampling starts.
pub const WARMUP_FRAMES: u64 = 3;

/// Mean and population standard deviation of a sample set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStats {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation (divides by `count`).
    pub std_dev: f64,
    /// Largest sample.
    pub max: Tick,
}

impl SampleStats {
    /// Summarize `samples`, or `None` if there are none.
    pub fn from_samples(samples: &[Tick]) -> Option<Self> {
        let max = *samples.iter().max()?;
        let n = samples.len() as f64;

        let sum: Tick = samples.iter().sum();
        let mean = sum as f64 / n;
        let variance = samples
            .iter()
            .map(|&s| {
                let d = s as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;

        Some(Self {
            count: samples.len(),
            mean,
            std_dev: variance.sqrt(),
            max,
        })
    }
}

/// Collects per-frame samples once the warm-up period is over.
#[derive(Debug, Clone, Default)]
pub struct StatsCollector {
    frame_times: Vec<Tick>,
    lags: Vec<Tick>,
}

impl StatsCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one presented frame.
    pub fn record(&mut self, frame_time: Tick, lag: Tick) {
        self.frame_times.push(frame_time);
        self.lags.push(lag);
    }

    /// Recorded frame times (ticks between CPU submissions).
    pub fn frame_times(&self) -> &[Tick] {
        &self.frame_times
    }

    /// Recorded lags (presentation tick minus CPU start tick).
    pub fn lags(&self) -> &[Tick] {
        &self.lags
    }

    /// Statistics of the recorded frame times.
    pub fn frame_time_stats(&self) -> Option<SampleStats> {
        SampleStats::from_samples(&self.frame_times)
    }

    /// Statistics of the recorded lags.
    pub fn lag_stats(&self) -> Option<SampleStats> {
        SampleStats::from_samples(&self.lags)
    }
}

/// End-of-run summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Vblanks that presented a new frame.
    pub hits: u64,
    /// Vblanks that kept the previous frame on screen.
    pub misses: u64,
    /// Frame-time statistics over sampled frames.
    pub frame_time: Option<SampleStats>,
    /// Lag statistics over sampled frames.
    pub lag: Option<SampleStats>,
}

impl Summary {
    /// Average frames per second, treating one tick as one millisecond.
    pub fn avg_fps(&self) -> Option<f64> {
        self.frame_time.map(|stats| 1000.0 / stats.mean)
    }

    /// Worst sampled lag, 0 when nothing was sampled.
    pub fn worst_lag(&self) -> Tick {
        self.lag.map_or(0, |stats| stats.max)
    }
}
