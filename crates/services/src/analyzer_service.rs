use std::env;
use std::sync::Mutex;
use std::time::Duration;

use cybersafe_core::analyzer::{
    AnalysisResult, IncrementSource, MAX_INCREMENT, MIN_INCREMENT, RiskBand, analyze,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Default pause before local results are shown.
pub const DEFAULT_THINKING_DELAY: Duration = Duration::from_millis(1500);

/// Random per-hit increments in `[5, 10)`.
#[derive(Debug, Clone)]
pub struct RandomIncrements<R = StdRng> {
    rng: R,
}

impl RandomIncrements<StdRng> {
    /// Seeded from the thread-local generator; scores are not reproducible.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible sequence for tests.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> IncrementSource for RandomIncrements<R> {
    fn next_increment(&mut self) -> f64 {
        self.rng.random_range(MIN_INCREMENT..MAX_INCREMENT)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Cosmetic delay between "Analyzing..." and the results.
    pub thinking_delay: Duration,
}

impl AnalyzerConfig {
    /// Reads `CYBERSAFE_THINKING_MS`, falling back to 1.5 s.
    #[must_use]
    pub fn from_env() -> Self {
        let thinking_delay = env::var("CYBERSAFE_THINKING_MS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map_or(DEFAULT_THINKING_DELAY, Duration::from_millis);
        Self { thinking_delay }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            thinking_delay: DEFAULT_THINKING_DELAY,
        }
    }
}

/// Scores plus the presentation derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub band: RiskBand,
    pub recommendations: Vec<&'static str>,
}

impl AnalysisReport {
    #[must_use]
    pub fn from_result(result: AnalysisResult) -> Self {
        Self {
            band: result.risk_band(),
            recommendations: result.recommendations(),
            result,
        }
    }

    #[must_use]
    pub fn advisory(&self) -> &'static str {
        self.band.advisory()
    }
}

type SharedSource = Box<dyn IncrementSource + Send>;

/// Local keyword analyzer with an injected increment source.
pub struct AnalyzerService {
    increments: Mutex<SharedSource>,
    config: AnalyzerConfig,
}

impl AnalyzerService {
    #[must_use]
    pub fn new(increments: impl IncrementSource + Send + 'static, config: AnalyzerConfig) -> Self {
        Self {
            increments: Mutex::new(Box::new(increments)),
            config,
        }
    }

    /// Production analyzer: random increments, configured delay.
    #[must_use]
    pub fn randomized(config: AnalyzerConfig) -> Self {
        Self::new(RandomIncrements::from_entropy(), config)
    }

    #[must_use]
    pub fn thinking_delay(&self) -> Duration {
        self.config.thinking_delay
    }

    /// Score `text`. Blank input is ignored and yields `None`.
    #[must_use]
    pub fn analyze(&self, text: &str) -> Option<AnalysisReport> {
        if text.trim().is_empty() {
            debug!("Ignoring blank analyzer input.");
            return None;
        }

        let result = match self.increments.lock() {
            Ok(mut source) => analyze(text, &mut *source),
            // A poisoned source still holds a usable generator.
            Err(poisoned) => analyze(text, &mut *poisoned.into_inner()),
        };
        let report = AnalysisReport::from_result(result);
        info!(
            chars = text.chars().count(),
            overall = report.result.overall_score,
            band = ?report.band,
            "Local analysis complete."
        );
        Some(report)
    }
}
