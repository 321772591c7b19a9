//! Point-in-time market state consumed by the decision pipeline.
//!
//! A `MarketState` is immutable once built: fields are private and there
//! are no setters. Variants for tests or replays are produced through
//! [`MarketState::to_builder`] with named overrides.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::shared::{Symbol, Timestamp};

/// Where a state came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Upstream source identifier (feed, scraper, replay file).
    pub source_id: String,
    /// Identifier of the scoring engine that produced the metrics.
    pub engine_id: String,
    /// When the metrics were observed.
    pub observed_at: Timestamp,
}

/// Structured narrative context produced by an upstream scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NarrativeContext {
    /// Rate of change of narrative intensity, conventionally in [0, 1].
    pub acceleration_score: f64,
    /// Count of forward-looking mentions.
    pub mentions_future: u32,
    /// Count of present-tense mentions.
    pub mentions_current: u32,
}

/// Optional market-capacity readings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketCapacity {
    /// Liquidity score in [0, 1]; higher is deeper.
    pub liquidity: Option<f64>,
    /// Volatility score in [0, 1]; higher is wilder.
    pub volatility: Option<f64>,
    /// Price responsiveness to flow in [0, 1].
    pub responsiveness: Option<f64>,
}

/// Optional latency-coupling fields, in engine seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyCoupling {
    /// Engine time at which the narrative signal was first recorded.
    pub ignition_time: Option<f64>,
    /// Current engine time.
    pub engine_time: Option<f64>,
    /// Fractional price displacement since ignition.
    pub price_delta: Option<f64>,
    /// Volume relative to baseline since ignition.
    pub volume_ratio: Option<f64>,
}

/// Immutable snapshot of one instrument's intention metrics and context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketState {
    symbol: Symbol,
    domain: String,
    narrative: Option<String>,
    narrative_context: Option<NarrativeContext>,
    intention: f64,
    coherence: f64,
    chaos: f64,
    fractal_levels: BTreeMap<String, f64>,
    provenance: Provenance,
    capacity: MarketCapacity,
    latency: LatencyCoupling,
}

impl MarketState {
    /// Start building a state for `symbol` in `domain`, observed at `observed_at`.
    #[must_use]
    pub fn builder(
        symbol: impl Into<Symbol>,
        domain: impl Into<String>,
        observed_at: Timestamp,
    ) -> MarketStateBuilder {
        MarketStateBuilder::new(symbol, domain, observed_at)
    }

    /// Copy this state into a builder for named overrides.
    #[must_use]
    pub fn to_builder(&self) -> MarketStateBuilder {
        MarketStateBuilder {
            state: self.clone(),
        }
    }

    /// Instrument symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Domain tag (sector/theme), lowercase.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Free-text narrative summary.
    #[must_use]
    pub fn narrative(&self) -> Option<&str> {
        self.narrative.as_deref()
    }

    /// Structured narrative context.
    #[must_use]
    pub const fn narrative_context(&self) -> Option<&NarrativeContext> {
        self.narrative_context.as_ref()
    }

    /// Narrative-intention strength.
    #[must_use]
    pub const fn intention(&self) -> f64 {
        self.intention
    }

    /// Narrative coherence.
    #[must_use]
    pub const fn coherence(&self) -> f64 {
        self.coherence
    }

    /// Chaos / instability.
    #[must_use]
    pub const fn chaos(&self) -> f64 {
        self.chaos
    }

    /// Structural breakdown by fractal level name.
    #[must_use]
    pub const fn fractal_levels(&self) -> &BTreeMap<String, f64> {
        &self.fractal_levels
    }

    /// Provenance record.
    #[must_use]
    pub const fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Observation instant.
    #[must_use]
    pub const fn observed_at(&self) -> Timestamp {
        self.provenance.observed_at
    }

    /// Market-capacity readings.
    #[must_use]
    pub const fn capacity(&self) -> &MarketCapacity {
        &self.capacity
    }

    /// Latency-coupling fields.
    #[must_use]
    pub const fn latency(&self) -> &LatencyCoupling {
        &self.latency
    }

    /// True when all three intention metrics are finite numbers in [0, 1].
    #[must_use]
    pub fn metrics_in_range(&self) -> bool {
        [self.intention, self.coherence, self.chaos]
            .iter()
            .all(|v| v.is_finite() && (0.0..=1.0).contains(v))
    }
}

/// Builder for [`MarketState`] with named overrides.
#[derive(Debug, Clone)]
pub struct MarketStateBuilder {
    state: MarketState,
}

impl MarketStateBuilder {
    /// Create a builder with neutral metrics (all zero) and no optional context.
    #[must_use]
    pub fn new(symbol: impl Into<Symbol>, domain: impl Into<String>, observed_at: Timestamp) -> Self {
        Self {
            state: MarketState {
                symbol: symbol.into(),
                domain: domain.into().trim().to_lowercase(),
                narrative: None,
                narrative_context: None,
                intention: 0.0,
                coherence: 0.0,
                chaos: 0.0,
                fractal_levels: BTreeMap::new(),
                provenance: Provenance {
                    source_id: "unknown".to_string(),
                    engine_id: "unknown".to_string(),
                    observed_at,
                },
                capacity: MarketCapacity::default(),
                latency: LatencyCoupling::default(),
            },
        }
    }

    /// Set all three intention metrics.
    #[must_use]
    pub fn with_metrics(mut self, intention: f64, coherence: f64, chaos: f64) -> Self {
        self.state.intention = intention;
        self.state.coherence = coherence;
        self.state.chaos = chaos;
        self
    }

    /// Override narrative-intention strength.
    #[must_use]
    pub fn with_intention(mut self, value: f64) -> Self {
        self.state.intention = value;
        self
    }

    /// Override coherence.
    #[must_use]
    pub fn with_coherence(mut self, value: f64) -> Self {
        self.state.coherence = value;
        self
    }

    /// Override chaos.
    #[must_use]
    pub fn with_chaos(mut self, value: f64) -> Self {
        self.state.chaos = value;
        self
    }

    /// Override the domain tag.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.state.domain = domain.into().trim().to_lowercase();
        self
    }

    /// Attach a narrative summary.
    #[must_use]
    pub fn with_narrative(mut self, narrative: impl Into<String>) -> Self {
        self.state.narrative = Some(narrative.into());
        self
    }

    /// Attach structured narrative context.
    #[must_use]
    pub fn with_narrative_context(mut self, context: NarrativeContext) -> Self {
        self.state.narrative_context = Some(context);
        self
    }

    /// Record one structural level.
    #[must_use]
    pub fn with_fractal_level(mut self, level: impl Into<String>, value: f64) -> Self {
        self.state.fractal_levels.insert(level.into(), value);
        self
    }

    /// Set provenance identifiers.
    #[must_use]
    pub fn with_source(mut self, source_id: impl Into<String>, engine_id: impl Into<String>) -> Self {
        self.state.provenance.source_id = source_id.into();
        self.state.provenance.engine_id = engine_id.into();
        self
    }

    /// Set the liquidity reading.
    #[must_use]
    pub fn with_liquidity(mut self, value: f64) -> Self {
        self.state.capacity.liquidity = Some(value);
        self
    }

    /// Set the volatility reading.
    #[must_use]
    pub fn with_volatility(mut self, value: f64) -> Self {
        self.state.capacity.volatility = Some(value);
        self
    }

    /// Set the responsiveness reading.
    #[must_use]
    pub fn with_responsiveness(mut self, value: f64) -> Self {
        self.state.capacity.responsiveness = Some(value);
        self
    }

    /// Record the ignition engine time.
    #[must_use]
    pub fn with_ignition_time(mut self, seconds: f64) -> Self {
        self.state.latency.ignition_time = Some(seconds);
        self
    }

    /// Record the current engine time.
    #[must_use]
    pub fn with_engine_time(mut self, seconds: f64) -> Self {
        self.state.latency.engine_time = Some(seconds);
        self
    }

    /// Record price displacement since ignition.
    #[must_use]
    pub fn with_price_delta(mut self, delta: f64) -> Self {
        self.state.latency.price_delta = Some(delta);
        self
    }

    /// Record volume ratio since ignition.
    #[must_use]
    pub fn with_volume_ratio(mut self, ratio: f64) -> Self {
        self.state.latency.volume_ratio = Some(ratio);
        self
    }

    /// Replace all latency-coupling fields at once.
    #[must_use]
    pub fn with_latency(mut self, latency: LatencyCoupling) -> Self {
        self.state.latency = latency;
        self
    }

    /// Finish building.
    ///
    /// Never fails. Readings are stored as given, including non-finite and
    /// out-of-range values; rules abstain on them and
    /// [`MarketState::metrics_in_range`] reports them.
    #[must_use]
    pub fn build(self) -> MarketState {
        self.state
    }
}
