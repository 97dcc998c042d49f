//! Token and cost accounting across turns.

use docchat_core::TokenUsage;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Default price in USD per 1,000 tokens.
pub const DEFAULT_COST_PER_THOUSAND_TOKENS: f64 = 0.002;

#[derive(Debug, Error, PartialEq)]
#[error("cost per thousand tokens must be a finite, non-negative number (got {0})")]
pub struct InvalidCostRate(pub f64);

/// Flat price per 1,000 tokens, prompt and completion alike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostRate(f64);

impl CostRate {
    pub fn per_thousand(rate: f64) -> Result<Self, InvalidCostRate> {
        if rate.is_finite() && rate >= 0.0 {
            Ok(Self(rate))
        } else {
            Err(InvalidCostRate(rate))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// `(total_tokens / 1000) * rate`
    pub fn cost_for(&self, total_tokens: u64) -> f64 {
        (total_tokens as f64 / 1000.0) * self.0
    }
}

impl Default for CostRate {
    fn default() -> Self {
        Self(DEFAULT_COST_PER_THOUSAND_TOKENS)
    }
}

/// Usage and cost of one completed turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct UsageRecord {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    pub cost: f64,
}

/// Running totals for the session. Never decreases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SessionUsage {
    pub total_tokens: u64,
    pub total_cost: f64,
    pub turns: u64,
}

#[derive(Debug, Clone, Default)]
pub struct UsageAccountant {
    rate: CostRate,
    latest: Option<UsageRecord>,
    session: SessionUsage,
}

impl UsageAccountant {
    pub fn new(rate: CostRate) -> Self {
        Self {
            rate,
            latest: None,
            session: SessionUsage::default(),
        }
    }

    /// Price one turn's usage, keep it as the latest record, and add it to the
    /// session totals.
    ///
    /// The record's total is always `prompt + completion`; a disagreeing total
    /// from the provider is logged and ignored.
    pub fn record(&mut self, usage: &TokenUsage) -> UsageRecord {
        let total_tokens = usage.prompt_tokens + usage.completion_tokens;
        if usage.total_tokens != total_tokens {
            warn!(
                reported = usage.total_tokens,
                computed = total_tokens,
                "Provider total_tokens disagrees with prompt + completion"
            );
        }

        let record = UsageRecord {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens,
            cost: self.rate.cost_for(total_tokens),
        };

        self.session.total_tokens += record.total_tokens;
        self.session.total_cost += record.cost;
        self.session.turns += 1;
        self.latest = Some(record);
        record
    }

    pub fn latest(&self) -> Option<&UsageRecord> {
        self.latest.as_ref()
    }

    pub fn session(&self) -> &SessionUsage {
        &self.session
    }

    pub fn rate(&self) -> CostRate {
        self.rate
    }
}
