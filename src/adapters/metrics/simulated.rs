//! Simulated engagement telemetry.
//!
//! Stands in for a real analytics pull: the three horizons are drawn from a
//! `StdRng` seeded with the low 32 bits of the attempt id, so the same attempt
//! always yields the same metrics.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{AttemptRecord, OutcomeMetrics};
use crate::domain::ports::OutcomeMetricsSource;

#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedMetrics;

impl SimulatedMetrics {
    pub fn new() -> Self {
        Self
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn for_id(id: Uuid) -> OutcomeMetrics {
        let seed = u64::from(id.as_u128() as u32);
        let mut rng = StdRng::seed_from_u64(seed);
        OutcomeMetrics {
            short_term: rng.gen::<f64>(),
            medium_term: rng.gen::<f64>(),
            long_term: rng.gen::<f64>(),
        }
    }
}

#[async_trait]
impl OutcomeMetricsSource for SimulatedMetrics {
    async fn fetch(&self, attempt: &AttemptRecord) -> DomainResult<OutcomeMetrics> {
        Ok(Self::for_id(attempt.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_are_deterministic_per_id() {
        let id = Uuid::new_v4();
        assert_eq!(SimulatedMetrics::for_id(id), SimulatedMetrics::for_id(id));
    }

    #[test]
    fn test_metrics_in_unit_interval() {
        for _ in 0..50 {
            let metrics = SimulatedMetrics::for_id(Uuid::new_v4());
            for value in metrics.as_map().values() {
                assert!((0.0..1.0).contains(value));
            }
        }
    }

    #[test]
    fn test_only_low_bits_seed() {
        let low = Uuid::from_u128(0x1234_5678);
        let same_low = Uuid::from_u128((0xdead_beef_u128 << 64) | 0x1234_5678);
        assert_eq!(SimulatedMetrics::for_id(low), SimulatedMetrics::for_id(same_low));
    }
}
