use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct SimulationProfile {
    pub latency_min: Duration,
    pub latency_max: Duration,
    /// Per-call failure probability is drawn uniformly from this band.
    pub failure_rate_min: f64,
    pub failure_rate_max: f64,
    /// Fixed seed for reproducible delay/failure sequences.
    pub seed: Option<u64>,
}

impl Default for SimulationProfile {
    fn default() -> Self {
        Self {
            latency_min: Duration::from_millis(200),
            latency_max: Duration::from_millis(1200),
            failure_rate_min: 0.05,
            failure_rate_max: 0.10,
            seed: None,
        }
    }
}

/// Strategy behind the write gate; injectable so tests can pin delays and
/// failure outcomes.
pub trait FaultSource: Send + Sync {
    fn next_delay(&self) -> Duration;
    fn should_fail(&self) -> bool;
}

pub struct RandomFaults {
    profile: SimulationProfile,
    rng: Mutex<StdRng>,
}

impl RandomFaults {
    pub fn new(profile: SimulationProfile) -> Self {
        let rng = match profile.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            profile,
            rng: Mutex::new(rng),
        }
    }
}

impl FaultSource for RandomFaults {
    fn next_delay(&self) -> Duration {
        let min = self.profile.latency_min;
        let max = self.profile.latency_max;
        if min >= max {
            return min;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        Duration::from_millis(rng.gen_range(min.as_millis() as u64..=max.as_millis() as u64))
    }

    fn should_fail(&self) -> bool {
        if self.profile.failure_rate_max <= 0.0 {
            return false;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let band = self.profile.failure_rate_max - self.profile.failure_rate_min;
        let rate = self.profile.failure_rate_min + rng.gen::<f64>() * band;
        rng.gen::<f64>() < rate
    }
}

/// Zero delay, no failures. Used by tests and the seed path.
pub struct NoFaults;

impl FaultSource for NoFaults {
    fn next_delay(&self) -> Duration {
        Duration::ZERO
    }

    fn should_fail(&self) -> bool {
        false
    }
}

/// Emulates the latency and unreliability of a remote service in front of
/// the local store.
#[derive(Clone)]
pub struct NetworkSimulation {
    source: Arc<dyn FaultSource>,
}

impl NetworkSimulation {
    pub fn new(profile: SimulationProfile) -> Self {
        Self {
            source: Arc::new(RandomFaults::new(profile)),
        }
    }

    pub fn disabled() -> Self {
        Self {
            source: Arc::new(NoFaults),
        }
    }

    pub fn with_source(source: Arc<dyn FaultSource>) -> Self {
        Self { source }
    }

    /// Awaited by every create/update/delete before it touches the store:
    /// suspends for the simulated round-trip, then independently decides
    /// whether to abort with a retryable error. Reads are not gated. The
    /// layer never retries on the caller's behalf.
    pub async fn write_gate(&self) -> Result<()> {
        let delay = self.source.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.source.should_fail() {
            return Err(Error::TransientNetwork);
        }
        Ok(())
    }
}
