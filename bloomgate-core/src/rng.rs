//! Deterministic random streams for the particle systems.

use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sha2::Sha256;

/// Independent RNG streams so ambient regeneration never perturbs burst shapes.
#[derive(Debug, Clone)]
pub struct RngBundle {
    ambient: CountingRng<SmallRng>,
    burst: CountingRng<SmallRng>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            ambient: CountingRng::new(derive_stream_seed(seed, b"ambient")),
            burst: CountingRng::new(derive_stream_seed(seed, b"burst")),
        }
    }

    /// Access the ambient particle stream.
    pub const fn ambient(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.ambient
    }

    /// Access the burst particle stream.
    pub const fn burst(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.burst
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: rand::RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: rand::RngCore> rand::RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0_u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn streams_are_domain_separated() {
        assert_ne!(
            derive_stream_seed(7, b"ambient"),
            derive_stream_seed(7, b"burst")
        );
        assert_ne!(
            derive_stream_seed(7, b"ambient"),
            derive_stream_seed(8, b"ambient")
        );
    }

    #[test]
    fn bundle_is_reproducible_and_counts_draws() {
        let mut a = RngBundle::from_user_seed(42);
        let mut b = RngBundle::from_user_seed(42);
        let xa: f32 = a.ambient().r#gen();
        let xb: f32 = b.ambient().r#gen();
        assert!((xa - xb).abs() < f32::EPSILON);
        assert_eq!(a.ambient().draws(), 1);
        assert_eq!(a.burst().draws(), 0);
    }
}
