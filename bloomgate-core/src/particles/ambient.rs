use rand::Rng;

use super::generator::{AmbientParticle, generate_batch};

/// What a density change did to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Unchanged,
    /// Density dropped: the field was regenerated from id 0.
    Reset { count: usize },
    /// Density rose: only the difference was appended.
    Grew { added: usize },
}

/// Falling particles whose count tracks the journey density.
///
/// Existing particles are never touched on growth, so in-flight animations
/// keep their identity across re-renders.
#[derive(Debug, Clone, Default)]
pub struct AmbientField {
    particles: Vec<AmbientParticle>,
    next_id: u32,
}

impl AmbientField {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            particles: Vec::new(),
            next_id: 0,
        }
    }

    #[must_use]
    pub fn particles(&self) -> &[AmbientParticle] {
        &self.particles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Reconcile the field with a new target count.
    pub fn sync<R: Rng + ?Sized>(&mut self, target: usize, rng: &mut R) -> SyncOutcome {
        let current = self.particles.len();
        match target.cmp(&current) {
            std::cmp::Ordering::Less => {
                self.reset(target, rng);
                SyncOutcome::Reset { count: target }
            }
            std::cmp::Ordering::Equal => SyncOutcome::Unchanged,
            std::cmp::Ordering::Greater => {
                let added = target - current;
                let batch = generate_batch(added, self.next_id, rng);
                self.advance_counter(added);
                self.particles.extend(batch);
                SyncOutcome::Grew { added }
            }
        }
    }

    /// Discard every particle and regenerate `count` from id 0.
    pub fn reset<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        self.particles = generate_batch(count, 0, rng);
        self.next_id = 0;
        self.advance_counter(count);
    }

    fn advance_counter(&mut self, by: usize) {
        self.next_id = self
            .next_id
            .saturating_add(u32::try_from(by).unwrap_or(u32::MAX));
    }
}
