//! Procedural particles: the ambient fall and tap bursts.

pub mod ambient;
pub mod burst;
pub mod generator;

pub use ambient::{AmbientField, SyncOutcome};
pub use burst::{BurstField, BurstGroup, BurstId, BurstMember, BurstMembers};
pub use generator::{AmbientParticle, DepthLayer, EntryMode, ParticleShape, generate_batch};
