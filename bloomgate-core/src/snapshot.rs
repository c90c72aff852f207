//! Serializable render boundary handed to the presentation shell.

use serde::{Deserialize, Serialize};

use crate::journey::{BloomHint, GateState, LoadingMessage, Phase, Scene};
use crate::particles::{AmbientParticle, BurstGroup, DepthLayer, ParticleShape};

/// Gate fields the shell needs; `pulsing` is folded into the scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateView {
    pub input: String,
    pub error: bool,
    pub success: bool,
}

impl From<&GateState> for GateView {
    fn from(gate: &GateState) -> Self {
        Self {
            input: gate.input.clone(),
            error: gate.error,
            success: gate.success,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbientView {
    pub id: u32,
    pub left_pct: f32,
    pub delay_s: f32,
    pub duration_s: f32,
    pub scale: f32,
    pub layer: DepthLayer,
    pub shape: ParticleShape,
}

impl From<&AmbientParticle> for AmbientView {
    fn from(particle: &AmbientParticle) -> Self {
        Self {
            id: particle.id,
            left_pct: particle.left_pct,
            delay_s: particle.delay_s,
            duration_s: particle.duration_s,
            scale: particle.scale,
            layer: particle.layer,
            shape: particle.shape(),
        }
    }
}

/// Everything needed to draw one frame of the experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub now_ms: u64,
    pub phase: Phase,
    pub scene: Scene,
    pub step: u8,
    pub total_stages: u8,
    pub bloom_stage: u8,
    pub progress: f32,
    pub show_envelope: bool,
    pub show_letter: bool,
    pub envelope_opening: bool,
    pub loading_message: LoadingMessage,
    pub gate: GateView,
    /// Romantic line for the current bloom step, if any.
    pub line: Option<String>,
    pub bloom_hint: BloomHint,
    pub bloom_clickable: bool,
    pub ambient: Vec<AmbientView>,
    pub bursts: Vec<BurstGroup>,
    pub torn_down: bool,
}

impl Snapshot {
    /// Serialize for hosts that take the snapshot as a JSON string.
    ///
    /// # Errors
    ///
    /// Returns the serializer error instead of an empty string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
