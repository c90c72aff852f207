use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    ENTRY_DELAY_SPAN, FAR_DURATION_BASE, FAR_DURATION_SPREAD, FAR_SCALE, IN_FLIGHT_DELAY_SPAN,
    LAYER_FAR_THRESHOLD, LAYER_NEAR_THRESHOLD, MID_DURATION_BASE, MID_DURATION_SPREAD, MID_SCALE,
    NEAR_DURATION_BASE, NEAR_DURATION_SPREAD, NEAR_SCALE,
};

/// Parallax layer an ambient particle falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthLayer {
    Far,
    Mid,
    Near,
}

impl DepthLayer {
    /// Weighted split of a uniform draw: 30% far, 40% mid, 30% near.
    #[must_use]
    pub fn from_draw(draw: f32) -> Self {
        if draw < LAYER_FAR_THRESHOLD {
            Self::Far
        } else if draw > LAYER_NEAR_THRESHOLD {
            Self::Near
        } else {
            Self::Mid
        }
    }

    #[must_use]
    pub const fn scale(self) -> f32 {
        match self {
            Self::Far => FAR_SCALE,
            Self::Mid => MID_SCALE,
            Self::Near => NEAR_SCALE,
        }
    }

    /// Fall duration band as `(base, spread)` seconds.
    #[must_use]
    pub const fn duration_band(self) -> (f32, f32) {
        match self {
            Self::Far => (FAR_DURATION_BASE, FAR_DURATION_SPREAD),
            Self::Mid => (MID_DURATION_BASE, MID_DURATION_SPREAD),
            Self::Near => (NEAR_DURATION_BASE, NEAR_DURATION_SPREAD),
        }
    }

    #[must_use]
    pub const fn blur_px(self) -> f32 {
        match self {
            Self::Far => 2.0,
            Self::Mid => 0.5,
            Self::Near => 0.0,
        }
    }

    #[must_use]
    pub const fn peak_opacity(self) -> f32 {
        match self {
            Self::Far => 0.4,
            Self::Mid | Self::Near => 0.8,
        }
    }

    /// Horizontal sway amplitude in pixels.
    #[must_use]
    pub const fn sway_px(self) -> f32 {
        match self {
            Self::Near => 50.0,
            Self::Far | Self::Mid => 20.0,
        }
    }

    #[must_use]
    pub const fn z_index(self) -> i32 {
        match self {
            Self::Far => 0,
            Self::Mid => 10,
            Self::Near => 20,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Far => "far",
            Self::Mid => "mid",
            Self::Near => "near",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleShape {
    Heart,
    Petal,
}

impl ParticleShape {
    /// Shape follows id parity so a particle keeps its look across re-evaluation.
    #[must_use]
    pub const fn for_id(id: u32) -> Self {
        if id % 2 == 0 { Self::Heart } else { Self::Petal }
    }
}

/// How a fresh batch enters the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    /// Negative delays: particles appear already mid-fall.
    InFlight,
    /// Small positive delays: particles drift in from the top edge.
    FromTop,
}

impl EntryMode {
    /// A batch numbered from zero is a fresh field and starts populated.
    #[must_use]
    pub const fn for_start_id(start_id: u32) -> Self {
        if start_id == 0 {
            Self::InFlight
        } else {
            Self::FromTop
        }
    }

    fn delay<R: Rng + ?Sized>(self, rng: &mut R) -> f32 {
        let draw: f32 = rng.r#gen();
        match self {
            Self::InFlight => -draw * IN_FLIGHT_DELAY_SPAN,
            Self::FromTop => draw * ENTRY_DELAY_SPAN,
        }
    }
}

/// One falling decorative particle. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbientParticle {
    pub id: u32,
    /// Horizontal start position, percent of viewport width in `[0, 100)`.
    pub left_pct: f32,
    /// Seconds before the fall starts; negative values start mid-fall.
    pub delay_s: f32,
    pub duration_s: f32,
    pub scale: f32,
    pub layer: DepthLayer,
}

impl AmbientParticle {
    #[must_use]
    pub const fn shape(&self) -> ParticleShape {
        ParticleShape::for_id(self.id)
    }
}

/// Generate `qty` particles numbered from `start_id`.
pub fn generate_batch<R: Rng + ?Sized>(
    qty: usize,
    start_id: u32,
    rng: &mut R,
) -> Vec<AmbientParticle> {
    let mode = EntryMode::for_start_id(start_id);
    (0..qty)
        .map(|offset| {
            let id = start_id.saturating_add(u32::try_from(offset).unwrap_or(u32::MAX));
            generate_particle(id, mode, rng)
        })
        .collect()
}

fn generate_particle<R: Rng + ?Sized>(id: u32, mode: EntryMode, rng: &mut R) -> AmbientParticle {
    let layer = DepthLayer::from_draw(rng.r#gen());
    let (base, spread) = layer.duration_band();
    let duration_s = base + rng.r#gen::<f32>() * spread;
    let left_pct = rng.r#gen::<f32>() * 100.0;
    let delay_s = mode.delay(rng);
    AmbientParticle {
        id,
        left_pct,
        delay_s,
        duration_s,
        scale: layer.scale(),
        layer,
    }
}
