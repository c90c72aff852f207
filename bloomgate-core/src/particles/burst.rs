use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    BURST_ANGLE_JITTER_DEG, BURST_DELAY_SPREAD, BURST_DISTANCE_BASE, BURST_DISTANCE_SPREAD,
    BURST_GRAVITY_DROP, BURST_MEMBER_COUNT, BURST_SCALE_BASE, BURST_SCALE_SPREAD,
};
use crate::timeline::Timeline;

/// Members stored inline; every burst has exactly [`BURST_MEMBER_COUNT`].
pub type BurstMembers = SmallVec<[BurstMember; BURST_MEMBER_COUNT]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BurstId(pub u32);

/// One heart flung out of a burst. Randomized once, frozen for the burst's life.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurstMember {
    pub angle_deg: f32,
    pub distance: f32,
    pub scale: f32,
    pub delay_s: f32,
    pub spin_deg: f32,
}

impl BurstMember {
    /// Landing point relative to the burst origin, with a slight gravity drop.
    #[must_use]
    pub fn target_offset(&self) -> (f32, f32) {
        let radians = self.angle_deg.to_radians();
        (
            radians.cos() * self.distance,
            radians.sin() * self.distance + BURST_GRAVITY_DROP,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurstGroup {
    pub id: BurstId,
    pub origin_x: f32,
    pub origin_y: f32,
    pub born_ms: u64,
    pub members: BurstMembers,
}

/// Short-lived tap bursts. Each spawn schedules its own expiry.
#[derive(Debug, Clone)]
pub struct BurstField {
    groups: Vec<BurstGroup>,
    last_id: u32,
    lifetime_ms: u64,
}

impl BurstField {
    #[must_use]
    pub const fn new(lifetime_ms: u64) -> Self {
        Self {
            groups: Vec::new(),
            last_id: 0,
            lifetime_ms,
        }
    }

    #[must_use]
    pub fn groups(&self) -> &[BurstGroup] {
        &self.groups
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub const fn lifetime_ms(&self) -> u64 {
        self.lifetime_ms
    }

    /// Append a burst at `(x, y)` and schedule its removal on `timeline`.
    pub fn spawn<R, T>(
        &mut self,
        x: f32,
        y: f32,
        rng: &mut R,
        timeline: &mut Timeline<T>,
        expire: impl FnOnce(BurstId) -> T,
    ) -> BurstId
    where
        R: Rng + ?Sized,
    {
        self.last_id = self.last_id.saturating_add(1);
        let id = BurstId(self.last_id);
        self.groups.push(BurstGroup {
            id,
            origin_x: x,
            origin_y: y,
            born_ms: timeline.now_ms(),
            members: roll_members(rng),
        });
        timeline.schedule(self.lifetime_ms, expire(id));
        id
    }

    /// Remove a burst; absent ids are ignored.
    pub fn expire(&mut self, id: BurstId) -> bool {
        let before = self.groups.len();
        self.groups.retain(|group| group.id != id);
        self.groups.len() != before
    }

    /// Drop every live burst. Ids keep counting up.
    pub fn clear(&mut self) {
        self.groups.clear();
    }
}

fn roll_members<R: Rng + ?Sized>(rng: &mut R) -> BurstMembers {
    #[allow(clippy::cast_precision_loss)]
    let count = BURST_MEMBER_COUNT as f32;
    (0..BURST_MEMBER_COUNT)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let slot = i as f32 / count * 360.0;
            BurstMember {
                angle_deg: slot + rng.r#gen::<f32>() * BURST_ANGLE_JITTER_DEG,
                distance: BURST_DISTANCE_BASE + rng.r#gen::<f32>() * BURST_DISTANCE_SPREAD,
                scale: BURST_SCALE_BASE + rng.r#gen::<f32>() * BURST_SCALE_SPREAD,
                delay_s: rng.r#gen::<f32>() * BURST_DELAY_SPREAD,
                spin_deg: rng.r#gen::<f32>() * 360.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[derive(Debug, PartialEq)]
    struct Expire(BurstId);

    #[test]
    fn spawn_rolls_fourteen_members_and_schedules_expiry() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut timeline = Timeline::new();
        let mut field = BurstField::new(2_000);

        let id = field.spawn(100.0, 200.0, &mut rng, &mut timeline, Expire);
        assert_eq!(id, BurstId(1));
        assert_eq!(field.groups()[0].members.len(), 14);
        assert_eq!(timeline.next_due_ms(), Some(2_000));

        for (i, member) in field.groups()[0].members.iter().enumerate() {
            let slot = i as f32 / 14.0 * 360.0;
            assert!(member.angle_deg >= slot && member.angle_deg <= slot + 20.0);
            assert!((60.0..=140.0).contains(&member.distance));
            assert!((0.5..=1.3).contains(&member.scale));
            assert!((0.0..=0.1).contains(&member.delay_s));
        }
    }

    #[test]
    fn members_are_frozen_while_other_bursts_come_and_go() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut timeline = Timeline::new();
        let mut field = BurstField::new(2_000);

        let first = field.spawn(10.0, 10.0, &mut rng, &mut timeline, Expire);
        let frozen = field.groups()[0].members.clone();
        let second = field.spawn(50.0, 60.0, &mut rng, &mut timeline, Expire);
        assert_ne!(first, second);
        assert_eq!(field.groups()[0].members, frozen);

        assert!(field.expire(second));
        assert_eq!(field.groups()[0].members, frozen);
    }

    #[test]
    fn expiring_missing_id_is_harmless() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut timeline = Timeline::new();
        let mut field = BurstField::new(2_000);
        let id = field.spawn(0.0, 0.0, &mut rng, &mut timeline, Expire);
        field.clear();
        assert!(!field.expire(id));
        let next = field.spawn(0.0, 0.0, &mut rng, &mut timeline, Expire);
        assert_eq!(next, BurstId(2));
    }

    #[test]
    fn target_offset_applies_gravity() {
        let member = BurstMember {
            angle_deg: 0.0,
            distance: 100.0,
            scale: 1.0,
            delay_s: 0.0,
            spin_deg: 0.0,
        };
        let (dx, dy) = member.target_offset();
        assert!((dx - 100.0).abs() < 1e-3);
        assert!((dy - 20.0).abs() < 1e-3);
    }
}
