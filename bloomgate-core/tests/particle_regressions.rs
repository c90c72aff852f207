use bloomgate_core::constants::BURST_MEMBER_COUNT;
use bloomgate_core::{AmbientField, BurstField, BurstId, SyncOutcome, Timeline};
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[test]
fn growth_keeps_existing_particles_and_continues_ids() {
    let mut rng = SmallRng::seed_from_u64(12);
    let mut field = AmbientField::new();
    assert_eq!(field.sync(12, &mut rng), SyncOutcome::Grew { added: 12 });
    let before = field.particles().to_vec();
    assert!(before.iter().all(|p| p.delay_s <= 0.0));

    assert_eq!(field.sync(18, &mut rng), SyncOutcome::Grew { added: 6 });
    let after = field.particles();
    assert_eq!(&after[..12], &before[..]);
    let new_ids: Vec<u32> = after[12..].iter().map(|p| p.id).collect();
    assert_eq!(new_ids, (12..18).collect::<Vec<_>>());
    assert!(after[12..].iter().all(|p| (0.0..2.0).contains(&p.delay_s)));
}

#[test]
fn shrinking_regenerates_from_zero() {
    let mut rng = SmallRng::seed_from_u64(54);
    let mut field = AmbientField::new();
    field.sync(54, &mut rng);
    let old_first = field.particles()[0].clone();

    assert_eq!(field.sync(12, &mut rng), SyncOutcome::Reset { count: 12 });
    let ids: Vec<u32> = field.particles().iter().map(|p| p.id).collect();
    assert_eq!(ids, (0..12).collect::<Vec<_>>());
    assert_ne!(field.particles()[0], old_first);
    assert!(
        field
            .particles()
            .iter()
            .all(|p| (-20.0..=0.0).contains(&p.delay_s))
    );
    assert_eq!(field.sync(12, &mut rng), SyncOutcome::Unchanged);
}

#[test]
fn rapid_bursts_expire_independently() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut timeline: Timeline<BurstId> = Timeline::new();
    let mut field = BurstField::new(2_000);

    let first = field.spawn(10.0, 10.0, &mut rng, &mut timeline, |id| id);
    while let Some(id) = timeline.pop_due(100) {
        field.expire(id);
    }
    let second = field.spawn(200.0, 300.0, &mut rng, &mut timeline, |id| id);
    assert_ne!(first, second);
    assert_eq!(field.len(), 2);
    assert!(
        field
            .groups()
            .iter()
            .all(|g| g.members.len() == BURST_MEMBER_COUNT)
    );

    while let Some(id) = timeline.pop_due(2_000) {
        field.expire(id);
    }
    assert_eq!(field.len(), 1);
    assert_eq!(field.groups()[0].id, second);

    while let Some(id) = timeline.pop_due(2_100) {
        field.expire(id);
    }
    assert!(field.is_empty());
    assert!(!field.expire(first));
}
