use anyhow::{Result, bail, ensure};
use bloomgate_core::constants::BURST_MEMBER_COUNT;
use bloomgate_core::{BurstId, GateOutcome, LoadingMessage, Notification, Scene};
use rand::Rng;

use super::TestScenario;
use crate::logic::JourneyHarness;
use crate::util::split_csv;

const CATALOG: &[(&str, &str)] = &[
    ("smoke", "Loading screen hands over to the gate on time"),
    ("full-journey", "Unlock, bloom to the letter, replay and tear down"),
    ("gate-variants", "Wrong answers, blank input and casing/spacing variants"),
    ("replay-loop", "Several journeys back to back in one session"),
    ("burst-storm", "Random taps expire on their own schedule"),
    ("density-curve", "Ambient count tracks the bloom step"),
    ("autoplay-blocked", "Journey completes when playback is refused"),
];

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    CATALOG.to_vec()
}

#[must_use]
pub fn get_scenario(key: &str) -> Option<TestScenario> {
    let scenario = match key {
        "smoke" => TestScenario::new("smoke", "Smoke", describe("smoke"), smoke),
        "full-journey" => TestScenario::new(
            "full-journey",
            "Full Journey",
            describe("full-journey"),
            full_journey,
        ),
        "gate-variants" => TestScenario::new(
            "gate-variants",
            "Gate Variants",
            describe("gate-variants"),
            gate_variants,
        ),
        "replay-loop" => TestScenario::new(
            "replay-loop",
            "Replay Loop",
            describe("replay-loop"),
            replay_loop,
        ),
        "burst-storm" => TestScenario::new(
            "burst-storm",
            "Burst Storm",
            describe("burst-storm"),
            burst_storm,
        ),
        "density-curve" => TestScenario::new(
            "density-curve",
            "Density Curve",
            describe("density-curve"),
            density_curve,
        ),
        "autoplay-blocked" => TestScenario::new(
            "autoplay-blocked",
            "Autoplay Blocked",
            describe("autoplay-blocked"),
            autoplay_blocked,
        )
        .with_blocked_audio(),
        _ => return None,
    };
    Some(scenario)
}

fn describe(key: &str) -> &'static str {
    CATALOG
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map_or("", |(_, description)| description)
}

/// Split the CLI list, replacing `all` with every catalog key.
#[must_use]
pub fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for (key, _) in CATALOG {
            if !scenarios.iter().any(|s| s == key) {
                scenarios.push((*key).to_string());
            }
        }
    }
    scenarios
}

fn smoke(harness: &mut JourneyHarness) -> Result<()> {
    let config = harness.config().clone();
    harness.expect_scene(Scene::Loading)?;
    ensure!(
        harness.session.ambient().len() == config.ambient_base,
        "loading should show {} ambient particles",
        config.ambient_base
    );
    ensure!(
        harness.random_tap().is_none(),
        "taps during loading should not spawn bursts"
    );

    harness.session.advance_to(config.loading_swap_ms);
    ensure!(
        harness.session.state().loading_message == LoadingMessage::Personal,
        "loading message should swap at {}ms",
        config.loading_swap_ms
    );
    harness.finish_loading()?;

    let json = harness.session.snapshot().to_json()?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    ensure!(value["phase"] == "gate", "snapshot phase was {}", value["phase"]);
    Ok(())
}

fn full_journey(harness: &mut JourneyHarness) -> Result<()> {
    let config = harness.config().clone();
    harness.finish_loading()?;
    harness.unlock(&config.passphrase)?;
    ensure!(harness.audio_starts() == 1, "music should start on unlock");

    harness.bloom_to_end()?;
    ensure!(
        harness.session.current_line().is_some(),
        "final stage should show a line"
    );
    harness.reveal_and_open()?;

    let notes = harness.session.drain_notifications();
    let blooms = notes
        .iter()
        .filter(|n| matches!(n, Notification::BloomAdvanced(_)))
        .count();
    ensure!(
        blooms == usize::from(config.total_stages) - 1,
        "expected {} bloom advances, saw {blooms}",
        config.total_stages - 1
    );
    ensure!(notes.contains(&Notification::LetterOpened), "letter never opened");

    ensure!(harness.session.replay(), "replay should leave the letter");
    harness.expect_scene(Scene::Intro)?;
    ensure!(harness.audio_starts() == 2, "replay should restart music");

    harness.session.teardown();
    harness.session.teardown();
    ensure!(harness.audio_releases() == 1, "audio released more than once");
    ensure!(
        !harness.session.begin_journey(),
        "actions after teardown should be ignored"
    );
    Ok(())
}

fn random_wrong_answer(harness: &mut JourneyHarness, secret: &str) -> String {
    loop {
        let len = harness.rng.gen_range(3..10);
        let word: String = (0..len)
            .map(|_| char::from(b'a' + harness.rng.gen_range(0..26_u8)))
            .collect();
        if !word.eq_ignore_ascii_case(secret.trim()) {
            return word;
        }
    }
}

fn random_variant(harness: &mut JourneyHarness, secret: &str) -> String {
    let body: String = secret
        .trim()
        .chars()
        .map(|c| {
            if harness.rng.gen_bool(0.5) {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect();
    let lead = " ".repeat(harness.rng.gen_range(0..4));
    let trail = "\t".repeat(harness.rng.gen_range(0..3));
    format!("{lead}{body}{trail}")
}

fn gate_variants(harness: &mut JourneyHarness) -> Result<()> {
    let config = harness.config().clone();
    harness.finish_loading()?;

    let attempts = harness.rng.gen_range(1..4);
    for _ in 0..attempts {
        let wrong = random_wrong_answer(harness, &config.passphrase);
        harness.session.set_passphrase_input(&wrong);
        let outcome = harness.session.submit_passphrase(&wrong);
        ensure!(
            outcome == GateOutcome::Rejected,
            "{wrong:?} should be rejected, got {outcome:?}"
        );
        ensure!(harness.session.gate().error, "rejection should show the error");
        harness.session.advance_by(config.gate_error_ms);
        ensure!(
            !harness.session.gate().error,
            "error should clear after {}ms",
            config.gate_error_ms
        );
    }
    ensure!(
        harness.session.state().step == 0,
        "wrong answers must not move the journey"
    );

    let blank = harness.session.submit_passphrase("   ");
    ensure!(blank == GateOutcome::Ignored, "blank input returned {blank:?}");
    ensure!(!harness.session.gate().error, "blank input should not show an error");

    let variant = random_variant(harness, &config.passphrase);
    harness.unlock(&variant)?;
    let again = harness.session.submit_passphrase(&variant);
    ensure!(
        again == GateOutcome::Ignored,
        "submitting after unlock returned {again:?}"
    );
    Ok(())
}

fn replay_loop(harness: &mut JourneyHarness) -> Result<()> {
    let config = harness.config().clone();
    harness.finish_loading()?;
    harness.unlock(&config.passphrase)?;

    let rounds = harness.rng.gen_range(2..5_u32);
    for round in 0..rounds {
        harness.bloom_to_end()?;
        ensure!(
            !harness.session.replay(),
            "round {round}: replay should be ignored before the letter"
        );
        harness.reveal_and_open()?;
        for _ in 0..harness.rng.gen_range(0..4) {
            harness.random_tap();
        }
        ensure!(harness.session.replay(), "round {round}: replay refused");

        let state = harness.session.state();
        ensure!(
            state.step == 0 && !state.show_envelope && !state.show_letter,
            "round {round}: replay left journey flags set"
        );
        ensure!(
            harness.session.bursts().is_empty(),
            "round {round}: replay should clear bursts"
        );
        ensure!(
            harness.session.ambient().len() == config.ambient_base,
            "round {round}: replay should reset ambient particles"
        );
        harness.session.advance_by(config.envelope_reveal_ms);
        harness.expect_scene(Scene::Intro)?;
    }
    ensure!(
        harness.audio_starts() == 1 + rounds,
        "expected {} music starts, saw {}",
        1 + rounds,
        harness.audio_starts()
    );
    Ok(())
}

fn burst_storm(harness: &mut JourneyHarness) -> Result<()> {
    let lifetime = harness.config().burst_lifetime_ms;
    harness.finish_loading()?;

    let mut spawned: Vec<(BurstId, u64)> = Vec::new();
    let taps = harness.rng.gen_range(20..60);
    for _ in 0..taps {
        let gap = harness.rng.gen_range(0..150);
        harness.session.advance_by(gap);
        let Some(id) = harness.random_tap() else {
            bail!("tap at {}ms did not spawn", harness.session.now_ms());
        };
        if let Some((last, _)) = spawned.last() {
            ensure!(id.0 > last.0, "burst ids must increase");
        }
        spawned.push((id, harness.session.now_ms()));

        let now = harness.session.now_ms();
        let expected_live = spawned
            .iter()
            .filter(|(_, born)| born + lifetime > now)
            .count();
        let live = harness.session.bursts();
        ensure!(
            live.len() == expected_live,
            "{} bursts live at {now}ms, expected {expected_live}",
            live.len()
        );
        ensure!(
            live.iter().all(|g| g.members.len() == BURST_MEMBER_COUNT),
            "every burst should carry {BURST_MEMBER_COUNT} members"
        );
    }

    harness.session.advance_by(lifetime);
    ensure!(
        harness.session.bursts().is_empty(),
        "bursts outlived their lifetime"
    );
    harness.expect_scene(Scene::Gate)
}

fn density_curve(harness: &mut JourneyHarness) -> Result<()> {
    let config = harness.config().clone();
    harness.finish_loading()?;
    harness.unlock(&config.passphrase)?;
    ensure!(
        harness.session.ambient().len() == config.ambient_base,
        "intro should settle back to the base density"
    );

    ensure!(harness.session.begin_journey(), "begin refused");
    loop {
        let step = harness.session.state().step;
        let expected = config.ambient_base + usize::from(step) * config.ambient_per_stage;
        ensure!(
            harness.session.ambient().len() == expected,
            "step {step}: {} ambient particles, expected {expected}",
            harness.session.ambient().len()
        );

        let before: Vec<u32> = harness
            .session
            .ambient()
            .particles()
            .iter()
            .map(|p| p.id)
            .collect();
        if !harness.session.advance_bloom() {
            break;
        }
        let after = harness.session.ambient().particles();
        ensure!(
            after.iter().zip(&before).all(|(p, id)| p.id == *id),
            "growing the field must keep existing particles"
        );
    }
    Ok(())
}

fn autoplay_blocked(harness: &mut JourneyHarness) -> Result<()> {
    let config = harness.config().clone();
    harness.finish_loading()?;
    harness.unlock(&config.passphrase)?;
    harness.bloom_to_end()?;
    harness.reveal_and_open()?;
    ensure!(harness.session.replay(), "replay refused");
    ensure!(
        harness.audio_starts() == 2,
        "refused playback should still be attempted"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_scenario_resolves() {
        for (key, description) in list_scenarios() {
            let scenario = get_scenario(key).expect("catalog entry");
            assert_eq!(scenario.key, key);
            assert_eq!(scenario.description, description);
        }
        assert!(get_scenario("nope").is_none());
    }

    #[test]
    fn all_expands_without_duplicates() {
        let expanded = expand_scenarios("smoke, all");
        assert_eq!(expanded.len(), CATALOG.len());
        assert_eq!(expanded[0], "smoke");
    }

    #[test]
    fn only_autoplay_scenario_blocks_audio() {
        let blocked: Vec<_> = list_scenarios()
            .into_iter()
            .filter_map(|(key, _)| get_scenario(key))
            .filter(|s| s.blocked_audio)
            .map(|s| s.key)
            .collect();
        assert_eq!(blocked, vec!["autoplay-blocked"]);
    }
}
