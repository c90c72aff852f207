use anyhow::{Context, Result, bail};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Base for `spread:N` expansions so the same token always yields the same seeds.
const SPREAD_BASE_SEED: u64 = 0x5EED_B100;

/// Resolve CLI seed tokens into session seeds.
///
/// Accepts decimal or `0x` hex integers and `spread:N`, which expands to
/// `N` deterministic pseudo-random seeds. Duplicates are dropped in order.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds: Vec<u64> = Vec::new();
    for token in tokens {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        for seed in parse_token(token)? {
            if !seeds.contains(&seed) {
                seeds.push(seed);
            }
        }
    }
    if seeds.is_empty() {
        bail!("no seeds provided");
    }
    Ok(seeds)
}

fn parse_token(token: &str) -> Result<Vec<u64>> {
    if let Some(count) = token.strip_prefix("spread:") {
        let count: usize = count
            .parse()
            .with_context(|| format!("invalid spread count in {token:?}"))?;
        let mut rng = ChaCha8Rng::seed_from_u64(SPREAD_BASE_SEED);
        return Ok((0..count).map(|_| rng.r#gen()).collect());
    }
    if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        let value = u64::from_str_radix(hex, 16)
            .with_context(|| format!("invalid hex seed {token:?}"))?;
        return Ok(vec![value]);
    }
    if let Ok(value) = token.parse::<u64>() {
        return Ok(vec![value]);
    }
    if let Ok(value) = token.parse::<i64>() {
        return Ok(vec![value.unsigned_abs()]);
    }
    bail!("unrecognised seed {token:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn parses_decimal_hex_and_negative() {
        let seeds = resolve_seed_inputs(&tokens(&["1337", "0xff", "-7"])).unwrap();
        assert_eq!(seeds, vec![1337, 255, 7]);
    }

    #[test]
    fn spread_is_deterministic() {
        let a = resolve_seed_inputs(&tokens(&["spread:5"])).unwrap();
        let b = resolve_seed_inputs(&tokens(&["spread:5"])).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn duplicates_collapse() {
        let seeds = resolve_seed_inputs(&tokens(&["4", "4", "0x4"])).unwrap();
        assert_eq!(seeds, vec![4]);
    }

    #[test]
    fn rejects_garbage_and_empty() {
        assert!(resolve_seed_inputs(&tokens(&["tulip"])).is_err());
        assert!(resolve_seed_inputs(&tokens(&["", " "])).is_err());
        assert!(resolve_seed_inputs(&tokens(&["spread:x"])).is_err());
    }
}
