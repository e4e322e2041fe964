use crate::config::PlacementParams;
use crate::geometry::{Rgb, SpawnRegion, Vec3};
use fastrand::Rng;
use tracing::debug;

const CHANNEL_MIN: f32 = 0.2;
const CHANNEL_MAX: f32 = 1.0;

/// Output of a rejection-sampling pass.
///
/// `forced` counts items accepted after the attempt cap ran out; those may
/// violate the spacing rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Sampled<T> {
    pub items: Vec<T>,
    pub forced: usize,
}

/// Draws `count` positions from `region`, each farther than `min_distance`
/// from every position already accepted and from every `excluded` one.
pub fn generate_positions(
    rng: &mut Rng,
    count: usize,
    excluded: &[Vec3],
    region: &SpawnRegion,
    min_distance: f32,
    max_attempts: usize,
) -> Sampled<Vec3> {
    let mut items: Vec<Vec3> = Vec::with_capacity(count);
    let mut forced = 0;

    for _ in 0..count {
        let mut candidate = region.sample(rng);
        let mut attempts = 1;
        while !is_clear(&candidate, &items, excluded, min_distance) {
            if attempts >= max_attempts {
                forced += 1;
                debug!(
                    "Position attempts exhausted after {}; accepting {:?}",
                    attempts, candidate
                );
                break;
            }
            candidate = region.sample(rng);
            attempts += 1;
        }
        items.push(candidate);
    }

    Sampled { items, forced }
}

fn is_clear(candidate: &Vec3, accepted: &[Vec3], excluded: &[Vec3], min_distance: f32) -> bool {
    accepted
        .iter()
        .chain(excluded)
        .all(|p| candidate.distance(p) > min_distance)
}

/// Draws `count` colours with every channel in 0.2..=1.0, each farther than
/// `min_distance` from the others in the batch and from `existing`.
pub fn generate_colors(
    rng: &mut Rng,
    count: usize,
    existing: &[Rgb],
    min_distance: f32,
    max_attempts: usize,
) -> Sampled<Rgb> {
    let mut items: Vec<Rgb> = Vec::with_capacity(count);
    let mut forced = 0;

    for _ in 0..count {
        let mut candidate = random_color(rng);
        let mut attempts = 1;
        while !items
            .iter()
            .chain(existing)
            .all(|c| candidate.distance(c) > min_distance)
        {
            if attempts >= max_attempts {
                forced += 1;
                break;
            }
            candidate = random_color(rng);
            attempts += 1;
        }
        items.push(candidate);
    }

    if forced > 0 {
        debug!("{} of {} colours accepted without spacing", forced, count);
    }

    Sampled { items, forced }
}

fn random_color(rng: &mut Rng) -> Rgb {
    let span = CHANNEL_MAX - CHANNEL_MIN;
    Rgb::new(
        CHANNEL_MIN + rng.f32() * span,
        CHANNEL_MIN + rng.f32() * span,
        CHANNEL_MIN + rng.f32() * span,
    )
}

/// Positions and colours for a batch of new tokens.
pub struct Layout {
    pub positions: Sampled<Vec3>,
    pub colors: Sampled<Rgb>,
}

pub fn layout_batch(
    rng: &mut Rng,
    params: &PlacementParams,
    count: usize,
    occupied: &[Vec3],
    used_colors: &[Rgb],
) -> Layout {
    let positions = generate_positions(
        rng,
        count,
        occupied,
        &params.region(),
        params.min_separation(),
        params.position_attempts,
    );
    let colors = generate_colors(
        rng,
        count,
        used_colors,
        params.min_color_distance,
        params.color_attempts,
    );
    Layout { positions, colors }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_of_one_still_terminates() {
        let mut rng = Rng::with_seed(5);
        let region = SpawnRegion {
            min: Vec3::ZERO,
            max: Vec3::new(0.01, 0.01, 0.01),
        };
        let out = generate_positions(&mut rng, 20, &[], &region, 1.0, 1);
        assert_eq!(out.items.len(), 20);
        assert_eq!(out.forced, 19);
    }

    #[test]
    fn colours_stay_in_channel_range() {
        let mut rng = Rng::with_seed(9);
        let out = generate_colors(&mut rng, 30, &[], 0.3, 10_000);
        for c in &out.items {
            for ch in [c.r, c.g, c.b] {
                assert!((CHANNEL_MIN..=CHANNEL_MAX).contains(&ch));
            }
        }
    }
}
