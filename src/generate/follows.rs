use crate::core::ids::{FollowId, PersonId};
use crate::core::model::{Follow, Person, round4};
use rand::Rng;
use rand::seq::IndexedRandom;

pub const MIN_QUALITY: f64 = 0.4;
pub const MAX_QUALITY: f64 = 1.0;

/// Samples followers for every person, in person order.
///
/// Each destination gets an in-degree drawn uniformly from
/// `0..=min(persons - 1, max_followers)`, then that many distinct sources
/// drawn without replacement from everybody else. Edges inherit the
/// destination's `last_seen`.
pub fn build_follows<R: Rng>(persons: &[Person], max_followers: usize, rng: &mut R) -> Vec<Follow> {
    let ids = persons.iter().map(|p| p.id).collect::<Vec<PersonId>>();
    let mut candidates = Vec::with_capacity(ids.len());
    let mut follows = Vec::new();
    let mut follow_id: FollowId = 1;

    for person in persons {
        candidates.clear();
        candidates.extend(ids.iter().copied().filter(|id| *id != person.id));
        if candidates.is_empty() {
            continue;
        }

        let followers = rng.random_range(0..=candidates.len().min(max_followers));
        let chosen = candidates
            .choose_multiple(rng, followers)
            .copied()
            .collect::<Vec<PersonId>>();

        for src_id in chosen {
            follows.push(Follow {
                id: follow_id,
                src_id,
                dst_id: person.id,
                quality: round4(rng.random_range(MIN_QUALITY..=MAX_QUALITY)),
                last_seen: person.last_seen,
            });
            follow_id += 1;
        }
    }

    follows
}
