use crate::core::clock::Clock;
use crate::core::ids::PersonId;
use crate::core::model::{Person, round4};
use chrono::TimeDelta;
use rand::Rng;

pub const FIRST_NAMES: &[&str] = &[
    "Ana", "Luis", "Carla", "Miguel", "Sofia", "Javier", "Lucia", "Pedro", "Mariana",
];

pub const MIDDLE_NAMES: &[&str] = &["Isabel", "Antonio", "Raul", "Elena", "Martin", "Andres"];

pub const LAST_NAMES: &[&str] = &[
    "Lopez",
    "Rivera",
    "Gonzalez",
    "Torres",
    "Ramirez",
    "Fernandez",
    "Martinez",
    "Hernandez",
];

pub const MAX_LAST_SEEN_OFFSET_MINUTES: i64 = 60;

#[derive(Debug, Clone, Copy)]
pub struct Vocabulary<'a> {
    pub first: &'a [&'a str],
    pub middle: &'a [&'a str],
    pub last: &'a [&'a str],
}

impl Vocabulary<'_> {
    pub fn size(&self) -> usize {
        self.first.len() * self.middle.len() * self.last.len()
    }
}

impl Default for Vocabulary<'static> {
    fn default() -> Self {
        Self {
            first: FIRST_NAMES,
            middle: MIDDLE_NAMES,
            last: LAST_NAMES,
        }
    }
}

/// The clock is read once; every `last_seen` is that instant minus a random
/// whole number of minutes in `0..=60`. Per person the offset is drawn before
/// the spam score.
pub fn build_persons<R: Rng, C: Clock + ?Sized>(
    vocab: &Vocabulary<'_>,
    rng: &mut R,
    clock: &C,
) -> Vec<Person> {
    let now = clock.now();
    let mut persons = Vec::with_capacity(vocab.size());
    let mut person_id: PersonId = 1;

    for first in vocab.first {
        for middle in vocab.middle {
            for last in vocab.last {
                let offset = rng.random_range(0..=MAX_LAST_SEEN_OFFSET_MINUTES);
                persons.push(Person {
                    id: person_id,
                    name: format!("{first} {middle} {last}"),
                    spam_score: round4(rng.random_range(0.0..=1.0)),
                    last_seen: now - TimeDelta::minutes(offset),
                });
                person_id += 1;
            }
        }
    }

    persons
}
