use crate::core::model::{Follow, Person};

pub struct MemoryStats {
    pub persons: usize,
    pub follows: usize,
    pub bytes: usize,
}

pub fn estimate_dataset_memory(persons: &[Person], follows: &[Follow]) -> MemoryStats {
    let names = persons.iter().map(|p| p.name.capacity()).sum::<usize>();
    MemoryStats {
        persons: persons.len(),
        follows: follows.len(),
        bytes: persons.len() * size_of::<Person>() + names + follows.len() * size_of::<Follow>(),
    }
}
