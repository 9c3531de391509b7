use std::collections::HashMap;

pub type PersonId = u32;
pub type FollowId = u64;
pub type NodeId = u32;

pub struct NodeRegistry {
    map: HashMap<PersonId, NodeId>,
    limit: usize,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::with_limit(NodeId::MAX as usize)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            map: HashMap::new(),
            limit,
        }
    }

    pub fn get_or_insert(&mut self, person_id: PersonId) -> anyhow::Result<NodeId> {
        if let Some(node) = self.map.get(&person_id) {
            return Ok(*node);
        }
        let next = self.map.len();
        anyhow::ensure!(next < self.limit, "nodes count exceeds the limit of {}", self.limit);
        self.map.insert(person_id, next as NodeId);
        Ok(next as NodeId)
    }

    pub fn get(&self, person_id: PersonId) -> Option<NodeId> {
        self.map.get(&person_id).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
