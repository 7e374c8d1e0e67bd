use serde::Serialize;

/// A closed walk `[n0, n1, ..., nk, n0]` over `dependsOn` edges.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Cycle {
    path: Vec<String>,
}

impl Cycle {
    /// Build a cycle from its distinct members in walk order. The walk is
    /// rotated to start at its smallest member and the closing node is
    /// appended, so every rotation of one loop yields the same `Cycle`.
    pub fn from_members(mut members: Vec<String>) -> Option<Self> {
        let smallest = members
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.cmp(b))
            .map(|(i, _)| i)?;
        members.rotate_left(smallest);
        let first = members[0].clone();
        members.push(first);
        Some(Self { path: members })
    }

    /// Full closed path, first node repeated at the end.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Members without the repeated closing node.
    pub fn members(&self) -> &[String] {
        &self.path[..self.path.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.members().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members().is_empty()
    }

    pub fn contains(&self, node: &str) -> bool {
        self.members().iter().any(|m| m == node)
    }

    /// Consecutive `(from, to)` pairs along the walk.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.path
            .windows(2)
            .map(|w| (w[0].as_str(), w[1].as_str()))
    }
}
