//! Lookup from node id to position, built in one pass over the node table.

use std::collections::HashMap;

use crate::config::NodeValidation;
use crate::errors::MalformedNodeError;
use crate::geometry::Vec3;
use crate::ingest::{Cell, NodeRow};

/// A node resolved from the node table.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRecord {
    /// Node identifier.
    pub id: String,
    /// Position; NaN components only under [`NodeValidation::Propagate`].
    pub position: Vec3,
}

/// Registry of every node in a frame.
///
/// Nodes iterate in the order their ids were first seen. A repeated id keeps
/// that slot but takes the position of its last row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeRegistry {
    /// Nodes in first-seen order.
    nodes: Vec<NodeRecord>,
    /// Position of each id within `nodes`.
    lookup: HashMap<String, usize>,
    /// Rows left out under [`NodeValidation::Exclude`] or with a blank id.
    excluded: usize,
}

impl NodeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from node rows.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedNodeError`] for the first row whose id is blank or
    /// whose coordinates cannot be read, but only under
    /// [`NodeValidation::Reject`].
    ///
    /// # Examples
    /// ```
    /// use framescene::{vec3, NodeRegistry, NodeRow, NodeValidation};
    ///
    /// let rows = [
    ///     NodeRow::new("A", 0.0, 0.0, 0.0),
    ///     NodeRow::new("B", 1.0, 0.0, 0.0),
    ///     NodeRow::new("A", 5.0, 5.0, 5.0),
    /// ];
    /// let registry = NodeRegistry::build(&rows, NodeValidation::Reject).expect("valid rows");
    /// assert_eq!(registry.len(), 2);
    /// assert_eq!(registry.get("A"), Some(vec3(5.0, 5.0, 5.0)));
    /// ```
    pub fn build(rows: &[NodeRow], policy: NodeValidation) -> Result<Self, MalformedNodeError> {
        let mut registry = Self::new();
        for (index, row) in rows.iter().enumerate() {
            let Some(id) = row.id.as_id() else {
                if policy == NodeValidation::Reject {
                    return Err(malformed(index, &row.id));
                }
                log::trace!("node row {index} has no id; skipped");
                registry.excluded += 1;
                continue;
            };
            match parse_position(row) {
                Ok(position) => registry.insert(id, position),
                Err(cell) => match policy {
                    NodeValidation::Reject => return Err(malformed(index, cell)),
                    NodeValidation::Exclude => {
                        log::trace!("node {id:?} (row {index}) excluded: bad {:?}", cell.column);
                        registry.remove(&id);
                        registry.excluded += 1;
                    }
                    NodeValidation::Propagate => registry.insert(id, Vec3::nan()),
                },
            }
        }
        if registry.excluded > 0 {
            log::warn!(
                "{} node row(s) could not be read and were left out",
                registry.excluded
            );
        }
        Ok(registry)
    }

    /// Insert or overwrite a node.
    pub fn insert(&mut self, id: String, position: Vec3) {
        if let Some(&slot) = self.lookup.get(&id) {
            self.nodes[slot].position = position;
        } else {
            self.lookup.insert(id.clone(), self.nodes.len());
            self.nodes.push(NodeRecord { id, position });
        }
    }

    /// Drop the node with `id`, returning its last position.
    ///
    /// Later nodes move up one slot so iteration order is preserved.
    pub fn remove(&mut self, id: &str) -> Option<Vec3> {
        let slot = self.lookup.remove(id)?;
        let removed = self.nodes.remove(slot);
        for shifted in self.lookup.values_mut().filter(|shifted| **shifted > slot) {
            *shifted -= 1;
        }
        Some(removed.position)
    }

    /// Position of the node with `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Vec3> {
        self.lookup.get(id).map(|&slot| self.nodes[slot].position)
    }

    /// Slot of the node with `id` in iteration order.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.lookup.get(id).copied()
    }

    /// Number of distinct nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no nodes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of rows left out because they could not be read.
    #[must_use]
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    /// Iterate the distinct nodes in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.iter()
    }
}

/// Read all three coordinates, returning the first unreadable cell.
fn parse_position(row: &NodeRow) -> Result<Vec3, &Cell> {
    let [x, y, z] = row.coordinates();
    Ok(Vec3::new(
        x.as_coordinate().ok_or(x)?,
        y.as_coordinate().ok_or(y)?,
        z.as_coordinate().ok_or(z)?,
    ))
}

/// Error naming the 0-based `row` and the unreadable `cell`.
fn malformed(row: usize, cell: &Cell) -> MalformedNodeError {
    MalformedNodeError {
        row,
        field: cell.column.clone(),
        value: cell.value.to_string(),
    }
}
