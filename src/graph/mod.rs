//! The editable rule graph: nodes plus directed connections between their sockets.
//!
//! Every mutation goes through [`RuleGraph`], which enforces the graph
//! invariants at insertion time:
//!
//! - node ids are unique,
//! - both endpoints of a connection exist,
//! - connections only use sockets the node family actually has,
//! - node values are within range.
//!
//! A failed mutation leaves the graph untouched.

use crate::error::{GraphError, SocketDirection};
use ahash::AHashMap;
use itertools::Itertools;
use tracing::debug;

mod connection;
mod node;
pub mod wire;

pub use connection::*;
pub use node::*;
pub use wire::{IntoGraph, RawGraph, RawNode};

/// The working set of nodes and connections of one editing session.
///
/// Listing order is insertion order. Nothing downstream attaches meaning to
/// it, it only keeps output deterministic.
#[derive(Debug, Clone, Default)]
pub struct RuleGraph {
    nodes: Vec<Node>,
    index: AHashMap<String, usize>,
    connections: Vec<Connection>,
}

impl RuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node. Fails on a duplicate id or an out-of-range value.
    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.index.contains_key(node.id()) {
            return Err(GraphError::DuplicateId(node.id().to_string()));
        }
        node.kind()
            .check()
            .map_err(|message| GraphError::InvalidNodeValue {
                node_id: node.id().to_string(),
                message,
            })?;

        debug!("Adding node '{}' ({})", node.id(), node.kind().subtype());
        self.index.insert(node.id().to_string(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Connects `from.from_output` to `to.to_input`.
    ///
    /// Adding a connection that is already present is a no-op.
    pub fn add_connection(
        &mut self,
        from: &str,
        from_output: &str,
        to: &str,
        to_input: &str,
    ) -> Result<(), GraphError> {
        let source = self.require(from)?;
        let target = self.require(to)?;
        check_socket(source, SocketDirection::Output, from_output)?;
        check_socket(target, SocketDirection::Input, to_input)?;

        let connection = Connection::new(from, from_output, to, to_input);
        if self.connections.contains(&connection) {
            debug!(
                "Connection {}.{} -> {}.{} already present",
                from, from_output, to, to_input
            );
            return Ok(());
        }

        debug!("Connecting {}.{} -> {}.{}", from, from_output, to, to_input);
        self.connections.push(connection);
        Ok(())
    }

    /// Snapshot of the nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Snapshot of the connections in insertion order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&position| &self.nodes[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes a node together with every connection that references it.
    pub fn remove_node(&mut self, id: &str) -> Result<Node, GraphError> {
        let position = self
            .index
            .remove(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        let removed = self.nodes.remove(position);

        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }

        let before = self.connections.len();
        self.connections.retain(|c| !c.touches(id));
        debug!(
            "Removed node '{}' and {} connection(s)",
            id,
            before - self.connections.len()
        );
        Ok(removed)
    }

    /// Removes one connection. Returns whether it was present.
    pub fn remove_connection(&mut self, connection: &Connection) -> bool {
        match self.connections.iter().position(|c| c == connection) {
            Some(position) => {
                self.connections.remove(position);
                true
            }
            None => false,
        }
    }

    /// Edits a node in place through `edit`.
    ///
    /// The edit runs on a copy. It is committed only if the node keeps its
    /// family, and with it the sockets existing connections rely on, and if
    /// the new values pass the range checks.
    pub fn update_node<F>(&mut self, id: &str, edit: F) -> Result<&Node, GraphError>
    where
        F: FnOnce(&mut NodeKind),
    {
        let position = *self
            .index
            .get(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        let current = &self.nodes[position];

        let mut edited = current.kind().clone();
        edit(&mut edited);

        if edited.family() != current.kind().family() {
            return Err(GraphError::FamilyChange {
                node_id: id.to_string(),
                from: current.kind().family(),
                to: edited.family(),
            });
        }
        edited
            .check()
            .map_err(|message| GraphError::InvalidNodeValue {
                node_id: id.to_string(),
                message,
            })?;

        debug!("Updating node '{}' ({})", id, edited.subtype());
        let node = &mut self.nodes[position];
        *node.kind_mut() = edited;
        Ok(&*node)
    }

    fn require(&self, id: &str) -> Result<&Node, GraphError> {
        self.get_node(id).ok_or_else(|| GraphError::UnknownNode {
            missing_node_id: id.to_string(),
        })
    }
}

fn check_socket(node: &Node, direction: SocketDirection, socket: &str) -> Result<(), GraphError> {
    let available = match direction {
        SocketDirection::Input => node.kind().inputs(),
        SocketDirection::Output => node.kind().outputs(),
    };
    if available.contains(&socket) {
        return Ok(());
    }
    let expected = if available.is_empty() {
        "none".to_string()
    } else {
        available.iter().join(", ")
    };
    Err(GraphError::SocketMismatch {
        node_id: node.id().to_string(),
        node_type: node.kind().subtype().to_string(),
        direction,
        socket: socket.to_string(),
        expected,
    })
}
