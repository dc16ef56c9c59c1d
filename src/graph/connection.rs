use serde::{Deserialize, Serialize};

/// A directed link from a named output socket to a named input socket.
///
/// The same shape is used inside the graph and in the compiled rule's
/// `connections` array. The aliases accept the handle naming some editors
/// export (`source`/`sourceHandle`/`target`/`targetHandle`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    #[serde(alias = "source")]
    pub from: String,
    #[serde(alias = "target")]
    pub to: String,
    #[serde(alias = "sourceHandle", alias = "sourceOutput", alias = "from_output")]
    pub from_output: String,
    #[serde(alias = "targetHandle", alias = "targetInput", alias = "to_input")]
    pub to_input: String,
}

impl Connection {
    pub fn new(
        from: impl Into<String>,
        from_output: impl Into<String>,
        to: impl Into<String>,
        to_input: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            from_output: from_output.into(),
            to_input: to_input.into(),
        }
    }

    /// Whether either endpoint is the given node.
    pub fn touches(&self, node_id: &str) -> bool {
        self.from == node_id || self.to == node_id
    }
}
