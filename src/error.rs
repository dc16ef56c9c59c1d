use crate::graph::NodeFamily;
use thiserror::Error;

/// Errors raised while building or editing a [`RuleGraph`](crate::graph::RuleGraph).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("A node with id '{0}' already exists in the graph")]
    DuplicateId(String),

    #[error("Connection references node '{missing_node_id}', which is not part of the graph")]
    UnknownNode { missing_node_id: String },

    #[error("Node '{node_id}' ({node_type}) has no {direction} socket named '{socket}' (expected one of: {expected})")]
    SocketMismatch {
        node_id: String,
        node_type: String,
        direction: SocketDirection,
        socket: String,
        expected: String,
    },

    #[error("Node '{node_id}' has an invalid value: {message}")]
    InvalidNodeValue { node_id: String, message: String },

    #[error("Node '{node_id}' cannot change from the {from} family to the {to} family")]
    FamilyChange {
        node_id: String,
        from: NodeFamily,
        to: NodeFamily,
    },

    #[error("Node '{0}' not found")]
    NodeNotFound(String),
}

/// Which side of a node a socket lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketDirection {
    Input,
    Output,
}

impl std::fmt::Display for SocketDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SocketDirection::Input => write!(f, "input"),
            SocketDirection::Output => write!(f, "output"),
        }
    }
}

/// Errors that can occur while turning editor data into a compiled rule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Node '{node_id}' has an unrecognized node kind: kind '{kind}', subtype '{subtype}'")]
    UnknownNodeKind {
        node_id: String,
        kind: String,
        subtype: String,
    },

    #[error("Node '{node_id}' ({subtype}) carries invalid data: {message}")]
    InvalidNodeData {
        node_id: String,
        subtype: String,
        message: String,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Pre-submission checks on a compiled rule. The messages are meant to be
/// shown to the person editing the rule as-is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Add at least one condition node before saving the promotion rule")]
    EmptyConditions,

    #[error("Add at least one action node before saving the promotion rule")]
    EmptyActions,
}

/// Errors raised when rule metadata is constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("Salience must be a positive integer, got {0}")]
    NonPositiveSalience(i32),

    #[error("Validity window is inverted: valid_from {valid_from} is after valid_until {valid_until}")]
    InvertedValidityWindow {
        valid_from: chrono::NaiveDate,
        valid_until: chrono::NaiveDate,
    },
}

/// Errors raised while rebuilding the gate expression of each action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogicError {
    #[error("Logical node '{node_id}' has nothing connected to its '{socket}' input")]
    MissingInput { node_id: String, socket: String },

    #[error("Logical node '{node_id}' is part of a cycle")]
    Cycle { node_id: String },

    #[error("Connection from '{from}' to '{to}' references an id that is not part of the rule")]
    DanglingReference { from: String, to: String },

    #[error("Connection uses socket '{socket}', which node '{node_id}' does not have")]
    UnknownSocket { node_id: String, socket: String },
}

/// Errors at the boundary to the external promotion rule API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with `success: false`; the message is passed through verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error("The server reported success but returned no data")]
    MissingData,

    #[error("Failed to encode or decode API payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a rule could not be turned into a submission body.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
