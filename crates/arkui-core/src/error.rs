use crate::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    Missing { id: NodeId },
    TypeMismatch { id: NodeId, expected: &'static str },
    AlreadyRegistered { id: NodeId },
    Purged { id: NodeId },
}

impl std::fmt::Display for NodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeError::Missing { id } => write!(f, "node {id} missing"),
            NodeError::TypeMismatch { id, expected } => {
                write!(f, "node {id} type mismatch; expected {expected}")
            }
            NodeError::AlreadyRegistered { id } => write!(f, "node {id} already registered"),
            NodeError::Purged { id } => write!(f, "node id {id} was already retired"),
        }
    }
}

impl std::error::Error for NodeError {}
