//! Relationship edges between individuals.

use std::{fmt, str::FromStr};

use pedigree_core::identifier::NodeId;

/// Kind of a two-party relationship edge.
///
/// All kinds except [`ConnectionKind::Sibling`] are routed as a straight line
/// between node centers and differ only in how the line is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    Partnership,
    Sibling,
    Separation,
    Consanguineous,
}

impl ConnectionKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Partnership => "partnership",
            Self::Sibling => "sibling",
            Self::Separation => "separation",
            Self::Consanguineous => "consanguineous",
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConnectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "partnership" | "marriage" => Ok(Self::Partnership),
            "sibling" => Ok(Self::Sibling),
            "separation" => Ok(Self::Separation),
            "consanguineous" => Ok(Self::Consanguineous),
            _ => Err(format!(
                "invalid connection type `{s}`, valid values: partnership, sibling, separation, consanguineous"
            )),
        }
    }
}

/// Kind of a twin relationship. Geometry is shared, drawing differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TwinKind {
    Identical,
    NonIdentical,
}

impl TwinKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Identical => "identical",
            Self::NonIdentical => "non-identical",
        }
    }
}

impl fmt::Display for TwinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TwinKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "identical" => Ok(Self::Identical),
            "non-identical" => Ok(Self::NonIdentical),
            _ => Err(format!(
                "invalid twin type `{s}`, valid values: identical, non-identical"
            )),
        }
    }
}

/// An edge between two individuals.
///
/// Slot order matters for [`ConnectionKind::Sibling`]: `node_a` is the anchor
/// side whose marriage decides where the elbow attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    node_a: NodeId,
    node_b: NodeId,
    kind: ConnectionKind,
}

impl Connection {
    pub fn new(node_a: NodeId, node_b: NodeId, kind: ConnectionKind) -> Self {
        Self {
            node_a,
            node_b,
            kind,
        }
    }

    pub fn node_a(&self) -> NodeId {
        self.node_a
    }

    pub fn node_b(&self) -> NodeId {
        self.node_b
    }

    pub fn kind(&self) -> ConnectionKind {
        self.kind
    }

    /// Returns true if either endpoint is `id`.
    pub fn touches(&self, id: NodeId) -> bool {
        self.node_a == id || self.node_b == id
    }
}

/// A parent joined to two twins born in the same multiple birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwinConnection {
    parent: NodeId,
    twin_a: NodeId,
    twin_b: NodeId,
    kind: TwinKind,
}

impl TwinConnection {
    pub fn new(parent: NodeId, twin_a: NodeId, twin_b: NodeId, kind: TwinKind) -> Self {
        Self {
            parent,
            twin_a,
            twin_b,
            kind,
        }
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn twin_a(&self) -> NodeId {
        self.twin_a
    }

    pub fn twin_b(&self) -> NodeId {
        self.twin_b
    }

    pub fn kind(&self) -> TwinKind {
        self.kind
    }

    /// Returns true if the parent or either twin is `id`.
    pub fn touches(&self, id: NodeId) -> bool {
        self.parent == id || self.twin_a == id || self.twin_b == id
    }
}
