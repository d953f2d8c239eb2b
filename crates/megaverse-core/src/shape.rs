//! Shape kinds understood by the Megaverse object service.

use std::fmt;
use std::str::FromStr;

use crate::error::MegaverseError;

/// The object kinds that can be placed on the grid.
///
/// Each kind maps to its own sub-resource on the remote service and may carry
/// one extra attribute in the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Plain node without attributes.
    Polyanet,
    /// Node decorated with a color.
    Soloon,
    /// Satellite pointing in a direction.
    Cometh,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [Self::Polyanet, Self::Soloon, Self::Cometh];

    /// Sub-resource path on the object service.
    pub fn path(self) -> &'static str {
        match self {
            Self::Polyanet => "/api/polyanets",
            Self::Soloon => "/api/soloons",
            Self::Cometh => "/api/comeths",
        }
    }

    /// Name of the kind-specific field in a create request body, if any.
    pub fn attribute_field(self) -> Option<&'static str> {
        match self {
            Self::Polyanet => None,
            Self::Soloon => Some("color"),
            Self::Cometh => Some("direction"),
        }
    }

    /// Token used for this kind inside composite goal-map labels.
    pub fn label_token(self) -> &'static str {
        match self {
            Self::Polyanet => "polyanet",
            Self::Soloon => "soloon",
            Self::Cometh => "cometh",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Polyanet => "Polyanet",
            Self::Soloon => "Soloon",
            Self::Cometh => "Cometh",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ShapeKind {
    type Err = MegaverseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let token = lower.strip_suffix('s').unwrap_or(&lower);
        Self::ALL
            .into_iter()
            .find(|kind| kind.label_token() == token)
            .ok_or_else(|| MegaverseError::UnrecognizedCellKind(s.to_string()))
    }
}

/// A concrete object to create: a kind plus its attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Polyanet,
    Soloon { color: String },
    Cometh { direction: String },
}

impl Shape {
    pub fn soloon(color: impl Into<String>) -> Self {
        Self::Soloon {
            color: color.into(),
        }
    }

    pub fn cometh(direction: impl Into<String>) -> Self {
        Self::Cometh {
            direction: direction.into(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Polyanet => ShapeKind::Polyanet,
            Self::Soloon { .. } => ShapeKind::Soloon,
            Self::Cometh { .. } => ShapeKind::Cometh,
        }
    }

    /// The attribute field and value sent alongside the coordinate.
    pub fn attribute(&self) -> Option<(&'static str, &str)> {
        match self {
            Self::Polyanet => None,
            Self::Soloon { color } => Some(("color", color.as_str())),
            Self::Cometh { direction } => Some(("direction", direction.as_str())),
        }
    }
}
