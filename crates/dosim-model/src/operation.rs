//! Dose-composition operation trees as submitted to the processing service.
//!
//! The wire shape is an internally tagged union over `"type"`: a `dose` leaf
//! references a stored dose grid by id, and `addition`, `multiplication`, and
//! `division` nodes combine the grids produced by their `operands`. Every
//! node may carry an `offset`, a `scale`, and a `transformation` into the
//! frame of reference of its parent's primary (first) operand.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a dose-composition task name.
pub const MAX_TASK_NAME_LEN: usize = 64;

/// Reference to a spatial registration object that maps a node's grid into
/// the coordinate frame of the parent's primary operand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transformation {
    Sro { id: String },
}

impl Transformation {
    pub fn sro_id(&self) -> &str {
        match self {
            Transformation::Sro { id } => id,
        }
    }
}

/// A node of a dose-composition operation tree.
///
/// Each variant carries only the fields its kind uses: a `Dose` leaf has no
/// operands, and internal nodes have no entity id. Arity is not enforced by
/// the type (the wire accepts any operand count); `dosim-compose` validates
/// it before evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Leaf node resolving to a stored dose grid.
    Dose {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offset: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transformation: Option<Transformation>,
    },
    /// Element-wise sum of two or more operands.
    Addition {
        operands: Vec<Operation>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offset: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transformation: Option<Transformation>,
    },
    /// Element-wise product of exactly two operands.
    Multiplication {
        operands: Vec<Operation>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offset: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transformation: Option<Transformation>,
    },
    /// Element-wise quotient of exactly two operands (operand 0 is the
    /// dividend).
    Division {
        operands: Vec<Operation>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offset: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transformation: Option<Transformation>,
    },
}

/// The discriminant of an [`Operation`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Dose,
    Addition,
    Multiplication,
    Division,
}

impl OperationKind {
    /// Wire name of the kind, as it appears in the `"type"` tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Dose => "dose",
            OperationKind::Addition => "addition",
            OperationKind::Multiplication => "multiplication",
            OperationKind::Division => "division",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Operation {
    /// Convenience constructor for a plain dose leaf.
    pub fn dose(id: impl Into<String>) -> Self {
        Operation::Dose {
            id: id.into(),
            offset: None,
            scale: None,
            transformation: None,
        }
    }

    /// Convenience constructor for an addition over the given operands.
    pub fn addition(operands: Vec<Operation>) -> Self {
        Operation::Addition {
            operands,
            offset: None,
            scale: None,
            transformation: None,
        }
    }

    /// Convenience constructor for a multiplication over the given operands.
    pub fn multiplication(operands: Vec<Operation>) -> Self {
        Operation::Multiplication {
            operands,
            offset: None,
            scale: None,
            transformation: None,
        }
    }

    /// Convenience constructor for a division of operand 0 by operand 1.
    pub fn division(operands: Vec<Operation>) -> Self {
        Operation::Division {
            operands,
            offset: None,
            scale: None,
            transformation: None,
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Dose { .. } => OperationKind::Dose,
            Operation::Addition { .. } => OperationKind::Addition,
            Operation::Multiplication { .. } => OperationKind::Multiplication,
            Operation::Division { .. } => OperationKind::Division,
        }
    }

    /// Child operands, empty for a dose leaf.
    pub fn operands(&self) -> &[Operation] {
        match self {
            Operation::Dose { .. } => &[],
            Operation::Addition { operands, .. }
            | Operation::Multiplication { operands, .. }
            | Operation::Division { operands, .. } => operands,
        }
    }

    /// Scalar added to every voxel of this node's result, defaulting to 0.
    pub fn offset(&self) -> f64 {
        match self {
            Operation::Dose { offset, .. }
            | Operation::Addition { offset, .. }
            | Operation::Multiplication { offset, .. }
            | Operation::Division { offset, .. } => offset.unwrap_or(0.0),
        }
    }

    /// Scalar multiplying every voxel of this node's result, defaulting to 1.
    pub fn scale(&self) -> f64 {
        match self {
            Operation::Dose { scale, .. }
            | Operation::Addition { scale, .. }
            | Operation::Multiplication { scale, .. }
            | Operation::Division { scale, .. } => scale.unwrap_or(1.0),
        }
    }

    pub fn transformation(&self) -> Option<&Transformation> {
        match self {
            Operation::Dose { transformation, .. }
            | Operation::Addition { transformation, .. }
            | Operation::Multiplication { transformation, .. }
            | Operation::Division { transformation, .. } => transformation.as_ref(),
        }
    }

    /// Sets the `offset` field, for building trees in code.
    #[must_use]
    pub fn with_offset(mut self, value: f64) -> Self {
        match &mut self {
            Operation::Dose { offset, .. }
            | Operation::Addition { offset, .. }
            | Operation::Multiplication { offset, .. }
            | Operation::Division { offset, .. } => *offset = Some(value),
        }
        self
    }

    /// Sets the `scale` field, for building trees in code.
    #[must_use]
    pub fn with_scale(mut self, value: f64) -> Self {
        match &mut self {
            Operation::Dose { scale, .. }
            | Operation::Addition { scale, .. }
            | Operation::Multiplication { scale, .. }
            | Operation::Division { scale, .. } => *scale = Some(value),
        }
        self
    }

    /// Sets the `transformation` field, for building trees in code.
    #[must_use]
    pub fn with_sro(mut self, sro_id: impl Into<String>) -> Self {
        let reference = Transformation::Sro { id: sro_id.into() };
        match &mut self {
            Operation::Dose { transformation, .. }
            | Operation::Addition { transformation, .. }
            | Operation::Multiplication { transformation, .. }
            | Operation::Division { transformation, .. } => *transformation = Some(reference),
        }
        self
    }
}

/// The `dose_composition` task envelope submitted for processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "dose_composition")]
pub struct DoseCompositionTask {
    pub name: String,
    pub operation: Operation,
}

impl DoseCompositionTask {
    pub fn new(name: impl Into<String>, operation: Operation) -> Self {
        Self {
            name: name.into(),
            operation,
        }
    }
}
