//! Constraint names and other custom database types.

mod constraint;

pub use constraint::{
    ConstraintCategory, ConstraintViolation, TemplateConstraints, TemplateParameterConstraints,
};
