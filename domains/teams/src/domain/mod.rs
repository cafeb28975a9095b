//! Teams domain layer: entities, errors, identifier rules

pub mod entities;
pub mod error;
pub mod validation;
