//! Backend-agnostic drawing: the `Surface` contract and the static trace layer.

pub mod surface;
pub mod traces;
