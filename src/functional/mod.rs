//! Composable field validation: primitive rules and the fail-fast
//! combinator that chains them.

pub mod validation_engine;
pub mod validation_rules;
