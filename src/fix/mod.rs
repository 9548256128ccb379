//! Auto-fix pass: parameter filling and connection repair.

pub mod connections;
pub mod idgen;
pub mod parameters;

pub use connections::{ConnectionFixReport, fix_connections};
pub use idgen::{IdGenerator, RandomIds};
pub use parameters::{ParameterFixReport, fill_parameters};
