//! The generic resource carrier (C2/C3), hand-written standard resource
//! declarations (C1/C5 wire shapes), and discriminated union dispatch (C4).

pub mod core;
pub mod dispatch;
pub mod wellknown;

pub use core::{EncodeMode, ExtensionKind, Meta, Resource};
pub use dispatch::ListResponse;
pub use wellknown::EnterpriseUser;
