//! Pieces shared by every crate in the workspace: wire types that are not
//! tied to the expense domain, and tracing setup.

pub mod types;
pub mod utils;
