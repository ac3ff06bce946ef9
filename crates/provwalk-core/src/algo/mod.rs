//! Graph algorithms for corpus sampling.
//!
//! - [`components`] - Connected components and component statistics
//! - [`walk`] - Priority-biased depth-first walks
//! - [`neighborhood`] - Induced subgraph of a walk's node set

pub mod components;
pub mod neighborhood;
pub mod walk;
