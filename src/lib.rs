//! hitrows - flatten search hits and their nested matches into rows
//!
//! A page of search hits, each possibly carrying nested inner hits, is
//! walked like an odometer: one row per nested match of the flattened
//! relation, or one row per hit when no nested column is requested.

pub mod cli;
pub mod observability;
pub mod response;
pub mod rowset;
