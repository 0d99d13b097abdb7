//! Search response model for hitrows
//!
//! Pages are frozen snapshots: a row set borrows the hits of a page and
//! never mutates them.

mod errors;
mod hit;
mod page;

pub use errors::{ResponseError, ResponseResult};
pub use hit::{InnerHits, NestedHit, NestedIdentity, SearchHit};
pub use page::{SearchPage, TotalHits, TotalHitsRelation};
