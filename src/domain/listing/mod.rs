//! Generic list view pipeline: filter, search, sort and paginate a collection of records.

pub mod pagination;
pub mod pipeline;
pub mod record;
pub mod view_state;

pub use pagination::*;
pub use pipeline::*;
pub use record::*;
pub use view_state::*;
