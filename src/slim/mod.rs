//! GO slim vocabulary and closest-ancestor mapping

mod index;
mod mapper;

pub use index::SlimIndex;
pub use mapper::{SlimMapper, SlimTerm};
