//! Breakpoint records and their storage.

mod record;
mod store;

pub use record::Breakpoint;
pub use store::BreakpointStore;
