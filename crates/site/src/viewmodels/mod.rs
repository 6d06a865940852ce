//! Display-ready projections of domain data.
//!
//! View models are pure, synchronous, and never persisted - handlers fetch
//! the domain rows, the builders here flatten them for templates.

pub mod customer;

pub use customer::{CustomerViewModel, OrderList, OrderView, smart_join};
