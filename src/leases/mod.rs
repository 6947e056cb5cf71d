//! Lease retrieval strategies
//!
//! `by_address` lets the Grid Master filter leases by network in two calls;
//! `by_object` lists the network's addresses and reads each lease object on
//! a worker pool. Both return the same lease set for a given network.

pub mod by_address;
pub mod by_object;
pub mod pool;
pub mod types;

pub use by_address::fetch_by_address;
pub use by_object::{FanoutReport, LeaseFailure, fetch_by_object, lease_references};
pub use pool::WorkerPool;
pub use types::{Ipv4AddressRecord, Lease, filter_active};
