//! MAC sublayer management entity (MLME) primitives.
pub mod beacon;
pub mod scan;
pub mod set;
