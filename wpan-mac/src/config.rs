//! Compile-time configuration.
//!
//! Values are generated by the build script from `WPAN_MAC_*` environment
//! variables, e.g. `WPAN_MAC_MAC_MAX_PAN_DESCRIPTORS=8`. Tests always use
//! the fixed defaults below.
#![allow(dead_code)]
pub use customizable::*;


#[cfg(not(test))]
mod customizable {
    #![allow(unused)]
    include!(concat!(env!("OUT_DIR"), "/config.rs"));
}
