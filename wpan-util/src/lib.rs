//! This crate contains generic utilities the wpan crates depend upon but
//! not directly related to the IEEE 802.15.4 standard.
//!
//! The main purpose of this crate is to keep the MAC crate free of any
//! particular async runtime.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(test, not(feature = "std")))]
#[macro_use]
extern crate std;

pub mod log;
pub mod sync;

#[cfg(any(feature = "defmt", feature = "log"))]
pub use self::log::*;
