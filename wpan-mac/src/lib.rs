//! IEEE 802.15.4 MAC sublayer channel scanning.
//!
//! The [`mac::MacService`] owns the MAC context shared by all MLME
//! operations. Operations are serialized by an operation lock, shared state
//! is protected by a data lock. Radio, timer and upper layer notification are
//! external collaborators, see [`radio`], [`timer`] and [`notify`].
//!
//! A passive scan is admitted through [`mac::MacService::mlme_scan_request`],
//! advanced channel by channel whenever the armed timer expires and reported
//! exactly once through a [`notify::MacNotification::ScanConfirm`].

#![no_std]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

pub mod alarm;
pub mod config;
pub mod constants;
pub mod mac;
pub mod notify;
pub mod radio;
pub mod time;
pub mod timer;
