#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{boxed::Box, string::String, vec::Vec};
#[cfg(feature = "std")]
use std::{boxed::Box, string::String, vec::Vec};

mod error;
mod helpers;
pub mod inner_types;

pub mod bls;
pub mod mpin;
pub mod wcc;

pub use error::*;
pub use helpers::{
    hashit, Octet, AES_KEY_BYTES, G1_BYTES, G2_BYTES, GT_BYTES, HASH_BYTES, SCALAR_BYTES,
};
#[cfg(feature = "std")]
pub use helpers::{get_time, today};
