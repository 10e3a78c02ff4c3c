//! Field tower, curve groups and the pairing, generic over a [`PairingCurve`].

#[macro_use]
mod macros;
mod curves;
mod fp;
mod fp12;
mod fp2;
mod fp4;
mod g1;
mod g2;
mod pairings;
mod scalar;

pub use curves::*;
pub use fp::Fp;
pub use fp12::Fp12;
pub use fp2::Fp2;
pub use fp4::Fp4;
pub use g1::*;
pub use g2::{G2Affine, G2Projective};
pub use pairings::*;
pub use scalar::*;
