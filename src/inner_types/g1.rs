use crate::helpers::{Octet, G1_BYTES};
use crate::inner_types::{fp::Fp, PairingCurve, Scalar};
use crate::PairingError;
use core::{
    borrow::Borrow,
    fmt::{self, Display, Formatter},
    iter::Sum,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use crypto_bigint::{modular::constant_mod::ResidueParams, U384};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::DefaultIsZeroes;

/// Leading byte of an uncompressed point
const UNCOMPRESSED_TAG: u8 = 0x04;
/// Leading byte of a compressed point with an even y
const COMPRESSED_EVEN_TAG: u8 = 0x02;
/// Leading byte of a compressed point with an odd y
const COMPRESSED_ODD_TAG: u8 = 0x03;

/// An element in $\mathbb{G}_1$ represented in the affine coordinate space.
#[derive(Copy, Clone, Debug)]
pub struct G1Affine<C: PairingCurve> {
    pub(crate) x: Fp<C>,
    pub(crate) y: Fp<C>,
    pub(crate) infinity: Choice,
}

impl<C: PairingCurve> Default for G1Affine<C> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<C: PairingCurve> DefaultIsZeroes for G1Affine<C> {}

impl<C: PairingCurve> ConstantTimeEq for G1Affine<C> {
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.infinity & other.infinity)
            | ((!self.infinity & !other.infinity) & self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y))
    }
}

impl<C: PairingCurve> Eq for G1Affine<C> {}

impl<C: PairingCurve> PartialEq for G1Affine<C> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C: PairingCurve> ConditionallySelectable for G1Affine<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: Fp::conditional_select(&a.x, &b.x, choice),
            y: Fp::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl<C: PairingCurve> Display for G1Affine<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self)
    }
}

impl<C: PairingCurve> fmt::LowerHex for G1Affine<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for b in self.to_compressed().iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl<C: PairingCurve> From<&G1Projective<C>> for G1Affine<C> {
    fn from(p: &G1Projective<C>) -> G1Affine<C> {
        let zinv = p.z.invert().unwrap_or(Fp::ZERO);
        let tmp = G1Affine {
            x: p.x * zinv,
            y: p.y * zinv,
            infinity: Choice::from(0u8),
        };

        G1Affine::conditional_select(&tmp, &G1Affine::identity(), zinv.is_zero())
    }
}

impl<C: PairingCurve> From<G1Projective<C>> for G1Affine<C> {
    fn from(p: G1Projective<C>) -> G1Affine<C> {
        Self::from(&p)
    }
}

impl<C: PairingCurve> Neg for &G1Affine<C> {
    type Output = G1Affine<C>;

    fn neg(self) -> G1Affine<C> {
        -*self
    }
}

impl<C: PairingCurve> Neg for G1Affine<C> {
    type Output = G1Affine<C>;

    fn neg(self) -> G1Affine<C> {
        Self {
            x: self.x,
            y: Fp::conditional_select(&-self.y, &Fp::ONE, self.infinity),
            infinity: self.infinity,
        }
    }
}

impl<C: PairingCurve> Add<G1Projective<C>> for G1Affine<C> {
    type Output = G1Projective<C>;

    fn add(self, rhs: G1Projective<C>) -> G1Projective<C> {
        rhs.addition_mixed(&self)
    }
}

ops_impl!(Add, add, +, LHS = G1Affine, RHS = G1Projective, OUTPUT = G1Projective);

impl<C: PairingCurve> Mul<Scalar<C>> for G1Affine<C> {
    type Output = G1Projective<C>;

    fn mul(self, scalar: Scalar<C>) -> G1Projective<C> {
        G1Projective::from(&self).multiply(&scalar.to_le_bytes())
    }
}

ops_impl!(Mul, mul, *, LHS = G1Affine, RHS = Scalar, OUTPUT = G1Projective);

impl<C: PairingCurve> Mul<G1Affine<C>> for Scalar<C> {
    type Output = G1Projective<C>;

    fn mul(self, rhs: G1Affine<C>) -> G1Projective<C> {
        rhs * self
    }
}

ops_impl!(Mul, mul, *, LHS = Scalar, RHS = G1Affine, OUTPUT = G1Projective);

bytes_impl!(
    G1Affine,
    |p: &G1Affine<C>| p.to_uncompressed(),
    |bytes: &[u8]| {
        Option::<G1Affine<C>>::from(G1Affine::from_bytes(bytes)).ok_or(PairingError::InvalidG1Bytes)
    }
);

serde_impl!(
    G1Affine,
    |p: &G1Affine<C>| p.to_uncompressed(),
    |bytes: &[u8]| {
        Option::<G1Affine<C>>::from(G1Affine::from_bytes(bytes)).ok_or(PairingError::InvalidG1Bytes)
    },
    G1_BYTES
);

impl<C: PairingCurve> G1Affine<C> {
    /// Bytes in the compressed encoding `0x02|0x03 | x`.
    pub const fn compressed_bytes() -> usize {
        C::CONFIG.modulus_bytes + 1
    }

    /// Bytes in the uncompressed encoding `0x04 | x | y`.
    pub const fn uncompressed_bytes() -> usize {
        2 * C::CONFIG.modulus_bytes + 1
    }

    /// Returns the identity of the group
    pub fn identity() -> Self {
        Self {
            x: Fp::ZERO,
            y: Fp::ONE,
            infinity: Choice::from(1u8),
        }
    }

    /// Return the fixed generator of the group
    pub fn generator() -> Self {
        let [x, y] = C::CONFIG.g1_generator;
        Self {
            x: Fp::from_uint(&x),
            y: Fp::from_uint(&y),
            infinity: Choice::from(0u8),
        }
    }

    /// The point with abscissa `x` whose ordinate has the requested parity,
    /// if `x` lies on the curve.
    pub fn from_x(x: Fp<C>, y_is_odd: Choice) -> CtOption<Self> {
        (x.square() * x + Fp::B).sqrt().map(|y| {
            let y = Fp::conditional_select(&y, &-y, y.is_odd() ^ y_is_odd);
            G1Affine {
                x,
                y,
                infinity: Choice::from(0u8),
            }
        })
    }

    /// Serializes this element as `0x04 | x | y`. The identity is all zeros.
    pub fn to_uncompressed(&self) -> Octet<G1_BYTES> {
        let size = C::CONFIG.modulus_bytes;
        let mut bytes = Octet::zeroed(Self::uncompressed_bytes());
        bytes[0] = UNCOMPRESSED_TAG;
        self.x.write_be_bytes(&mut bytes[1..1 + size]);
        self.y.write_be_bytes(&mut bytes[1 + size..]);
        let identity = Octet::zeroed(Self::uncompressed_bytes());
        Octet::conditional_select(&bytes, &identity, self.infinity)
    }

    /// Serializes this element as `0x02 | x` or `0x03 | x` by the parity of y.
    /// The identity is all zeros.
    pub fn to_compressed(&self) -> Octet<G1_BYTES> {
        let mut bytes = Octet::zeroed(Self::compressed_bytes());
        bytes[0] = COMPRESSED_EVEN_TAG | self.y.is_odd().unwrap_u8();
        self.x.write_be_bytes(&mut bytes[1..]);
        let identity = Octet::zeroed(Self::compressed_bytes());
        Octet::conditional_select(&bytes, &identity, self.infinity)
    }

    #[cfg(any(feature = "alloc", feature = "std"))]
    /// Serializes this element into uncompressed hex string.
    pub fn to_uncompressed_hex(&self) -> crate::String {
        hex::encode(self.to_uncompressed().as_ref())
    }

    /// Decodes either encoding. Points must lie on the curve.
    pub fn from_bytes(bytes: &[u8]) -> CtOption<Self> {
        let size = C::CONFIG.modulus_bytes;
        let not_valid = CtOption::new(Self::identity(), Choice::from(0u8));
        if bytes.is_empty() {
            return not_valid;
        }
        let all_zero = bytes.iter().fold(0u8, |acc, b| acc | b).ct_eq(&0u8);

        if bytes.len() == Self::uncompressed_bytes() {
            let x = Fp::from_be_bytes(&bytes[1..1 + size]);
            let y = Fp::from_be_bytes(&bytes[1 + size..]);
            let tagged = bytes[0].ct_eq(&UNCOMPRESSED_TAG);
            let point = x.and_then(|x| {
                y.and_then(|y| {
                    let p = G1Affine {
                        x,
                        y,
                        infinity: Choice::from(0u8),
                    };
                    CtOption::new(p, tagged & p.is_on_curve())
                })
            });
            CtOption::new(Self::identity(), all_zero).or_else(|| point)
        } else if bytes.len() == Self::compressed_bytes() {
            let tag = bytes[0];
            let tagged = tag.ct_eq(&COMPRESSED_EVEN_TAG) | tag.ct_eq(&COMPRESSED_ODD_TAG);
            let point = Fp::from_be_bytes(&bytes[1..])
                .and_then(|x| Self::from_x(x, Choice::from(tag & 1)))
                .and_then(|p| CtOption::new(p, tagged));
            CtOption::new(Self::identity(), all_zero).or_else(|| point)
        } else {
            not_valid
        }
    }

    /// Attempts to deserialize an element from a hex string.
    pub fn from_hex(hex: &str) -> CtOption<Self> {
        Octet::<G1_BYTES>::from_hex(hex)
            .map(|bytes| Self::from_bytes(&bytes))
            .unwrap_or_else(|| CtOption::new(Self::identity(), Choice::from(0u8)))
    }

    /// Return true if this element is the identity of the group
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }

    /// Returns true if this point lies in the subgroup of order r
    pub fn is_torsion_free(&self) -> Choice {
        G1Projective::from(self).is_torsion_free()
    }

    /// Returns true if this point is on the curve.
    pub fn is_on_curve(&self) -> Choice {
        (self.y.square()).ct_eq(&(self.x.square() * self.x + Fp::B)) | self.infinity
    }
}

/// An element in $\mathbb{G}_1$ represented in the projective coordinate space.
#[derive(Copy, Clone, Debug)]
pub struct G1Projective<C: PairingCurve> {
    pub(crate) x: Fp<C>,
    pub(crate) y: Fp<C>,
    pub(crate) z: Fp<C>,
}

impl<C: PairingCurve> Default for G1Projective<C> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<C: PairingCurve> DefaultIsZeroes for G1Projective<C> {}

impl<C: PairingCurve> Display for G1Projective<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", G1Affine::from(self))
    }
}

impl<C: PairingCurve> From<&G1Affine<C>> for G1Projective<C> {
    fn from(value: &G1Affine<C>) -> Self {
        Self {
            x: value.x,
            y: value.y,
            z: Fp::conditional_select(&Fp::ONE, &Fp::ZERO, value.infinity),
        }
    }
}

impl<C: PairingCurve> From<G1Affine<C>> for G1Projective<C> {
    fn from(value: G1Affine<C>) -> Self {
        G1Projective::from(&value)
    }
}

impl<C: PairingCurve> ConstantTimeEq for G1Projective<C> {
    fn ct_eq(&self, other: &Self) -> Choice {
        // Is (xz', yz') equal to (x'z, y'z)?
        let x1 = self.x * other.z;
        let x2 = other.x * self.z;

        let y1 = self.y * other.z;
        let y2 = other.y * self.z;

        let self_is_zero = self.z.is_zero();
        let other_is_zero = other.z.is_zero();

        (self_is_zero & other_is_zero)
            | ((!self_is_zero & !other_is_zero) & x1.ct_eq(&x2) & y1.ct_eq(&y2))
    }
}

impl<C: PairingCurve> Eq for G1Projective<C> {}

impl<C: PairingCurve> PartialEq for G1Projective<C> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C: PairingCurve> ConditionallySelectable for G1Projective<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: Fp::conditional_select(&a.x, &b.x, choice),
            y: Fp::conditional_select(&a.y, &b.y, choice),
            z: Fp::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl<C: PairingCurve> Neg for &G1Projective<C> {
    type Output = G1Projective<C>;

    fn neg(self) -> G1Projective<C> {
        -*self
    }
}

impl<C: PairingCurve> Neg for G1Projective<C> {
    type Output = G1Projective<C>;

    fn neg(self) -> G1Projective<C> {
        Self {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl<C: PairingCurve> AddAssign for G1Projective<C> {
    fn add_assign(&mut self, rhs: G1Projective<C>) {
        *self = self.addition(&rhs);
    }
}

ops_impl!(Add, add, +, AddAssign, add_assign, +=, LHS = G1Projective, RHS = G1Projective, OUTPUT = G1Projective);

impl<C: PairingCurve> AddAssign<G1Affine<C>> for G1Projective<C> {
    fn add_assign(&mut self, rhs: G1Affine<C>) {
        *self = self.addition_mixed(&rhs);
    }
}

ops_impl!(Add, add, +, AddAssign, add_assign, +=, LHS = G1Projective, RHS = G1Affine, OUTPUT = G1Projective);

impl<C: PairingCurve> SubAssign for G1Projective<C> {
    fn sub_assign(&mut self, rhs: G1Projective<C>) {
        *self = self.addition(&-rhs);
    }
}

ops_impl!(Sub, sub, -, SubAssign, sub_assign, -=, LHS = G1Projective, RHS = G1Projective, OUTPUT = G1Projective);

impl<C: PairingCurve> SubAssign<G1Affine<C>> for G1Projective<C> {
    fn sub_assign(&mut self, rhs: G1Affine<C>) {
        *self = self.addition_mixed(&-rhs);
    }
}

ops_impl!(Sub, sub, -, SubAssign, sub_assign, -=, LHS = G1Projective, RHS = G1Affine, OUTPUT = G1Projective);

impl<C: PairingCurve> MulAssign<Scalar<C>> for G1Projective<C> {
    fn mul_assign(&mut self, rhs: Scalar<C>) {
        *self = self.multiply(&rhs.to_le_bytes());
    }
}

ops_impl!(Mul, mul, *, MulAssign, mul_assign, *=, LHS = G1Projective, RHS = Scalar, OUTPUT = G1Projective);

impl<C: PairingCurve> Mul<G1Projective<C>> for Scalar<C> {
    type Output = G1Projective<C>;

    fn mul(self, rhs: G1Projective<C>) -> G1Projective<C> {
        rhs.multiply(&self.to_le_bytes())
    }
}

ops_impl!(Mul, mul, *, LHS = Scalar, RHS = G1Projective, OUTPUT = G1Projective);

bytes_impl!(
    G1Projective,
    |p: &G1Projective<C>| G1Affine::from(p).to_uncompressed(),
    |bytes: &[u8]| {
        Option::<G1Affine<C>>::from(G1Affine::from_bytes(bytes))
            .map(G1Projective::from)
            .ok_or(PairingError::InvalidG1Bytes)
    }
);

serde_impl!(
    G1Projective,
    |p: &G1Projective<C>| G1Affine::from(p).to_uncompressed(),
    |bytes: &[u8]| {
        Option::<G1Affine<C>>::from(G1Affine::from_bytes(bytes))
            .map(G1Projective::from)
            .ok_or(PairingError::InvalidG1Bytes)
    },
    G1_BYTES
);

impl<C: PairingCurve, T: Borrow<G1Projective<C>>> Sum<T> for G1Projective<C> {
    fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(Self::IDENTITY, |acc, item| acc + item.borrow())
    }
}

impl<C: PairingCurve> G1Projective<C> {
    /// Returns the identity of the group
    pub const IDENTITY: Self = Self {
        x: Fp::ZERO,
        y: Fp::ONE,
        z: Fp::ZERO,
    };

    /// Returns the fixed generator of the group
    pub const GENERATOR: Self = Self {
        x: Fp::from_uint(&C::CONFIG.g1_generator[0]),
        y: Fp::from_uint(&C::CONFIG.g1_generator[1]),
        z: Fp::ONE,
    };

    pub fn to_affine(&self) -> G1Affine<C> {
        G1Affine::from(self)
    }

    /// Adds this point to another point in the affine model.
    pub(crate) fn addition_mixed(&self, rhs: &G1Affine<C>) -> G1Projective<C> {
        // Algorithm 8, https://eprint.iacr.org/2015/1060.pdf
        let t0 = self.x * rhs.x;
        let t1 = self.y * rhs.y;
        let t3 = rhs.x + rhs.y;
        let t4 = self.x + self.y;
        let t3 = t3 * t4;
        let t4 = t0 + t1;
        let t3 = t3 - t4;
        let t4 = rhs.y * self.z;
        let t4 = t4 + self.y;
        let y3 = rhs.x * self.z;
        let y3 = y3 + self.x;
        let x3 = t0.double();
        let t0 = x3 + t0;
        let t2 = self.z.mul_by_3b();
        let z3 = t1 + t2;
        let t1 = t1 - t2;
        let y3 = y3.mul_by_3b();
        let x3 = t4 * y3;
        let t2 = t3 * t1;
        let x3 = t2 - x3;
        let y3 = y3 * t0;
        let t1 = t1 * z3;
        let y3 = t1 + y3;
        let t0 = t0 * t3;
        let z3 = z3 * t4;
        let z3 = z3 + t0;

        let tmp = G1Projective {
            x: x3,
            y: y3,
            z: z3,
        };

        G1Projective::conditional_select(&tmp, self, rhs.is_identity())
    }

    /// Adds this point to another point.
    pub(crate) fn addition(&self, rhs: &G1Projective<C>) -> G1Projective<C> {
        // Algorithm 7, https://eprint.iacr.org/2015/1060.pdf
        let t0 = self.x * rhs.x;
        let t1 = self.y * rhs.y;
        let t2 = self.z * rhs.z;
        let t3 = (self.x + self.y) * (rhs.x + rhs.y);
        let t4 = t0 + t1;
        let t3 = t3 - t4;
        let t4 = (self.y + self.z) * (rhs.y + rhs.z);
        let x3 = t1 + t2;
        let t4 = t4 - x3;
        let x3 = (self.x + self.z) * (rhs.x + rhs.z);
        let y3 = t0 + t2;
        let y3 = x3 - y3;
        let x3 = t0.double();
        let t0 = x3 + t0;
        let t2 = t2.mul_by_3b();
        let z3 = t1 + t2;
        let t1 = t1 - t2;
        let y3 = y3.mul_by_3b();
        let x3 = t4 * y3;
        let t2 = t3 * t1;
        let x3 = t2 - x3;
        let y3 = y3 * t0;
        let t1 = t1 * z3;
        let y3 = t1 + y3;
        let t0 = t0 * t3;
        let z3 = z3 * t4;
        let z3 = z3 + t0;

        G1Projective {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Computes the doubling of this point.
    pub fn double(&self) -> G1Projective<C> {
        // Algorithm 9, https://eprint.iacr.org/2015/1060.pdf
        let t0 = self.y.square();
        let z3 = t0.double().double().double();
        let t1 = self.y * self.z;
        let t2 = self.z.square().mul_by_3b();
        let x3 = t2 * z3;
        let y3 = t0 + t2;
        let z3 = t1 * z3;
        let t1 = t2.double();
        let t2 = t1 + t2;
        let t0 = t0 - t2;
        let y3 = t0 * y3;
        let y3 = x3 + y3;
        let t1 = self.x * self.y;
        let x3 = (t0 * t1).double();

        let tmp = G1Projective {
            x: x3,
            y: y3,
            z: z3,
        };

        G1Projective::conditional_select(&tmp, &G1Projective::IDENTITY, self.is_identity())
    }

    /// Multiplies this point by a little-endian scalar smaller than r.
    /// Runs over every bit position of r regardless of the scalar.
    pub(crate) fn multiply(&self, by: &[u8; U384::BYTES]) -> G1Projective<C> {
        let mut acc = G1Projective::IDENTITY;
        for i in (0..C::Order::MODULUS.bits()).rev() {
            let bit = Choice::from((by[i / 8] >> (i % 8)) & 1u8);
            acc = acc.double();
            acc = G1Projective::conditional_select(&acc, &(acc + self), bit);
        }
        acc
    }

    /// Multiplies this point by a public integer, skipping zero bits.
    pub fn multiply_vartime(&self, by: &U384) -> G1Projective<C> {
        let mut acc = G1Projective::IDENTITY;
        for i in (0..by.bits_vartime()).rev() {
            acc = acc.double();
            if by.bit_vartime(i) {
                acc += self;
            }
        }
        acc
    }

    /// Hashes a field sized digest to a point of order r: the digest is
    /// reduced to an x coordinate and incremented until x lies on the curve,
    /// the root with even y is taken and the cofactor cleared.
    pub fn mapit(h: &[u8]) -> G1Projective<C> {
        let mut x = Fp::from_be_bytes_reduced(h);
        let point = loop {
            if let Some(p) = Option::<G1Affine<C>>::from(G1Affine::from_x(x, Choice::from(0u8))) {
                break p;
            }
            x += Fp::ONE;
        };
        G1Projective::from(point).multiply_vartime(&C::CONFIG.cofactor)
    }

    /// Returns true if this element is the identity (the point at infinity).
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Returns true if this point lies in the subgroup of order r.
    pub fn is_torsion_free(&self) -> Choice {
        self.multiply_vartime(&C::Order::MODULUS).is_identity()
    }

    /// Returns true if this point is on the curve.
    pub fn is_on_curve(&self) -> Choice {
        // Y^2 Z = X^3 + b Z^3
        (self.y.square() * self.z)
            .ct_eq(&(self.x.square() * self.x + self.z.square() * self.z * Fp::B))
            | self.z.is_zero()
    }

    pub fn to_uncompressed(&self) -> Octet<G1_BYTES> {
        G1Affine::from(self).to_uncompressed()
    }

    pub fn to_compressed(&self) -> Octet<G1_BYTES> {
        G1Affine::from(self).to_compressed()
    }

    pub fn from_bytes(bytes: &[u8]) -> CtOption<Self> {
        G1Affine::from_bytes(bytes).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inner_types::{Bls381, Bn254, ToyBls};
    use elliptic_curve::Field;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    fn group_laws<C: PairingCurve>() {
        let mut rng = ChaCha8Rng::from_seed([31u8; 32]);
        let g = G1Projective::<C>::GENERATOR;
        assert!(bool::from(g.is_on_curve()));
        assert!(bool::from(g.is_torsion_free()));
        assert_eq!(g.double().double() + g, g * Scalar::from(5u64));
        assert_eq!(g - g, G1Projective::IDENTITY);
        assert_eq!(g + G1Projective::IDENTITY, g);
        assert_eq!(G1Projective::<C>::IDENTITY.double(), G1Projective::IDENTITY);

        let a = Scalar::<C>::random(&mut rng);
        let b = Scalar::<C>::random(&mut rng);
        assert_eq!(g * a + g * b, g * (a + b));
        assert_eq!((g * a) * b, g * (a * b));
        assert_eq!(g * a, g.multiply_vartime(&a.to_uint()));
        assert_eq!(g * -Scalar::ONE, -g);
        assert_eq!(G1Affine::from(g * a) + g * b, g * (a + b));
    }

    #[test]
    fn arithmetic() {
        group_laws::<Bn254>();
        group_laws::<Bls381>();
        group_laws::<ToyBls>();
    }

    #[test]
    fn encodings() {
        let mut rng = ChaCha8Rng::from_seed([32u8; 32]);
        let p = (G1Projective::<Bls381>::GENERATOR * Scalar::random(&mut rng)).to_affine();

        let bytes = p.to_uncompressed();
        assert_eq!(bytes.len(), 97);
        assert_eq!(bytes[0], 0x04);
        assert_eq!(G1Affine::from_bytes(&bytes).unwrap(), p);

        let bytes = p.to_compressed();
        assert_eq!(bytes.len(), 49);
        assert_eq!(bytes[0] & 0xfe, 0x02);
        assert_eq!(G1Affine::from_bytes(&bytes).unwrap(), p);

        let identity = G1Affine::<Bls381>::identity().to_uncompressed();
        assert!(identity.iter().all(|b| *b == 0));
        assert!(bool::from(G1Affine::<Bls381>::from_bytes(&identity).unwrap().is_identity()));

        let mut tampered = p.to_uncompressed();
        tampered[40] ^= 1;
        assert!(bool::from(G1Affine::<Bls381>::from_bytes(&tampered).is_none()));
        assert!(bool::from(G1Affine::<Bls381>::from_bytes(&tampered[1..]).is_none()));
        assert_eq!(
            G1Affine::<Bls381>::try_from(&tampered[..]),
            Err(PairingError::InvalidG1Bytes)
        );
    }

    #[cfg(any(feature = "alloc", feature = "std"))]
    #[test]
    fn hex_round_trip() {
        let g = G1Affine::<Bn254>::generator();
        let hex = g.to_uncompressed_hex();
        assert_eq!(G1Affine::<Bn254>::from_hex(&hex).unwrap(), g);
    }

    #[test]
    fn mapit_lands_in_subgroup() {
        let p = G1Projective::<Bls381>::mapit(&[0x5au8; 48]);
        assert!(bool::from(p.is_on_curve()));
        assert!(bool::from(p.is_torsion_free()));
        assert!(!bool::from(p.is_identity()));
        assert_eq!(p, G1Projective::<Bls381>::mapit(&[0x5au8; 48]));

        let q = G1Projective::<Bn254>::mapit(&[7u8; 32]).to_affine();
        assert!(!bool::from(q.y.is_odd()));
    }
}
