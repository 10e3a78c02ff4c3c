use crate::helpers::{Octet, G2_BYTES};
use crate::inner_types::{fp::Fp, fp2::Fp2, PairingCurve, Scalar, SexticTwist};
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

/// Multiplies by three times the `B` of the twist.
fn mul_by_3b<C: PairingCurve>(a: &Fp2<C>) -> Fp2<C> {
    let t = a.mul_by_fp(&Fp::B3);
    match C::CONFIG.twist {
        SexticTwist::DType => t.div_by_nonresidue(),
        SexticTwist::MType => t.mul_by_nonresidue(),
    }
}

/// The constant that makes [`G2Projective::frobenius`] act as the
/// p-power Frobenius on the twist.
pub(crate) fn twist_frobenius<C: PairingCurve>() -> Fp2<C> {
    let f = Fp2::frobenius_constant();
    match C::CONFIG.twist {
        SexticTwist::DType => f,
        SexticTwist::MType => f.invert().unwrap_or(Fp2::ONE),
    }
}

/// An element in $\mathbb{G}_2$ represented in the affine coordinate space.
#[derive(Copy, Clone, Debug)]
pub struct G2Affine<C: PairingCurve> {
    pub(crate) x: Fp2<C>,
    pub(crate) y: Fp2<C>,
    pub(crate) infinity: Choice,
}

impl<C: PairingCurve> Default for G2Affine<C> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<C: PairingCurve> DefaultIsZeroes for G2Affine<C> {}

impl<C: PairingCurve> ConstantTimeEq for G2Affine<C> {
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.infinity & other.infinity)
            | ((!self.infinity & !other.infinity) & self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y))
    }
}

impl<C: PairingCurve> ConditionallySelectable for G2Affine<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: Fp2::conditional_select(&a.x, &b.x, choice),
            y: Fp2::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl<C: PairingCurve> Eq for G2Affine<C> {}

impl<C: PairingCurve> PartialEq for G2Affine<C> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C: PairingCurve> Display for G2Affine<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self)
    }
}

impl<C: PairingCurve> fmt::LowerHex for G2Affine<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for b in self.to_bytes().iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl<C: PairingCurve> From<&G2Projective<C>> for G2Affine<C> {
    fn from(p: &G2Projective<C>) -> G2Affine<C> {
        let zinv = p.z.invert().unwrap_or(Fp2::ZERO);
        let tmp = G2Affine {
            x: p.x * zinv,
            y: p.y * zinv,
            infinity: Choice::from(0u8),
        };

        G2Affine::conditional_select(&tmp, &G2Affine::identity(), zinv.is_zero())
    }
}

impl<C: PairingCurve> From<G2Projective<C>> for G2Affine<C> {
    fn from(p: G2Projective<C>) -> G2Affine<C> {
        G2Affine::from(&p)
    }
}

impl<C: PairingCurve> Neg for &G2Affine<C> {
    type Output = G2Affine<C>;

    fn neg(self) -> G2Affine<C> {
        -*self
    }
}

impl<C: PairingCurve> Neg for G2Affine<C> {
    type Output = G2Affine<C>;

    fn neg(self) -> G2Affine<C> {
        Self {
            x: self.x,
            y: Fp2::conditional_select(&-self.y, &Fp2::ONE, self.infinity),
            infinity: self.infinity,
        }
    }
}

impl<C: PairingCurve> Add<G2Projective<C>> for G2Affine<C> {
    type Output = G2Projective<C>;

    fn add(self, rhs: G2Projective<C>) -> G2Projective<C> {
        rhs.addition_mixed(&self)
    }
}

ops_impl!(Add, add, +, LHS = G2Affine, RHS = G2Projective, OUTPUT = G2Projective);

impl<C: PairingCurve> Mul<Scalar<C>> for G2Affine<C> {
    type Output = G2Projective<C>;

    fn mul(self, scalar: Scalar<C>) -> G2Projective<C> {
        G2Projective::from(&self).multiply(&scalar.to_le_bytes())
    }
}

ops_impl!(Mul, mul, *, LHS = G2Affine, RHS = Scalar, OUTPUT = G2Projective);

impl<C: PairingCurve> Mul<G2Affine<C>> for Scalar<C> {
    type Output = G2Projective<C>;

    fn mul(self, rhs: G2Affine<C>) -> G2Projective<C> {
        rhs * self
    }
}

ops_impl!(Mul, mul, *, LHS = Scalar, RHS = G2Affine, OUTPUT = G2Projective);

bytes_impl!(
    G2Affine,
    |p: &G2Affine<C>| p.to_bytes(),
    |bytes: &[u8]| {
        Option::<G2Affine<C>>::from(G2Affine::from_bytes(bytes)).ok_or(PairingError::InvalidG2Bytes)
    }
);

serde_impl!(
    G2Affine,
    |p: &G2Affine<C>| p.to_bytes(),
    |bytes: &[u8]| {
        Option::<G2Affine<C>>::from(G2Affine::from_bytes(bytes)).ok_or(PairingError::InvalidG2Bytes)
    },
    G2_BYTES
);

impl<C: PairingCurve> G2Affine<C> {
    /// Bytes in the encoding `xa | xb | ya | yb`.
    pub const fn encoded_bytes() -> usize {
        4 * C::CONFIG.modulus_bytes
    }

    /// Returns the identity of the group
    pub fn identity() -> Self {
        Self {
            x: Fp2::ZERO,
            y: Fp2::ONE,
            infinity: Choice::from(1u8),
        }
    }

    /// Returns the fixed generator of the group
    pub fn generator() -> Self {
        let [xa, xb, ya, yb] = C::CONFIG.g2_generator;
        Self {
            x: Fp2::from_uints(&xa, &xb),
            y: Fp2::from_uints(&ya, &yb),
            infinity: Choice::from(0u8),
        }
    }

    /// The point with abscissa `x`, if it lies on the twist.
    pub fn from_x(x: Fp2<C>) -> CtOption<Self> {
        (x.square() * x + Fp2::twist_b()).sqrt().map(|y| G2Affine {
            x,
            y,
            infinity: Choice::from(0u8),
        })
    }

    /// Serializes as `xa | xb | ya | yb` where `a` is the real part.
    /// The identity is all zeros.
    pub fn to_bytes(&self) -> Octet<G2_BYTES> {
        let size = 2 * C::CONFIG.modulus_bytes;
        let mut bytes = Octet::zeroed(Self::encoded_bytes());
        self.x.write_be_bytes(&mut bytes[..size]);
        self.y.write_be_bytes(&mut bytes[size..]);
        let identity = Octet::zeroed(Self::encoded_bytes());
        Octet::conditional_select(&bytes, &identity, self.infinity)
    }

    #[cfg(any(feature = "alloc", feature = "std"))]
    /// Serializes this element into a hex string.
    pub fn to_hex(&self) -> crate::String {
        hex::encode(self.to_bytes().as_ref())
    }

    /// Decodes `xa | xb | ya | yb`. The point must lie on the twist.
    pub fn from_bytes(bytes: &[u8]) -> CtOption<Self> {
        if bytes.len() != Self::encoded_bytes() {
            return CtOption::new(Self::identity(), Choice::from(0u8));
        }
        let size = 2 * C::CONFIG.modulus_bytes;
        let all_zero = bytes.iter().fold(0u8, |acc, b| acc | b).ct_eq(&0u8);
        let point = Fp2::from_be_bytes(&bytes[..size]).and_then(|x| {
            Fp2::from_be_bytes(&bytes[size..]).and_then(|y| {
                let p = G2Affine {
                    x,
                    y,
                    infinity: Choice::from(0u8),
                };
                CtOption::new(p, p.is_on_curve())
            })
        });
        CtOption::new(Self::identity(), all_zero).or_else(|| point)
    }

    /// Attempts to deserialize an element from a hex string.
    pub fn from_hex(hex: &str) -> CtOption<Self> {
        Octet::<G2_BYTES>::from_hex(hex)
            .map(|bytes| Self::from_bytes(&bytes))
            .unwrap_or_else(|| CtOption::new(Self::identity(), Choice::from(0u8)))
    }

    /// Returns true if this element is the identity of the group
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }

    /// Returns true if this point lies in the subgroup of order r
    pub fn is_torsion_free(&self) -> Choice {
        G2Projective::from(self).is_torsion_free()
    }

    /// Returns true if this point is on the twist.
    pub fn is_on_curve(&self) -> Choice {
        self.y
            .square()
            .ct_eq(&(self.x.square() * self.x + Fp2::twist_b()))
            | self.infinity
    }
}

/// An element in $\mathbb{G}_2$ represented in the projective coordinate space.
#[derive(Copy, Clone, Debug)]
pub struct G2Projective<C: PairingCurve> {
    pub(crate) x: Fp2<C>,
    pub(crate) y: Fp2<C>,
    pub(crate) z: Fp2<C>,
}

impl<C: PairingCurve> Default for G2Projective<C> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<C: PairingCurve> DefaultIsZeroes for G2Projective<C> {}

impl<C: PairingCurve> Display for G2Projective<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", G2Affine::from(self))
    }
}

impl<C: PairingCurve> ConstantTimeEq for G2Projective<C> {
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

impl<C: PairingCurve> Eq for G2Projective<C> {}

impl<C: PairingCurve> PartialEq for G2Projective<C> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C: PairingCurve> ConditionallySelectable for G2Projective<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: Fp2::conditional_select(&a.x, &b.x, choice),
            y: Fp2::conditional_select(&a.y, &b.y, choice),
            z: Fp2::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl<C: PairingCurve> From<&G2Affine<C>> for G2Projective<C> {
    fn from(value: &G2Affine<C>) -> Self {
        Self {
            x: value.x,
            y: value.y,
            z: Fp2::conditional_select(&Fp2::ONE, &Fp2::ZERO, value.infinity),
        }
    }
}

impl<C: PairingCurve> From<G2Affine<C>> for G2Projective<C> {
    fn from(value: G2Affine<C>) -> Self {
        G2Projective::from(&value)
    }
}

impl<C: PairingCurve> Neg for &G2Projective<C> {
    type Output = G2Projective<C>;

    fn neg(self) -> G2Projective<C> {
        -*self
    }
}

impl<C: PairingCurve> Neg for G2Projective<C> {
    type Output = G2Projective<C>;

    fn neg(self) -> G2Projective<C> {
        Self {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl<C: PairingCurve> AddAssign for G2Projective<C> {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.addition(&rhs);
    }
}

ops_impl!(Add, add, +, AddAssign, add_assign, +=, LHS = G2Projective, RHS = G2Projective, OUTPUT = G2Projective);

impl<C: PairingCurve> AddAssign<G2Affine<C>> for G2Projective<C> {
    fn add_assign(&mut self, rhs: G2Affine<C>) {
        *self = self.addition_mixed(&rhs);
    }
}

ops_impl!(Add, add, +, AddAssign, add_assign, +=, LHS = G2Projective, RHS = G2Affine, OUTPUT = G2Projective);

impl<C: PairingCurve> SubAssign for G2Projective<C> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.addition(&-rhs);
    }
}

ops_impl!(Sub, sub, -, SubAssign, sub_assign, -=, LHS = G2Projective, RHS = G2Projective, OUTPUT = G2Projective);

impl<C: PairingCurve> SubAssign<G2Affine<C>> for G2Projective<C> {
    fn sub_assign(&mut self, rhs: G2Affine<C>) {
        *self = self.addition_mixed(&-rhs);
    }
}

ops_impl!(Sub, sub, -, SubAssign, sub_assign, -=, LHS = G2Projective, RHS = G2Affine, OUTPUT = G2Projective);

impl<C: PairingCurve> MulAssign<Scalar<C>> for G2Projective<C> {
    fn mul_assign(&mut self, rhs: Scalar<C>) {
        *self = self.multiply(&rhs.to_le_bytes());
    }
}

ops_impl!(Mul, mul, *, MulAssign, mul_assign, *=, LHS = G2Projective, RHS = Scalar, OUTPUT = G2Projective);

impl<C: PairingCurve> Mul<G2Projective<C>> for Scalar<C> {
    type Output = G2Projective<C>;

    fn mul(self, rhs: G2Projective<C>) -> G2Projective<C> {
        rhs.multiply(&self.to_le_bytes())
    }
}

ops_impl!(Mul, mul, *, LHS = Scalar, RHS = G2Projective, OUTPUT = G2Projective);

bytes_impl!(
    G2Projective,
    |p: &G2Projective<C>| G2Affine::from(p).to_bytes(),
    |bytes: &[u8]| {
        Option::<G2Affine<C>>::from(G2Affine::from_bytes(bytes))
            .map(G2Projective::from)
            .ok_or(PairingError::InvalidG2Bytes)
    }
);

serde_impl!(
    G2Projective,
    |p: &G2Projective<C>| G2Affine::from(p).to_bytes(),
    |bytes: &[u8]| {
        Option::<G2Affine<C>>::from(G2Affine::from_bytes(bytes))
            .map(G2Projective::from)
            .ok_or(PairingError::InvalidG2Bytes)
    },
    G2_BYTES
);

impl<C: PairingCurve, T: Borrow<G2Projective<C>>> Sum<T> for G2Projective<C> {
    fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(Self::IDENTITY, |acc, item| acc + item.borrow())
    }
}

impl<C: PairingCurve> G2Projective<C> {
    /// Returns the identity of the group
    pub const IDENTITY: Self = Self {
        x: Fp2::ZERO,
        y: Fp2::ONE,
        z: Fp2::ZERO,
    };

    /// Returns the fixed generator of the group
    pub const GENERATOR: Self = Self {
        x: Fp2::from_uints(&C::CONFIG.g2_generator[0], &C::CONFIG.g2_generator[1]),
        y: Fp2::from_uints(&C::CONFIG.g2_generator[2], &C::CONFIG.g2_generator[3]),
        z: Fp2::ONE,
    };

    pub fn to_affine(&self) -> G2Affine<C> {
        G2Affine::from(self)
    }

    /// Returns true if this point is the identity.
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Returns true if this point lies in the subgroup of order r
    pub fn is_torsion_free(&self) -> Choice {
        self.multiply_vartime(&C::Order::MODULUS).is_identity()
    }

    /// Returns true if this point is on the twist.
    pub fn is_on_curve(&self) -> Choice {
        // Y^2 Z = X^3 + b Z^3
        (self.y.square() * self.z)
            .ct_eq(&(self.x.square() * self.x + self.z.square() * self.z * Fp2::twist_b()))
            | self.z.is_zero()
    }

    /// Adds this point to another point in the affine model.
    pub(crate) fn addition_mixed(&self, rhs: &G2Affine<C>) -> G2Projective<C> {
        // Algorithm 8, https://eprint.iacr.org/2015/1060.pdf
        let t0 = self.x * rhs.x;
        let t1 = self.y * rhs.y;
        let t3 = (rhs.x + rhs.y) * (self.x + self.y);
        let t4 = t0 + t1;
        let t3 = t3 - t4;
        let t4 = rhs.y * self.z + self.y;
        let y3 = rhs.x * self.z + self.x;
        let x3 = t0.double();
        let t0 = x3 + t0;
        let t2 = mul_by_3b(&self.z);
        let z3 = t1 + t2;
        let t1 = t1 - t2;
        let y3 = mul_by_3b(&y3);
        let x3 = t4 * y3;
        let t2 = t3 * t1;
        let x3 = t2 - x3;
        let y3 = y3 * t0;
        let t1 = t1 * z3;
        let y3 = t1 + y3;
        let t0 = t0 * t3;
        let z3 = z3 * t4;
        let z3 = z3 + t0;

        let tmp = G2Projective {
            x: x3,
            y: y3,
            z: z3,
        };

        G2Projective::conditional_select(&tmp, self, rhs.is_identity())
    }

    /// Adds this point to another point.
    pub(crate) fn addition(&self, rhs: &G2Projective<C>) -> G2Projective<C> {
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
        let t2 = mul_by_3b(&t2);
        let z3 = t1 + t2;
        let t1 = t1 - t2;
        let y3 = mul_by_3b(&y3);
        let x3 = t4 * y3;
        let t2 = t3 * t1;
        let x3 = t2 - x3;
        let y3 = y3 * t0;
        let t1 = t1 * z3;
        let y3 = t1 + y3;
        let t0 = t0 * t3;
        let z3 = z3 * t4;
        let z3 = z3 + t0;

        G2Projective {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Computes the doubling of this point.
    pub fn double(&self) -> G2Projective<C> {
        // Algorithm 9, https://eprint.iacr.org/2015/1060.pdf
        let t0 = self.y.square();
        let z3 = t0.double().double().double();
        let t1 = self.y * self.z;
        let t2 = mul_by_3b(&self.z.square());
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

        let tmp = G2Projective {
            x: x3,
            y: y3,
            z: z3,
        };

        G2Projective::conditional_select(&tmp, &G2Projective::IDENTITY, self.is_identity())
    }

    /// Multiplies this point by a little-endian scalar smaller than r.
    pub(crate) fn multiply(&self, by: &[u8; U384::BYTES]) -> G2Projective<C> {
        let mut acc = G2Projective::IDENTITY;
        for i in (0..C::Order::MODULUS.bits()).rev() {
            let bit = Choice::from((by[i / 8] >> (i % 8)) & 1u8);
            acc = acc.double();
            acc.conditional_assign(&(acc + self), bit);
        }
        acc
    }

    /// Multiplies this point by a public integer.
    pub fn multiply_vartime(&self, by: &U384) -> G2Projective<C> {
        let mut acc = G2Projective::IDENTITY;
        for i in (0..by.bits_vartime()).rev() {
            acc = acc.double();
            if by.bit_vartime(i) {
                acc += self;
            }
        }
        acc
    }

    /// Multiplies by the seed `x`, signed.
    fn mul_by_x(&self) -> G2Projective<C> {
        let p = self.multiply_vartime(&U384::from_u128(C::CONFIG.x));
        G2Projective::conditional_select(
            &p,
            &-p,
            Choice::from(C::CONFIG.is_negative_x() as u8),
        )
    }

    /// The untwist-Frobenius-twist endomorphism, given the twist Frobenius constant.
    pub(crate) fn frobenius(&self, f: &Fp2<C>) -> G2Projective<C> {
        let f2 = f.square();
        G2Projective {
            x: self.x.conjugate() * f2,
            y: self.y.conjugate() * f2 * f,
            z: self.z.conjugate(),
        }
    }

    /// Maps a point on the twist into the subgroup of order r.
    pub fn clear_cofactor(&self) -> G2Projective<C> {
        let f = twist_frobenius::<C>();
        if C::CONFIG.is_bn() {
            // Fuentes-Castaneda, Knapp and Rodriguez-Henriquez
            let t = self.mul_by_x();
            let k = (t.double() + t).frobenius(&f);
            let q = self.frobenius(&f).frobenius(&f).frobenius(&f);
            q + t + k + t.frobenius(&f).frobenius(&f)
        } else {
            // Budroni and Pintore
            let xq = self.multiply_vartime(&U384::from_u128(C::CONFIG.x));
            let x2q = xq.multiply_vartime(&U384::from_u128(C::CONFIG.x));
            let xq = G2Projective::conditional_select(
                &xq,
                &-xq,
                Choice::from(C::CONFIG.is_negative_x() as u8),
            );
            let x2q = x2q - xq - self;
            let xq = (xq - self).frobenius(&f);
            let q = self.double().frobenius(&f).frobenius(&f);
            q + xq + x2q
        }
    }

    /// Hashes a field sized digest to a point of order r: the digest is
    /// reduced to `x`, incremented until `1 + x i` is an abscissa on the
    /// twist, then the cofactor is cleared.
    pub fn mapit(h: &[u8]) -> G2Projective<C> {
        let mut x = Fp::from_be_bytes_reduced(h);
        let point = loop {
            if let Some(p) = Option::<G2Affine<C>>::from(G2Affine::from_x(Fp2::new(Fp::ONE, x))) {
                break p;
            }
            x += Fp::ONE;
        };
        G2Projective::from(point).clear_cofactor()
    }

    pub fn to_bytes(&self) -> Octet<G2_BYTES> {
        G2Affine::from(self).to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> CtOption<Self> {
        G2Affine::from_bytes(bytes).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inner_types::{Bls381, Bls383, Bn254, Fp256Bn, ToyBls, ToyBlsNeg, ToyBn, ToyBnM};
    use crypto_bigint::Encoding;
    use elliptic_curve::Field;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    fn group_laws<C: PairingCurve>() {
        let mut rng = ChaCha8Rng::from_seed([41u8; 32]);
        let g = G2Projective::<C>::GENERATOR;
        assert!(bool::from(g.is_on_curve()));
        assert!(bool::from(g.is_torsion_free()));
        assert_eq!(g.double().double() + g, g * Scalar::from(5u64));
        assert_eq!(g - g, G2Projective::IDENTITY);

        let a = Scalar::<C>::random(&mut rng);
        let b = Scalar::<C>::random(&mut rng);
        assert_eq!(g * a + g * b, g * (a + b));
        assert_eq!(g * a, g.multiply_vartime(&a.to_uint()));

        // Frobenius acts as multiplication by p on the subgroup
        let f = twist_frobenius::<C>();
        let p = Scalar::<C>::from_be_bytes_reduced(&C::Base::MODULUS.to_be_bytes());
        assert_eq!((g * a).frobenius(&f), g * (a * p));
    }

    #[test]
    fn arithmetic() {
        group_laws::<Bn254>();
        group_laws::<Fp256Bn>();
        group_laws::<Bls381>();
        group_laws::<Bls383>();
        group_laws::<ToyBn>();
        group_laws::<ToyBnM>();
        group_laws::<ToyBls>();
        group_laws::<ToyBlsNeg>();
    }

    fn mapped_into_subgroup<C: PairingCurve>() {
        for seed in 0u8..4 {
            let q = G2Projective::<C>::mapit(&[seed; 32]);
            assert!(bool::from(q.is_on_curve()));
            assert!(bool::from(q.is_torsion_free()));
            assert!(!bool::from(q.is_identity()));
        }
    }

    #[test]
    fn mapit() {
        mapped_into_subgroup::<Bn254>();
        mapped_into_subgroup::<Fp256Bn>();
        mapped_into_subgroup::<Bls381>();
        mapped_into_subgroup::<Bls383>();
        mapped_into_subgroup::<ToyBnM>();
        mapped_into_subgroup::<ToyBlsNeg>();
    }

    #[test]
    fn encoding() {
        let g = G2Affine::<Bn254>::generator();
        let bytes = g.to_bytes();
        assert_eq!(bytes.len(), 128);
        assert_eq!(G2Affine::<Bn254>::from_bytes(&bytes).unwrap(), g);

        let mut expected = [0u8; 32];
        g.x.c0.write_be_bytes(&mut expected);
        assert_eq!(&bytes[..32], &expected[..]);

        let identity = G2Affine::<Bn254>::identity().to_bytes();
        assert!(bool::from(G2Affine::<Bn254>::from_bytes(&identity).unwrap().is_identity()));

        let mut bad = bytes;
        bad[100] ^= 0x10;
        assert!(bool::from(G2Affine::<Bn254>::from_bytes(&bad).is_none()));
        assert!(bool::from(G2Affine::<Bn254>::from_bytes(&bytes[..127]).is_none()));
    }

    #[cfg(any(feature = "alloc", feature = "std"))]
    #[test]
    fn hex() {
        let g = G2Affine::<Bls381>::generator();
        assert_eq!(G2Affine::<Bls381>::from_hex(&g.to_hex()).unwrap(), g);
    }
}
