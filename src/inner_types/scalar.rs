use crate::helpers::{Octet, SCALAR_BYTES};
use crate::inner_types::{PairingCurve, LIMBS, MAX_FIELD_BYTES};
use crate::PairingError;
use core::{
    borrow::Borrow,
    fmt::{self, Display, Formatter, LowerHex, UpperHex},
    iter::{Product, Sum},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use crypto_bigint::{
    modular::constant_mod::{Residue, ResidueParams},
    Encoding, U384,
};
use elliptic_curve::Field;
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::DefaultIsZeroes;

pub(crate) type ScalarResidue<C> = Residue<<C as PairingCurve>::Order, LIMBS>;

/// An integer modulo the group order r.
#[derive(Copy, Clone, Debug, Default)]
pub struct Scalar<C: PairingCurve>(pub(crate) ScalarResidue<C>);

impl<C: PairingCurve> DefaultIsZeroes for Scalar<C> {}

impl<C: PairingCurve> Display for Scalar<C> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:x}", self)
    }
}

impl<C: PairingCurve> LowerHex for Scalar<C> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:x}", self.to_uint())
    }
}

impl<C: PairingCurve> UpperHex for Scalar<C> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:X}", self.to_uint())
    }
}

impl<C: PairingCurve> From<u32> for Scalar<C> {
    fn from(value: u32) -> Self {
        Self::from_u64(value as u64)
    }
}

impl<C: PairingCurve> From<u64> for Scalar<C> {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl<C: PairingCurve> ConstantTimeEq for Scalar<C> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl<C: PairingCurve> ConditionallySelectable for Scalar<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(ScalarResidue::<C>::conditional_select(&a.0, &b.0, choice))
    }
}

impl<C: PairingCurve> PartialEq for Scalar<C> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C: PairingCurve> Eq for Scalar<C> {}

impl<C: PairingCurve> AddAssign for Scalar<C> {
    fn add_assign(&mut self, other: Self) {
        *self = self.addition(&other)
    }
}

ops_impl!(Add, add, +, AddAssign, add_assign, +=, LHS = Scalar, RHS = Scalar, OUTPUT = Scalar);

impl<C: PairingCurve> SubAssign for Scalar<C> {
    fn sub_assign(&mut self, other: Self) {
        *self = self.subtract(&other)
    }
}

ops_impl!(Sub, sub, -, SubAssign, sub_assign, -=, LHS = Scalar, RHS = Scalar, OUTPUT = Scalar);

impl<C: PairingCurve> MulAssign for Scalar<C> {
    fn mul_assign(&mut self, other: Self) {
        *self = self.multiply(&other)
    }
}

ops_impl!(Mul, mul, *, MulAssign, mul_assign, *=, LHS = Scalar, RHS = Scalar, OUTPUT = Scalar);

impl<C: PairingCurve> Neg for &Scalar<C> {
    type Output = Scalar<C>;

    fn neg(self) -> Scalar<C> {
        self.negate()
    }
}

impl<C: PairingCurve> Neg for Scalar<C> {
    type Output = Scalar<C>;

    fn neg(self) -> Scalar<C> {
        -&self
    }
}

impl<C: PairingCurve, T: Borrow<Scalar<C>>> Sum<T> for Scalar<C> {
    fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, item| acc + item.borrow())
    }
}

impl<C: PairingCurve, T: Borrow<Scalar<C>>> Product<T> for Scalar<C> {
    fn product<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, item| acc * item.borrow())
    }
}

impl<C: PairingCurve> Field for Scalar<C> {
    const ZERO: Self = Self(ScalarResidue::<C>::ZERO);
    const ONE: Self = Self(ScalarResidue::<C>::ONE);

    fn random(mut rng: impl RngCore) -> Self {
        let mut bytes = [0u8; 2 * U384::BYTES];
        rng.fill_bytes(&mut bytes);
        let hi = U384::from_be_slice(&bytes[..U384::BYTES]);
        let lo = U384::from_be_slice(&bytes[U384::BYTES..]);
        let (value, _) = U384::const_rem_wide((lo, hi), &C::Order::MODULUS);
        Self::from_uint(&value)
    }

    fn square(&self) -> Self {
        self.square()
    }

    fn double(&self) -> Self {
        self.double()
    }

    fn invert(&self) -> CtOption<Self> {
        self.invert()
    }

    fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
        let root = (num * div.invert().unwrap_or(Self::ZERO)).sqrt();
        let is_square = root.is_some() & (!div.is_zero() | num.is_zero());
        (is_square, root.unwrap_or(Self::ZERO))
    }

    fn sqrt(&self) -> CtOption<Self> {
        self.sqrt_vartime()
    }
}

bytes_impl!(Scalar, |s: &Scalar<C>| s.to_be_bytes(), |bytes: &[u8]| {
    Option::<Scalar<C>>::from(Scalar::from_be_bytes(bytes)).ok_or(PairingError::InvalidScalarBytes)
});

serde_impl!(
    Scalar,
    |s: &Scalar<C>| s.to_be_bytes(),
    |bytes: &[u8]| {
        Option::<Scalar<C>>::from(Scalar::from_be_bytes(bytes))
            .ok_or(PairingError::InvalidScalarBytes)
    },
    SCALAR_BYTES
);

impl<C: PairingCurve> Scalar<C> {
    pub const ZERO: Self = Self(ScalarResidue::<C>::ZERO);
    pub const ONE: Self = Self(ScalarResidue::<C>::ONE);

    /// Length of the big-endian encoding, the same as a base field element
    pub const fn bytes() -> usize {
        C::CONFIG.modulus_bytes
    }

    pub const fn from_u64(value: u64) -> Self {
        Self(ScalarResidue::<C>::new(&U384::from_u64(value)))
    }

    /// Reduces `value` modulo r.
    pub const fn from_uint(value: &U384) -> Self {
        Self(ScalarResidue::<C>::new(value))
    }

    pub const fn to_uint(&self) -> U384 {
        self.0.retrieve()
    }

    /// Decodes exactly [`Scalar::bytes`] big-endian bytes, rejecting values not below r.
    pub fn from_be_bytes(bytes: &[u8]) -> CtOption<Self> {
        let size = Self::bytes();
        let mut buffer = [0u8; MAX_FIELD_BYTES];
        let length_ok = Choice::from((bytes.len() == size) as u8);
        if bytes.len() == size {
            buffer[MAX_FIELD_BYTES - size..].copy_from_slice(bytes);
        }
        let value = U384::from_be_slice(&buffer);
        let reduced = Self::from_uint(&value);
        CtOption::new(reduced, length_ok & reduced.to_uint().ct_eq(&value))
    }

    /// Interprets up to 48 big-endian bytes as an integer and reduces it modulo r.
    pub fn from_be_bytes_reduced(bytes: &[u8]) -> Self {
        let mut buffer = [0u8; MAX_FIELD_BYTES];
        let bytes = &bytes[bytes.len().saturating_sub(MAX_FIELD_BYTES)..];
        buffer[MAX_FIELD_BYTES - bytes.len()..].copy_from_slice(bytes);
        Self::from_uint(&U384::from_be_slice(&buffer))
    }

    pub fn to_be_bytes(&self) -> Octet<SCALAR_BYTES> {
        let bytes = self.to_uint().to_be_bytes();
        Octet::from_slice_truncated(&bytes[MAX_FIELD_BYTES - Self::bytes()..])
    }

    pub(crate) fn to_le_bytes(self) -> [u8; U384::BYTES] {
        self.to_uint().to_le_bytes()
    }

    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    pub const fn double(&self) -> Self {
        self.addition(self)
    }

    pub const fn addition(&self, rhs: &Self) -> Self {
        Self(ScalarResidue::<C>::add(&self.0, &rhs.0))
    }

    pub const fn subtract(&self, rhs: &Self) -> Self {
        Self(ScalarResidue::<C>::sub(&self.0, &rhs.0))
    }

    pub const fn multiply(&self, rhs: &Self) -> Self {
        Self(ScalarResidue::<C>::mul(&self.0, &rhs.0))
    }

    pub const fn square(&self) -> Self {
        Self(self.0.square())
    }

    pub const fn negate(&self) -> Self {
        Self(ScalarResidue::<C>::neg(&self.0))
    }

    pub const fn exp(&self, e: &U384) -> Self {
        Self(self.0.pow(e))
    }

    pub fn invert(&self) -> CtOption<Self> {
        let (inv, is_some) = self.0.invert();
        CtOption::new(Self(inv), is_some.into())
    }

    /// Tonelli-Shanks, branching on the input.
    fn sqrt_vartime(&self) -> CtOption<Self> {
        let r_minus_one = C::Order::MODULUS.wrapping_sub(&U384::ONE);
        let two_adicity = r_minus_one.trailing_zeros();
        let odd_part = r_minus_one.shr_vartime(two_adicity);
        let half = r_minus_one.shr_vartime(1);
        let legendre = |v: &Self| v.exp(&half);

        if bool::from(self.is_zero()) {
            return CtOption::new(Self::ZERO, Choice::from(1));
        }
        if !bool::from(legendre(self).ct_eq(&Self::ONE)) {
            return CtOption::new(Self::ZERO, Choice::from(0));
        }

        let mut z = Self::from_u64(2);
        while bool::from(legendre(&z).ct_eq(&Self::ONE)) {
            z += Self::ONE;
        }

        let mut m = two_adicity;
        let mut c = z.exp(&odd_part);
        let mut t = self.exp(&odd_part);
        let mut root = self.exp(&odd_part.wrapping_add(&U384::ONE).shr_vartime(1));
        while !bool::from(t.ct_eq(&Self::ONE)) {
            let mut i = 0;
            let mut t2 = t;
            while !bool::from(t2.ct_eq(&Self::ONE)) {
                t2 = t2.square();
                i += 1;
            }
            let mut b = c;
            for _ in 0..m - i - 1 {
                b = b.square();
            }
            m = i;
            c = b.square();
            t *= c;
            root *= b;
        }
        CtOption::new(root, Choice::from(1))
    }
}
