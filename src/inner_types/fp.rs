use crate::inner_types::{PairingCurve, LIMBS, MAX_FIELD_BYTES};
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

pub(crate) type FpResidue<C> = Residue<<C as PairingCurve>::Base, LIMBS>;

/// An element of the base field, held in Montgomery form.
#[derive(Copy, Clone, Debug, Default)]
pub struct Fp<C: PairingCurve>(pub(crate) FpResidue<C>);

impl<C: PairingCurve> DefaultIsZeroes for Fp<C> {}

impl<C: PairingCurve> Display for Fp<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self)
    }
}

impl<C: PairingCurve> LowerHex for Fp<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.to_uint())
    }
}

impl<C: PairingCurve> UpperHex for Fp<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.to_uint())
    }
}

impl<C: PairingCurve> From<u64> for Fp<C> {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl<C: PairingCurve> ConstantTimeEq for Fp<C> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl<C: PairingCurve> ConditionallySelectable for Fp<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(FpResidue::<C>::conditional_select(&a.0, &b.0, choice))
    }
}

impl<C: PairingCurve> PartialEq for Fp<C> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C: PairingCurve> Eq for Fp<C> {}

impl<C: PairingCurve> AddAssign for Fp<C> {
    fn add_assign(&mut self, rhs: Fp<C>) {
        *self = self.addition(&rhs);
    }
}

ops_impl!(Add, add, +, AddAssign, add_assign, +=, LHS = Fp, RHS = Fp, OUTPUT = Fp);

impl<C: PairingCurve> SubAssign for Fp<C> {
    fn sub_assign(&mut self, rhs: Fp<C>) {
        *self = self.subtract(&rhs);
    }
}

ops_impl!(Sub, sub, -, SubAssign, sub_assign, -=, LHS = Fp, RHS = Fp, OUTPUT = Fp);

impl<C: PairingCurve> MulAssign for Fp<C> {
    fn mul_assign(&mut self, rhs: Fp<C>) {
        *self = self.multiply(&rhs);
    }
}

ops_impl!(Mul, mul, *, MulAssign, mul_assign, *=, LHS = Fp, RHS = Fp, OUTPUT = Fp);

impl<C: PairingCurve> Neg for &Fp<C> {
    type Output = Fp<C>;

    fn neg(self) -> Fp<C> {
        self.negate()
    }
}

impl<C: PairingCurve> Neg for Fp<C> {
    type Output = Fp<C>;

    fn neg(self) -> Fp<C> {
        self.negate()
    }
}

impl<C: PairingCurve, T: Borrow<Fp<C>>> Sum<T> for Fp<C> {
    fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, item| acc + item.borrow())
    }
}

impl<C: PairingCurve, T: Borrow<Fp<C>>> Product<T> for Fp<C> {
    fn product<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, item| acc * item.borrow())
    }
}

impl<C: PairingCurve> Field for Fp<C> {
    const ZERO: Self = Self(FpResidue::<C>::ZERO);
    const ONE: Self = Self(FpResidue::<C>::ONE);

    fn random(mut rng: impl RngCore) -> Self {
        let mut bytes = [0u8; 2 * U384::BYTES];
        rng.fill_bytes(&mut bytes);
        Self::from_wide_bytes(&bytes)
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

    fn sqrt_ratio(u: &Self, v: &Self) -> (Choice, Self) {
        // p = 3 mod 4 with Z = -1, so sqrt(-Z) = 1 and y2 = y1.
        // (p - 3) / 4
        let c1 = C::Base::MODULUS.shr_vartime(2);
        let tv2 = u.multiply(v);
        let y1 = v.square().multiply(&tv2).exp(&c1).multiply(&tv2);
        let is_qr = y1.square().multiply(v).ct_eq(u);
        (is_qr, y1)
    }

    fn sqrt(&self) -> CtOption<Self> {
        self.sqrt()
    }
}

impl<C: PairingCurve> Fp<C> {
    /// The additive identity
    pub const ZERO: Self = Self(FpResidue::<C>::ZERO);
    /// The multiplicative identity
    pub const ONE: Self = Self(FpResidue::<C>::ONE);
    /// The curve coefficient `B`
    pub const B: Self = Self::from_u64(C::CONFIG.b);
    /// `3B` for the complete addition formulas
    pub const B3: Self = Self::from_u64(3 * C::CONFIG.b);

    /// Size of the encoded field element
    pub const fn bytes() -> usize {
        C::CONFIG.modulus_bytes
    }

    pub const fn from_u64(value: u64) -> Self {
        Self(FpResidue::<C>::new(&U384::from_u64(value)))
    }

    /// Reduces `value` modulo p.
    pub const fn from_uint(value: &U384) -> Self {
        Self(FpResidue::<C>::new(value))
    }

    /// The canonical integer representative.
    pub const fn to_uint(&self) -> U384 {
        self.0.retrieve()
    }

    /// Interprets up to 48 big-endian bytes as an integer and reduces it modulo p.
    pub fn from_be_bytes_reduced(bytes: &[u8]) -> Self {
        let mut buffer = [0u8; MAX_FIELD_BYTES];
        let bytes = &bytes[bytes.len().saturating_sub(MAX_FIELD_BYTES)..];
        buffer[MAX_FIELD_BYTES - bytes.len()..].copy_from_slice(bytes);
        Self::from_uint(&U384::from_be_slice(&buffer))
    }

    /// Decodes exactly [`Fp::bytes`] big-endian bytes, rejecting values not below p.
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

    /// Writes the element as big-endian bytes into `out`, which must hold
    /// [`Fp::bytes`] bytes.
    pub fn write_be_bytes(&self, out: &mut [u8]) {
        let bytes = self.to_uint().to_be_bytes();
        out.copy_from_slice(&bytes[MAX_FIELD_BYTES - out.len()..]);
    }

    /// Reduces 96 uniformly random bytes, giving a negligible bias.
    pub(crate) fn from_wide_bytes(bytes: &[u8; 2 * U384::BYTES]) -> Self {
        let hi = U384::from_be_slice(&bytes[..U384::BYTES]);
        let lo = U384::from_be_slice(&bytes[U384::BYTES..]);
        let (value, _) = U384::const_rem_wide((lo, hi), &C::Base::MODULUS);
        Self::from_uint(&value)
    }

    pub const fn addition(&self, rhs: &Self) -> Self {
        Self(FpResidue::<C>::add(&self.0, &rhs.0))
    }

    pub const fn double(&self) -> Self {
        Self(FpResidue::<C>::add(&self.0, &self.0))
    }

    pub const fn subtract(&self, rhs: &Self) -> Self {
        Self(FpResidue::<C>::sub(&self.0, &rhs.0))
    }

    pub const fn negate(&self) -> Self {
        Self(FpResidue::<C>::neg(&self.0))
    }

    pub const fn multiply(&self, rhs: &Self) -> Self {
        Self(FpResidue::<C>::mul(&self.0, &rhs.0))
    }

    pub const fn square(&self) -> Self {
        Self(self.0.square())
    }

    /// Halves the element
    pub fn div2(&self) -> Self {
        Self(self.0.div_by_2())
    }

    pub fn mul_by_3b(&self) -> Self {
        self.multiply(&Self::B3)
    }

    pub fn invert(&self) -> CtOption<Self> {
        let (inv, is_some) = self.0.invert();
        CtOption::new(Self(inv), is_some.into())
    }

    /// Raises the element to an integer power.
    pub const fn exp(&self, exponent: &U384) -> Self {
        Self(self.0.pow(exponent))
    }

    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    pub fn is_one(&self) -> Choice {
        self.ct_eq(&Self::ONE)
    }

    /// Parity of the canonical representative
    pub fn is_odd(&self) -> Choice {
        Choice::from((self.to_uint().as_limbs()[0].0 & 1) as u8)
    }

    /// The lowest machine word of the canonical representative.
    pub(crate) fn low_word(&self) -> u64 {
        self.to_uint().as_limbs()[0].0 as u64
    }

    /// Returns true whenever `self` is a square in the field
    /// using Euler's criterion.
    pub fn is_square(&self) -> Choice {
        let res = self.exp(&C::Base::MODULUS.shr_vartime(1));
        res.is_zero() | res.is_one()
    }

    /// Square root for p = 3 mod 4, which holds for every supported curve.
    pub fn sqrt(&self) -> CtOption<Self> {
        // (p + 1) / 4 = floor(p / 4) + 1
        let exponent = C::Base::MODULUS.shr_vartime(2).wrapping_add(&U384::ONE);
        let root = self.exp(&exponent);
        CtOption::new(root, root.square().ct_eq(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inner_types::{Bls381, Bn254, ToyBn};
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    fn field_laws<C: PairingCurve>() {
        let mut rng = ChaCha8Rng::from_seed([7u8; 32]);
        for _ in 0..10 {
            let a = Fp::<C>::random(&mut rng);
            let b = Fp::<C>::random(&mut rng);
            assert_eq!(a + b - b, a);
            assert_eq!((a + b) * a, a.square() + b * a);
            assert_eq!(a.double(), a + a);
            assert_eq!(-(-a), a);
            assert_eq!(a.div2().double(), a);
            if !bool::from(a.is_zero()) {
                assert_eq!(a * a.invert().unwrap(), Fp::ONE);
            }
            let sq = a.square();
            assert!(bool::from(sq.is_square()));
            let root = sq.sqrt().unwrap();
            assert!(root == a || root == -a);

            let (is_square, root) = Fp::sqrt_ratio(&(sq * b), &b);
            assert!(bool::from(is_square));
            assert_eq!(root.square(), sq);
        }
        assert!(bool::from(Fp::<C>::ZERO.invert().is_none()));
        assert!(!bool::from(Fp::<C>::sqrt_ratio(&Fp::ONE, &Fp::ZERO).0));
        let (is_square, root) = Fp::<C>::sqrt_ratio(&Fp::ZERO, &Fp::ONE);
        assert!(bool::from(is_square));
        assert_eq!(root, Fp::ZERO);
    }

    #[test]
    fn laws() {
        field_laws::<Bn254>();
        field_laws::<Bls381>();
        field_laws::<ToyBn>();
    }

    #[test]
    fn bytes() {
        let mut rng = ChaCha8Rng::from_seed([1u8; 32]);
        let a = Fp::<Bn254>::random(&mut rng);
        let mut out = [0u8; 32];
        a.write_be_bytes(&mut out);
        assert_eq!(Fp::<Bn254>::from_be_bytes(&out).unwrap(), a);
        assert_eq!(Fp::<Bn254>::from_be_bytes_reduced(&out), a);
        assert!(bool::from(Fp::<Bn254>::from_be_bytes(&out[1..]).is_none()));
        assert!(bool::from(Fp::<Bn254>::from_be_bytes(&[0xffu8; 32]).is_none()));

        let mut toy = [0u8; 9];
        Fp::<ToyBn>::from_u64(0x1234).write_be_bytes(&mut toy);
        assert_eq!(toy, [0, 0, 0, 0, 0, 0, 0, 0x12, 0x34]);
    }

    #[test]
    fn non_residue() {
        // -1 is not a square when p = 3 mod 4
        assert!(!bool::from((-Fp::<Bls381>::ONE).is_square()));
        assert!(bool::from((-Fp::<Bls381>::ONE).sqrt().is_none()));

        // a non-square ratio yields sqrt(-u/v)
        let (is_square, root) = Fp::<Bls381>::sqrt_ratio(&-Fp::ONE, &Fp::from_u64(4));
        assert!(!bool::from(is_square));
        assert_eq!(root.square() * Fp::from_u64(4), Fp::ONE);
    }
}
