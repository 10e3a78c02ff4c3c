use crate::inner_types::{fp::Fp, PairingCurve, SexticTwist};

use core::{
    borrow::Borrow,
    fmt::{self, Display, Formatter},
    iter::{Product, Sum},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use crypto_bigint::{modular::constant_mod::ResidueParams, U384};
use elliptic_curve::Field;
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::DefaultIsZeroes;

/// An element $c_0 + c_1 i$ of $\mathbb{F}_{p^2} = \mathbb{F}_p[i] / (i^2 + 1)$
#[derive(Copy, Clone, Debug, Default)]
pub struct Fp2<C: PairingCurve> {
    /// The real part
    pub(crate) c0: Fp<C>,
    /// The imaginary part
    pub(crate) c1: Fp<C>,
}

impl<C: PairingCurve> DefaultIsZeroes for Fp2<C> {}

impl<C: PairingCurve> AddAssign for Fp2<C> {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.addition(&rhs);
    }
}

ops_impl!(Add, add, +, AddAssign, add_assign, +=, LHS = Fp2, RHS = Fp2, OUTPUT = Fp2);

impl<C: PairingCurve> SubAssign for Fp2<C> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.subtract(&rhs);
    }
}

ops_impl!(Sub, sub, -, SubAssign, sub_assign, -=, LHS = Fp2, RHS = Fp2, OUTPUT = Fp2);

impl<C: PairingCurve> MulAssign for Fp2<C> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

ops_impl!(Mul, mul, *, MulAssign, mul_assign, *=, LHS = Fp2, RHS = Fp2, OUTPUT = Fp2);

impl<C: PairingCurve> MulAssign<Fp<C>> for Fp2<C> {
    fn mul_assign(&mut self, rhs: Fp<C>) {
        *self = self.mul_by_fp(&rhs);
    }
}

ops_impl!(Mul, mul, *, MulAssign, mul_assign, *=, LHS = Fp2, RHS = Fp, OUTPUT = Fp2);

impl<C: PairingCurve> Neg for Fp2<C> {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl<C: PairingCurve> Neg for &Fp2<C> {
    type Output = Fp2<C>;

    fn neg(self) -> Fp2<C> {
        -*self
    }
}

impl<C: PairingCurve> Display for Fp2<C> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Fp2({} + {} * i)", self.c0, self.c1)
    }
}

impl<C: PairingCurve> ConstantTimeEq for Fp2<C> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl<C: PairingCurve> Eq for Fp2<C> {}

impl<C: PairingCurve> PartialEq for Fp2<C> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C: PairingCurve> ConditionallySelectable for Fp2<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            c0: Fp::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl<C: PairingCurve, T: Borrow<Fp2<C>>> Sum<T> for Fp2<C> {
    fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x.borrow())
    }
}

impl<C: PairingCurve, T: Borrow<Fp2<C>>> Product<T> for Fp2<C> {
    fn product<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x.borrow())
    }
}

impl<C: PairingCurve> Field for Fp2<C> {
    const ZERO: Self = Self::ZERO;
    const ONE: Self = Self::ONE;

    fn random(mut rng: impl RngCore) -> Self {
        Self {
            c0: Fp::random(&mut rng),
            c1: Fp::random(&mut rng),
        }
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
        self.sqrt()
    }
}

impl<C: PairingCurve> From<Fp<C>> for Fp2<C> {
    fn from(f: Fp<C>) -> Self {
        Self {
            c0: f,
            c1: Fp::ZERO,
        }
    }
}

impl<C: PairingCurve> Fp2<C> {
    pub const ZERO: Self = Self {
        c0: Fp::ZERO,
        c1: Fp::ZERO,
    };

    /// The multiplicative identity element
    pub const ONE: Self = Self {
        c0: Fp::ONE,
        c1: Fp::ZERO,
    };

    pub const fn new(c0: Fp<C>, c1: Fp<C>) -> Self {
        Self { c0, c1 }
    }

    pub(crate) const fn from_uints(c0: &U384, c1: &U384) -> Self {
        Self {
            c0: Fp::from_uint(c0),
            c1: Fp::from_uint(c1),
        }
    }

    /// The `B` of the sextic twist: $B / (1 + i)$ for D-type, $B (1 + i)$ for M-type.
    pub fn twist_b() -> Self {
        let b = Self::from(Fp::B);
        match C::CONFIG.twist {
            SexticTwist::DType => b.div_by_nonresidue(),
            SexticTwist::MType => b.mul_by_nonresidue(),
        }
    }

    /// $(1 + i)^{(p - 1) / 6}$
    pub fn frobenius_constant() -> Self {
        let [c0, c1] = C::CONFIG.frobenius;
        Self::from_uints(&c0, &c1)
    }

    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    pub fn is_one(&self) -> Choice {
        self.c0.is_one() & self.c1.is_zero()
    }

    pub const fn addition(&self, rhs: &Self) -> Self {
        Self {
            c0: self.c0.addition(&rhs.c0),
            c1: self.c1.addition(&rhs.c1),
        }
    }

    pub const fn double(&self) -> Self {
        Self {
            c0: self.c0.double(),
            c1: self.c1.double(),
        }
    }

    pub const fn subtract(&self, rhs: &Self) -> Self {
        Self {
            c0: self.c0.subtract(&rhs.c0),
            c1: self.c1.subtract(&rhs.c1),
        }
    }

    pub const fn multiply(&self, rhs: &Self) -> Self {
        // Karatsuba: c1 = (a0 + a1)(b0 + b1) - a0 b0 - a1 b1
        let t0 = self.c0.multiply(&rhs.c0);
        let t1 = self.c1.multiply(&rhs.c1);
        let t2 = self.c0.addition(&self.c1).multiply(&rhs.c0.addition(&rhs.c1));
        Self {
            c0: t0.subtract(&t1),
            c1: t2.subtract(&t0).subtract(&t1),
        }
    }

    pub const fn square(&self) -> Self {
        // a = (c0 + c1)(c0 - c1)
        // b = 2 * c0 * c1
        Self {
            c0: self
                .c0
                .addition(&self.c1)
                .multiply(&self.c0.subtract(&self.c1)),
            c1: self.c0.multiply(&self.c1).double(),
        }
    }

    pub const fn negate(&self) -> Self {
        Self {
            c0: self.c0.negate(),
            c1: self.c1.negate(),
        }
    }

    pub const fn mul_by_fp(&self, rhs: &Fp<C>) -> Self {
        Self {
            c0: self.c0.multiply(rhs),
            c1: self.c1.multiply(rhs),
        }
    }

    /// Multiplication by the quadratic non-residue $1 + i$
    pub const fn mul_by_nonresidue(&self) -> Self {
        Self {
            c0: self.c0.subtract(&self.c1),
            c1: self.c0.addition(&self.c1),
        }
    }

    /// Multiplication by $1 - i$, which is $2 / (1 + i)$
    pub const fn mul_by_nonresidue_conjugate(&self) -> Self {
        Self {
            c0: self.c0.addition(&self.c1),
            c1: self.c1.subtract(&self.c0),
        }
    }

    /// Division by the quadratic non-residue $1 + i$
    pub fn div_by_nonresidue(&self) -> Self {
        let t = self.mul_by_nonresidue_conjugate();
        Self {
            c0: t.c0.div2(),
            c1: t.c1.div2(),
        }
    }

    /// Conjugation of this element, which is also the Frobenius map
    pub const fn conjugate(&self) -> Self {
        Self {
            c0: self.c0,
            c1: self.c1.negate(),
        }
    }

    pub fn invert(&self) -> CtOption<Self> {
        (self.c0.square() + self.c1.square()).invert().map(|t| Self {
            c0: self.c0 * t,
            c1: self.c1 * -t,
        })
    }

    /// Raises the element to a public integer power.
    pub fn exp(&self, exponent: &U384) -> Self {
        self.pow_vartime(exponent.as_words())
    }

    /// Returns true whenever `self` is a square in the field
    /// using Euler's criterion on the norm.
    pub fn is_square(&self) -> Choice {
        (self.c0.square() + self.c1.square()).is_square()
    }

    pub fn sqrt(&self) -> CtOption<Self> {
        // Algorithm 9, https://eprint.iacr.org/2012/685.pdf
        // with constant time modifications.
        let modulus = C::Base::MODULUS;

        CtOption::new(Self::ZERO, self.is_zero()).or_else(|| {
            // a1 = self^((p - 3) / 4)
            let a1 = self.exp(&modulus.wrapping_sub(&U384::from_u8(3)).shr_vartime(2));

            // alpha = a1^2 * self = self^((p - 1) / 2)
            let alpha = a1.square() * self;

            // x0 = self^((p + 1) / 4)
            let x0 = a1 * self;

            // alpha = -1 means the root is x0 * i
            CtOption::new(
                Self {
                    c0: -x0.c1,
                    c1: x0.c0,
                },
                alpha.ct_eq(&-Self::ONE),
            )
            // Otherwise the root is (1 + alpha)^((p - 1) / 2) * x0
            .or_else(|| {
                CtOption::new(
                    (alpha + Self::ONE).exp(&modulus.wrapping_sub(&U384::ONE).shr_vartime(1))
                        * x0,
                    Choice::from(1),
                )
            })
            .and_then(|sqrt| CtOption::new(sqrt, sqrt.square().ct_eq(self)))
        })
    }

    /// Writes `c0 | c1` big-endian; `out` holds two field elements.
    pub fn write_be_bytes(&self, out: &mut [u8]) {
        let (c0, c1) = out.split_at_mut(out.len() / 2);
        self.c0.write_be_bytes(c0);
        self.c1.write_be_bytes(c1);
    }

    /// Reads `c0 | c1` big-endian.
    pub fn from_be_bytes(bytes: &[u8]) -> CtOption<Self> {
        let (c0, c1) = bytes.split_at(bytes.len() / 2);
        Fp::from_be_bytes(c0).and_then(|c0| Fp::from_be_bytes(c1).map(|c1| Self { c0, c1 }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inner_types::{Bls381, Bn254, ToyBls};
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    fn laws<C: PairingCurve>() {
        let mut rng = ChaCha8Rng::from_seed([3u8; 32]);
        let i = Fp2::<C>::new(Fp::ZERO, Fp::ONE);
        assert_eq!(i.square(), -Fp2::ONE);
        let xi = Fp2::<C>::new(Fp::ONE, Fp::ONE);
        for _ in 0..10 {
            let a = Fp2::<C>::random(&mut rng);
            let b = Fp2::<C>::random(&mut rng);
            assert_eq!(a.square(), a * a);
            assert_eq!((a + b) * (a - b), a.square() - b.square());
            assert_eq!(a.mul_by_nonresidue(), a * xi);
            assert_eq!(a.div_by_nonresidue() * xi, a);
            assert_eq!(a.mul_by_nonresidue_conjugate(), a.div_by_nonresidue().double());
            assert_eq!(a * a.invert().unwrap(), Fp2::ONE);
            assert_eq!((a * b).conjugate(), a.conjugate() * b.conjugate());
            let root = a.square().sqrt().unwrap();
            assert!(root == a || root == -a);

            let (is_square, root) = Fp2::sqrt_ratio(&(a.square() * b), &b);
            assert!(bool::from(is_square));
            assert_eq!(root.square(), a.square());
        }
        assert!(!bool::from(Fp2::<C>::sqrt_ratio(&Fp2::ONE, &Fp2::ZERO).0));
    }

    #[test]
    fn tower_laws() {
        laws::<Bn254>();
        laws::<Bls381>();
        laws::<ToyBls>();
    }

    #[test]
    fn frobenius_constant_order() {
        // f^6 = (1 + i)^(p - 1) = conj(1 + i) / (1 + i)
        let f = Fp2::<Bn254>::frobenius_constant();
        assert_ne!(f, Fp2::ONE);
        let xi = Fp2::<Bn254>::new(Fp::ONE, Fp::ONE);
        let f6 = f.square().square() * f.square();
        assert_eq!(f6 * xi, xi.conjugate());
    }

    #[test]
    fn bytes() {
        let mut rng = ChaCha8Rng::from_seed([5u8; 32]);
        let a = Fp2::<Bls381>::random(&mut rng);
        let mut out = [0u8; 96];
        a.write_be_bytes(&mut out);
        assert_eq!(Fp2::<Bls381>::from_be_bytes(&out).unwrap(), a);
    }
}
