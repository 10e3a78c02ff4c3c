use crate::inner_types::{fp2::Fp2, fp4::Fp4, PairingCurve, SexticTwist};

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::DefaultIsZeroes;

/// Represents an element $c_0 + c_1 w + c_2 w^2$ of
/// $\mathbb{F}_{p^{12}} = \mathbb{F}_{p^4}[w] / (w^3 - s)$
#[derive(Copy, Clone, Debug, Default)]
pub struct Fp12<C: PairingCurve> {
    pub(crate) c0: Fp4<C>,
    pub(crate) c1: Fp4<C>,
    pub(crate) c2: Fp4<C>,
}

impl<C: PairingCurve> From<Fp4<C>> for Fp12<C> {
    fn from(c0: Fp4<C>) -> Self {
        Self {
            c0,
            c1: Fp4::ZERO,
            c2: Fp4::ZERO,
        }
    }
}

impl<C: PairingCurve> DefaultIsZeroes for Fp12<C> {}

impl<C: PairingCurve> ConstantTimeEq for Fp12<C> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1) & self.c2.ct_eq(&other.c2)
    }
}

impl<C: PairingCurve> ConditionallySelectable for Fp12<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            c0: Fp4::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp4::conditional_select(&a.c1, &b.c1, choice),
            c2: Fp4::conditional_select(&a.c2, &b.c2, choice),
        }
    }
}

impl<C: PairingCurve> Eq for Fp12<C> {}

impl<C: PairingCurve> PartialEq for Fp12<C> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C: PairingCurve> AddAssign for Fp12<C> {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.addition(&rhs);
    }
}

ops_impl!(Add, add, +, AddAssign, add_assign, +=, LHS = Fp12, RHS = Fp12, OUTPUT = Fp12);

impl<C: PairingCurve> SubAssign for Fp12<C> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.subtract(&rhs);
    }
}

ops_impl!(Sub, sub, -, SubAssign, sub_assign, -=, LHS = Fp12, RHS = Fp12, OUTPUT = Fp12);

impl<C: PairingCurve> Neg for Fp12<C> {
    type Output = Fp12<C>;

    fn neg(self) -> Fp12<C> {
        -&self
    }
}

impl<C: PairingCurve> Neg for &Fp12<C> {
    type Output = Fp12<C>;

    fn neg(self) -> Fp12<C> {
        Fp12 {
            c0: self.c0.negate(),
            c1: self.c1.negate(),
            c2: self.c2.negate(),
        }
    }
}

impl<C: PairingCurve> MulAssign for Fp12<C> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

ops_impl!(Mul, mul, *, MulAssign, mul_assign, *=, LHS = Fp12, RHS = Fp12, OUTPUT = Fp12);

impl<C: PairingCurve> Fp12<C> {
    pub const ZERO: Self = Self {
        c0: Fp4::ZERO,
        c1: Fp4::ZERO,
        c2: Fp4::ZERO,
    };

    pub const ONE: Self = Self {
        c0: Fp4::ONE,
        c1: Fp4::ZERO,
        c2: Fp4::ZERO,
    };

    pub const fn new(c0: Fp4<C>, c1: Fp4<C>, c2: Fp4<C>) -> Self {
        Self { c0, c1, c2 }
    }

    pub fn random(mut rng: impl RngCore) -> Self {
        use elliptic_curve::Field;

        let mut limb = || Fp4::new(Fp2::random(&mut rng), Fp2::random(&mut rng));
        Self {
            c0: limb(),
            c1: limb(),
            c2: limb(),
        }
    }

    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero() & self.c2.is_zero()
    }

    pub fn is_one(&self) -> Choice {
        self.c0.is_one() & self.c1.is_zero() & self.c2.is_zero()
    }

    pub const fn addition(&self, rhs: &Self) -> Self {
        Self {
            c0: self.c0.addition(&rhs.c0),
            c1: self.c1.addition(&rhs.c1),
            c2: self.c2.addition(&rhs.c2),
        }
    }

    pub const fn subtract(&self, rhs: &Self) -> Self {
        Self {
            c0: self.c0.subtract(&rhs.c0),
            c1: self.c1.subtract(&rhs.c1),
            c2: self.c2.subtract(&rhs.c2),
        }
    }

    pub fn multiply(&self, rhs: &Self) -> Self {
        // Karatsuba over the cubic extension
        let v0 = self.c0 * rhs.c0;
        let v1 = self.c1 * rhs.c1;
        let v2 = self.c2 * rhs.c2;

        let t0 = (self.c1 + self.c2) * (rhs.c1 + rhs.c2) - v1 - v2;
        let t1 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1) - v0 - v1;
        let t2 = (self.c0 + self.c2) * (rhs.c0 + rhs.c2) - v0 - v2;

        Self {
            c0: v0 + t0.mul_by_nonresidue(),
            c1: t1 + v2.mul_by_nonresidue(),
            c2: t2 + v1,
        }
    }

    pub fn square(&self) -> Self {
        // Chung-Hasan SQR3
        let a = self.c0.square();
        let bc = (self.c1 * self.c2).double();
        let cc = self.c2.square();
        let ab = (self.c0 * self.c1).double();
        let s = (self.c0 + self.c1 + self.c2).square();

        Self {
            c0: a + bc.mul_by_nonresidue(),
            c1: cc.mul_by_nonresidue() + ab,
            c2: s - a - bc - cc - ab,
        }
    }

    /// Squaring for elements of the cyclotomic subgroup, i.e. after the easy
    /// part of the final exponentiation. Wrong for any other input.
    pub fn unitary_square(&self) -> Self {
        let a = self.c0.square();
        let c0 = a.double() + a + self.c0.negate_conjugate().double();

        let b = self.c2.square().mul_by_nonresidue();
        let c1 = self.c1.conjugate().double() + b.double() + b;

        let c = self.c1.square();
        let c2 = self.c2.negate_conjugate().double() + c.double() + c;

        Self { c0, c1, c2 }
    }

    /// The $p^6$ power map, which inverts unitary elements.
    pub fn conjugate(&self) -> Self {
        Self {
            c0: self.c0.conjugate(),
            c1: self.c1.negate_conjugate(),
            c2: self.c2.conjugate(),
        }
    }

    pub fn invert(&self) -> CtOption<Self> {
        let f0 = self.c0.square() - (self.c1 * self.c2).mul_by_nonresidue();
        let f1 = self.c2.square().mul_by_nonresidue() - self.c0 * self.c1;
        let f2 = self.c1.square() - self.c0 * self.c2;
        let norm =
            (self.c1 * f2).mul_by_nonresidue() + self.c0 * f0 + (self.c2 * f1).mul_by_nonresidue();

        norm.invert().map(|t| Self {
            c0: f0 * t,
            c1: f1 * t,
            c2: f2 * t,
        })
    }

    /// Raises to the power p given the Frobenius constant `f`.
    pub fn frobenius_map(&self, f: &Fp2<C>) -> Self {
        let f2 = f.square();
        let f3 = f2 * f;
        Self {
            c0: self.c0.frobenius_map(&f3),
            c1: self.c1.frobenius_map(&f3).mul_by_fp2(f),
            c2: self.c2.frobenius_map(&f3).mul_by_fp2(&f2),
        }
    }

    /// Applies [`Fp12::frobenius_map`] `n` times.
    pub fn frobenius_pow(&self, f: &Fp2<C>, n: usize) -> Self {
        (0..n).fold(*self, |acc, _| acc.frobenius_map(f))
    }

    /// Trace over $\mathbb{F}_{p^4}$
    pub fn trace(&self) -> Fp4<C> {
        self.c0.double() + self.c0
    }

    /// Exponentiation by a public exponent, for unitary elements only.
    pub fn pow_unitary(&self, exponent: u128) -> Self {
        let mut acc = Self::ONE;
        for i in (0..u128::BITS - exponent.leading_zeros()).rev() {
            acc = acc.unitary_square();
            if (exponent >> i) & 1 == 1 {
                acc *= self;
            }
        }
        acc
    }

    /// Exponentiation by a public exponent given as little-endian words.
    pub fn pow_vartime(&self, exponent: &[u64]) -> Self {
        let mut acc = Self::ONE;
        for word in exponent.iter().rev() {
            for i in (0..64).rev() {
                acc = acc.square();
                if (word >> i) & 1 == 1 {
                    acc *= self;
                }
            }
        }
        acc
    }

    /// Multiplies by a line value produced by the line function.
    ///
    /// D-type lines are $(a, (b_0, 0), 0)$ and M-type lines are $(a, 0, (0, c_1))$.
    pub fn mul_by_line(&self, line: &Self) -> Self {
        let a = line.c0;
        match C::CONFIG.twist {
            SexticTwist::DType => {
                let b0 = line.c1.c0;
                Self {
                    c0: self.c0 * a + self.c2.mul_by_fp2(&b0).mul_by_nonresidue(),
                    c1: self.c0.mul_by_fp2(&b0) + self.c1 * a,
                    c2: self.c1.mul_by_fp2(&b0) + self.c2 * a,
                }
            }
            SexticTwist::MType => {
                let c1 = line.c2.c1;
                let xi = |v: Fp4<C>| Fp4::new(v.c0.mul_by_nonresidue(), v.c1.mul_by_nonresidue());
                Self {
                    c0: self.c0 * a + xi(self.c1.mul_by_fp2(&c1)),
                    c1: self.c1 * a + xi(self.c2.mul_by_fp2(&c1)),
                    c2: self.c2 * a + self.c0.mul_by_fp2(&c1).mul_by_nonresidue(),
                }
            }
        }
    }

    /// The product of two line values.
    pub fn line_product(&self, other: &Self) -> Self {
        let a = self.c0 * other.c0;
        match C::CONFIG.twist {
            SexticTwist::DType => {
                let (b, bb) = (self.c1.c0, other.c1.c0);
                Self {
                    c0: a,
                    c1: self.c0.mul_by_fp2(&bb) + other.c0.mul_by_fp2(&b),
                    c2: Fp4::from(b * bb),
                }
            }
            SexticTwist::MType => {
                let (c, cc) = (self.c2.c1, other.c2.c1);
                Self {
                    c0: a,
                    c1: Fp4::new(Fp2::ZERO, (c * cc).mul_by_nonresidue()),
                    c2: (self.c0.mul_by_fp2(&cc) + other.c0.mul_by_fp2(&c)).mul_by_nonresidue(),
                }
            }
        }
    }

    /// Writes the twelve base field coefficients big-endian, `out` holds
    /// twelve field elements.
    pub fn write_be_bytes(&self, out: &mut [u8]) {
        let size = out.len() / 6;
        let coefficients = [
            self.c0.c0, self.c0.c1, self.c1.c0, self.c1.c1, self.c2.c0, self.c2.c1,
        ];
        for (c, chunk) in coefficients.iter().zip(out.chunks_exact_mut(size)) {
            c.write_be_bytes(chunk);
        }
    }

    pub fn from_be_bytes(bytes: &[u8]) -> CtOption<Self> {
        let size = bytes.len() / 6;
        if size == 0 || bytes.len() % 6 != 0 {
            return CtOption::new(Self::ZERO, Choice::from(0));
        }
        let mut coefficients = [Fp2::ZERO; 6];
        let mut valid = Choice::from(1);
        for (c, chunk) in coefficients.iter_mut().zip(bytes.chunks_exact(size)) {
            let decoded = Fp2::from_be_bytes(chunk);
            valid &= decoded.is_some();
            *c = decoded.unwrap_or(Fp2::ZERO);
        }
        let [a0, a1, b0, b1, c0, c1] = coefficients;
        CtOption::new(
            Self {
                c0: Fp4::new(a0, a1),
                c1: Fp4::new(b0, b1),
                c2: Fp4::new(c0, c1),
            },
            valid,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inner_types::{Bls381, Bn254, ToyBlsNeg, ToyBnM};
    use elliptic_curve::Field;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    fn unitary<C: PairingCurve>(f: &Fp12<C>) -> Fp12<C> {
        let f = f.conjugate() * f.invert().unwrap();
        let q = Fp2::frobenius_constant();
        f.frobenius_pow(&q, 2) * f
    }

    fn sparse_line<C: PairingCurve>(rng: &mut ChaCha8Rng) -> Fp12<C> {
        let a = Fp4::new(Fp2::random(&mut *rng), Fp2::random(&mut *rng));
        let x = Fp2::random(&mut *rng);
        match C::CONFIG.twist {
            SexticTwist::DType => Fp12::new(a, Fp4::from(x), Fp4::ZERO),
            SexticTwist::MType => Fp12::new(a, Fp4::ZERO, Fp4::new(Fp2::ZERO, x)),
        }
    }

    fn tower<C: PairingCurve>() {
        let mut rng = ChaCha8Rng::from_seed([11u8; 32]);
        let w = Fp12::<C>::new(Fp4::ZERO, Fp4::ONE, Fp4::ZERO);
        let s = Fp4::new(Fp2::ZERO, Fp2::ONE);
        assert_eq!(w.square() * w, Fp12::from(s));

        let q = Fp2::<C>::frobenius_constant();
        for _ in 0..5 {
            let a = Fp12::<C>::random(&mut rng);
            let b = Fp12::<C>::random(&mut rng);
            assert_eq!(a.square(), a * a);
            assert_eq!((a + b) * (a - b), a.square() - b.square());
            assert_eq!(a * a.invert().unwrap(), Fp12::ONE);
            assert_eq!(a.frobenius_pow(&q, 12), a);
            assert_eq!((a * b).frobenius_map(&q), a.frobenius_map(&q) * b.frobenius_map(&q));
            assert_eq!(a.frobenius_pow(&q, 6), a.conjugate());

            let u = unitary(&a);
            assert_eq!(u.unitary_square(), u.square());
            assert_eq!(u * u.conjugate(), Fp12::ONE);
            assert_eq!(u.pow_unitary(13), u.pow_vartime(&[13]));

            let l1 = sparse_line::<C>(&mut rng);
            let l2 = sparse_line::<C>(&mut rng);
            assert_eq!(a.mul_by_line(&l1), a * l1);
            assert_eq!(l1.line_product(&l2), l1 * l2);
        }
    }

    #[test]
    fn tower_laws() {
        tower::<Bn254>();
        tower::<Bls381>();
        tower::<ToyBnM>();
        tower::<ToyBlsNeg>();
    }

    #[test]
    fn bytes() {
        let mut rng = ChaCha8Rng::from_seed([12u8; 32]);
        let a = Fp12::<Bn254>::random(&mut rng);
        let mut out = [0u8; 12 * 32];
        a.write_be_bytes(&mut out);
        assert_eq!(Fp12::<Bn254>::from_be_bytes(&out).unwrap(), a);
        assert!(bool::from(Fp12::<Bn254>::from_be_bytes(&out[1..]).is_none()));

        let mut first = [0u8; 32];
        a.c0.c0.c0.write_be_bytes(&mut first);
        assert_eq!(&out[..32], &first[..]);
    }
}
