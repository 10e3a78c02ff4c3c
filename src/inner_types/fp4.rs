use crate::inner_types::{fp2::Fp2, PairingCurve};

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::DefaultIsZeroes;

/// An element $c_0 + c_1 s$ of $\mathbb{F}_{p^4} = \mathbb{F}_{p^2}[s] / (s^2 - (1 + i))$
#[derive(Copy, Clone, Debug, Default)]
pub struct Fp4<C: PairingCurve> {
    pub(crate) c0: Fp2<C>,
    pub(crate) c1: Fp2<C>,
}

impl<C: PairingCurve> DefaultIsZeroes for Fp4<C> {}

impl<C: PairingCurve> From<Fp2<C>> for Fp4<C> {
    fn from(c0: Fp2<C>) -> Self {
        Self {
            c0,
            c1: Fp2::ZERO,
        }
    }
}

impl<C: PairingCurve> ConstantTimeEq for Fp4<C> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl<C: PairingCurve> ConditionallySelectable for Fp4<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            c0: Fp2::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp2::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl<C: PairingCurve> Eq for Fp4<C> {}

impl<C: PairingCurve> PartialEq for Fp4<C> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C: PairingCurve> AddAssign for Fp4<C> {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.addition(&rhs);
    }
}

ops_impl!(Add, add, +, AddAssign, add_assign, +=, LHS = Fp4, RHS = Fp4, OUTPUT = Fp4);

impl<C: PairingCurve> SubAssign for Fp4<C> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.subtract(&rhs);
    }
}

ops_impl!(Sub, sub, -, SubAssign, sub_assign, -=, LHS = Fp4, RHS = Fp4, OUTPUT = Fp4);

impl<C: PairingCurve> MulAssign for Fp4<C> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

ops_impl!(Mul, mul, *, MulAssign, mul_assign, *=, LHS = Fp4, RHS = Fp4, OUTPUT = Fp4);

impl<C: PairingCurve> MulAssign<Fp2<C>> for Fp4<C> {
    fn mul_assign(&mut self, rhs: Fp2<C>) {
        *self = self.mul_by_fp2(&rhs);
    }
}

ops_impl!(Mul, mul, *, MulAssign, mul_assign, *=, LHS = Fp4, RHS = Fp2, OUTPUT = Fp4);

impl<C: PairingCurve> Neg for Fp4<C> {
    type Output = Fp4<C>;

    fn neg(self) -> Fp4<C> {
        self.negate()
    }
}

impl<C: PairingCurve> Neg for &Fp4<C> {
    type Output = Fp4<C>;

    fn neg(self) -> Fp4<C> {
        self.negate()
    }
}

impl<C: PairingCurve> Fp4<C> {
    pub const ZERO: Self = Self {
        c0: Fp2::ZERO,
        c1: Fp2::ZERO,
    };

    pub const ONE: Self = Self {
        c0: Fp2::ONE,
        c1: Fp2::ZERO,
    };

    pub const fn new(c0: Fp2<C>, c1: Fp2<C>) -> Self {
        Self { c0, c1 }
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

    pub const fn subtract(&self, rhs: &Self) -> Self {
        Self {
            c0: self.c0.subtract(&rhs.c0),
            c1: self.c1.subtract(&rhs.c1),
        }
    }

    pub const fn double(&self) -> Self {
        Self {
            c0: self.c0.double(),
            c1: self.c1.double(),
        }
    }

    pub const fn negate(&self) -> Self {
        Self {
            c0: self.c0.negate(),
            c1: self.c1.negate(),
        }
    }

    pub const fn multiply(&self, rhs: &Self) -> Self {
        let t0 = self.c0.multiply(&rhs.c0);
        let t1 = self.c1.multiply(&rhs.c1);
        let t2 = self
            .c0
            .addition(&self.c1)
            .multiply(&rhs.c0.addition(&rhs.c1));
        Self {
            c0: t0.addition(&t1.mul_by_nonresidue()),
            c1: t2.subtract(&t0).subtract(&t1),
        }
    }

    pub const fn square(&self) -> Self {
        // (a + bs)^2 = (a + b)(a + (1 + i) b) - ab - (1 + i) ab + 2ab s
        let ab = self.c0.multiply(&self.c1);
        let c0 = self
            .c0
            .addition(&self.c1)
            .multiply(&self.c0.addition(&self.c1.mul_by_nonresidue()))
            .subtract(&ab)
            .subtract(&ab.mul_by_nonresidue());
        Self {
            c0,
            c1: ab.double(),
        }
    }

    pub const fn mul_by_fp2(&self, rhs: &Fp2<C>) -> Self {
        Self {
            c0: self.c0.multiply(rhs),
            c1: self.c1.multiply(rhs),
        }
    }

    /// Multiplication by `s`
    pub const fn mul_by_nonresidue(&self) -> Self {
        Self {
            c0: self.c1.mul_by_nonresidue(),
            c1: self.c0,
        }
    }

    /// $c_0 - c_1 s$
    pub const fn conjugate(&self) -> Self {
        Self {
            c0: self.c0,
            c1: self.c1.negate(),
        }
    }

    /// $-c_0 + c_1 s$
    pub const fn negate_conjugate(&self) -> Self {
        Self {
            c0: self.c0.negate(),
            c1: self.c1,
        }
    }

    pub fn invert(&self) -> CtOption<Self> {
        (self.c0.square() - self.c1.square().mul_by_nonresidue())
            .invert()
            .map(|t| Self {
                c0: self.c0 * t,
                c1: -(self.c1 * t),
            })
    }

    /// Raises this element to p, where `f3` is the cube of the Frobenius constant.
    pub fn frobenius_map(&self, f3: &Fp2<C>) -> Self {
        Self {
            c0: self.c0.conjugate(),
            c1: self.c1.conjugate() * f3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inner_types::{Bn254, Fp};
    use elliptic_curve::Field;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    #[test]
    fn laws() {
        let mut rng = ChaCha8Rng::from_seed([9u8; 32]);
        let s = Fp4::<Bn254>::new(Fp2::ZERO, Fp2::ONE);
        let xi = Fp2::new(Fp::ONE, Fp::ONE);
        assert_eq!(s.square(), Fp4::from(xi));
        for _ in 0..10 {
            let a = Fp4::<Bn254>::new(Fp2::random(&mut rng), Fp2::random(&mut rng));
            let b = Fp4::<Bn254>::new(Fp2::random(&mut rng), Fp2::random(&mut rng));
            assert_eq!(a.square(), a * a);
            assert_eq!(a.mul_by_nonresidue(), a * s);
            assert_eq!(a * a.invert().unwrap(), Fp4::ONE);
            assert_eq!((a + b) * b, a * b + b.square());
            assert_eq!(a.negate_conjugate(), -a.conjugate());
        }
    }
}
