use crate::helpers::{Octet, GT_BYTES};
use crate::inner_types::{
    fp::Fp, fp12::Fp12, fp2::Fp2, fp4::Fp4, g2::twist_frobenius, G1Affine, G2Affine,
    G2Projective, PairingCurve, Scalar, SexticTwist, ATE_BITS,
};
use crate::PairingError;
use core::{
    borrow::Borrow,
    fmt::{self, Display, Formatter, LowerHex},
    iter::Sum,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use crypto_bigint::modular::constant_mod::ResidueParams;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::DefaultIsZeroes;

/// Represents results of a Miller Loop, one of the most expensive operations
/// of the pairing function. `MillerLoopResult` cannot be compared with each other
/// until `.final_exponentiation()` is called, which is also expensive.
#[derive(Copy, Clone, Debug)]
pub struct MillerLoopResult<C: PairingCurve>(pub(crate) Fp12<C>);

impl<C: PairingCurve> Default for MillerLoopResult<C> {
    fn default() -> Self {
        Self(Fp12::ONE)
    }
}

impl<C: PairingCurve> DefaultIsZeroes for MillerLoopResult<C> {}

impl<C: PairingCurve> ConditionallySelectable for MillerLoopResult<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl<C: PairingCurve> AddAssign for MillerLoopResult<C> {
    fn add_assign(&mut self, rhs: Self) {
        self.0 *= rhs.0;
    }
}

ops_impl!(Add, add, +, AddAssign, add_assign, +=, LHS = MillerLoopResult, RHS = MillerLoopResult, OUTPUT = MillerLoopResult);

impl<C: PairingCurve> MillerLoopResult<C> {
    /// Raises the Miller value to $(p^{12} - 1) / r$. See [`fexp`].
    pub fn final_exponentiation(&self) -> Gt<C> {
        fexp(self)
    }
}

/// A point on the twist that line evaluation doubles or adds into.
#[derive(Copy, Clone, Debug, Default)]
pub struct LineAccumulator<C: PairingCurve>(G2Projective<C>);

impl<C: PairingCurve> From<&G2Affine<C>> for LineAccumulator<C> {
    fn from(q: &G2Affine<C>) -> Self {
        Self(G2Projective::from(q))
    }
}

impl<C: PairingCurve> LineAccumulator<C> {
    /// The current value of the accumulator.
    pub fn point(&self) -> G2Projective<C> {
        self.0
    }

    /// Replaces the accumulator with its negation.
    pub fn negate(&mut self) {
        self.0 = -self.0;
    }

    /// The tangent line at the accumulator evaluated at `(qx, qy)`.
    /// Doubles the accumulator.
    pub fn double_line(&mut self, qx: &Fp<C>, qy: &Fp<C>) -> Fp12<C> {
        let a = self.0;
        let yz = a.y * a.z;
        let xx = a.x.square();
        let yy = a.y.square();
        let zz = a.z.square();

        let yz = -yz.double().double().mul_by_fp(qy);
        let xx = (xx.double() + xx).double().mul_by_fp(qx);
        let zz = zz.mul_by_fp(&Fp::B3);
        let (yz, zz) = match C::CONFIG.twist {
            SexticTwist::DType => (yz, zz.mul_by_nonresidue_conjugate()),
            SexticTwist::MType => (yz.mul_by_nonresidue(), zz.mul_by_nonresidue().double()),
        };
        let zz = zz - yy.double();

        self.0 = a.double();
        sparse_line(Fp4::new(yz, zz), xx)
    }

    /// The chord through the accumulator and `b` evaluated at `(qx, qy)`.
    /// Adds `b` into the accumulator.
    pub fn add_line(&mut self, b: &G2Affine<C>, qx: &Fp<C>, qy: &Fp<C>) -> Fp12<C> {
        let a = self.0;
        let x1 = a.x - a.z * b.x;
        let y1 = a.y - a.z * b.y;

        let t2 = y1 * b.x - x1 * b.y;
        let x1 = x1.mul_by_fp(qy);
        let x1 = match C::CONFIG.twist {
            SexticTwist::DType => x1,
            SexticTwist::MType => x1.mul_by_nonresidue(),
        };
        let y1 = -y1.mul_by_fp(qx);

        self.0 = a.addition_mixed(b);
        sparse_line(Fp4::new(x1, t2), y1)
    }
}

/// Places the coefficients of a line in the sparse layout of the twist.
fn sparse_line<C: PairingCurve>(a: Fp4<C>, w: Fp2<C>) -> Fp12<C> {
    match C::CONFIG.twist {
        SexticTwist::DType => Fp12::new(a, Fp4::from(w), Fp4::ZERO),
        SexticTwist::MType => Fp12::new(a, Fp4::ZERO, Fp4::new(Fp2::ZERO, w)),
    }
}

/// The line function: the tangent at `a` when `a == b`, the chord through
/// `a` and `b` otherwise, evaluated at `(qx, qy)`. Advances `a`.
pub fn g<C: PairingCurve>(
    a: &mut LineAccumulator<C>,
    b: &G2Affine<C>,
    qx: &Fp<C>,
    qy: &Fp<C>,
) -> Fp12<C> {
    if a.0 == G2Projective::from(b) {
        a.double_line(qx, qy)
    } else {
        a.add_line(b, qx, qy)
    }
}

/// The signed digits `bit_i(3n) - bit_i(n)` of the loop, top to bottom.
fn loop_digits<C: PairingCurve>() -> impl Iterator<Item = (usize, i8)> {
    let (n, n3) = C::CONFIG.ate_bits();
    let nb = C::CONFIG.ate_bit_length();
    (1..nb - 1)
        .rev()
        .map(move |i| (i, ((n3 >> i) & 1) as i8 - ((n >> i) & 1) as i8))
}

/// One (G1, G2) pair as it moves through the Miller loop.
struct MillerLeg<C: PairingCurve> {
    acc: LineAccumulator<C>,
    q: G2Affine<C>,
    neg_q: G2Affine<C>,
    px: Fp<C>,
    py: Fp<C>,
    degenerate: Choice,
}

impl<C: PairingCurve> MillerLeg<C> {
    fn new(p: &G1Affine<C>, q: &G2Affine<C>) -> Self {
        let degenerate = p.is_identity() | q.is_identity();
        let p = G1Affine::conditional_select(p, &G1Affine::generator(), degenerate);
        let q = G2Affine::conditional_select(q, &G2Affine::generator(), degenerate);
        Self {
            acc: LineAccumulator::from(&q),
            q,
            neg_q: -q,
            px: p.x,
            py: p.y,
            degenerate,
        }
    }

    /// A degenerate leg contributes only ones, which are valid sparse lines.
    fn mask(&self, line: Fp12<C>) -> Fp12<C> {
        Fp12::conditional_select(&line, &Fp12::ONE, self.degenerate)
    }

    fn doubling(&mut self) -> Fp12<C> {
        let line = self.acc.double_line(&self.px, &self.py);
        self.mask(line)
    }

    fn addition(&mut self, digit: i8) -> Fp12<C> {
        let b = if digit > 0 { self.q } else { self.neg_q };
        let line = self.acc.add_line(&b, &self.px, &self.py);
        self.mask(line)
    }

    /// Doubling line times the addition line, if any, for one digit.
    fn step(&mut self, digit: i8) -> (Fp12<C>, bool) {
        let line = self.doubling();
        if digit == 0 {
            (line, true)
        } else {
            (line.line_product(&self.addition(digit)), false)
        }
    }

    /// The two extra BN lines against $\pi(Q)$ and $-\pi^2(Q)$.
    fn bn_tail(&mut self) -> Fp12<C> {
        if C::CONFIG.is_negative_x() {
            self.acc.negate();
        }
        let f = twist_frobenius::<C>();
        let k = G2Projective::from(self.q).frobenius(&f);
        let first = self.acc.add_line(&k.to_affine(), &self.px, &self.py);
        let k = -k.frobenius(&f);
        let second = self.acc.add_line(&k.to_affine(), &self.px, &self.py);
        self.mask(first.line_product(&second))
    }
}

/// The Optimal Ate Miller loop for `P` in G1 and `Q` in G2.
///
/// Returns one if either input is the identity.
pub fn ate<C: PairingCurve>(p: &G1Affine<C>, q: &G2Affine<C>) -> MillerLoopResult<C> {
    let mut leg = MillerLeg::new(p, q);
    let mut r = Fp12::ONE;
    for (_, digit) in loop_digits::<C>() {
        r = r.square();
        let (line, sparse) = leg.step(digit);
        r = if sparse { r.mul_by_line(&line) } else { r * line };
    }
    if C::CONFIG.is_negative_x() {
        r = r.conjugate();
    }
    if C::CONFIG.is_bn() {
        r *= leg.bn_tail();
    }
    MillerLoopResult(r)
}

/// The product of the Miller loops of `(P, Q)` and `(R, S)` sharing one accumulator.
pub fn double_ate<C: PairingCurve>(
    p: &G1Affine<C>,
    q: &G2Affine<C>,
    r: &G1Affine<C>,
    s: &G2Affine<C>,
) -> MillerLoopResult<C> {
    let mut first = MillerLeg::new(p, q);
    let mut second = MillerLeg::new(r, s);
    let mut f = Fp12::ONE;
    for (_, digit) in loop_digits::<C>() {
        f = f.square();
        let line = first.doubling().line_product(&second.doubling());
        f *= line;
        if digit != 0 {
            f *= first.addition(digit).line_product(&second.addition(digit));
        }
    }
    if C::CONFIG.is_negative_x() {
        f = f.conjugate();
    }
    if C::CONFIG.is_bn() {
        f *= first.bn_tail();
        f *= second.bn_tail();
    }
    MillerLoopResult(f)
}

/// Miller line products collected per loop position, to be folded once by [`miller`].
///
/// Slot zero holds the BN tail lines.
#[derive(Clone, Debug)]
pub struct MultiMiller<C: PairingCurve> {
    slots: [Fp12<C>; ATE_BITS],
}

impl<C: PairingCurve> Default for MultiMiller<C> {
    fn default() -> Self {
        initmp()
    }
}

impl<C: PairingCurve> MultiMiller<C> {
    /// Accumulates the lines of one more pair. See [`another`].
    pub fn push(&mut self, p: &G1Affine<C>, q: &G2Affine<C>) {
        another(self, p, q)
    }

    /// Folds the slots into a Miller value. See [`miller`].
    pub fn finish(&self) -> MillerLoopResult<C> {
        miller(self)
    }
}

/// A fresh [`MultiMiller`] with every slot set to one.
pub fn initmp<C: PairingCurve>() -> MultiMiller<C> {
    MultiMiller {
        slots: [Fp12::ONE; ATE_BITS],
    }
}

/// Runs the loop for one pair without squaring, multiplying each position's
/// lines into its slot. A degenerate pair contributes nothing.
pub fn another<C: PairingCurve>(r: &mut MultiMiller<C>, p: &G1Affine<C>, q: &G2Affine<C>) {
    let mut leg = MillerLeg::new(p, q);
    for (i, digit) in loop_digits::<C>() {
        let (line, _) = leg.step(digit);
        r.slots[i] *= line;
    }
    if C::CONFIG.is_bn() {
        r.slots[0] *= leg.bn_tail();
    }
}

/// Squares and multiplies through the slots of `r`, top to bottom.
pub fn miller<C: PairingCurve>(r: &MultiMiller<C>) -> MillerLoopResult<C> {
    let mut f = Fp12::ONE;
    for (i, _) in loop_digits::<C>() {
        f = f.square() * r.slots[i];
    }
    if C::CONFIG.is_negative_x() {
        f = f.conjugate();
    }
    MillerLoopResult(f * r.slots[0])
}

/// Computes $$\sum_{i=1}^n \textbf{ML}(a_i, b_i)$$ given a series of terms
/// $$(a_1, b_1), (a_2, b_2), ..., (a_n, b_n).$$
pub fn multi_miller_loop<C: PairingCurve>(
    terms: &[(&G1Affine<C>, &G2Affine<C>)],
) -> MillerLoopResult<C> {
    let mut r = initmp();
    for (p, q) in terms {
        another(&mut r, p, q);
    }
    miller(&r)
}

/// Final exponentiation to $(p^{12} - 1) / r$.
///
/// Returns the identity when the easy part already yields one, which happens
/// for a degenerate Miller value.
pub fn fexp<C: PairingCurve>(m: &MillerLoopResult<C>) -> Gt<C> {
    let f = Fp2::frobenius_constant();
    let m = m.0;

    // easy part
    let r = m.conjugate() * m.invert().unwrap_or(Fp12::ZERO);
    let r = r.frobenius_pow(&f, 2) * r;

    if bool::from(r.is_one()) {
        log::debug!("{}: final exponentiation of a degenerate value", C::CONFIG.name);
        return Gt::IDENTITY;
    }

    let x = C::CONFIG.x;
    if C::CONFIG.is_bn() {
        let pow_x = |v: &Fp12<C>| {
            let t = v.pow_unitary(x);
            if C::CONFIG.is_negative_x() {
                t
            } else {
                t.conjugate()
            }
        };

        let lv = r.frobenius_map(&f);
        let x0 = lv.frobenius_map(&f);
        let lv = lv * r;
        let x0 = (x0 * lv).frobenius_map(&f);
        let x1 = r.conjugate();

        let x4 = pow_x(&r);
        let x3 = x4.frobenius_map(&f);
        let x2 = pow_x(&x4);
        let x5 = x2.conjugate();
        let lv = pow_x(&x2);
        let x2 = x2.frobenius_map(&f);
        let x4 = x4 * x2.conjugate();
        let x2 = x2.frobenius_map(&f);
        let lv = lv * lv.frobenius_map(&f);

        let lv = lv.unitary_square() * x4 * x5;
        let t = x3 * x5 * lv;
        let lv = lv * x2;
        let t = (t.unitary_square() * lv).unitary_square();
        let lv = (t * x1).unitary_square();
        Gt(t * x0 * lv)
    } else {
        let pow = |v: &Fp12<C>, e: u128| {
            let t = v.pow_unitary(e);
            if C::CONFIG.is_negative_x() {
                t.conjugate()
            } else {
                t
            }
        };

        let y0 = r.unitary_square();
        let y1 = pow(&y0, x);
        let y2 = pow(&y1, x / 2);
        let y3 = r.conjugate();
        let y1 = (y1 * y3).conjugate() * y2;
        let y2 = pow(&y1, x);
        let y3 = pow(&y2, x);
        let y3 = y3 * y1.conjugate();
        let y1 = y1.frobenius_pow(&f, 3);
        let y2 = y2.frobenius_pow(&f, 2);
        let y1 = y1 * y2;
        let y2 = pow(&y3, x) * y0 * r;
        let y1 = y1 * y2;
        Gt(y1 * y3.frobenius_map(&f))
    }
}

/// Invoke the pairing function without the use of precomputation and other optimizations.
pub fn pairing<C: PairingCurve>(p: &G1Affine<C>, q: &G2Affine<C>) -> Gt<C> {
    fexp(&ate(p, q))
}

/// Represents an element of the target group $\mathbb{G}_T$, written additively.
#[derive(Copy, Clone, Debug)]
pub struct Gt<C: PairingCurve>(pub(crate) Fp12<C>);

impl<C: PairingCurve> Default for Gt<C> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<C: PairingCurve> DefaultIsZeroes for Gt<C> {}

impl<C: PairingCurve> ConstantTimeEq for Gt<C> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl<C: PairingCurve> ConditionallySelectable for Gt<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl<C: PairingCurve> Eq for Gt<C> {}

impl<C: PairingCurve> PartialEq for Gt<C> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C: PairingCurve> Display for Gt<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self)
    }
}

impl<C: PairingCurve> LowerHex for Gt<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for b in self.to_bytes().iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl<C: PairingCurve> AddAssign for Gt<C> {
    fn add_assign(&mut self, rhs: Self) {
        self.0 *= rhs.0;
    }
}

impl<C: PairingCurve> Neg for Gt<C> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(self.0.conjugate())
    }
}

impl<C: PairingCurve> Neg for &Gt<C> {
    type Output = Gt<C>;

    fn neg(self) -> Self::Output {
        -*self
    }
}

impl<C: PairingCurve> SubAssign for Gt<C> {
    fn sub_assign(&mut self, rhs: Self) {
        *self += -rhs;
    }
}

impl<C: PairingCurve> MulAssign<Scalar<C>> for Gt<C> {
    fn mul_assign(&mut self, rhs: Scalar<C>) {
        *self = self.mul_by_scalar(&rhs);
    }
}

impl<C: PairingCurve> Mul<Gt<C>> for Scalar<C> {
    type Output = Gt<C>;

    fn mul(self, rhs: Gt<C>) -> Self::Output {
        rhs.mul_by_scalar(&self)
    }
}

ops_impl!(Add, add, +, AddAssign, add_assign, +=, LHS = Gt, RHS = Gt, OUTPUT = Gt);
ops_impl!(Sub, sub, -, SubAssign, sub_assign, -=, LHS = Gt, RHS = Gt, OUTPUT = Gt);
ops_impl!(Mul, mul, *, MulAssign, mul_assign, *=, LHS = Gt, RHS = Scalar, OUTPUT = Gt);
ops_impl!(Mul, mul, *, LHS = Scalar, RHS = Gt, OUTPUT = Gt);

impl<C: PairingCurve, T: Borrow<Gt<C>>> Sum<T> for Gt<C> {
    fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(Self::IDENTITY, |acc, item| acc + item.borrow())
    }
}

bytes_impl!(Gt, |g: &Gt<C>| g.to_bytes(), |bytes: &[u8]| {
    Option::<Gt<C>>::from(Gt::from_bytes(bytes)).ok_or(PairingError::InvalidGtBytes)
});

serde_impl!(
    Gt,
    |g: &Gt<C>| g.to_bytes(),
    |bytes: &[u8]| {
        Option::<Gt<C>>::from(Gt::from_bytes(bytes)).ok_or(PairingError::InvalidGtBytes)
    },
    GT_BYTES
);

impl<C: PairingCurve> Gt<C> {
    pub const IDENTITY: Self = Self(Fp12::ONE);

    /// Bytes in the encoding of an element.
    pub const fn bytes() -> usize {
        12 * C::CONFIG.modulus_bytes
    }

    /// The pairing of the two fixed generators.
    pub fn generator() -> Self {
        pairing(&G1Affine::generator(), &G2Affine::generator())
    }

    pub fn is_identity(&self) -> Choice {
        self.0.is_one()
    }

    pub fn double(&self) -> Self {
        Self(self.0.square())
    }

    pub fn invert(&self) -> CtOption<Self> {
        self.0.invert().map(Self)
    }

    /// Trace down to $\mathbb{F}_{p^4}$, the value hashed into session keys.
    pub fn trace(&self) -> Fp4<C> {
        self.0.trace()
    }

    /// Twelve big-endian field elements, lowest tower coefficient first.
    pub fn to_bytes(&self) -> Octet<GT_BYTES> {
        let mut bytes = Octet::zeroed(Self::bytes());
        self.0.write_be_bytes(&mut bytes);
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> CtOption<Self> {
        if bytes.len() != Self::bytes() {
            return CtOption::new(Self::IDENTITY, Choice::from(0u8));
        }
        Fp12::from_be_bytes(bytes).map(Self)
    }

    pub fn mul_by_scalar(&self, scalar: &Scalar<C>) -> Self {
        let by = scalar.to_le_bytes();
        let mut acc = Self::IDENTITY;

        // Simple double and add algorithm
        for i in (0..C::Order::MODULUS.bits()).rev() {
            let bit = Choice::from((by[i / 8] >> (i % 8)) & 1u8);
            acc = acc.double();
            acc.conditional_assign(&(acc + self), bit);
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inner_types::{
        Bls381, Bls383, Bn254, Bn254Cx, Fp256Bn, G1Projective, ToyBls, ToyBlsNeg, ToyBn,
        ToyBnM,
    };
    use elliptic_curve::Field;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    fn pairing_laws<C: PairingCurve>() {
        let mut rng = ChaCha8Rng::from_seed([51u8; 32]);
        let g1 = G1Affine::<C>::generator();
        let g2 = G2Affine::<C>::generator();
        let seven = Scalar::<C>::from(7u64);

        let e = pairing(&g1, &g2);
        assert!(!bool::from(e.is_identity()));
        let r = Scalar::<C>::ZERO - Scalar::ONE;
        assert_eq!(e * r + e, Gt::IDENTITY);

        let left = pairing(&(g1 * seven).to_affine(), &g2);
        let right = pairing(&g1, &(g2 * seven).to_affine());
        assert_eq!(left, right);
        assert_eq!(left, e * seven);

        let a = Scalar::<C>::random(&mut rng);
        let b = Scalar::<C>::random(&mut rng);
        let p = (g1 * a).to_affine();
        let q = (g2 * b).to_affine();
        assert_eq!(pairing(&p, &q), e * (a * b));

        // double_ate is the product of two single loops
        let both = fexp(&double_ate(&p, &q, &g1, &g2));
        assert_eq!(both, pairing(&p, &q) + e);
        assert_eq!(fexp(&double_ate(&-p, &q, &p, &q)), Gt::IDENTITY);

        // batched loop
        let mut mm = initmp::<C>();
        another(&mut mm, &p, &q);
        another(&mut mm, &g1, &g2);
        assert_eq!(fexp(&miller(&mm)), both);
        assert_eq!(
            multi_miller_loop(&[(&p, &q), (&g1, &g2)]).final_exponentiation(),
            both
        );

        // degenerate inputs
        assert_eq!(pairing(&G1Affine::identity(), &g2), Gt::IDENTITY);
        assert_eq!(pairing(&g1, &G2Affine::identity()), Gt::IDENTITY);
        assert_eq!(
            fexp(&double_ate(&G1Affine::identity(), &q, &p, &q)),
            pairing(&p, &q)
        );
        let mut mm = initmp::<C>();
        another(&mut mm, &p, &G2Affine::identity());
        another(&mut mm, &g1, &g2);
        assert_eq!(miller(&mm).final_exponentiation(), e);
    }

    #[test]
    fn bn_negative_d_type() {
        pairing_laws::<Bn254>();
        pairing_laws::<Bn254Cx>();
    }

    #[test]
    fn bn_negative_m_type() {
        pairing_laws::<Fp256Bn>();
    }

    #[test]
    fn bls_negative_m_type() {
        pairing_laws::<Bls381>();
    }

    #[test]
    fn bls_positive_m_type() {
        pairing_laws::<Bls383>();
    }

    #[test]
    fn bn_positive_d_type() {
        pairing_laws::<ToyBn>();
    }

    #[test]
    fn bn_positive_m_type() {
        pairing_laws::<ToyBnM>();
    }

    #[test]
    fn bls_positive_d_type() {
        pairing_laws::<ToyBls>();
    }

    #[test]
    fn bls_negative_d_type() {
        pairing_laws::<ToyBlsNeg>();
    }

    #[test]
    fn line_function_dispatch() {
        let q = G2Affine::<Bn254>::generator();
        let p = G1Affine::<Bn254>::generator();

        let mut a = LineAccumulator::from(&q);
        let mut b = LineAccumulator::from(&q);
        assert_eq!(g(&mut a, &q, &p.x, &p.y), b.double_line(&p.x, &p.y));
        assert_eq!(a.point(), G2Projective::from(q).double());

        let chord = g(&mut a, &q, &p.x, &p.y);
        assert_eq!(chord, b.add_line(&q, &p.x, &p.y));
        assert_eq!(a.point(), b.point());
        assert_eq!(a.point(), G2Projective::from(q).double() + q);
    }

    #[test]
    fn gt_encoding() {
        let e = Gt::<Bls381>::generator();
        let bytes = e.to_bytes();
        assert_eq!(bytes.len(), 576);
        assert_eq!(Gt::<Bls381>::from_bytes(&bytes).unwrap(), e);
        assert!(bool::from(Gt::<Bls381>::from_bytes(&bytes[1..]).is_none()));
        assert_eq!(
            Gt::<Bls381>::try_from(&bytes[..10]),
            Err(PairingError::InvalidGtBytes)
        );

        let e = Gt::<Bn254>::generator();
        assert_eq!(e.to_bytes().len(), 384);
        assert_eq!(-e + e, Gt::IDENTITY);
        assert_eq!(e.trace(), e.0.c0.double() + e.0.c0);
        let sum: Gt<Bn254> = [e, e, e].iter().sum();
        assert_eq!(sum, e * Scalar::from(3u64));
    }

    #[test]
    fn mapped_points_pair() {
        let p = G1Projective::<Bls381>::mapit(&[3u8; 48]).to_affine();
        let q = G2Projective::<Bls381>::mapit(&[4u8; 48]).to_affine();
        let s = Scalar::<Bls381>::from(0x1234_5678u64);
        assert_eq!(
            pairing(&(p * s).to_affine(), &q),
            pairing(&p, &(q * s).to_affine())
        );
    }
}
