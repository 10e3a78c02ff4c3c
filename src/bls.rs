//! Short BLS signatures: signatures in G1, public keys in G2.
use crate::helpers::{hashit, Octet};
use crate::inner_types::{
    double_ate, fexp, G1Affine, G1Projective, G2Affine, PairingCurve, Scalar,
};
use crate::{PairingError, G1_BYTES, G2_BYTES, SCALAR_BYTES};
use elliptic_curve::Field;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use subtle::{Choice, CtOption};
use zeroize::DefaultIsZeroes;

/// A signing key, a scalar modulo r.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct SecretKey<C: PairingCurve>(pub(crate) Scalar<C>);

impl<C: PairingCurve> DefaultIsZeroes for SecretKey<C> {}

/// A verification key `s·Q`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct PublicKey<C: PairingCurve>(pub(crate) G2Affine<C>);

/// A signature `s·H(m)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Signature<C: PairingCurve>(pub(crate) G1Affine<C>);

impl<C: PairingCurve> SecretKey<C> {
    /// A uniformly random nonzero key.
    pub fn random(mut rng: impl CryptoRngCore) -> Self {
        loop {
            let s = Scalar::<C>::random(&mut rng);
            if !bool::from(s.is_zero()) {
                return Self(s);
            }
        }
    }

    pub fn public_key(&self) -> PublicKey<C> {
        PublicKey((G2Affine::generator() * self.0).to_affine())
    }

    pub fn sign(&self, msg: &[u8]) -> Signature<C> {
        Signature((hash_to_g1::<C>(msg) * self.0).to_affine())
    }

    pub fn to_bytes(&self) -> Octet<SCALAR_BYTES> {
        self.0.to_be_bytes()
    }

    /// Rejects encodings of zero and of values not below r.
    pub fn from_bytes(bytes: &[u8]) -> CtOption<Self> {
        Scalar::from_be_bytes(bytes).and_then(|s| CtOption::new(Self(s), !s.is_zero()))
    }
}

impl<C: PairingCurve> PublicKey<C> {
    pub fn to_bytes(&self) -> Octet<G2_BYTES> {
        self.0.to_bytes()
    }

    /// Accepts only points of order r other than the identity.
    pub fn from_bytes(bytes: &[u8]) -> CtOption<Self> {
        G2Affine::from_bytes(bytes)
            .and_then(|p| CtOption::new(Self(p), !p.is_identity() & p.is_torsion_free()))
    }

    pub fn verify(&self, msg: &[u8], sig: &Signature<C>) -> bool {
        verify(self, msg, sig)
    }
}

impl<C: PairingCurve> Signature<C> {
    /// The compressed encoding `0x02|0x03 | x`.
    pub fn to_bytes(&self) -> Octet<G1_BYTES> {
        self.0.to_compressed()
    }

    /// Accepts either G1 encoding of a point of order r other than the identity.
    pub fn from_bytes(bytes: &[u8]) -> CtOption<Self> {
        G1Affine::from_bytes(bytes)
            .and_then(|p| CtOption::new(Self(p), !p.is_identity() & p.is_torsion_free()))
    }
}

macro_rules! try_from_bytes {
    ($name:ident, $error:expr) => {
        impl<C: PairingCurve> TryFrom<&[u8]> for $name<C> {
            type Error = PairingError;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                Option::<$name<C>>::from($name::from_bytes(bytes)).ok_or($error)
            }
        }
    };
}

try_from_bytes!(SecretKey, PairingError::InvalidScalarBytes);
try_from_bytes!(PublicKey, PairingError::InvalidG2Bytes);
try_from_bytes!(Signature, PairingError::InvalidG1Bytes);

fn hash_to_g1<C: PairingCurve>(msg: &[u8]) -> G1Projective<C> {
    G1Projective::mapit(&hashit::<C>(0, msg))
}

/// A fresh key pair.
pub fn key_pair_generate<C: PairingCurve>(rng: impl CryptoRngCore) -> (SecretKey<C>, PublicKey<C>) {
    let sk = SecretKey::random(rng);
    let pk = sk.public_key();
    (sk, pk)
}

pub fn sign<C: PairingCurve>(sk: &SecretKey<C>, msg: &[u8]) -> Signature<C> {
    sk.sign(msg)
}

/// Checks `e(-sig, Q)·e(H(m), pk) == 1` with one shared Miller loop.
pub fn verify<C: PairingCurve>(pk: &PublicKey<C>, msg: &[u8], sig: &Signature<C>) -> bool {
    let degenerate: Choice = pk.0.is_identity() | sig.0.is_identity();
    if degenerate.into() {
        return false;
    }
    let h = hash_to_g1::<C>(msg).to_affine();
    let g = fexp(&double_ate(&-sig.0, &G2Affine::generator(), &h, &pk.0));
    let ok: bool = g.is_identity().into();
    if !ok {
        log::debug!("{}: signature rejected", C::CONFIG.name);
    }
    ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inner_types::{Bls381, Bls383, Bn254, Fp256Bn};
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    fn sign_and_verify<C: PairingCurve>(seed: u8) {
        let mut rng = ChaCha8Rng::from_seed([seed; 32]);
        let (sk, pk) = key_pair_generate::<C>(&mut rng);
        let (_, other) = key_pair_generate::<C>(&mut rng);

        let sig = sign(&sk, b"test message");
        assert!(verify(&pk, b"test message", &sig));
        assert!(pk.verify(b"test message", &sig));
        assert!(!verify(&pk, b"test massage", &sig));
        assert!(!verify(&other, b"test message", &sig));
        assert!(!verify(&pk, b"test message", &Signature(-sig.0)));
    }

    #[test]
    fn signatures() {
        sign_and_verify::<Bn254>(81);
        sign_and_verify::<Fp256Bn>(82);
        sign_and_verify::<Bls381>(83);
        sign_and_verify::<Bls383>(84);
    }

    #[test]
    fn identity_is_rejected() {
        let mut rng = ChaCha8Rng::from_seed([85u8; 32]);
        let (sk, pk) = key_pair_generate::<Bn254>(&mut rng);
        let sig = sk.sign(b"msg");
        assert!(!verify(&PublicKey(G2Affine::identity()), b"msg", &sig));
        assert!(!verify(&pk, b"msg", &Signature(G1Affine::identity())));
        let identity = G1Affine::<Bn254>::identity().to_uncompressed();
        assert!(bool::from(Signature::<Bn254>::from_bytes(&identity).is_none()));
    }

    #[test]
    fn encodings() {
        let mut rng = ChaCha8Rng::from_seed([86u8; 32]);
        let (sk, pk) = key_pair_generate::<Bls381>(&mut rng);
        let sig = sk.sign(b"msg");

        let bytes = sig.to_bytes();
        assert_eq!(bytes.len(), 49);
        assert_eq!(Signature::<Bls381>::try_from(&bytes[..]), Ok(sig));
        assert_eq!(PublicKey::<Bls381>::try_from(&pk.to_bytes()[..]), Ok(pk));
        assert_eq!(SecretKey::<Bls381>::try_from(&sk.to_bytes()[..]), Ok(sk));
        assert_eq!(
            SecretKey::<Bls381>::try_from(&[0u8; 48][..]),
            Err(PairingError::InvalidScalarBytes)
        );
        assert_eq!(
            PublicKey::<Bls381>::try_from(&bytes[..]),
            Err(PairingError::InvalidG2Bytes)
        );
    }
}
