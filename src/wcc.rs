//! Wang's identity based authenticated key exchange (WCC).
//!
//! A trusted authority issues `s·H1(ID)` in G1 to senders and `s·H2(ID)` in G2
//! to receivers. Each side contributes an ephemeral value and both derive the
//! same AES key from one pairing, optionally bound to a date through time
//! permits.
use crate::helpers::{hash_parts, hashit, mpin_hash, Octet};
use crate::inner_types::{ate, fexp, G1Projective, G2Projective, PairingCurve, Scalar};
use crate::mpin::{decode_g1, decode_g2, decode_scalar};
use crate::{MpinError, MpinResult, AES_KEY_BYTES, G1_BYTES, G2_BYTES, SCALAR_BYTES};

pub use crate::mpin::{hash_id, random_generate, recombine_g1, recombine_g2};
#[cfg(feature = "std")]
pub use crate::helpers::today;

fn digest<C: PairingCurve>(hash_done: bool, id: &[u8]) -> Octet<SCALAR_BYTES> {
    if hash_done {
        Octet::from_slice_truncated(id)
    } else {
        hash_id::<C>(id)
    }
}

/// `H1(ID)` plus, with a date, `H1(date|H(ID))`.
fn g1_identity<C: PairingCurve>(date: Option<u32>, id: &[u8]) -> G1Projective<C> {
    let h = hash_id::<C>(id);
    let mut point = G1Projective::<C>::mapit(&h);
    if let Some(date) = date {
        point += G1Projective::<C>::mapit(&hashit::<C>(date, &h));
    }
    point
}

/// `H2(ID)` plus, with a date, `H2(date|H(ID))`.
fn g2_identity<C: PairingCurve>(date: Option<u32>, id: &[u8]) -> G2Projective<C> {
    let h = hash_id::<C>(id);
    let mut point = G2Projective::<C>::mapit(&h);
    if let Some(date) = date {
        point += G2Projective::<C>::mapit(&hashit::<C>(date, &h));
    }
    point
}

/// `s·H1(id)`, where `id` is hashed first unless `hash_done` is set.
pub fn get_g1_multiple<C: PairingCurve>(
    hash_done: bool,
    s: &[u8],
    id: &[u8],
) -> MpinResult<Octet<G1_BYTES>> {
    let s = decode_scalar::<C>(s)?;
    Ok((G1Projective::<C>::mapit(&digest::<C>(hash_done, id)) * s).to_uncompressed())
}

/// `s·H2(id)`, where `id` is hashed first unless `hash_done` is set.
pub fn get_g2_multiple<C: PairingCurve>(
    hash_done: bool,
    s: &[u8],
    id: &[u8],
) -> MpinResult<Octet<G2_BYTES>> {
    let s = decode_scalar::<C>(s)?;
    Ok((G2Projective::<C>::mapit(&digest::<C>(hash_done, id)) * s).to_bytes())
}

/// `s·(H1(ID) + H1(date|H(ID)))`, the ephemeral share of a dated exchange.
pub fn get_g1_tp_multiple<C: PairingCurve>(
    date: u32,
    s: &[u8],
    id: &[u8],
) -> MpinResult<Octet<G1_BYTES>> {
    let s = decode_scalar::<C>(s)?;
    Ok((g1_identity::<C>(Some(date), id) * s).to_uncompressed())
}

/// `s·(H2(ID) + H2(date|H(ID)))`.
pub fn get_g2_tp_multiple<C: PairingCurve>(
    date: u32,
    s: &[u8],
    id: &[u8],
) -> MpinResult<Octet<G2_BYTES>> {
    let s = decode_scalar::<C>(s)?;
    Ok((g2_identity::<C>(Some(date), id) * s).to_bytes())
}

/// The sender's time permit `s·H1(date|hid)`.
pub fn get_g1_permit<C: PairingCurve>(
    date: u32,
    s: &[u8],
    hid: &[u8],
) -> MpinResult<Octet<G1_BYTES>> {
    get_g1_multiple::<C>(true, s, &hashit::<C>(date, hid))
}

/// The receiver's time permit `s·H2(date|hid)`.
pub fn get_g2_permit<C: PairingCurve>(
    date: u32,
    s: &[u8],
    hid: &[u8],
) -> MpinResult<Octet<G2_BYTES>> {
    get_g2_multiple::<C>(true, s, &hashit::<C>(date, hid))
}

/// `H(a | b | c | d) mod r`, binding the exchanged values together.
pub fn hq<C: PairingCurve>(a: &[u8], b: &[u8], c: &[u8], d: &[u8]) -> Octet<SCALAR_BYTES> {
    let h = hash_parts::<C>(0, &[a, b, c, d]);
    Scalar::<C>::from_be_bytes_reduced(&h).to_be_bytes()
}

/// The sender's session key.
///
/// `g = e((x + pia)·AKey, pib·B + PbG2)` with `B = H2(IdB)`, hashed together
/// with `x·PgG1`. With a date both `B` and `AKey` include the time permit parts.
#[allow(clippy::too_many_arguments)]
pub fn sender_key<C: PairingCurve>(
    date: Option<u32>,
    x: &[u8],
    pia: &[u8],
    pib: &[u8],
    pb_g2: &[u8],
    pg_g1: &[u8],
    a_key_g1: &[u8],
    a_tp_g1: Option<&[u8]>,
    id_b: &[u8],
) -> MpinResult<[u8; AES_KEY_BYTES]> {
    let x = decode_scalar::<C>(x)?;
    let pia = decode_scalar::<C>(pia)?;
    let pib = decode_scalar::<C>(pib)?;

    let mut a_key = G1Projective::from(decode_g1::<C>(a_key_g1)?);
    if date.is_some() {
        a_key += decode_g1::<C>(a_tp_g1.ok_or(MpinError::BadParams)?)?;
    }
    let b = g2_identity::<C>(date, id_b) * pib + decode_g2::<C>(pb_g2)?;

    let g = fexp(&ate(&(a_key * (x + pia)).to_affine(), &b.to_affine()));
    let point = decode_g1::<C>(pg_g1)? * x;
    Ok(mpin_hash(&g.trace(), &point.to_affine()))
}

/// The receiver's session key.
///
/// `g = e(pia·A + PaG1, (y + pib)·BKey)` with `A = H1(IdA)`, hashed together
/// with `w·PaG1`. `pg_g1` is the receiver's own `w·A` and is only checked to
/// be a valid point.
#[allow(clippy::too_many_arguments)]
pub fn receiver_key<C: PairingCurve>(
    date: Option<u32>,
    y: &[u8],
    w: &[u8],
    pia: &[u8],
    pib: &[u8],
    pa_g1: &[u8],
    pg_g1: &[u8],
    b_key_g2: &[u8],
    b_tp_g2: Option<&[u8]>,
    id_a: &[u8],
) -> MpinResult<[u8; AES_KEY_BYTES]> {
    let y = decode_scalar::<C>(y)?;
    let w = decode_scalar::<C>(w)?;
    let pia = decode_scalar::<C>(pia)?;
    let pib = decode_scalar::<C>(pib)?;
    decode_g1::<C>(pg_g1)?;

    let mut b_key = G2Projective::from(decode_g2::<C>(b_key_g2)?);
    if date.is_some() {
        b_key += decode_g2::<C>(b_tp_g2.ok_or(MpinError::BadParams)?)?;
    }
    let pa = decode_g1::<C>(pa_g1)?;
    let a = g1_identity::<C>(date, id_a) * pia + pa;

    let g = fexp(&ate(&a.to_affine(), &(b_key * (y + pib)).to_affine()));
    let point = pa * w;
    Ok(mpin_hash(&g.trace(), &point.to_affine()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inner_types::{Bls383, Bn254, Fp256Bn};
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    const ALICE: &[u8] = b"alice@miracl.com";
    const BOB: &[u8] = b"bob@miracl.com";
    const DATE: u32 = 16_800;

    fn exchange<C: PairingCurve>(seed: u8, date: Option<u32>) -> ([u8; 16], [u8; 16]) {
        let mut rng = ChaCha8Rng::from_seed([seed; 32]);

        // two authorities
        let ms1 = random_generate::<C>(&mut rng);
        let ms2 = random_generate::<C>(&mut rng);
        let ahv = hash_id::<C>(ALICE);
        let bhv = hash_id::<C>(BOB);
        let a_key = recombine_g1::<C>(
            &get_g1_multiple::<C>(true, &ms1, &ahv).unwrap(),
            &get_g1_multiple::<C>(true, &ms2, &ahv).unwrap(),
        )
        .unwrap();
        let b_key = recombine_g2::<C>(
            &get_g2_multiple::<C>(false, &ms1, BOB).unwrap(),
            &get_g2_multiple::<C>(false, &ms2, BOB).unwrap(),
        )
        .unwrap();
        let a_tp = date.map(|d| {
            recombine_g1::<C>(
                &get_g1_permit::<C>(d, &ms1, &ahv).unwrap(),
                &get_g1_permit::<C>(d, &ms2, &ahv).unwrap(),
            )
            .unwrap()
        });
        let b_tp = date.map(|d| {
            recombine_g2::<C>(
                &get_g2_permit::<C>(d, &ms1, &bhv).unwrap(),
                &get_g2_permit::<C>(d, &ms2, &bhv).unwrap(),
            )
            .unwrap()
        });

        let x = random_generate::<C>(&mut rng);
        let w = random_generate::<C>(&mut rng);
        let y = random_generate::<C>(&mut rng);
        let (pa, pg, pb) = match date {
            Some(d) => (
                get_g1_tp_multiple::<C>(d, &x, ALICE).unwrap(),
                get_g1_tp_multiple::<C>(d, &w, ALICE).unwrap(),
                get_g2_tp_multiple::<C>(d, &y, BOB).unwrap(),
            ),
            None => (
                get_g1_multiple::<C>(false, &x, ALICE).unwrap(),
                get_g1_multiple::<C>(false, &w, ALICE).unwrap(),
                get_g2_multiple::<C>(false, &y, BOB).unwrap(),
            ),
        };

        let pia = hq::<C>(&pa, &pb, &pg, BOB);
        let pib = hq::<C>(&pb, &pa, &pg, ALICE);

        let k1 = sender_key::<C>(
            date,
            &x,
            &pia,
            &pib,
            &pb,
            &pg,
            &a_key,
            a_tp.as_deref(),
            BOB,
        )
        .unwrap();
        let k2 = receiver_key::<C>(
            date,
            &y,
            &w,
            &pia,
            &pib,
            &pa,
            &pg,
            &b_key,
            b_tp.as_deref(),
            ALICE,
        )
        .unwrap();
        (k1, k2)
    }

    #[test]
    fn keys_agree() {
        let (k1, k2) = exchange::<Bn254>(61, None);
        assert_eq!(k1, k2);
        let (k1, k2) = exchange::<Fp256Bn>(62, None);
        assert_eq!(k1, k2);
        let (k1, k2) = exchange::<Bls383>(63, None);
        assert_eq!(k1, k2);
    }

    #[test]
    fn keys_agree_with_time_permits() {
        let (k1, k2) = exchange::<Bn254>(64, Some(DATE));
        assert_eq!(k1, k2);
        let (k1, k2) = exchange::<Bls383>(65, Some(DATE));
        assert_eq!(k1, k2);
    }

    #[test]
    fn hashed_and_raw_identities_agree() {
        let mut rng = ChaCha8Rng::from_seed([66u8; 32]);
        let s = random_generate::<Bn254>(&mut rng);
        let hashed = hash_id::<Bn254>(ALICE);
        assert_eq!(
            get_g1_multiple::<Bn254>(false, &s, ALICE).unwrap(),
            get_g1_multiple::<Bn254>(true, &s, &hashed).unwrap()
        );
        assert_eq!(
            get_g2_multiple::<Bn254>(false, &s, ALICE).unwrap(),
            get_g2_multiple::<Bn254>(true, &s, &hashed).unwrap()
        );
        assert_eq!(hq::<Bn254>(b"a", b"b", b"c", b"d"), hq::<Bn254>(b"ab", b"", b"c", b"d"));
    }

    #[test]
    fn missing_permit() {
        let mut rng = ChaCha8Rng::from_seed([67u8; 32]);
        let s = random_generate::<Bn254>(&mut rng);
        let a_key = get_g1_multiple::<Bn254>(false, &s, ALICE).unwrap();
        let pb = get_g2_tp_multiple::<Bn254>(DATE, &s, BOB).unwrap();
        let pg = get_g1_tp_multiple::<Bn254>(DATE, &s, ALICE).unwrap();
        assert_eq!(
            sender_key::<Bn254>(Some(DATE), &s, &s, &s, &pb, &pg, &a_key, None, BOB),
            Err(MpinError::BadParams)
        );
    }
}
