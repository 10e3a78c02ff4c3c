//! The M-Pin two-factor authentication protocol.
//!
//! A trusted authority splits a master secret `s` between servers (`s·Q`) and
//! clients (`s·H(ID)`). The client strips `PIN·H(ID)` from its secret to form a
//! token and later proves knowledge of token plus PIN with a zero knowledge
//! pairing check on the server. All wire values are [`Octet`]s in the usual
//! big-endian point and scalar encodings for the curve `C`.
use crate::helpers::{hash_parts, hashit, mpin_hash, Octet};
use crate::inner_types::{
    double_ate, fexp, pairing, Fp, G1Affine, G1Projective, G2Affine, G2Projective, Gt,
    PairingCurve, Scalar,
};
use crate::{MpinError, MpinResult, AES_KEY_BYTES, G1_BYTES, G2_BYTES, GT_BYTES, SCALAR_BYTES};
use elliptic_curve::Field;
use rand_core::CryptoRngCore;
use subtle::Choice;

#[cfg(feature = "std")]
pub use crate::helpers::{get_time, today};

/// PINs are reduced modulo this value
pub const MAXPIN: u32 = 10_000;
/// Entries in the kangaroo jump table
const TS: usize = 10;
/// Jumps taken by the tame kangaroo
const TRAP: usize = 200;

/// Where [`get_g1_multiple`] takes its base point from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum G1Base {
    /// An encoded point
    Point,
    /// A digest mapped onto the curve
    Hash,
}

/// How [`get_g2_multiple`] applies its scalar.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum G2Exponent {
    /// `x·G`
    Multiply,
    /// `x^-1·G`
    Invert,
}

/// The client's first pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClientPass1 {
    /// The ephemeral scalar, kept for [`client_2`]
    pub x: Octet<SCALAR_BYTES>,
    /// The reconstructed secret, kept for [`client_2`]
    pub sec: Octet<G1_BYTES>,
    /// `x·H(ID)`
    pub xid: Octet<G1_BYTES>,
    /// `x·(H(ID) + H(date|H(ID)))`, only when a date was given
    pub xcid: Option<Octet<G1_BYTES>>,
}

/// The identity points the server derives in its first pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ServerPass1 {
    pub hid: Octet<G1_BYTES>,
    pub htid: Option<Octet<G1_BYTES>>,
}

/// Everything the client sends in single pass mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClientSinglePass {
    pub x: Octet<SCALAR_BYTES>,
    pub xid: Octet<G1_BYTES>,
    pub xcid: Option<Octet<G1_BYTES>>,
    /// The challenge derived from the time and the commitment
    pub y: Octet<SCALAR_BYTES>,
    pub v: Octet<G1_BYTES>,
}

pub(crate) fn decode_scalar<C: PairingCurve>(bytes: &[u8]) -> MpinResult<Scalar<C>> {
    Option::<Scalar<C>>::from(Scalar::from_be_bytes(bytes)).ok_or(MpinError::BadParams)
}

pub(crate) fn decode_g1<C: PairingCurve>(bytes: &[u8]) -> MpinResult<G1Affine<C>> {
    let point = Option::<G1Affine<C>>::from(G1Affine::from_bytes(bytes))
        .ok_or(MpinError::InvalidPoint)?;
    if point.is_identity().into() {
        return Err(MpinError::InvalidPoint);
    }
    Ok(point)
}

pub(crate) fn decode_g2<C: PairingCurve>(bytes: &[u8]) -> MpinResult<G2Affine<C>> {
    let point = Option::<G2Affine<C>>::from(G2Affine::from_bytes(bytes))
        .ok_or(MpinError::InvalidPoint)?;
    if point.is_identity().into() {
        return Err(MpinError::InvalidPoint);
    }
    Ok(point)
}

fn decode_gt<C: PairingCurve>(bytes: &[u8]) -> MpinResult<Gt<C>> {
    Option::<Gt<C>>::from(Gt::from_bytes(bytes)).ok_or(MpinError::BadParams)
}

fn pin_scalar<C: PairingCurve>(pin: u32) -> Scalar<C> {
    Scalar::from(pin % MAXPIN)
}

/// Hashes an identity into a field sized digest.
pub fn hash_id<C: PairingCurve>(id: &[u8]) -> Octet<SCALAR_BYTES> {
    hashit::<C>(0, id)
}

/// A random scalar modulo the group order, suitable as a master secret share.
pub fn random_generate<C: PairingCurve>(mut rng: impl CryptoRngCore) -> Octet<SCALAR_BYTES> {
    Scalar::<C>::random(&mut rng).to_be_bytes()
}

/// The server secret `s·Q`.
pub fn get_server_secret<C: PairingCurve>(s: &[u8]) -> MpinResult<Octet<G2_BYTES>> {
    let s = decode_scalar::<C>(s)?;
    Ok((G2Affine::<C>::generator() * s).to_bytes())
}

/// The client secret `s·H(ID)` for the hashed identity `hcid`.
pub fn get_client_secret<C: PairingCurve>(s: &[u8], hcid: &[u8]) -> MpinResult<Octet<G1_BYTES>> {
    get_g1_multiple::<C>(s, G1Base::Hash, hcid)
}

/// The time permit `s·H(date|hcid)`.
pub fn get_client_permit<C: PairingCurve>(
    date: u32,
    s: &[u8],
    hcid: &[u8],
) -> MpinResult<Octet<G1_BYTES>> {
    get_g1_multiple::<C>(s, G1Base::Hash, &hashit::<C>(date, hcid))
}

/// Removes `PIN·H(ID)` from a client secret, leaving the token.
pub fn extract_pin<C: PairingCurve>(
    id: &[u8],
    pin: u32,
    secret: &[u8],
) -> MpinResult<Octet<G1_BYTES>> {
    let a = G1Projective::<C>::mapit(&hash_id::<C>(id));
    let token = G1Projective::from(decode_g1::<C>(secret)?) - a * pin_scalar::<C>(pin);
    Ok(token.to_uncompressed())
}

/// [`extract_pin`] with a field sized PIN, such as one drawn by [`random_generate`].
pub fn extract_big_pin<C: PairingCurve>(
    id: &[u8],
    pin: &[u8],
    secret: &[u8],
) -> MpinResult<Octet<G1_BYTES>> {
    let secret = decode_g1::<C>(secret)?;
    let a = G1Projective::<C>::mapit(&hash_id::<C>(id));
    Ok((G1Projective::from(secret) - a * decode_scalar::<C>(pin)?).to_uncompressed())
}

/// Adds `PIN·H(ID)` back onto a token, the inverse of [`extract_big_pin`].
pub fn add_big_pin<C: PairingCurve>(
    id: &[u8],
    pin: &[u8],
    token: &[u8],
) -> MpinResult<Octet<G1_BYTES>> {
    let token = decode_g1::<C>(token)?;
    let a = G1Projective::<C>::mapit(&hash_id::<C>(id));
    Ok((G1Projective::from(token) + a * decode_scalar::<C>(pin)?).to_uncompressed())
}

/// `x·G` in G1, the base either decoded from `g` or mapped from it.
pub fn get_g1_multiple<C: PairingCurve>(
    x: &[u8],
    base: G1Base,
    g: &[u8],
) -> MpinResult<Octet<G1_BYTES>> {
    let x = decode_scalar::<C>(x)?;
    let point = match base {
        G1Base::Point => G1Projective::from(decode_g1::<C>(g)?),
        G1Base::Hash => G1Projective::mapit(g),
    };
    Ok((point * x).to_uncompressed())
}

/// [`get_g1_multiple`] with a fresh random `x`, returned alongside the point.
pub fn get_g1_multiple_random<C: PairingCurve>(
    rng: impl CryptoRngCore,
    base: G1Base,
    g: &[u8],
) -> MpinResult<(Octet<SCALAR_BYTES>, Octet<G1_BYTES>)> {
    let x = random_generate::<C>(rng);
    let w = get_g1_multiple::<C>(&x, base, g)?;
    Ok((x, w))
}

/// `x·G` or `x^-1·G` in G2.
pub fn get_g2_multiple<C: PairingCurve>(
    x: &[u8],
    exponent: G2Exponent,
    g: &[u8],
) -> MpinResult<Octet<G2_BYTES>> {
    let mut x = decode_scalar::<C>(x)?;
    if exponent == G2Exponent::Invert {
        x = Option::<Scalar<C>>::from(x.invert()).ok_or(MpinError::BadParams)?;
    }
    Ok((decode_g2::<C>(g)? * x).to_bytes())
}

/// [`get_g2_multiple`] with a fresh random `x`, returned alongside the point.
pub fn get_g2_multiple_random<C: PairingCurve>(
    rng: impl CryptoRngCore,
    exponent: G2Exponent,
    g: &[u8],
) -> MpinResult<(Octet<SCALAR_BYTES>, Octet<G2_BYTES>)> {
    let x = random_generate::<C>(rng);
    let w = get_g2_multiple::<C>(&x, exponent, g)?;
    Ok((x, w))
}

/// A designated verifier key pair `(z, Pa = z^-1·Q)`.
///
/// The client appends `Pa` to its identity before the secret is issued and
/// multiplies that secret by `z` with [`get_g1_multiple`]. Only a server
/// holding `Pa` then accepts its single pass signatures.
pub fn get_dvs_keypair<C: PairingCurve>(
    rng: impl CryptoRngCore,
) -> MpinResult<(Octet<SCALAR_BYTES>, Octet<G2_BYTES>)> {
    let q = G2Affine::<C>::generator().to_bytes();
    get_g2_multiple_random::<C>(rng, G2Exponent::Invert, &q)
}

/// Adds two shares of a client secret or time permit.
pub fn recombine_g1<C: PairingCurve>(a: &[u8], b: &[u8]) -> MpinResult<Octet<G1_BYTES>> {
    let sum = G1Projective::from(decode_g1::<C>(a)?) + decode_g1::<C>(b)?;
    Ok(sum.to_uncompressed())
}

/// Adds two shares of a server secret.
pub fn recombine_g2<C: PairingCurve>(a: &[u8], b: &[u8]) -> MpinResult<Octet<G2_BYTES>> {
    let sum = G2Projective::from(decode_g2::<C>(a)?) + decode_g2::<C>(b)?;
    Ok(sum.to_bytes())
}

/// The client's first pass with a caller chosen `x`.
///
/// Rebuilds `SEC = token + PIN·A` with `A = H(ID)`, adding the time permit
/// when `date` is set, and commits to `x·A` (or `x·(A + H(date|H(ID)))`).
pub fn client_1<C: PairingCurve>(
    date: Option<u32>,
    id: &[u8],
    x: &[u8],
    pin: u32,
    token: &[u8],
    permit: Option<&[u8]>,
) -> MpinResult<ClientPass1> {
    let x = decode_scalar::<C>(x)?;
    let h = hash_id::<C>(id);
    let a = G1Projective::<C>::mapit(&h);
    let mut sec = G1Projective::from(decode_g1::<C>(token)?) + a * pin_scalar::<C>(pin);

    let xcid = match date {
        Some(date) => {
            let permit = permit.ok_or(MpinError::BadParams)?;
            sec += decode_g1::<C>(permit)?;
            let at = G1Projective::<C>::mapit(&hashit::<C>(date, &h));
            Some(((a + at) * x).to_uncompressed())
        }
        None => None,
    };

    Ok(ClientPass1 {
        x: x.to_be_bytes(),
        sec: sec.to_uncompressed(),
        xid: (a * x).to_uncompressed(),
        xcid,
    })
}

/// [`client_1`] with a fresh random `x`.
pub fn client_1_random<C: PairingCurve>(
    rng: impl CryptoRngCore,
    date: Option<u32>,
    id: &[u8],
    pin: u32,
    token: &[u8],
    permit: Option<&[u8]>,
) -> MpinResult<ClientPass1> {
    let x = random_generate::<C>(rng);
    client_1::<C>(date, id, &x, pin, token, permit)
}

/// The server's first pass: `HID = H(ID)` and, with a date, `HTID = HID + H(date|H(ID))`.
pub fn server_1<C: PairingCurve>(date: Option<u32>, id: &[u8]) -> ServerPass1 {
    let h = hash_id::<C>(id);
    let a = G1Projective::<C>::mapit(&h);
    let htid = date.map(|date| {
        let at = G1Projective::<C>::mapit(&hashit::<C>(date, &h));
        (a + at).to_uncompressed()
    });
    ServerPass1 {
        hid: a.to_uncompressed(),
        htid,
    }
}

/// The client's second pass, `V = -(x + y)·SEC`.
pub fn client_2<C: PairingCurve>(x: &[u8], y: &[u8], sec: &[u8]) -> MpinResult<Octet<G1_BYTES>> {
    let x = decode_scalar::<C>(x)?;
    let y = decode_scalar::<C>(y)?;
    let v = -(x + y) * decode_g1::<C>(sec)?;
    Ok(v.to_uncompressed())
}

/// Evaluates `e(V, Q)·e(y·H + U, sQ)`, which is one exactly when the client
/// holds a valid token and PIN. A designated verifier key `pa` replaces `Q`.
#[allow(clippy::too_many_arguments)]
fn server_check<C: PairingCurve>(
    date: Option<u32>,
    hid: &[u8],
    htid: Option<&[u8]>,
    y: &[u8],
    sst: &[u8],
    xid: &[u8],
    xcid: Option<&[u8]>,
    v: &[u8],
    pa: Option<&[u8]>,
) -> MpinResult<Gt<C>> {
    let (h, u) = match date {
        Some(_) => (
            htid.ok_or(MpinError::BadParams)?,
            xcid.ok_or(MpinError::BadParams)?,
        ),
        None => (hid, xid),
    };
    let y = decode_scalar::<C>(y)?;
    let sq = decode_g2::<C>(sst)?;
    let v = decode_g1::<C>(v)?;
    let p = (decode_g1::<C>(h)? * y + decode_g1::<C>(u)?).to_affine();
    let q = match pa {
        Some(pa) => decode_g2::<C>(pa)?,
        None => G2Affine::generator(),
    };

    Ok(fexp(&double_ate(&v, &q, &p, &sq)))
}

/// The server's second pass.
///
/// Any failure of the pairing check is reported as [`MpinError::BadPin`]:
/// a wrong PIN, an expired permit, a tampered message or the wrong
/// designated verifier key `pa`.
#[allow(clippy::too_many_arguments)]
pub fn server_2<C: PairingCurve>(
    date: Option<u32>,
    hid: &[u8],
    htid: Option<&[u8]>,
    y: &[u8],
    sst: &[u8],
    xid: &[u8],
    xcid: Option<&[u8]>,
    v: &[u8],
    pa: Option<&[u8]>,
) -> MpinResult<()> {
    let g = server_check::<C>(date, hid, htid, y, sst, xid, xcid, v, pa)?;
    if g.is_identity().into() {
        Ok(())
    } else {
        log::debug!("{}: pairing check failed", C::CONFIG.name);
        Err(MpinError::BadPin)
    }
}

/// The values `E` and `F` handed to [`kangaroo`] after [`server_2`] fails.
///
/// `E` is the failing pairing value and `F = e(y·HID + xID, Q)`, so a PIN off
/// by `d` gives `E = F^-d`.
#[allow(clippy::too_many_arguments)]
pub fn pin_error_evidence<C: PairingCurve>(
    date: Option<u32>,
    hid: &[u8],
    htid: Option<&[u8]>,
    y: &[u8],
    sst: &[u8],
    xid: &[u8],
    xcid: Option<&[u8]>,
    v: &[u8],
) -> MpinResult<(Octet<GT_BYTES>, Octet<GT_BYTES>)> {
    let e = server_check::<C>(date, hid, htid, y, sst, xid, xcid, v, None)?;
    let p = decode_g1::<C>(hid)? * decode_scalar::<C>(y)? + decode_g1::<C>(xid)?;
    let f = pairing(&p.to_affine(), &G2Affine::generator());
    Ok((e.to_bytes(), f.to_bytes()))
}

fn jump_index<C: PairingCurve>(g: &Gt<C>) -> usize {
    (g.0.c0.c0.c0.low_word() % TS as u64) as usize
}

/// Pollard's lambda method for the PIN error `d` with `E = F^-d`.
///
/// Returns zero when the wild kangaroo never lands in the trap.
pub fn kangaroo<C: PairingCurve>(e: &[u8], f: &[u8]) -> MpinResult<i32> {
    let e = decode_gt::<C>(e)?;
    let f = decode_gt::<C>(f)?;

    let mut table = [Gt::<C>::IDENTITY; TS];
    let mut distance = [0i32; TS];
    let mut power = f;
    for (i, (entry, d)) in table.iter_mut().zip(distance.iter_mut()).enumerate() {
        *entry = power;
        *d = 1 << i;
        power = power.double();
    }

    // tame kangaroo
    let mut trap = Gt::<C>::IDENTITY;
    let mut dn = 0i32;
    for _ in 0..TRAP {
        let i = jump_index(&trap);
        trap += table[i];
        dn += distance[i];
    }
    let trap_inverse = -trap;

    // wild kangaroo
    let maxpin = MAXPIN as i32;
    let mut wild = e;
    let mut dm = 0i32;
    let mut steps = 0usize;
    let mut result = 0i32;
    while dm - dn < maxpin {
        steps += 1;
        if steps > 4 * TRAP {
            break;
        }
        let i = jump_index(&wild);
        wild += table[i];
        dm += distance[i];
        if wild == trap {
            result = dm - dn;
            break;
        }
        if wild == trap_inverse {
            result = dn - dm;
            break;
        }
    }
    if steps > 4 * TRAP || dm - dn >= maxpin {
        log::trace!("{}: kangaroo escaped after {} steps", C::CONFIG.name, steps);
        result = 0;
    }
    log::debug!("{}: kangaroo found PIN error {}", C::CONFIG.name, result);
    Ok(result)
}

fn single_pass_y<C: PairingCurve>(
    time: u32,
    commitment: &[u8],
    message: Option<&[u8]>,
) -> Octet<SCALAR_BYTES> {
    let digest = hash_parts::<C>(time, &[commitment, message.unwrap_or_default()]);
    Scalar::<C>::from_be_bytes_reduced(&digest).to_be_bytes()
}

/// The single pass challenge `H(time|m) mod r`.
pub fn get_y<C: PairingCurve>(time: u32, m: &[u8]) -> Octet<SCALAR_BYTES> {
    single_pass_y::<C>(time, m, None)
}

/// Single pass client: both passes folded into one message with the
/// challenge derived from `time`, the commitment and an optional `message`.
#[allow(clippy::too_many_arguments)]
pub fn client<C: PairingCurve>(
    date: Option<u32>,
    id: &[u8],
    x: &[u8],
    pin: u32,
    token: &[u8],
    permit: Option<&[u8]>,
    message: Option<&[u8]>,
    time: u32,
) -> MpinResult<ClientSinglePass> {
    let pass1 = client_1::<C>(date, id, x, pin, token, permit)?;
    let commitment = pass1.xcid.unwrap_or(pass1.xid);
    let y = single_pass_y::<C>(time, &commitment, message);
    let v = client_2::<C>(&pass1.x, &y, &pass1.sec)?;
    Ok(ClientSinglePass {
        x: pass1.x,
        xid: pass1.xid,
        xcid: pass1.xcid,
        y,
        v,
    })
}

/// Single pass server, recomputing the challenge from `time` and `message`.
///
/// With `pa` set the client's `V` is a designated verifier signature on
/// `message`, and `id` must already carry `pa` as in [`get_dvs_keypair`].
#[allow(clippy::too_many_arguments)]
pub fn server<C: PairingCurve>(
    date: Option<u32>,
    id: &[u8],
    sst: &[u8],
    xid: &[u8],
    xcid: Option<&[u8]>,
    v: &[u8],
    message: Option<&[u8]>,
    time: u32,
    pa: Option<&[u8]>,
) -> MpinResult<()> {
    let pass1 = server_1::<C>(date, id);
    let commitment = match date {
        Some(_) => xcid.ok_or(MpinError::BadParams)?,
        None => xid,
    };
    let y = single_pass_y::<C>(time, commitment, message);
    server_2::<C>(
        date,
        &pass1.hid,
        pass1.htid.as_deref(),
        &y,
        sst,
        xid,
        xcid,
        v,
        pa,
    )
}

/// Pairings the client can compute ahead of a key agreement:
/// `e(token, Q)` and `e(H(ID), Q)`.
pub fn precompute<C: PairingCurve>(
    token: &[u8],
    hcid: &[u8],
) -> MpinResult<(Octet<GT_BYTES>, Octet<GT_BYTES>)> {
    let q = G2Affine::<C>::generator();
    let g1 = pairing(&decode_g1::<C>(token)?, &q);
    let g2 = pairing(&G1Projective::<C>::mapit(hcid).to_affine(), &q);
    Ok((g1.to_bytes(), g2.to_bytes()))
}

/// The transcript hash `H(HID | xCID or xID | SEC | Y | Z | T) mod r`.
pub fn hash_all<C: PairingCurve>(
    hid: &[u8],
    xid: &[u8],
    xcid: Option<&[u8]>,
    sec: &[u8],
    y: &[u8],
    z: &[u8],
    t: &[u8],
) -> Octet<SCALAR_BYTES> {
    let digest = hash_parts::<C>(0, &[hid, xcid.unwrap_or(xid), sec, y, z, t]);
    Scalar::<C>::from_be_bytes_reduced(&digest).to_be_bytes()
}

/// The client session key from the precomputed pairings, its PIN, the
/// ephemeral `r` behind `Z = r·H(ID)`, its pass one `x` and the server's `wCID`.
#[allow(clippy::too_many_arguments)]
pub fn client_key<C: PairingCurve>(
    g1: &[u8],
    g2: &[u8],
    pin: u32,
    r: &[u8],
    x: &[u8],
    h: &[u8],
    wcid: &[u8],
) -> MpinResult<[u8; AES_KEY_BYTES]> {
    let g1 = decode_gt::<C>(g1)?;
    let g2 = decode_gt::<C>(g2)?;
    let z = decode_scalar::<C>(r)? + decode_scalar::<C>(h)?;
    let w = decode_g1::<C>(wcid)? * decode_scalar::<C>(x)?;

    let g = (g1 + g2 * pin_scalar::<C>(pin)) * z;
    Ok(mpin_hash(&g.trace(), &w.to_affine()))
}

/// The server session key, `g = e(Z + h·HID, sQ)` hashed with `w·(xCID or xID)`.
#[allow(clippy::too_many_arguments)]
pub fn server_key<C: PairingCurve>(
    z: &[u8],
    sst: &[u8],
    w: &[u8],
    h: &[u8],
    hid: &[u8],
    xid: &[u8],
    xcid: Option<&[u8]>,
) -> MpinResult<[u8; AES_KEY_BYTES]> {
    let a = decode_g1::<C>(hid)?;
    let r = a * decode_scalar::<C>(h)? + decode_g1::<C>(z)?;
    let g = pairing(&r.to_affine(), &decode_g2::<C>(sst)?);
    let u = decode_g1::<C>(xcid.unwrap_or(xid))? * decode_scalar::<C>(w)?;
    Ok(mpin_hash(&g.trace(), &u.to_affine()))
}

/// The first point at or after `x` whose y coordinate has parity `odd`.
fn map_forward<C: PairingCurve>(x: Fp<C>, odd: Choice) -> G1Affine<C> {
    let mut x = x;
    loop {
        if let Some(p) = Option::<G1Affine<C>>::from(G1Affine::from_x(x, odd)) {
            return p;
        }
        x += Fp::ONE;
    }
}

/// The closest valid x coordinate below `p.x` and the distance to it.
fn map_back<C: PairingCurve>(p: &G1Affine<C>) -> (Fp<C>, u32) {
    let mut x = p.x;
    let mut distance = 0u32;
    loop {
        x -= Fp::ONE;
        distance += 1;
        if G1Affine::from_x(x, p.y.is_odd()).is_some().into() {
            return (x, distance);
        }
    }
}

/// Hides a G1 point as two field elements that look uniformly random.
///
/// The output is `tag | u | v`, where the low two bits of the tag carry the
/// y parities of the two halves.
pub fn encoding<C: PairingCurve>(
    mut rng: impl CryptoRngCore,
    point: &[u8],
) -> MpinResult<Octet<G1_BYTES>> {
    let p = G1Projective::from(decode_g1::<C>(point)?);
    let size = Fp::<C>::bytes();
    loop {
        let u = Fp::<C>::random(&mut rng);
        let su = (rng.next_u32() & 1) as u8;
        let w = map_forward(u, Choice::from(su));
        let rest = (p - w).to_affine();
        if rest.is_identity().into() {
            continue;
        }
        let sv = rest.y.is_odd().unwrap_u8();
        let (mut v, range) = map_back(&rest);
        let m = (rng.next_u32() & 0xff) % range;
        v += Fp::from_u64(u64::from(m) + 1);

        let mut out = Octet::zeroed(2 * size + 1);
        out[0] = su + 2 * sv;
        u.write_be_bytes(&mut out[1..=size]);
        v.write_be_bytes(&mut out[size + 1..]);
        return Ok(out);
    }
}

/// Recovers the point hidden by [`encoding`], returned uncompressed.
pub fn decoding<C: PairingCurve>(bytes: &[u8]) -> MpinResult<Octet<G1_BYTES>> {
    let size = Fp::<C>::bytes();
    if bytes.len() != 2 * size + 1 {
        return Err(MpinError::BadParams);
    }
    if bytes[0] & 0x04 != 0 {
        return Err(MpinError::InvalidPoint);
    }
    let su = Choice::from(bytes[0] & 1);
    let sv = Choice::from((bytes[0] >> 1) & 1);
    let u = Fp::<C>::from_be_bytes_reduced(&bytes[1..=size]);
    let v = Fp::<C>::from_be_bytes_reduced(&bytes[size + 1..]);

    let p = G1Projective::from(map_forward(v, sv)) + map_forward(u, su);
    Ok(p.to_uncompressed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inner_types::{Bls381, Bn254, Bn254Cx};
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    const ID: &[u8] = b"testUser@miracl.com";
    const DATE: u32 = 16_800;

    struct Issued {
        sst: Octet<G2_BYTES>,
        token: Octet<G1_BYTES>,
        permit: Octet<G1_BYTES>,
    }

    /// Two authorities each hold a master secret share.
    fn issue<C: PairingCurve>(rng: &mut ChaCha8Rng, pin: u32, date: u32) -> Issued {
        let ms1 = random_generate::<C>(&mut *rng);
        let ms2 = random_generate::<C>(&mut *rng);
        let hcid = hash_id::<C>(ID);

        let sst = recombine_g2::<C>(
            &get_server_secret::<C>(&ms1).unwrap(),
            &get_server_secret::<C>(&ms2).unwrap(),
        )
        .unwrap();
        let secret = recombine_g1::<C>(
            &get_client_secret::<C>(&ms1, &hcid).unwrap(),
            &get_client_secret::<C>(&ms2, &hcid).unwrap(),
        )
        .unwrap();
        let permit = recombine_g1::<C>(
            &get_client_permit::<C>(date, &ms1, &hcid).unwrap(),
            &get_client_permit::<C>(date, &ms2, &hcid).unwrap(),
        )
        .unwrap();
        let token = extract_pin::<C>(ID, pin, &secret).unwrap();
        Issued { sst, token, permit }
    }

    fn authenticate<C: PairingCurve>(
        rng: &mut ChaCha8Rng,
        issued: &Issued,
        pin: u32,
        date: Option<u32>,
    ) -> MpinResult<()> {
        let permit = date.map(|_| &issued.permit[..]);
        let pass1 = client_1_random::<C>(&mut *rng, date, ID, pin, &issued.token, permit)?;
        let server = server_1::<C>(date, ID);
        let y = random_generate::<C>(&mut *rng);
        let v = client_2::<C>(&pass1.x, &y, &pass1.sec)?;
        server_2::<C>(
            date,
            &server.hid,
            server.htid.as_deref(),
            &y,
            &issued.sst,
            &pass1.xid,
            pass1.xcid.as_deref(),
            &v,
            None,
        )
    }

    #[test]
    fn hash_id_is_deterministic() {
        assert_eq!(hash_id::<Bn254>(ID), hash_id::<Bn254>(ID));
        assert_ne!(hash_id::<Bn254>(ID), hash_id::<Bn254>(b"other@miracl.com"));
        assert_eq!(hash_id::<Bls381>(ID).len(), 48);
    }

    #[test]
    fn shares_recombine() {
        let mut rng = ChaCha8Rng::from_seed([40u8; 32]);
        let ms1 = random_generate::<Bn254>(&mut rng);
        let ms2 = random_generate::<Bn254>(&mut rng);
        let ms = (decode_scalar::<Bn254>(&ms1).unwrap() + decode_scalar::<Bn254>(&ms2).unwrap())
            .to_be_bytes();
        let hcid = hash_id::<Bn254>(ID);

        assert_eq!(
            recombine_g1::<Bn254>(
                &get_client_secret::<Bn254>(&ms1, &hcid).unwrap(),
                &get_client_secret::<Bn254>(&ms2, &hcid).unwrap()
            )
            .unwrap(),
            get_client_secret::<Bn254>(&ms, &hcid).unwrap()
        );
        assert_eq!(
            recombine_g1::<Bn254>(
                &get_client_permit::<Bn254>(DATE, &ms1, &hcid).unwrap(),
                &get_client_permit::<Bn254>(DATE, &ms2, &hcid).unwrap()
            )
            .unwrap(),
            get_client_permit::<Bn254>(DATE, &ms, &hcid).unwrap()
        );
        assert_eq!(
            recombine_g2::<Bn254>(
                &get_server_secret::<Bn254>(&ms1).unwrap(),
                &get_server_secret::<Bn254>(&ms2).unwrap()
            )
            .unwrap(),
            get_server_secret::<Bn254>(&ms).unwrap()
        );
    }

    #[test]
    fn good_pin_authenticates() {
        let mut rng = ChaCha8Rng::from_seed([41u8; 32]);
        let issued = issue::<Bn254>(&mut rng, 1234, DATE);
        assert_eq!(authenticate::<Bn254>(&mut rng, &issued, 1234, None), Ok(()));
        assert_eq!(
            authenticate::<Bn254>(&mut rng, &issued, 1234, Some(DATE)),
            Ok(())
        );
        // PINs only count modulo MAXPIN
        assert_eq!(
            authenticate::<Bn254>(&mut rng, &issued, 1234 + MAXPIN, None),
            Ok(())
        );

        let issued = issue::<Bls381>(&mut rng, 9876, DATE);
        assert_eq!(
            authenticate::<Bls381>(&mut rng, &issued, 9876, Some(DATE)),
            Ok(())
        );

        let issued = issue::<Bn254Cx>(&mut rng, 5555, DATE);
        assert_eq!(
            authenticate::<Bn254Cx>(&mut rng, &issued, 5555, Some(DATE)),
            Ok(())
        );
    }

    #[test]
    fn big_pin_known_answer() {
        let id = b"testUser@certivox.com";
        let pin = Octet::<SCALAR_BYTES>::from_hex(
            "1b18b8b882daf76a18bf2278fe4e15c62eed8131e708573375fd81a8415014b3",
        )
        .unwrap();
        let secret = Octet::<G1_BYTES>::from_hex(
            "0422a522b5c05d06cde3a65872656ab596e111c4ea7c0c349bac26f0bdaf7d5f\
             0a1ea8a0cab99d06677cfbc3c8d667e7b0af33b9ed4df007b0ccc8c2b77353bbe6",
        )
        .unwrap();
        let token = Octet::<G1_BYTES>::from_hex(
            "042182235070802ebc33633e70e6628f48fd896e86dfc40c81227caa2792367a58\
             1d461dbba6efa30896c71f427df335885142cc6fb64ba082ff9573b9276475c0",
        )
        .unwrap();

        assert_eq!(extract_big_pin::<Bn254Cx>(id, &pin, &secret), Ok(token));
        assert_eq!(add_big_pin::<Bn254Cx>(id, &pin, &token), Ok(secret));
        assert_eq!(
            extract_big_pin::<Bn254Cx>(id, &pin, &[0u8; 65]),
            Err(MpinError::InvalidPoint)
        );
    }

    #[test]
    fn wrong_pin_is_rejected_and_recovered() {
        let mut rng = ChaCha8Rng::from_seed([42u8; 32]);
        let issued = issue::<Bn254>(&mut rng, 1234, DATE);
        let server = server_1::<Bn254>(None, ID);

        // each attempt uses a fresh x, so each walk differs
        let mut recovered = 0;
        for _ in 0..5 {
            let pass1 =
                client_1_random::<Bn254>(&mut rng, None, ID, 2000, &issued.token, None).unwrap();
            let y = random_generate::<Bn254>(&mut rng);
            let v = client_2::<Bn254>(&pass1.x, &y, &pass1.sec).unwrap();
            let sst = &issued.sst;
            assert_eq!(
                server_2::<Bn254>(None, &server.hid, None, &y, sst, &pass1.xid, None, &v, None),
                Err(MpinError::BadPin)
            );

            let (e, f) = pin_error_evidence::<Bn254>(
                None,
                &server.hid,
                None,
                &y,
                &issued.sst,
                &pass1.xid,
                None,
                &v,
            )
            .unwrap();
            let error = kangaroo::<Bn254>(&e, &f).unwrap();
            assert!(error == 0 || error == 766, "unexpected PIN error {}", error);
            if error == 766 {
                recovered += 1;
            }
        }
        assert!(recovered > 0);
    }

    #[test]
    fn wrong_pin_with_date_is_recovered() {
        let mut rng = ChaCha8Rng::from_seed([43u8; 32]);
        let issued = issue::<Bn254>(&mut rng, 1234, DATE);
        let server = server_1::<Bn254>(Some(DATE), ID);

        let mut recovered = 0;
        for _ in 0..5 {
            let pass1 = client_1_random::<Bn254>(
                &mut rng,
                Some(DATE),
                ID,
                1240,
                &issued.token,
                Some(&issued.permit),
            )
            .unwrap();
            let y = random_generate::<Bn254>(&mut rng);
            let v = client_2::<Bn254>(&pass1.x, &y, &pass1.sec).unwrap();
            let (e, f) = pin_error_evidence::<Bn254>(
                Some(DATE),
                &server.hid,
                server.htid.as_deref(),
                &y,
                &issued.sst,
                &pass1.xid,
                pass1.xcid.as_deref(),
                &v,
            )
            .unwrap();
            let error = kangaroo::<Bn254>(&e, &f).unwrap();
            assert!(error == 0 || error == 6, "unexpected PIN error {}", error);
            if error == 6 {
                recovered += 1;
            }
        }
        assert!(recovered > 0);
    }

    #[test]
    fn tampered_v_is_rejected() {
        let mut rng = ChaCha8Rng::from_seed([44u8; 32]);
        let issued = issue::<Bn254>(&mut rng, 1234, DATE);
        let pass1 =
            client_1_random::<Bn254>(&mut rng, None, ID, 1234, &issued.token, None).unwrap();
        let server = server_1::<Bn254>(None, ID);
        let y = random_generate::<Bn254>(&mut rng);
        let other_y = random_generate::<Bn254>(&mut rng);
        let check = |v: &[u8]| {
            server_2::<Bn254>(None, &server.hid, None, &y, &issued.sst, &pass1.xid, None, v, None)
        };

        let v = client_2::<Bn254>(&pass1.x, &other_y, &pass1.sec).unwrap();
        assert_eq!(check(&v), Err(MpinError::BadPin));

        let v = client_2::<Bn254>(&pass1.x, &y, &pass1.sec).unwrap();
        let generator = G1Affine::<Bn254>::generator().to_uncompressed();
        let shifted = recombine_g1::<Bn254>(&v, &generator).unwrap();
        assert_eq!(check(&shifted), Err(MpinError::BadPin));
        assert_eq!(check(&v), Ok(()));
    }

    #[test]
    fn permit_for_another_day_is_rejected() {
        let mut rng = ChaCha8Rng::from_seed([45u8; 32]);
        let issued = issue::<Bn254>(&mut rng, 1234, DATE);
        assert_eq!(
            authenticate::<Bn254>(&mut rng, &issued, 1234, Some(DATE + 1)),
            Err(MpinError::BadPin)
        );
    }

    #[test]
    fn malformed_inputs() {
        let mut rng = ChaCha8Rng::from_seed([46u8; 32]);
        let issued = issue::<Bn254>(&mut rng, 1234, DATE);
        let x = random_generate::<Bn254>(&mut rng);

        assert_eq!(
            client_1::<Bn254>(Some(DATE), ID, &x, 1234, &issued.token, None),
            Err(MpinError::BadParams)
        );
        assert_eq!(
            client_1::<Bn254>(None, ID, &x, 1234, &issued.token[..40], None),
            Err(MpinError::InvalidPoint)
        );
        assert_eq!(
            client_1::<Bn254>(None, ID, &x[..31], 1234, &issued.token, None),
            Err(MpinError::BadParams)
        );
        assert_eq!(
            get_server_secret::<Bn254>(&[0xffu8; 32]),
            Err(MpinError::BadParams)
        );
        assert_eq!(MpinError::BadPin.code(), -19);
    }

    #[test]
    fn multiples() {
        let mut rng = ChaCha8Rng::from_seed([47u8; 32]);
        let hcid = hash_id::<Bn254>(ID);
        let (x, w) = get_g1_multiple_random::<Bn254>(&mut rng, G1Base::Hash, &hcid).unwrap();
        assert_eq!(w, get_client_secret::<Bn254>(&x, &hcid).unwrap());

        let a = G1Projective::<Bn254>::mapit(&hcid).to_uncompressed();
        assert_eq!(w, get_g1_multiple::<Bn254>(&x, G1Base::Point, &a).unwrap());

        let q = G2Affine::<Bn254>::generator().to_bytes();
        let (x, xq) = get_g2_multiple_random::<Bn254>(&mut rng, G2Exponent::Multiply, &q).unwrap();
        assert_eq!(xq, get_server_secret::<Bn254>(&x).unwrap());
        assert_eq!(
            get_g2_multiple::<Bn254>(&x, G2Exponent::Invert, &xq).unwrap(),
            q
        );
    }

    #[test]
    fn single_pass() {
        let mut rng = ChaCha8Rng::from_seed([48u8; 32]);
        let issued = issue::<Bn254>(&mut rng, 4321, DATE);
        let time = 1_451_606_400;
        let message: &[u8] = b"message";
        let altered: &[u8] = b"massage";

        for date in [None, Some(DATE)] {
            let permit = date.map(|_| &issued.permit[..]);
            let x = random_generate::<Bn254>(&mut rng);
            let sent =
                client::<Bn254>(date, ID, &x, 4321, &issued.token, permit, Some(message), time)
                    .unwrap();
            let xcid = sent.xcid.as_deref();
            let check = |m: &[u8], t: u32| {
                server::<Bn254>(date, ID, &issued.sst, &sent.xid, xcid, &sent.v, Some(m), t, None)
            };

            assert_eq!(check(message, time), Ok(()));
            assert_eq!(check(altered, time), Err(MpinError::BadPin));
            assert_eq!(check(message, time + 1), Err(MpinError::BadPin));
        }

        let x = random_generate::<Bn254>(&mut rng);
        let sent = client::<Bn254>(None, ID, &x, 4321, &issued.token, None, None, time).unwrap();
        assert_eq!(sent.y, get_y::<Bn254>(time, &sent.xid));
    }

    fn key_agreement<C: PairingCurve>(rng: &mut ChaCha8Rng, date: Option<u32>) {
        let pin = 1111;
        let issued = issue::<C>(&mut *rng, pin, DATE);
        let hcid = hash_id::<C>(ID);
        let (g1, g2) = precompute::<C>(&issued.token, &hcid).unwrap();

        let permit = date.map(|_| &issued.permit[..]);
        let pass1 = client_1_random::<C>(&mut *rng, date, ID, pin, &issued.token, permit).unwrap();
        let server = server_1::<C>(date, ID);
        let y = random_generate::<C>(&mut *rng);
        let v = client_2::<C>(&pass1.x, &y, &pass1.sec).unwrap();
        assert_eq!(
            server_2::<C>(
                date,
                &server.hid,
                server.htid.as_deref(),
                &y,
                &issued.sst,
                &pass1.xid,
                pass1.xcid.as_deref(),
                &v,
                None
            ),
            Ok(())
        );

        // client sends Z = r·H(ID), server sends T = w·(HID or HTID)
        let (r, z) = get_g1_multiple_random::<C>(&mut *rng, G1Base::Hash, &hcid).unwrap();
        let server_point = server.htid.unwrap_or(server.hid);
        let (w, t) = get_g1_multiple_random::<C>(&mut *rng, G1Base::Point, &server_point).unwrap();

        let h = hash_all::<C>(&server.hid, &pass1.xid, pass1.xcid.as_deref(), &v, &y, &z, &t);
        let client_side = client_key::<C>(&g1, &g2, pin, &r, &pass1.x, &h, &t).unwrap();
        let server_side = server_key::<C>(
            &z,
            &issued.sst,
            &w,
            &h,
            &server.hid,
            &pass1.xid,
            pass1.xcid.as_deref(),
        )
        .unwrap();
        assert_eq!(client_side, server_side);

        let wrong = client_key::<C>(&g1, &g2, pin + 1, &r, &pass1.x, &h, &t).unwrap();
        assert_ne!(wrong, server_side);
    }

    #[test]
    fn full_key_agreement() {
        let mut rng = ChaCha8Rng::from_seed([49u8; 32]);
        key_agreement::<Bn254>(&mut rng, None);
        key_agreement::<Bn254>(&mut rng, Some(DATE));
        key_agreement::<Bls381>(&mut rng, Some(DATE));
    }

    #[cfg(any(feature = "alloc", feature = "std"))]
    #[test]
    fn designated_verifier_signature() {
        let mut rng = ChaCha8Rng::from_seed([51u8; 32]);
        let s = random_generate::<Bn254>(&mut rng);
        let sst = get_server_secret::<Bn254>(&s).unwrap();
        let (z, pa) = get_dvs_keypair::<Bn254>(&mut rng).unwrap();
        let (_, other_pa) = get_dvs_keypair::<Bn254>(&mut rng).unwrap();
        let q = G2Affine::<Bn254>::generator().to_bytes();
        assert_eq!(get_g2_multiple::<Bn254>(&z, G2Exponent::Invert, &q).unwrap(), pa);

        // the client identity carries its public key
        let id = [ID, &pa[..]].concat();
        let hcid = hash_id::<Bn254>(&id);
        let secret = get_client_secret::<Bn254>(&s, &hcid).unwrap();
        let secret = get_g1_multiple::<Bn254>(&z, G1Base::Point, &secret).unwrap();
        let token = extract_pin::<Bn254>(&id, 1234, &secret).unwrap();

        let time = 1_451_606_400;
        let message: &[u8] = b"Message to sign";
        let x = random_generate::<Bn254>(&mut rng);
        let sent = client::<Bn254>(None, &id, &x, 1234, &token, None, Some(message), time).unwrap();
        let verify = |pa: Option<&[u8]>| {
            server::<Bn254>(None, &id, &sst, &sent.xid, None, &sent.v, Some(message), time, pa)
        };
        assert_eq!(verify(Some(&pa[..])), Ok(()));
        assert_eq!(verify(Some(&other_pa[..])), Err(MpinError::BadPin));
        assert_eq!(verify(None), Err(MpinError::BadPin));

        let wrong =
            client::<Bn254>(None, &id, &x, 4321, &token, None, Some(message), time).unwrap();
        let pa = Some(&pa[..]);
        assert_eq!(
            server::<Bn254>(None, &id, &sst, &wrong.xid, None, &wrong.v, Some(message), time, pa),
            Err(MpinError::BadPin)
        );
    }

    #[test]
    fn elligator_encoding() {
        let mut rng = ChaCha8Rng::from_seed([50u8; 32]);
        let hcid = hash_id::<Bn254>(ID);
        let point = G1Projective::<Bn254>::mapit(&hcid).to_uncompressed();

        for _ in 0..4 {
            let hidden = encoding::<Bn254>(&mut rng, &point).unwrap();
            assert_eq!(hidden.len(), point.len());
            assert_ne!(hidden, point);
            assert_eq!(decoding::<Bn254>(&hidden).unwrap(), point);
        }

        let mut bad = encoding::<Bn254>(&mut rng, &point).unwrap();
        bad[0] |= 0x04;
        assert_eq!(decoding::<Bn254>(&bad), Err(MpinError::InvalidPoint));
        assert_eq!(decoding::<Bn254>(&bad[1..]), Err(MpinError::BadParams));
    }
}
