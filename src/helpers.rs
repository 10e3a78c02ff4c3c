use crate::inner_types::{Fp4, G1Affine, PairingCurve, MAX_FIELD_BYTES};
use core::{
    fmt::{self, Debug, Formatter},
    ops::{Deref, DerefMut},
};
use sha2::{Digest, Sha256};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::DefaultIsZeroes;

/// Capacity for a scalar or a single field element
pub const SCALAR_BYTES: usize = MAX_FIELD_BYTES;
/// Capacity for an uncompressed G1 point `0x04 | x | y`
pub const G1_BYTES: usize = 2 * MAX_FIELD_BYTES + 1;
/// Capacity for a G2 point `xa | xb | ya | yb`
pub const G2_BYTES: usize = 4 * MAX_FIELD_BYTES;
/// Capacity for an element of Gt
pub const GT_BYTES: usize = 12 * MAX_FIELD_BYTES;
/// Output size of SHA-256
pub const HASH_BYTES: usize = 32;
/// Size of the derived session keys
pub const AES_KEY_BYTES: usize = 16;

/// A byte string with a fixed capacity and an explicit length.
#[derive(Copy, Clone)]
pub struct Octet<const N: usize> {
    bytes: [u8; N],
    length: usize,
}

impl<const N: usize> Default for Octet<N> {
    fn default() -> Self {
        Self {
            bytes: [0u8; N],
            length: 0,
        }
    }
}

impl<const N: usize> DefaultIsZeroes for Octet<N> {}

impl<const N: usize> Debug for Octet<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Octet(")?;
        for b in self.iter() {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}

impl<const N: usize> ConstantTimeEq for Octet<N> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.as_ref().ct_eq(other.as_ref())
    }
}

impl<const N: usize> ConditionallySelectable for Octet<N> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut out = *a;
        for (o, b) in out.bytes.iter_mut().zip(b.bytes.iter()) {
            o.conditional_assign(b, choice);
        }
        let length = u64::conditional_select(&(a.length as u64), &(b.length as u64), choice);
        out.length = length as usize;
        out
    }
}

impl<const N: usize> PartialEq for Octet<N> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<const N: usize> Eq for Octet<N> {}

impl<const N: usize> Deref for Octet<N> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes[..self.length]
    }
}

impl<const N: usize> DerefMut for Octet<N> {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[..self.length]
    }
}

impl<const N: usize> AsRef<[u8]> for Octet<N> {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

impl<const N: usize> AsMut<[u8]> for Octet<N> {
    fn as_mut(&mut self) -> &mut [u8] {
        self
    }
}

impl<const N: usize> Octet<N> {
    /// The largest length this octet can hold
    pub const CAPACITY: usize = N;

    /// `length` zero bytes
    pub fn zeroed(length: usize) -> Self {
        Self {
            bytes: [0u8; N],
            length: length.min(N),
        }
    }

    /// Copies `bytes`, or returns `None` if they do not fit.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > N {
            return None;
        }
        Some(Self::from_slice_truncated(bytes))
    }

    /// Copies at most `N` leading bytes.
    pub(crate) fn from_slice_truncated(bytes: &[u8]) -> Self {
        let length = bytes.len().min(N);
        let mut out = Self::zeroed(length);
        out.bytes[..length].copy_from_slice(&bytes[..length]);
        out
    }

    /// Decodes a hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let length = hex.len() / 2;
        if hex.len() % 2 != 0 || length > N {
            return None;
        }
        let mut out = Self::zeroed(length);
        hex::decode_to_slice(hex, &mut out.bytes[..length]).ok()?;
        Some(out)
    }

    #[cfg(any(feature = "alloc", feature = "std"))]
    pub fn to_hex(&self) -> crate::String {
        hex::encode(self.as_ref())
    }

    /// Appends `bytes`, dropping whatever does not fit.
    pub fn push(&mut self, bytes: &[u8]) {
        let room = (N - self.length).min(bytes.len());
        self.bytes[self.length..self.length + room].copy_from_slice(&bytes[..room]);
        self.length += room;
    }

    pub fn capacity(&self) -> usize {
        N
    }
}

/// SHA-256 of `BE32(n) | id`, the prefix omitted when `n` is zero, laid out in
/// a field sized buffer.
///
/// For fields of at least 32 bytes the digest is right aligned behind zero
/// bytes, otherwise it is truncated to the field size.
pub fn hashit<C: PairingCurve>(n: u32, id: &[u8]) -> Octet<SCALAR_BYTES> {
    hash_parts::<C>(n, &[id])
}

/// [`hashit`] over the concatenation of `parts`.
pub(crate) fn hash_parts<C: PairingCurve>(n: u32, parts: &[&[u8]]) -> Octet<SCALAR_BYTES> {
    let mut hasher = Sha256::new();
    if n != 0 {
        hasher.update(n.to_be_bytes());
    }
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();

    let size = C::CONFIG.modulus_bytes;
    let mut out = Octet::zeroed(size);
    if size >= HASH_BYTES {
        out[size - HASH_BYTES..].copy_from_slice(&digest);
    } else {
        out.copy_from_slice(&digest[..size]);
    }
    out
}

/// The first 16 bytes of SHA-256 over the four coefficients of `c` and the
/// coordinates of `p`, all big-endian and field sized.
pub(crate) fn mpin_hash<C: PairingCurve>(c: &Fp4<C>, p: &G1Affine<C>) -> [u8; AES_KEY_BYTES] {
    let size = C::CONFIG.modulus_bytes;
    let mut buffer = [0u8; MAX_FIELD_BYTES];
    let mut hasher = Sha256::new();
    for coefficient in [c.c0.c0, c.c0.c1, c.c1.c0, c.c1.c1, p.x, p.y] {
        coefficient.write_be_bytes(&mut buffer[..size]);
        hasher.update(&buffer[..size]);
    }
    let digest = hasher.finalize();

    let mut key = [0u8; AES_KEY_BYTES];
    key.copy_from_slice(&digest[..AES_KEY_BYTES]);
    key
}

/// Days elapsed since the unix epoch.
#[cfg(feature = "std")]
pub fn today() -> u32 {
    get_time() / (60 * 60 * 24)
}

/// Seconds elapsed since the unix epoch.
#[cfg(feature = "std")]
pub fn get_time() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or_default()
}
