//! Parameter sets for the supported pairing-friendly curves.
//!
//! Every arithmetic type in the crate is generic over a [`PairingCurve`], so
//! values from two different curves cannot be mixed.

use core::fmt::Debug;
use crypto_bigint::{impl_modulus, modular::constant_mod::ResidueParams, U384};

/// Limb count of every field element. Large enough for the 381 and 383 bit curves.
pub const LIMBS: usize = U384::LIMBS;
/// The largest field size in bytes over all supported curves.
pub const MAX_FIELD_BYTES: usize = 48;
/// Upper bound on the Miller loop length over all supported curves.
pub const ATE_BITS: usize = 72;

/// The family a curve is drawn from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PairingFriendly {
    /// Barreto-Naehrig, embedding degree 12
    Bn,
    /// Barreto-Lynn-Scott, embedding degree 12
    Bls,
}

/// Sign of the curve seed `x`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SignOfX {
    PositiveX,
    NegativeX,
}

/// The sextic twist used to represent G2 over Fp2.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SexticTwist {
    /// y^2 = x^3 + B(1 + i)
    MType,
    /// y^2 = x^3 + B / (1 + i)
    DType,
}

/// Constants describing one curve.
#[derive(Copy, Clone, Debug)]
pub struct CurveConfig {
    pub name: &'static str,
    pub family: PairingFriendly,
    pub sign_of_x: SignOfX,
    pub twist: SexticTwist,
    /// |x|
    pub x: u128,
    /// The `B` in y^2 = x^3 + B
    pub b: u64,
    /// Size of a field element in bytes
    pub modulus_bytes: usize,
    /// The G1 cofactor
    pub cofactor: U384,
    /// (1 + i)^((p - 1) / 6) as `[real, imaginary]`
    pub frobenius: [U384; 2],
    /// `[x, y]`
    pub g1_generator: [U384; 2],
    /// `[x.real, x.imaginary, y.real, y.imaginary]`
    pub g2_generator: [U384; 4],
}

impl CurveConfig {
    /// The Miller loop parameter `n` and `3n`.
    ///
    /// `n = |x|` for BLS curves and `6|x| + 2` or `6|x| - 2` for BN curves
    /// depending on the sign of `x`.
    pub const fn ate_bits(&self) -> (u128, u128) {
        let n = match (self.family, self.sign_of_x) {
            (PairingFriendly::Bls, _) => self.x,
            (PairingFriendly::Bn, SignOfX::PositiveX) => 6 * self.x + 2,
            (PairingFriendly::Bn, SignOfX::NegativeX) => 6 * self.x - 2,
        };
        (n, 3 * n)
    }

    /// Number of bits in `3n`
    pub const fn ate_bit_length(&self) -> usize {
        let (_, n3) = self.ate_bits();
        (u128::BITS - n3.leading_zeros()) as usize
    }

    pub const fn is_negative_x(&self) -> bool {
        matches!(self.sign_of_x, SignOfX::NegativeX)
    }

    pub const fn is_bn(&self) -> bool {
        matches!(self.family, PairingFriendly::Bn)
    }
}

/// A pairing-friendly curve: the base and scalar field moduli plus its constants.
pub trait PairingCurve:
    'static + Copy + Clone + Debug + Default + Eq + Send + Sync
{
    /// The base field modulus p
    type Base: ResidueParams<LIMBS>;
    /// The group order r
    type Order: ResidueParams<LIMBS>;
    /// The curve constants
    const CONFIG: CurveConfig;
}

macro_rules! pairing_curve {
    (
        $(#[$meta:meta])*
        $name:ident,
        $base:ident = $p:literal,
        $order:ident = $r:literal,
        $config:expr
    ) => {
        impl_modulus!($base, U384, $p);
        impl_modulus!($order, U384, $r);

        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
        pub struct $name;

        impl PairingCurve for $name {
            type Base = $base;
            type Order = $order;
            const CONFIG: CurveConfig = $config;
        }
    };
}

pairing_curve!(
    /// BN254 (Nogami et al.), a D-type twist with negative x.
    Bn254,
    Bn254Base = "000000000000000000000000000000002523648240000001ba344d80000000086121000000000013a700000000000013",
    Bn254Order = "000000000000000000000000000000002523648240000001ba344d8000000007ff9f800000000010a10000000000000d",
    CurveConfig {
        name: "BN254",
        family: PairingFriendly::Bn,
        sign_of_x: SignOfX::NegativeX,
        twist: SexticTwist::DType,
        x: 0x4080000000000001,
        b: 2,
        modulus_bytes: 32,
        cofactor: U384::from_be_hex(
            "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000001",
        ),
        frobenius: [
            U384::from_be_hex(
                "000000000000000000000000000000001b377619212e7c8cb6499b50a846953f850974924d3f77c2e17de6c06f2a6de9",
            ),
            U384::from_be_hex(
                "0000000000000000000000000000000009ebee691ed1837503eab22f57b96ac8dc178b6db2c08850c582193f90d5922a",
            ),
        ],
        g1_generator: [
            U384::from_be_hex(
                "000000000000000000000000000000002523648240000001ba344d80000000086121000000000013a700000000000012",
            ),
            U384::from_be_hex(
                "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000001",
            ),
        ],
        g2_generator: [
            U384::from_be_hex(
                "00000000000000000000000000000000061a10bb519eb62feb8d8c7e8c61edb6a4648bbb4898bf0d91ee4224c803fb2b",
            ),
            U384::from_be_hex(
                "000000000000000000000000000000000516aaf9ba737833310aa78c5982aa5b1f4d746bae3784b70d8c34c1e7d54cf3",
            ),
            U384::from_be_hex(
                "00000000000000000000000000000000021897a06baf93439a90e096698c822329bd0ae6bdbe09bd19f0e07891cd2b9a",
            ),
            U384::from_be_hex(
                "000000000000000000000000000000000ebb2b0e7c8b15268f6d4456f5f38d37b09006ffd739c9578a2d1aec6b3ace9b",
            ),
        ],
    }
);

pairing_curve!(
    /// The ISO/TPM FP256BN curve, an M-type twist with negative x.
    Fp256Bn,
    Fp256BnBase = "00000000000000000000000000000000fffffffffffcf0cd46e5f25eee71a49f0cdc65fb12980a82d3292ddbaed33013",
    Fp256BnOrder = "00000000000000000000000000000000fffffffffffcf0cd46e5f25eee71a49e0cdc65fb1299921af62d536cd10b500d",
    CurveConfig {
        name: "FP256BN",
        family: PairingFriendly::Bn,
        sign_of_x: SignOfX::NegativeX,
        twist: SexticTwist::MType,
        x: 0x6882f5c030b0a801,
        b: 3,
        modulus_bytes: 32,
        cofactor: U384::from_be_hex(
            "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000001",
        ),
        frobenius: [
            U384::from_be_hex(
                "000000000000000000000000000000003d617662ca786f352d1a6e8ddb0867cf39a171511e3ab28f74760328af943106",
            ),
            U384::from_be_hex(
                "00000000000000000000000000000000c29e899d3584819819cb83d113693ccfd33af4a9f45d57f35eb32ab2ff3eff0d",
            ),
        ],
        g1_generator: [
            U384::from_be_hex(
                "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000001",
            ),
            U384::from_be_hex(
                "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000002",
            ),
        ],
        g2_generator: [
            U384::from_be_hex(
                "00000000000000000000000000000000fe0c3350b4c96c2028560f577c28913ace1c539a12bf843cd22616b689c09efb",
            ),
            U384::from_be_hex(
                "000000000000000000000000000000004ea66057738ac054db5ae1c637d813b924dd78e287d03589d269ed34a37e6a2b",
            ),
            U384::from_be_hex(
                "00000000000000000000000000000000702046e7c542a3b376770d75124e3e51efcb24758d615848e909b481bedc27ff",
            ),
            U384::from_be_hex(
                "000000000000000000000000000000000554e3bcd388c29042eea649297eb29f8b4cbe80821a98b3e01281114aad049b",
            ),
        ],
    }
);

pairing_curve!(
    /// BLS12-381, an M-type twist with negative x.
    Bls381,
    Bls381Base = "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab",
    Bls381Order = "0000000000000000000000000000000073eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001",
    CurveConfig {
        name: "BLS381",
        family: PairingFriendly::Bls,
        sign_of_x: SignOfX::NegativeX,
        twist: SexticTwist::MType,
        x: 0xd201000000010000,
        b: 4,
        modulus_bytes: 48,
        cofactor: U384::from_be_hex(
            "0000000000000000000000000000000000000000000000000000000000000000396c8c005555e1568c00aaab0000aaab",
        ),
        frobenius: [
            U384::from_be_hex(
                "1904d3bf02bb0667c231beb4202c0d1f0fd603fd3cbd5f4f7b2443d784bab9c4f67ea53d63e7813d8d0775ed92235fb8",
            ),
            U384::from_be_hex(
                "00fc3e2b36c4e03288e9e902231f9fb854a14787b6c7b36fec0c8ec971f63c5f282d5ac14d6c7ec22cf78a126ddc4af3",
            ),
        ],
        g1_generator: [
            U384::from_be_hex(
                "17f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb",
            ),
            U384::from_be_hex(
                "08b3f481e3aaa0f1a09e30ed741d8ae4fcf5e095d5d00af600db18cb2c04b3edd03cc744a2888ae40caa232946c5e7e1",
            ),
        ],
        g2_generator: [
            U384::from_be_hex(
                "024aa2b2f08f0a91260805272dc51051c6e47ad4fa403b02b4510b647ae3d1770bac0326a805bbefd48056c8c121bdb8",
            ),
            U384::from_be_hex(
                "13e02b6052719f607dacd3a088274f65596bd0d09920b61ab5da61bbdc7f5049334cf11213945d57e5ac7d055d042b7e",
            ),
            U384::from_be_hex(
                "0ce5d527727d6e118cc9cdc6da2e351aadfd9baa8cbdd3a76d429a695160d12c923ac9cc3baca289e193548608b82801",
            ),
            U384::from_be_hex(
                "0606c4a02ea734cc32acd2b02bc28b99cb3e287e85a763af267492ab572e99ab3f370d275cec1da1aaa9075ff05f79be",
            ),
        ],
    }
);

pairing_curve!(
    /// BLS12-383, an M-type twist with positive x.
    Bls383,
    Bls383Base = "5565569564ab6eb5a06dadc41fea9284a0ad462cf365a511ac31b801696124f47a8c3f298a64852bda371d6485aab0ab",
    Bls383Order = "00000000000000000000000000000001002001800c00b809c04401c81698b381de05f095a120d3973b2099ebfebc0001",
    CurveConfig {
        name: "BLS383",
        family: PairingFriendly::Bls,
        sign_of_x: SignOfX::PositiveX,
        twist: SexticTwist::MType,
        x: 0x10008000001001200,
        b: 15,
        modulus_bytes: 48,
        cofactor: U384::from_be_hex(
            "0000000000000000000000000000000000000000000000000000000000000000555aaac000aabbffb550556155169eab",
        ),
        frobenius: [
            U384::from_be_hex(
                "22acd5bf027f68bc338b9fc2c11b52f10e4c6cd23fba1a868256744ae550d8c8a3693480fe6773e01852d72d3311dac1",
            ),
            U384::from_be_hex(
                "32b880d6622c05f96ce20e015ecf3f939260d95ab3ab8a8b29db43b684104c2bd7230aa88bfd114bc1e446375298d5ea",
            ),
        ],
        g1_generator: [
            U384::from_be_hex(
                "41fcba55b979ece4e3835f4052ddb050f31d9f76b081f42c2f87bad84af1e3445c55dbf083f4770478c4773908734573",
            ),
            U384::from_be_hex(
                "068f167274cfb300024ae9cdc31c46d99d0dadc66bb6449107530a94adeb4d2dde57d49ec87f98fd212d165e8003f224",
            ),
        ],
        g2_generator: [
            U384::from_be_hex(
                "0634d22407ec03e8c07990967cb1e746432501c852d5725bd47f1c90f562572ee81fdab6795d1d3e143cb3b62d7f2d86",
            ),
            U384::from_be_hex(
                "300d7800600164baf37a7717288361dd24f498ed9d05cc89dfd98ba88e92d5d75b54ab28d57fe60defd9e41ec452de15",
            ),
            U384::from_be_hex(
                "33792cf93d225347c949d8573fe6347b6e990ed673c99b3e689783aca913a2e75b49ede4f20d61965c68f0bb9408cb41",
            ),
            U384::from_be_hex(
                "20e5247dd2cd8c6b24ee7ba7d15a7ae001ce0d446b3efa8f7af0b2f449f7bc98b0143cb0de6224863ad846437f479093",
            ),
        ],
    }
);

#[cfg(test)]
pairing_curve!(
    /// Small BN curve with a D-type twist and positive x.
    ToyBn,
    ToyBnBase = "00000000000000000000000000000000000000000000000000000000000000000000000000000007808ab4bc4a224583",
    ToyBnOrder = "00000000000000000000000000000000000000000000000000000000000000000000000000000007808ab4b98cf53f9d",
    CurveConfig {
        name: "TOYBN",
        family: PairingFriendly::Bn,
        sign_of_x: SignOfX::PositiveX,
        twist: SexticTwist::DType,
        x: 0xacf7,
        b: 2,
        modulus_bytes: 9,
        cofactor: U384::from_be_hex(
            "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000001",
        ),
        frobenius: [
            U384::from_be_hex(
                "00000000000000000000000000000000000000000000000000000000000000000000000000000002afe6aeea279ba72d",
            ),
            U384::from_be_hex(
                "00000000000000000000000000000000000000000000000000000000000000000000000000000004d0a405d222869e56",
            ),
        ],
        g1_generator: [
            U384::from_be_hex(
                "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000003",
            ),
            U384::from_be_hex(
                "00000000000000000000000000000000000000000000000000000000000000000000000000000005c2fb268383567192",
            ),
        ],
        g2_generator: [
            U384::from_be_hex(
                "00000000000000000000000000000000000000000000000000000000000000000000000000000004dc26cce5e70d250b",
            ),
            U384::from_be_hex(
                "0000000000000000000000000000000000000000000000000000000000000000000000000000000021993a79ee3056b7",
            ),
            U384::from_be_hex(
                "000000000000000000000000000000000000000000000000000000000000000000000000000000022740d7be269892ff",
            ),
            U384::from_be_hex(
                "0000000000000000000000000000000000000000000000000000000000000000000000000000000502b27427edbfcda5",
            ),
        ],
    }
);

#[cfg(test)]
pairing_curve!(
    /// Small BN curve with an M-type twist and positive x.
    ToyBnM,
    ToyBnMBase = "00000000000000000000000000000000000000000000000000000000000000000000000000000008bd92253021ee2e7b",
    ToyBnMOrder = "00000000000000000000000000000000000000000000000000000000000000000000000000000008bd92252d2d175385",
    CurveConfig {
        name: "TOYBNM",
        family: PairingFriendly::Bn,
        sign_of_x: SignOfX::PositiveX,
        twist: SexticTwist::MType,
        x: 0xb3b3,
        b: 3,
        modulus_bytes: 9,
        cofactor: U384::from_be_hex(
            "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000001",
        ),
        frobenius: [
            U384::from_be_hex(
                "000000000000000000000000000000000000000000000000000000000000000000000000000000077b2ddb33f04fb43a",
            ),
            U384::from_be_hex(
                "00000000000000000000000000000000000000000000000000000000000000000000000000000001426449fc319e7a41",
            ),
        ],
        g1_generator: [
            U384::from_be_hex(
                "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000001",
            ),
            U384::from_be_hex(
                "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000002",
            ),
        ],
        g2_generator: [
            U384::from_be_hex(
                "000000000000000000000000000000000000000000000000000000000000000000000000000000056ed55205ef5e98a6",
            ),
            U384::from_be_hex(
                "000000000000000000000000000000000000000000000000000000000000000000000000000000073a5d7846e416d2b8",
            ),
            U384::from_be_hex(
                "000000000000000000000000000000000000000000000000000000000000000000000000000000011310f6139a6636d4",
            ),
            U384::from_be_hex(
                "00000000000000000000000000000000000000000000000000000000000000000000000000000003ef03c2aa300aa9d7",
            ),
        ],
    }
);

#[cfg(test)]
pairing_curve!(
    /// Small BLS12 curve with a D-type twist and positive x.
    ToyBls,
    ToyBlsBase = "0000000000000000000000000000000000000000000000000000000000000000000000003c3be9cd8b7e950091b605db",
    ToyBlsOrder = "00000000000000000000000000000000000000000000000000000000000000000000000000000000caf44a392df08f01",
    CurveConfig {
        name: "TOYBLS",
        family: PairingFriendly::Bls,
        sign_of_x: SignOfX::PositiveX,
        twist: SexticTwist::DType,
        x: 0xf190,
        b: 14,
        modulus_bytes: 12,
        cofactor: U384::from_be_hex(
            "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000004bfa2f4b",
        ),
        frobenius: [
            U384::from_be_hex(
                "000000000000000000000000000000000000000000000000000000000000000000000000319bbff7674461e337344999",
            ),
            U384::from_be_hex(
                "0000000000000000000000000000000000000000000000000000000000000000000000000aa029d6243a331d5a81bc42",
            ),
        ],
        g1_generator: [
            U384::from_be_hex(
                "000000000000000000000000000000000000000000000000000000000000000000000000140e00c3273abde51701928b",
            ),
            U384::from_be_hex(
                "00000000000000000000000000000000000000000000000000000000000000000000000037b46c9c953e8d704828726b",
            ),
        ],
        g2_generator: [
            U384::from_be_hex(
                "0000000000000000000000000000000000000000000000000000000000000000000000000cf9a7f26dd9aae6ef31de62",
            ),
            U384::from_be_hex(
                "0000000000000000000000000000000000000000000000000000000000000000000000001d57f0dac9e8d837ec587e92",
            ),
            U384::from_be_hex(
                "0000000000000000000000000000000000000000000000000000000000000000000000002f35f0b66ca6912be4ea1cc6",
            ),
            U384::from_be_hex(
                "0000000000000000000000000000000000000000000000000000000000000000000000000474f552710031b8174378ce",
            ),
        ],
    }
);

#[cfg(test)]
pairing_curve!(
    /// Small BLS12 curve with a D-type twist and negative x.
    ToyBlsNeg,
    ToyBlsNegBase = "0000000000000000000000000000000000000000000000000000000000000000000000000e5571da8fbbe5a02f2b19f3",
    ToyBlsNegOrder = "000000000000000000000000000000000000000000000000000000000000000000000000000000004deee6556f17a9c1",
    CurveConfig {
        name: "TOYBLSNEG",
        family: PairingFriendly::Bls,
        sign_of_x: SignOfX::NegativeX,
        twist: SexticTwist::DType,
        x: 0xbe28,
        b: 6,
        modulus_bytes: 12,
        cofactor: U384::from_be_hex(
            "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000002f15a0db",
        ),
        frobenius: [
            U384::from_be_hex(
                "0000000000000000000000000000000000000000000000000000000000000000000000000055e322ddcd23e85cbc23e4",
            ),
            U384::from_be_hex(
                "0000000000000000000000000000000000000000000000000000000000000000000000000dff8eb7b1eec1b7d26ef60f",
            ),
        ],
        g1_generator: [
            U384::from_be_hex(
                "000000000000000000000000000000000000000000000000000000000000000000000000044d02535f97b09703023a41",
            ),
            U384::from_be_hex(
                "00000000000000000000000000000000000000000000000000000000000000000000000007cd4caebe8151ebc59dcf99",
            ),
        ],
        g2_generator: [
            U384::from_be_hex(
                "000000000000000000000000000000000000000000000000000000000000000000000000039f45ebd10e1c1e03edfab9",
            ),
            U384::from_be_hex(
                "0000000000000000000000000000000000000000000000000000000000000000000000000d8b7d82e3b1679144468b8c",
            ),
            U384::from_be_hex(
                "00000000000000000000000000000000000000000000000000000000000000000000000000e7f59fe45cf560eca8978d",
            ),
            U384::from_be_hex(
                "0000000000000000000000000000000000000000000000000000000000000000000000000dd3e9815e145849dd161635",
            ),
        ],
    }
);

#[cfg(test)]
pairing_curve!(
    /// BN254CX, the CertiVox curve: D-type twist with negative x.
    Bn254Cx,
    Bn254CxBase = "000000000000000000000000000000002400000008702a0db0bddf647a6366d3243fd6ee18093ee1be6623ef5c1b55b3",
    Bn254CxOrder = "000000000000000000000000000000002400000008702a0db0bddf647a6366d2c43fd6ee0cc906cebe11c0a636eb1f6d",
    CurveConfig {
        name: "BN254CX",
        family: PairingFriendly::Bn,
        sign_of_x: SignOfX::NegativeX,
        twist: SexticTwist::DType,
        x: 0x4000000003c012b1,
        b: 2,
        modulus_bytes: 32,
        cofactor: U384::from_be_hex(
            "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000001",
        ),
        frobenius: [
            U384::from_be_hex(
                "000000000000000000000000000000001359082fa63a0164afe18b8aaca7189868677326f173f8215bd9083355c80ea3",
            ),
            U384::from_be_hex(
                "0000000000000000000000000000000010a6f7d0623628a900dc53d9cdbc4e3abbd863c7269546c0628d1bbc06534710",
            ),
        ],
        g1_generator: [
            U384::from_be_hex(
                "000000000000000000000000000000002400000008702a0db0bddf647a6366d3243fd6ee18093ee1be6623ef5c1b55b2",
            ),
            U384::from_be_hex(
                "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000001",
            ),
        ],
        g2_generator: [
            U384::from_be_hex(
                "000000000000000000000000000000001ac95a5b7f9a9b4fa7121c73cb19c2f0944fb8e61b99362851c3e806cb5faaf5",
            ),
            U384::from_be_hex(
                "00000000000000000000000000000000053d3001036566043f11c2d1681f364c1bba33a1abda094dede50060fc15f433",
            ),
            U384::from_be_hex(
                "0000000000000000000000000000000015727970b09e6fb2ee06bbfef918406479dff0936ea3484e6833216a9772a299",
            ),
            U384::from_be_hex(
                "0000000000000000000000000000000011bcb56c02ac189fd57bd77f56070166d320056091a061adc41bc11f9c49e8cd",
            ),
        ],
    }
);
