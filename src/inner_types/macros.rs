/// Derives the by-value and by-reference operator impls from a single
/// hand-written impl.
///
/// The long form expects `impl $ops_assign<$rhs<C>> for $lhs<C>` to exist and
/// builds `$ops` plus the reference variants of both traits from it. The short
/// form expects `impl $ops<$rhs<C>> for $lhs<C>` and adds the reference variants.
macro_rules! ops_impl {
    (
        $ops:ident,
        $func:ident,
        $op:tt,
        $ops_assign:ident,
        $func_assign:ident,
        $op_assign:tt,
        LHS = $lhs:ident,
        RHS = $rhs:ident,
        OUTPUT = $output:ident
    ) => {
        impl<C: $crate::inner_types::PairingCurve> $ops_assign<&$rhs<C>> for $lhs<C> {
            fn $func_assign(&mut self, rhs: &$rhs<C>) {
                *self $op_assign *rhs;
            }
        }

        impl<C: $crate::inner_types::PairingCurve> $ops<$rhs<C>> for $lhs<C> {
            type Output = $output<C>;

            fn $func(self, rhs: $rhs<C>) -> Self::Output {
                let mut s = self;
                s $op_assign rhs;
                s
            }
        }

        impl<C: $crate::inner_types::PairingCurve> $ops<&$rhs<C>> for $lhs<C> {
            type Output = $output<C>;

            fn $func(self, rhs: &$rhs<C>) -> Self::Output {
                let mut s = self;
                s $op_assign *rhs;
                s
            }
        }

        impl<C: $crate::inner_types::PairingCurve> $ops<$rhs<C>> for &$lhs<C> {
            type Output = $output<C>;

            fn $func(self, rhs: $rhs<C>) -> Self::Output {
                let mut s = *self;
                s $op_assign rhs;
                s
            }
        }

        impl<C: $crate::inner_types::PairingCurve> $ops<&$rhs<C>> for &$lhs<C> {
            type Output = $output<C>;

            fn $func(self, rhs: &$rhs<C>) -> Self::Output {
                let mut s = *self;
                s $op_assign *rhs;
                s
            }
        }
    };
    (
        $ops:ident,
        $func:ident,
        $op:tt,
        LHS = $lhs:ident,
        RHS = $rhs:ident,
        OUTPUT = $output:ident
    ) => {
        impl<C: $crate::inner_types::PairingCurve> $ops<&$rhs<C>> for $lhs<C> {
            type Output = $output<C>;

            fn $func(self, rhs: &$rhs<C>) -> Self::Output {
                self $op *rhs
            }
        }

        impl<C: $crate::inner_types::PairingCurve> $ops<$rhs<C>> for &$lhs<C> {
            type Output = $output<C>;

            fn $func(self, rhs: $rhs<C>) -> Self::Output {
                *self $op rhs
            }
        }

        impl<C: $crate::inner_types::PairingCurve> $ops<&$rhs<C>> for &$lhs<C> {
            type Output = $output<C>;

            fn $func(self, rhs: &$rhs<C>) -> Self::Output {
                *self $op *rhs
            }
        }
    };
}

/// Byte conversions for a curve-generic type given its encoder and a fallible
/// decoder returning `Result<Self, PairingError>`.
macro_rules! bytes_impl {
    ($name:ident, $to_bytes:expr, $from_bytes:expr) => {
        impl<C: $crate::inner_types::PairingCurve> TryFrom<&[u8]> for $name<C> {
            type Error = $crate::PairingError;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                $from_bytes(bytes)
            }
        }

        #[cfg(any(feature = "alloc", feature = "std"))]
        impl<C: $crate::inner_types::PairingCurve> TryFrom<$crate::Vec<u8>> for $name<C> {
            type Error = $crate::PairingError;

            fn try_from(bytes: $crate::Vec<u8>) -> Result<Self, Self::Error> {
                Self::try_from(bytes.as_slice())
            }
        }

        #[cfg(any(feature = "alloc", feature = "std"))]
        impl<C: $crate::inner_types::PairingCurve> TryFrom<&$crate::Vec<u8>> for $name<C> {
            type Error = $crate::PairingError;

            fn try_from(bytes: &$crate::Vec<u8>) -> Result<Self, Self::Error> {
                Self::try_from(bytes.as_slice())
            }
        }

        #[cfg(any(feature = "alloc", feature = "std"))]
        impl<C: $crate::inner_types::PairingCurve> TryFrom<$crate::Box<[u8]>> for $name<C> {
            type Error = $crate::PairingError;

            fn try_from(bytes: $crate::Box<[u8]>) -> Result<Self, Self::Error> {
                Self::try_from(bytes.as_ref())
            }
        }

        #[cfg(any(feature = "alloc", feature = "std"))]
        impl<C: $crate::inner_types::PairingCurve> From<$name<C>> for $crate::Vec<u8> {
            fn from(value: $name<C>) -> Self {
                Self::from(&value)
            }
        }

        #[cfg(any(feature = "alloc", feature = "std"))]
        impl<C: $crate::inner_types::PairingCurve> From<&$name<C>> for $crate::Vec<u8> {
            fn from(value: &$name<C>) -> Self {
                let bytes = $to_bytes(value);
                bytes.as_ref().to_vec()
            }
        }
    };
}

/// Serde support through `serdect`: lower hex for human readable formats,
/// raw bytes otherwise. `$capacity` bounds the decoded length.
macro_rules! serde_impl {
    ($name:ident, $to_bytes:expr, $from_bytes:expr, $capacity:expr) => {
        impl<C: $crate::inner_types::PairingCurve> serde::Serialize for $name<C> {
            fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                let bytes = $to_bytes(self);
                serdect::slice::serialize_hex_lower_or_bin(&bytes, s)
            }
        }

        impl<'de, C: $crate::inner_types::PairingCurve> serde::Deserialize<'de> for $name<C> {
            fn deserialize<D>(d: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let mut buffer = [0u8; $capacity];
                let bytes = serdect::slice::deserialize_hex_or_bin(&mut buffer, d)?;
                $from_bytes(bytes).map_err(serde::de::Error::custom)
            }
        }
    };
}
