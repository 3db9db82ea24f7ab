//! Canonical byte serialization of keys, consumed by the hash backend.

/// Canonical byte form of a key, fed to the hash function to pick a bucket.
///
/// Two distinct keys may serialize to the same bytes. Probing resolves the
/// collision through the key type's own `Eq`, so a colliding serialization
/// costs extra probe steps, never correctness.
pub trait KeyBytes {
    type Bytes: AsRef<[u8]>;

    fn key_bytes(&self) -> Self::Bytes;
}

macro_rules! impl_key_bytes_for_int {
    ($($t:ty),* $(,)?) => {$(
        impl KeyBytes for $t {
            type Bytes = [u8; core::mem::size_of::<$t>()];

            fn key_bytes(&self) -> Self::Bytes {
                self.to_be_bytes()
            }
        }
    )*};
}

impl_key_bytes_for_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl KeyBytes for bool {
    type Bytes = [u8; 1];

    fn key_bytes(&self) -> Self::Bytes {
        [*self as u8]
    }
}

impl KeyBytes for char {
    type Bytes = [u8; 4];

    fn key_bytes(&self) -> Self::Bytes {
        (*self as u32).to_be_bytes()
    }
}

impl KeyBytes for String {
    type Bytes = Vec<u8>;

    fn key_bytes(&self) -> Self::Bytes {
        self.as_bytes().to_vec()
    }
}

impl<'a> KeyBytes for &'a str {
    type Bytes = &'a [u8];

    fn key_bytes(&self) -> Self::Bytes {
        self.as_bytes()
    }
}

impl KeyBytes for Vec<u8> {
    type Bytes = Vec<u8>;

    fn key_bytes(&self) -> Self::Bytes {
        self.clone()
    }
}

impl<'a> KeyBytes for &'a [u8] {
    type Bytes = &'a [u8];

    fn key_bytes(&self) -> Self::Bytes {
        *self
    }
}
