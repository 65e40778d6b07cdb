use crate::{Hash, HASH_SIZE};
use blake2b_simd::{Params, State};

/// Incremental domain-separated hasher
pub trait Hasher: Sized {
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self;
    fn finalize(self) -> Hash;

    fn hash<A: AsRef<[u8]>>(data: A) -> Hash;
}

macro_rules! blake2b_hasher {
    ($(#[$meta:meta])* $name:ident, $domain:literal) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name(State);

        impl $name {
            #[inline]
            pub fn new() -> Self {
                Self(Params::new().hash_length(HASH_SIZE).key($domain).to_state())
            }

            #[inline]
            pub fn write<A: AsRef<[u8]>>(&mut self, data: A) {
                self.0.update(data.as_ref());
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Hasher for $name {
            #[inline]
            fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self {
                self.write(data);
                self
            }

            fn finalize(self) -> Hash {
                let mut out = [0u8; HASH_SIZE];
                out.copy_from_slice(self.0.finalize().as_bytes());
                Hash::from_bytes(out)
            }

            fn hash<A: AsRef<[u8]>>(data: A) -> Hash {
                let mut hasher = Self::new();
                hasher.write(data);
                hasher.finalize()
            }
        }
    };
}

blake2b_hasher!(
    /// Hashes block headers
    BlockHash,
    b"BlockHash"
);
blake2b_hasher!(
    /// Hashes transactions into their ids
    TransactionId,
    b"TransactionID"
);
