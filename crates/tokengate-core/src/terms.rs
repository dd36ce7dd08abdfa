//! Balance-envelope terms parsing (panic-free).
//!
//! Parsing rules:
//! - Validate the total length before slicing any field.
//! - Never index (`buf[0]`); always use `Buf` cursor reads.
//! - Never `unwrap()` / `expect()` / `panic!()` in production paths.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use ethers_core::types::{Address, U256};

use crate::error::{Result, TokenGateError};

/// Fixed terms length: 1 direction + 20 token + 20 recipient + 32 threshold.
pub const TERMS_LEN: usize = 73;

/// Decoded balance-envelope terms.
///
/// Terms are externally supplied and immutable; they are parsed fresh on
/// every check and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceTerms {
    /// `true` selects the lower-bound policy (enforced after the batch),
    /// `false` the upper-bound policy (enforced before the batch).
    pub enforce_lower: bool,
    /// Token whose balance is observed.
    pub token: Address,
    /// Informational passthrough; never part of the comparison.
    pub recipient: Address,
    /// Strict bound, in balance units.
    pub threshold: U256,
}

/// Decode a terms blob.
///
/// Pure and side-effect free; the balance oracle is never touched here.
/// Any length other than [`TERMS_LEN`] is a `MalformedTerms` error. The
/// direction byte follows the EVM bool convention: any nonzero value selects
/// lower-bound enforcement.
pub fn decode_terms(mut buf: &[u8]) -> Result<BalanceTerms> {
    if buf.remaining() != TERMS_LEN {
        return Err(TokenGateError::MalformedTerms(format!(
            "expected {TERMS_LEN} bytes, got {}",
            buf.remaining()
        )));
    }

    let enforce_lower = buf.get_u8() != 0;

    let mut token = [0u8; 20];
    buf.copy_to_slice(&mut token);

    let mut recipient = [0u8; 20];
    buf.copy_to_slice(&mut recipient);

    let mut threshold = [0u8; 32];
    buf.copy_to_slice(&mut threshold);

    Ok(BalanceTerms {
        enforce_lower,
        token: Address::from(token),
        recipient: Address::from(recipient),
        threshold: U256::from_big_endian(&threshold),
    })
}

impl BalanceTerms {
    /// Reference encoding of the terms record.
    ///
    /// The direction byte is canonicalized to 0x00/0x01; the threshold is
    /// written big-endian, left-padded to 32 bytes.
    pub fn encode(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(TERMS_LEN);
        out.put_u8(u8::from(self.enforce_lower));
        out.put_slice(self.token.as_bytes());
        out.put_slice(self.recipient.as_bytes());

        let mut threshold = [0u8; 32];
        self.threshold.to_big_endian(&mut threshold);
        out.put_slice(&threshold);

        out.freeze()
    }
}
