//! 인증 요청 서명.

mod params;
mod signer;

pub use params::FormParams;
pub use signer::{hex_digest, sign, SignedRequest};
