//! Session token encoding, decoding, and validation.

pub mod claims;
pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod secret;
pub mod validity;

pub use claims::Claims;
pub use codec::TokenCodec;
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
pub use secret::SigningSecret;
pub use validity::{InvalidReason, TokenValidity};
