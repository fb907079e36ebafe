use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

pub fn sign(secret: &str, message: &str) -> String {
    hex::encode(mac_bytes(secret, message))
}

/// Constant-time check of a hex-encoded HMAC-SHA256 signature.
pub fn verify(secret: &str, message: &str, signature_hex: &str) -> bool {
    let Ok(provided) = hex::decode(signature_hex) else {
        return false;
    };
    let expected = mac_bytes(secret, message);
    expected.as_slice().ct_eq(provided.as_slice()).into()
}

fn mac_bytes(secret: &str, message: &str) -> Vec<u8> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message.as_bytes());
    mac.finalize().into_bytes().to_vec()
}
