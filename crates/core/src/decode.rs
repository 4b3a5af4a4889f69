//! Decoding of `+`/`%XX` escaped request values.
//!
//! Every user-supplied parameter passes through [`decode`] before it is used
//! anywhere else.

use crate::error::DecodeError;

/// Decode a raw form value into its literal text.
///
/// `+` becomes a space and `%XX` becomes the byte `0xXX`. Bytes produced by an
/// escape are never rescanned, so `%2541` decodes to `%41`, not `A`. Input
/// without `%` or `+` is returned unchanged.
///
/// # Examples
///
/// ```
/// use cinedex_core::decode::decode;
/// assert_eq!(decode("a+b").unwrap(), "a b");
/// assert_eq!(decode("M%61trix").unwrap(), "Matrix");
/// assert!(decode("100%").is_err());
/// ```
pub fn decode(raw: &str) -> Result<String, DecodeError> {
    if !raw.contains(['%', '+']) {
        return Ok(raw.to_string());
    }

    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'+' => {
                out.push(b' ');
                pos += 1;
            }
            b'%' => {
                let pair = bytes
                    .get(pos + 1..pos + 3)
                    .ok_or(DecodeError::Truncated { position: pos })?;
                match (hex_value(pair[0]), hex_value(pair[1])) {
                    (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
                    _ => {
                        return Err(DecodeError::InvalidHex {
                            position: pos,
                            digits: String::from_utf8_lossy(pair).into_owned(),
                        })
                    }
                }
                pos += 3;
            }
            other => {
                out.push(other);
                pos += 1;
            }
        }
    }

    String::from_utf8(out).map_err(|_| DecodeError::InvalidUtf8)
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
