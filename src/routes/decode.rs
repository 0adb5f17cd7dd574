//! Query-style unescaping of path parameters.

use anyhow::{Result, bail};

/// Decode `+` as a space and `%XX` as the byte `0xXX`.
///
/// Fails on a truncated or non-hex escape. Bytes that are not valid UTF-8
/// become U+FFFD, which no location will contain.
pub fn query_unescape(input: &str) -> Result<String> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .filter(|h| h.iter().all(u8::is_ascii_hexdigit))
                    .and_then(|h| std::str::from_utf8(h).ok())
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                let Some(byte) = hex else {
                    bail!("invalid escape at byte {i} in {input:?}");
                };
                decoded.push(byte);
                i += 3;
            }
            b'+' => {
                decoded.push(b' ');
                i += 1;
            }
            other => {
                decoded.push(other);
                i += 1;
            }
        }
    }

    Ok(String::from_utf8_lossy(&decoded).into_owned())
}
