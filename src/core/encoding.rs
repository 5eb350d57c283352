// src/core/encoding.rs
use encoding_rs::{BIG5, Encoding, UTF_8};

/// Tried in order; the first strict decode wins.
/// Big5 here is the WHATWG superset (CP950 + HKSCS), which covers the yearly exports.
pub fn candidates() -> Vec<&'static Encoding> {
    vec![UTF_8, BIG5]
}

/// Strict decode: any malformed sequence rejects the encoding.
/// A UTF-8 BOM is kept in the text; line parsing strips it.
pub fn decode_strict(bytes: &[u8], encoding: &'static Encoding) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|cow| cow.into_owned())
}

/// First candidate that decodes `bytes` cleanly, with the text.
pub fn decode_first(
    bytes: &[u8],
    candidates: &[&'static Encoding],
) -> Option<(String, &'static Encoding)> {
    candidates
        .iter()
        .find_map(|&enc| decode_strict(bytes, enc).map(|text| (text, enc)))
}
