use std::borrow::Cow;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use engine_logging::engine_debug;

/// Decode raw bytes into UTF-8 text using: BOM -> Content-Type charset -> chardetng fallback.
///
/// Never fails. If the chosen encoding reports malformed input, the bytes are
/// decoded as lossy UTF-8 instead so that extraction still sees every
/// well-formed declaration.
pub fn decode_text<'a>(bytes: &'a [u8], content_type: Option<&str>) -> Cow<'a, str> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = content_type.and_then(extract_charset) {
        if let Some(enc) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, enc);
        }
        engine_debug!("Unknown charset label {label:?}, detecting encoding");
    }

    // Plain UTF-8 is by far the common case for scripts.
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim().trim_matches(['"', '\'']))
        })
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn decode_with<'a>(bytes: &'a [u8], enc: &'static Encoding) -> Cow<'a, str> {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors && enc != UTF_8 {
        engine_debug!(
            "Malformed {} input, falling back to lossy UTF-8",
            enc.name()
        );
        return String::from_utf8_lossy(bytes);
    }
    text
}
