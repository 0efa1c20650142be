use crate::core::{Collect, JsContext, JsResult, Value};
use crate::unicode::utf16_to_utf8;

// Property names are UTF-16 code-unit strings, and lone surrogates have no `str` form. Keys escape
// them behind KEY_ESCAPE (a noncharacter), and the escape itself is doubled, so distinct code-unit
// strings always map to distinct keys.
const KEY_ESCAPE: char = '\u{10FFFF}';
const SURROGATE_BASE: u32 = 0x10F000;

/// The name of an object property.
///
/// Text passed in as `&str` is taken as already-escaped key text; names coming from script
/// strings go through [`PropertyKey::from_utf16`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Collect)]
#[collect(require_static)]
pub struct PropertyKey(String);

impl PropertyKey {
    /// ToPropertyKey for this core: ToString of an arbitrary value, which may run `toString`.
    pub fn from_value<'gc>(cx: &JsContext<'gc>, value: &Value<'gc>) -> JsResult<'gc, Self> {
        match value {
            Value::String(s) => Ok(PropertyKey::from_utf16(s)),
            other => Ok(PropertyKey::from_utf16(&other.to_js_string(cx)?)),
        }
    }

    pub fn from_utf16(units: &[u16]) -> Self {
        let mut key = String::with_capacity(units.len());
        for decoded in char::decode_utf16(units.iter().copied()) {
            match decoded {
                Ok(KEY_ESCAPE) => {
                    key.push(KEY_ESCAPE);
                    key.push(KEY_ESCAPE);
                }
                Ok(c) => key.push(c),
                Err(err) => {
                    let offset = u32::from(err.unpaired_surrogate()) - 0xD800;
                    key.push(KEY_ESCAPE);
                    key.push(char::from_u32(SURROGATE_BASE + offset).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
            }
        }
        PropertyKey(key)
    }

    /// The property name as script sees it.
    pub fn to_utf16(&self) -> Vec<u16> {
        let mut units = Vec::with_capacity(self.0.len());
        let mut chars = self.0.chars();
        let mut buf = [0u16; 2];
        while let Some(c) = chars.next() {
            if c == KEY_ESCAPE {
                match chars.next() {
                    Some(KEY_ESCAPE) | None => units.extend_from_slice(KEY_ESCAPE.encode_utf16(&mut buf)),
                    Some(escaped) if (SURROGATE_BASE..SURROGATE_BASE + 0x800).contains(&u32::from(escaped)) => {
                        units.push((0xD800 + u32::from(escaped) - SURROGATE_BASE) as u16);
                    }
                    Some(other) => {
                        units.extend_from_slice(KEY_ESCAPE.encode_utf16(&mut buf));
                        units.extend_from_slice(other.encode_utf16(&mut buf));
                    }
                }
            } else {
                units.extend_from_slice(c.encode_utf16(&mut buf));
            }
        }
        units
    }

    pub fn to_value<'gc>(&self) -> Value<'gc> {
        Value::String(self.to_utf16())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical array index, if this key is one.
    pub fn as_array_index(&self) -> Option<u32> {
        let parsed = self.0.parse::<u32>().ok()?;
        (parsed != u32::MAX && parsed.to_string() == self.0).then_some(parsed)
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        PropertyKey(s.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        PropertyKey(s)
    }
}

impl From<&String> for PropertyKey {
    fn from(s: &String) -> Self {
        PropertyKey(s.clone())
    }
}

impl From<&PropertyKey> for PropertyKey {
    fn from(k: &PropertyKey) -> Self {
        k.clone()
    }
}

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.contains(KEY_ESCAPE) {
            write!(f, "{}", utf16_to_utf8(&self.to_utf16()))
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl std::borrow::Borrow<str> for PropertyKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PropertyKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_index_must_be_canonical() {
        assert_eq!(PropertyKey::from("0").as_array_index(), Some(0));
        assert_eq!(PropertyKey::from("42").as_array_index(), Some(42));
        assert_eq!(PropertyKey::from("042").as_array_index(), None);
        assert_eq!(PropertyKey::from("4294967295").as_array_index(), None);
        assert_eq!(PropertyKey::from("-1").as_array_index(), None);
        assert_eq!(PropertyKey::from("length").as_array_index(), None);
    }

    #[test]
    fn lone_surrogates_stay_distinct() {
        let high = PropertyKey::from_utf16(&[0xD800]);
        let low = PropertyKey::from_utf16(&[0xDC00]);
        let replacement = PropertyKey::from_utf16(&[0xFFFD]);
        assert_ne!(high, replacement);
        assert_ne!(high, low);
        assert_eq!(high.to_utf16(), [0xD800]);
        assert_eq!(low.to_utf16(), [0xDC00]);
        assert_eq!(replacement.as_str(), "\u{FFFD}");
    }

    #[test]
    fn escape_character_round_trips() {
        let units: Vec<u16> = "a\u{10FFFF}b".encode_utf16().collect();
        let key = PropertyKey::from_utf16(&units);
        assert_eq!(key.to_utf16(), units);
        let mixed = [0x61, 0xDBFF, 0xDFFF, 0xDBFF, 0x62];
        let key = PropertyKey::from_utf16(&mixed);
        assert_ne!(key, PropertyKey::from_utf16(&[0x61, 0xDBFF, 0xDFFF, 0xDBFF, 0xDBFF, 0xDFFF, 0x62]));
        assert_eq!(key.to_utf16(), mixed);
    }

    #[test]
    fn well_formed_names_are_plain_text() {
        let units: Vec<u16> = "héllo 😀".encode_utf16().collect();
        assert_eq!(PropertyKey::from_utf16(&units).as_str(), "héllo 😀");
    }
}
