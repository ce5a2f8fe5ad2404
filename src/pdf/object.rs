//! PDF object model and serialization.
//!
//! A write-only subset of the PDF object syntax: just the forms the
//! document builder emits. Dictionaries use `BTreeMap` so key order, and
//! therefore output bytes, are deterministic without a sort pass.
//! Generation numbers are always zero in a freshly built document, so
//! references carry only the object id.

use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::Write;

/// A PDF object.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// Name (written with a leading `/`)
    Name(String),
    /// Literal string
    String(Vec<u8>),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary with deterministic key order
    Dictionary(BTreeMap<String, Object>),
    /// Stream: dictionary plus raw data; `/Length` is filled in on write
    Stream {
        /// Stream dictionary
        dict: BTreeMap<String, Object>,
        /// Stream payload
        data: Bytes,
    },
    /// Reference to an indirect object (generation 0)
    Reference(u32),
}

impl Object {
    /// Build a name object.
    pub fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    /// Build a literal string object.
    pub fn string(s: &str) -> Object {
        Object::String(s.as_bytes().to_vec())
    }

    /// Build a dictionary from key/value pairs.
    pub fn dict(entries: Vec<(&str, Object)>) -> Object {
        Object::Dictionary(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    /// Serialize as an indirect object: `<id> 0 obj\n...\nendobj\n`.
    pub fn serialize_indirect(&self, id: u32) -> Vec<u8> {
        let mut buf = Vec::new();
        // Writes to Vec<u8> cannot fail
        writeln!(buf, "{} 0 obj", id).unwrap();
        self.write(&mut buf);
        write!(buf, "\nendobj\n").unwrap();
        buf
    }

    /// Serialize the bare object (used for the trailer dictionary).
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write(&mut buf);
        buf
    }

    fn write(&self, out: &mut Vec<u8>) {
        match self {
            Object::Integer(i) => write!(out, "{}", i).unwrap(),
            Object::Real(r) => write_real(out, *r),
            Object::Name(n) => write!(out, "/{}", n).unwrap(),
            Object::String(s) => write_string(out, s),
            Object::Array(items) => {
                out.push(b'[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(b' ');
                    }
                    item.write(out);
                }
                out.push(b']');
            },
            Object::Dictionary(dict) => write_dict(out, dict),
            Object::Stream { dict, data } => {
                let mut dict = dict.clone();
                dict.insert("Length".to_string(), Object::Integer(data.len() as i64));
                write_dict(out, &dict);
                write!(out, "\nstream\n").unwrap();
                out.extend_from_slice(data);
                write!(out, "\nendstream").unwrap();
            },
            Object::Reference(id) => write!(out, "{} 0 R", id).unwrap(),
        }
    }
}

fn write_dict(out: &mut Vec<u8>, dict: &BTreeMap<String, Object>) {
    out.extend_from_slice(b"<<");
    for (key, value) in dict {
        write!(out, " /{} ", key).unwrap();
        value.write(out);
    }
    out.extend_from_slice(b" >>");
}

fn write_real(out: &mut Vec<u8>, value: f64) {
    if value.fract() == 0.0 {
        write!(out, "{}", value as i64).unwrap();
    } else {
        let formatted = format!("{:.4}", value);
        write!(out, "{}", formatted.trim_end_matches('0').trim_end_matches('.')).unwrap();
    }
}

/// Write a literal string with PDF escaping.
///
/// Parentheses and backslashes are escaped per the string-literal rules;
/// bytes outside printable ASCII are written as octal escapes so any
/// narrative text stays representable. Also used by the content stream
/// builder for `Tj` operands.
pub(crate) fn write_string(out: &mut Vec<u8>, data: &[u8]) {
    out.push(b'(');
    for &byte in data {
        match byte {
            b'(' => out.extend_from_slice(b"\\("),
            b')' => out.extend_from_slice(b"\\)"),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x20..=0x7E => out.push(byte),
            _ => {
                write!(out, "\\{:03o}", byte).unwrap();
            },
        }
    }
    out.push(b')');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_string(obj: &Object) -> String {
        String::from_utf8_lossy(&obj.serialize()).to_string()
    }

    #[test]
    fn test_serialize_scalars() {
        assert_eq!(to_string(&Object::Integer(42)), "42");
        assert_eq!(to_string(&Object::Real(16.0)), "16");
        assert_eq!(to_string(&Object::Real(0.5)), "0.5");
        assert_eq!(to_string(&Object::name("Type1")), "/Type1");
        assert_eq!(to_string(&Object::Reference(3)), "3 0 R");
    }

    #[test]
    fn test_serialize_string_escaping() {
        assert_eq!(to_string(&Object::string("Hello")), "(Hello)");
        assert_eq!(to_string(&Object::string("a (b) c\\d")), "(a \\(b\\) c\\\\d)");
    }

    #[test]
    fn test_serialize_string_non_ascii_as_octal() {
        let s = to_string(&Object::String(vec![0xE9]));
        assert_eq!(s, "(\\351)");
    }

    #[test]
    fn test_serialize_array() {
        let arr = Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(595),
            Object::Integer(842),
        ]);
        assert_eq!(to_string(&arr), "[0 0 595 842]");
    }

    #[test]
    fn test_dictionary_keys_are_ordered() {
        let dict = Object::dict(vec![
            ("Type", Object::name("Page")),
            ("Contents", Object::Reference(4)),
        ]);
        // BTreeMap orders keys, so Contents precedes Type
        assert_eq!(to_string(&dict), "<< /Contents 4 0 R /Type /Page >>");
    }

    #[test]
    fn test_stream_carries_length() {
        let stream = Object::Stream {
            dict: BTreeMap::new(),
            data: Bytes::from_static(b"BT ET"),
        };
        let s = to_string(&stream);
        assert!(s.contains("/Length 5"));
        assert!(s.contains("stream\nBT ET\nendstream"));
    }

    #[test]
    fn test_serialize_indirect() {
        let bytes = Object::Integer(7).serialize_indirect(2);
        assert_eq!(String::from_utf8_lossy(&bytes), "2 0 obj\n7\nendobj\n");
    }
}
