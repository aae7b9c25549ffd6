use std::fmt::{Debug, Display, Formatter};

/// A 4-byte ASCII section marker, such as `FONT` or `KERN`.
///
/// Markers carry no data; they exist so a reader can cheaply confirm it is
/// looking at the section it computed the offset of.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "bytemuck", derive(bytemuck::AnyBitPattern))]
#[repr(transparent)]
pub struct Tag([u8; 4]);

/// The 12-byte ASCII tag identifying the format version and revision.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "bytemuck", derive(bytemuck::AnyBitPattern))]
#[repr(transparent)]
pub struct Magic([u8; 12]);

impl Tag {
    /// Construct a `Tag` from raw bytes.
    ///
    /// This does not perform any validation.
    pub const fn new(src: &[u8; 4]) -> Tag {
        Tag(*src)
    }

    /// Return the raw byte array representing this tag.
    pub const fn into_bytes(self) -> [u8; 4] {
        self.0
    }
}

impl Magic {
    /// Construct a `Magic` from raw bytes.
    pub const fn new(src: &[u8; 12]) -> Magic {
        Magic(*src)
    }

    /// Return the raw byte array representing this tag.
    pub const fn into_bytes(self) -> [u8; 12] {
        self.0
    }
}

impl crate::raw::Scalar for Tag {
    type Raw = [u8; 4];

    fn to_raw(self) -> Self::Raw {
        self.0
    }

    fn from_raw(raw: Self::Raw) -> Self {
        Self(raw)
    }
}

impl crate::raw::FixedSize for Tag {
    const RAW_BYTE_LEN: usize = 4;
}

impl crate::raw::Scalar for Magic {
    type Raw = [u8; 12];

    fn to_raw(self) -> Self::Raw {
        self.0
    }

    fn from_raw(raw: Self::Raw) -> Self {
        Self(raw)
    }
}

impl crate::raw::FixedSize for Magic {
    const RAW_BYTE_LEN: usize = 12;
}

impl PartialEq<[u8; 4]> for Tag {
    fn eq(&self, other: &[u8; 4]) -> bool {
        &self.0 == other
    }
}

impl PartialEq<&[u8]> for Tag {
    fn eq(&self, other: &&[u8]) -> bool {
        self.0.as_ref() == *other
    }
}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Magic {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn write_ascii(f: &mut Formatter<'_>, bytes: &[u8]) -> std::fmt::Result {
    for &byte in bytes {
        if (0x20..=0x7E).contains(&byte) {
            write!(f, "{}", byte as char)?;
        } else {
            write!(f, "{{0x{:02X}}}", byte)?;
        }
    }
    Ok(())
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_ascii(f, &self.0)
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tag({})", self)
    }
}

impl Display for Magic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_ascii(f, &self.0)
    }
}

impl Debug for Magic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Magic({})", self)
    }
}

// these will serialize to a string if the target format is human-readable,
// but to bytes otherwise.
//
// NOTE: this means that tags which are not utf-8 will fail to serialize to
// json/yaml.
#[cfg(feature = "serde")]
impl serde::Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            let s = std::str::from_utf8(&self.0).map_err(serde::ser::Error::custom)?;
            serde::Serialize::serialize(s, serializer)
        } else {
            serde::Serialize::serialize(&self.0, serializer)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TagStrVisitor;
        impl serde::de::Visitor<'_> for TagStrVisitor {
            type Value = Tag;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "a four-byte ascii string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                let bytes: [u8; 4] = v
                    .as_bytes()
                    .try_into()
                    .map_err(|_| E::invalid_length(v.len(), &self))?;
                Ok(Tag(bytes))
            }
        }
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(TagStrVisitor)
        } else {
            <[u8; 4] as serde::Deserialize>::deserialize(deserializer).map(Tag)
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[derive(PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
    struct TestMe {
        tag: Tag,
    }

    #[test]
    fn serde_json_good() {
        let ser_me = TestMe {
            tag: Tag::new(b"GTBL"),
        };

        let json_str = serde_json::to_string(&ser_me).unwrap();
        assert_eq!(json_str, r#"{"tag":"GTBL"}"#);

        let de_me: TestMe = serde_json::from_str(&json_str).unwrap();
        assert_eq!(de_me, ser_me);
    }

    #[test]
    fn serde_json_wrong_length() {
        let json = r#"{"tag":"GTBLX"}"#;
        assert!(serde_json::from_str::<TestMe>(json).is_err());
    }
}
