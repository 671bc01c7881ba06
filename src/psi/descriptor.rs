//! Tag-length-value descriptor records and the loops that carry them.

use std::fmt;
use std::iter::FusedIterator;

use crate::constants::DESCRIPTOR_HEADER_LEN;
use crate::error::PsiError;

/// One descriptor: `tag`, `length`, then `length` payload bytes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Descriptor<'a> {
    data: &'a [u8],
}

impl<'a> Descriptor<'a> {
    pub fn tag(&self) -> u8 {
        self.data[0]
    }

    /// descriptor_length, i.e. payload size without the two header bytes
    pub fn length(&self) -> u8 {
        self.data[1]
    }

    pub fn payload(&self) -> &'a [u8] {
        &self.data[DESCRIPTOR_HEADER_LEN..]
    }

    /// Raw bytes including tag and length.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}

impl PartialEq<[u8]> for Descriptor<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.data == other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for Descriptor<'_> {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.data == other
    }
}

impl fmt::Debug for Descriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("tag", &format_args!("0x{:02X}", self.tag()))
            .field("payload", &self.payload())
            .finish()
    }
}

/// A descriptor loop whose records have been checked to tile the region
/// exactly. Iterating it never fails and can be restarted at will.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct DescriptorLoop<'a> {
    data: &'a [u8],
}

impl<'a> DescriptorLoop<'a> {
    /// Validates every record in `data`. An empty region is an empty loop.
    pub fn new(data: &'a [u8]) -> Result<Self, PsiError> {
        let mut rest = data;
        while !rest.is_empty() {
            if rest.len() < DESCRIPTOR_HEADER_LEN {
                return Err(PsiError::too_short("descriptor", DESCRIPTOR_HEADER_LEN, rest.len()));
            }
            let size = DESCRIPTOR_HEADER_LEN + rest[1] as usize;
            if size > rest.len() {
                return Err(PsiError::too_short("descriptor", size, rest.len()));
            }
            rest = &rest[size..];
        }
        Ok(Self { data })
    }

    /// The first `declared` bytes of `buf` as a descriptor loop.
    pub fn with_length(buf: &'a [u8], declared: usize) -> Result<Self, PsiError> {
        match buf.get(..declared) {
            Some(region) => Self::new(region),
            None => Err(PsiError::too_short("descriptor loop", declared, buf.len())),
        }
    }

    pub fn iter(&self) -> DescriptorIter<'a> {
        DescriptorIter(self.data)
    }

    /// Number of descriptors (walks the loop).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// First descriptor carrying `tag`, if any.
    pub fn find(&self, tag: u8) -> Option<Descriptor<'a>> {
        self.iter().find(|d| d.tag() == tag)
    }
}

impl<'a> IntoIterator for &DescriptorLoop<'a> {
    type Item = Descriptor<'a>;
    type IntoIter = DescriptorIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for DescriptorLoop<'a> {
    type Item = Descriptor<'a>;
    type IntoIter = DescriptorIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for DescriptorLoop<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[derive(Clone)]
pub struct DescriptorIter<'a>(&'a [u8]);

impl<'a> Iterator for DescriptorIter<'a> {
    type Item = Descriptor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let [_, length, ..] = *self.0 else {
            return None;
        };
        // the loop was validated on construction
        let (data, tail) = self.0.split_at_checked(DESCRIPTOR_HEADER_LEN + length as usize)?;
        self.0 = tail;
        Some(Descriptor { data })
    }
}

impl FusedIterator for DescriptorIter<'_> {}
