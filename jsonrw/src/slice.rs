// SPDX-License-Identifier: Apache-2.0

use core::ops::Deref;

/// A zero-copy view of a string body inside the input document.
///
/// The bytes are the raw body between the quotes: escape sequences are *not*
/// decoded, so `"a\nb"` yields the four bytes `a`, `\`, `n`, `b`. Comparing
/// against plain key names (the common case) needs no allocation.
///
/// 'a is the lifetime of the input slice, not of the [`Reader`](crate::Reader),
/// so a Slice stays valid while the reader keeps advancing and can never
/// outlive the document it points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slice<'a>(&'a [u8]);

impl<'a> Slice<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Slice(bytes)
    }

    /// The raw bytes of the string body.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// The raw body as `&str`, if it is valid UTF-8.
    pub fn to_str(&self) -> Result<&'a str, core::str::Utf8Error> {
        core::str::from_utf8(self.0)
    }
}

impl Deref for Slice<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl AsRef<[u8]> for Slice<'_> {
    fn as_ref(&self) -> &[u8] {
        self.0
    }
}

impl PartialEq<str> for Slice<'_> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for Slice<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<alloc::string::String> for Slice<'_> {
    fn eq(&self, other: &alloc::string::String) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<Slice<'_>> for &str {
    fn eq(&self, other: &Slice<'_>) -> bool {
        self.as_bytes() == other.0
    }
}

impl core::fmt::Display for Slice<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.to_str() {
            Ok(s) => f.write_str(s),
            Err(_) => write!(f, "{:?}", self.0),
        }
    }
}
