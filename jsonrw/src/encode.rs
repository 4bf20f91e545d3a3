// SPDX-License-Identifier: Apache-2.0

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use crate::{Error, Writer};

/// Types that can be written by a [`Writer`]. The mirror of [`Decode`](crate::Decode).
///
/// User types usually implement it with [`Writer::write_object`]:
///
/// ```
/// use core::fmt::Write;
/// use jsonrw::{Encode, Error, Writer};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Encode for Point {
///     fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
///         writer.write_object(|obj| {
///             obj.field("x", &self.x)?;
///             obj.field("y", &self.y)
///         })
///     }
/// }
///
/// let mut writer = Writer::new(String::new());
/// writer.write(&Point { x: 1, y: -2 }).unwrap();
/// assert_eq!(writer.into_inner(), r#"{"x":1,"y":-2}"#);
/// ```
pub trait Encode {
    fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error>;
}

impl Encode for bool {
    fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        writer.write_bool(*self)
    }
}

macro_rules! impl_encode_int {
    ($method:ident as $wide:ty: $($ty:ty),*) => {
        $(
            impl Encode for $ty {
                fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
                    writer.$method(<$wide>::from(*self))
                }
            }
        )*
    };
}

impl_encode_int!(write_i64 as i64: i8, i16, i32, i64);
impl_encode_int!(write_u64 as u64: u8, u16, u32, u64);

impl Encode for isize {
    fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        let value = i64::try_from(*self).map_err(|_| Error::NumericOverflow)?;
        writer.write_i64(value)
    }
}

impl Encode for usize {
    fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        let value = u64::try_from(*self).map_err(|_| Error::NumericOverflow)?;
        writer.write_u64(value)
    }
}

impl Encode for f32 {
    fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        writer.write_f32(*self)
    }
}

impl Encode for f64 {
    fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        writer.write_f64(*self)
    }
}

impl Encode for str {
    fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        writer.write_str(self)
    }
}

impl Encode for String {
    fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        writer.write_str(self)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        (**self).encode(writer)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        (**self).encode(writer)
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        writer.write_nullable(self.as_ref(), |w, value| value.encode(w))
    }
}

impl<T: Encode> Encode for [T] {
    fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        writer.write_seq(self, |w, item| item.encode(w))
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        self.as_slice().encode(writer)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        self.as_slice().encode(writer)
    }
}

impl<T: Encode> Encode for BTreeMap<String, T> {
    fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        writer.write_map(self, |w, value| value.encode(w))
    }
}

#[cfg(feature = "std")]
impl<T: Encode, H> Encode for std::collections::HashMap<String, T, H> {
    fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        writer.write_map(self, |w, value| value.encode(w))
    }
}
