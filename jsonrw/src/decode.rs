// SPDX-License-Identifier: Apache-2.0

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{ByteSource, Error, Reader};

/// Types that can be read from a [`Reader`].
///
/// Implemented for the scalar types, `String`, `Option<T>` (where `null` is
/// `None`), `Vec<T>` and string-keyed maps. User types implement it by
/// driving [`Reader::read_object`]:
///
/// ```
/// use jsonrw::{ByteSource, Decode, Error, Reader};
///
/// #[derive(Default, Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Decode for Point {
///     fn decode<S: ByteSource>(reader: &mut Reader<S>) -> Result<Self, Error> {
///         let mut point = Point::default();
///         reader.read_object(|r, key| match key {
///             "x" => r.read().map(|v| point.x = v),
///             "y" => r.read().map(|v| point.y = v),
///             _ => Err(Error::UnknownKey),
///         })?;
///         Ok(point)
///     }
/// }
///
/// let point: Point = Reader::from_slice(r#"{"y": 2, "x": 1}"#).read().unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
pub trait Decode: Sized {
    fn decode<S: ByteSource>(reader: &mut Reader<S>) -> Result<Self, Error>;
}

impl Decode for bool {
    fn decode<S: ByteSource>(reader: &mut Reader<S>) -> Result<Self, Error> {
        reader.read_bool()
    }
}

macro_rules! impl_decode_int {
    ($($ty:ty),*) => {
        $(
            impl Decode for $ty {
                fn decode<S: ByteSource>(reader: &mut Reader<S>) -> Result<Self, Error> {
                    reader.read_int()
                }
            }
        )*
    };
}

impl_decode_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Decode for f32 {
    fn decode<S: ByteSource>(reader: &mut Reader<S>) -> Result<Self, Error> {
        reader.read_f32()
    }
}

impl Decode for f64 {
    fn decode<S: ByteSource>(reader: &mut Reader<S>) -> Result<Self, Error> {
        reader.read_f64()
    }
}

impl Decode for String {
    fn decode<S: ByteSource>(reader: &mut Reader<S>) -> Result<Self, Error> {
        reader.read_string()
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode<S: ByteSource>(reader: &mut Reader<S>) -> Result<Self, Error> {
        reader.read_nullable(T::decode)
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode<S: ByteSource>(reader: &mut Reader<S>) -> Result<Self, Error> {
        T::decode(reader).map(Box::new)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode<S: ByteSource>(reader: &mut Reader<S>) -> Result<Self, Error> {
        reader.read_vec(T::decode)
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn decode<S: ByteSource>(reader: &mut Reader<S>) -> Result<Self, Error> {
        reader.read_map(T::decode)
    }
}

#[cfg(feature = "std")]
impl<T, H> Decode for std::collections::HashMap<String, T, H>
where
    T: Decode,
    H: core::hash::BuildHasher + Default,
{
    fn decode<S: ByteSource>(reader: &mut Reader<S>) -> Result<Self, Error> {
        let mut map = Self::default();
        reader.read_object(|r, key| {
            let value = T::decode(r)?;
            map.insert(String::from(key), value);
            Ok(())
        })?;
        Ok(map)
    }
}
