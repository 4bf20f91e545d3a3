// SPDX-License-Identifier: Apache-2.0

use core::fmt::Write;

use crate::escape::write_escaped;
use crate::{Encode, Error};

/// Compact JSON writer over any [`core::fmt::Write`] sink.
///
/// Writes go straight to the sink with no whitespace. The writer keeps no
/// structural state of its own: arrays and objects are written through
/// callbacks, which is what keeps brackets and commas balanced.
///
/// # Example
/// ```
/// use jsonrw::Writer;
///
/// let mut writer = Writer::new(String::new());
/// writer
///     .write_object(|obj| {
///         obj.field("id", &7)?;
///         obj.field("tags", &["a", "b"][..])?;
///         obj.field_with("ratio", |w| w.write_f64(0.5))
///     })
///     .unwrap();
/// assert_eq!(writer.into_inner(), r#"{"id":7,"tags":["a","b"],"ratio":0.5}"#);
/// ```
#[derive(Debug, Default)]
pub struct Writer<W> {
    sink: W,
}

impl<W: Write> Writer<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn raw(&mut self, text: &str) -> Result<(), Error> {
        self.sink.write_str(text).map_err(|e| {
            log::debug!("output sink rejected a write");
            Error::from(e)
        })
    }

    pub fn write_null(&mut self) -> Result<(), Error> {
        self.raw("null")
    }

    pub fn write_bool(&mut self, value: bool) -> Result<(), Error> {
        self.raw(if value { "true" } else { "false" })
    }

    pub fn write_i64(&mut self, value: i64) -> Result<(), Error> {
        write!(self.sink, "{}", value)?;
        Ok(())
    }

    pub fn write_u64(&mut self, value: u64) -> Result<(), Error> {
        write!(self.sink, "{}", value)?;
        Ok(())
    }

    /// Writes a float in its shortest round-trip form.
    ///
    /// Integral values keep a fractional part (`1.0`) so they read back as
    /// numbers rather than integers. NaN and infinities have no JSON form and
    /// are written as `null`.
    pub fn write_f64(&mut self, value: f64) -> Result<(), Error> {
        if !value.is_finite() {
            return self.write_null();
        }
        write!(self.sink, "{:?}", value)?;
        Ok(())
    }

    pub fn write_f32(&mut self, value: f32) -> Result<(), Error> {
        if !value.is_finite() {
            return self.write_null();
        }
        write!(self.sink, "{:?}", value)?;
        Ok(())
    }

    /// Writes a quoted, escaped string.
    pub fn write_str(&mut self, value: &str) -> Result<(), Error> {
        write_escaped(&mut self.sink, value)?;
        Ok(())
    }

    /// Writes any [`Encode`] value.
    pub fn write<T: Encode + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        value.encode(self)
    }

    /// Writes `null` for `None`, otherwise hands the value to `write`.
    pub fn write_nullable<T, F>(&mut self, value: Option<T>, write: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Self, T) -> Result<(), Error>,
    {
        match value {
            Some(value) => write(self, value),
            None => self.write_null(),
        }
    }

    /// Writes an array, calling `element` once per item.
    pub fn write_seq<I, F>(&mut self, items: I, mut element: F) -> Result<(), Error>
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item) -> Result<(), Error>,
    {
        self.raw("[")?;
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.raw(",")?;
            }
            element(self, item)?;
        }
        self.raw("]")
    }

    /// Writes an object from key/value pairs in iteration order.
    pub fn write_map<K, V, I, F>(&mut self, entries: I, mut value: F) -> Result<(), Error>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
        F: FnMut(&mut Self, V) -> Result<(), Error>,
    {
        self.raw("{")?;
        for (i, (key, v)) in entries.into_iter().enumerate() {
            if i > 0 {
                self.raw(",")?;
            }
            self.write_str(key.as_ref())?;
            self.raw(":")?;
            value(self, v)?;
        }
        self.raw("}")
    }

    /// Writes an object whose fields are emitted by `fields`, in call order.
    pub fn write_object<F>(&mut self, fields: F) -> Result<(), Error>
    where
        F: FnOnce(&mut ObjectWriter<'_, W>) -> Result<(), Error>,
    {
        self.raw("{")?;
        let mut object = ObjectWriter {
            writer: self,
            empty: true,
        };
        fields(&mut object)?;
        self.raw("}")
    }
}

/// Field emitter handed to [`Writer::write_object`] callbacks.
pub struct ObjectWriter<'w, W> {
    writer: &'w mut Writer<W>,
    empty: bool,
}

impl<W: Write> ObjectWriter<'_, W> {
    fn key(&mut self, name: &str) -> Result<(), Error> {
        if !self.empty {
            self.writer.raw(",")?;
        }
        self.empty = false;
        self.writer.write_str(name)?;
        self.writer.raw(":")
    }

    /// Writes `"name":value`.
    pub fn field<T: Encode + ?Sized>(&mut self, name: &str, value: &T) -> Result<(), Error> {
        self.key(name)?;
        value.encode(&mut *self.writer)
    }

    /// Writes `"name":` and lets `write` produce the value.
    pub fn field_with<F>(&mut self, name: &str, write: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Writer<W>) -> Result<(), Error>,
    {
        self.key(name)?;
        write(&mut *self.writer)
    }
}
