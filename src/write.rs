//! Binary encoding of value trees.
//!
//! A stream holds named root values. Each is written as its tag byte, its
//! name, then its payload. Compound entries are framed the same way and the
//! compound is closed with an End tag. List elements and array elements are
//! payload only, after a tag (for lists) and an i32 count.

use std::convert::TryInto;
use std::io::Write;

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use log::{debug, warn};

use crate::compression::{Compression, Sink};
use crate::error::{Error, Result};
use crate::{Tag, Value};

/// Options for a [`Writer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOpts {
    pub(crate) level: u32,
}

impl WriteOpts {
    pub fn new() -> Self {
        Default::default()
    }

    /// Compression level from 0 (none) to 9 (best). Has no effect on raw
    /// streams. Values above 9 are clamped.
    pub fn level(mut self, level: u32) -> Self {
        self.level = level.min(9);
        self
    }
}

impl Default for WriteOpts {
    fn default() -> Self {
        Self { level: 6 }
    }
}

/// Writes named values to an underlying writer, compressing them as a single
/// stream if asked to.
///
/// The compression framing is only complete once the writer is closed, either
/// with [`finish`](Writer::finish), [`close`](Writer::close), or by dropping
/// it. Dropping cannot report errors, so prefer closing explicitly.
///
/// ```
/// use nbtree::{Compression, Value, Writer};
///
/// # fn main() -> nbtree::error::Result<()> {
/// let mut writer = Writer::new(Vec::new(), Compression::Zlib);
/// writer.write_named("a", &Value::Int(0x42))?;
/// let bytes = writer.finish()?;
///
/// assert_eq!(nbtree::from_bytes(&bytes, Compression::Zlib)?, ("a".to_owned(), Value::Int(0x42)));
/// # Ok(())
/// # }
/// ```
pub struct Writer<W: Write> {
    sink: Option<Sink<W>>,
    closed: Option<W>,
    compression: Compression,
    poisoned: bool,
}

impl<W: Write> Writer<W> {
    pub fn new(writer: W, compression: Compression) -> Self {
        Self::with_opts(writer, compression, WriteOpts::default())
    }

    pub fn with_opts(writer: W, compression: Compression, opts: WriteOpts) -> Self {
        debug!("opening {:?} nbt writer", compression);
        Self {
            sink: Some(Sink::new(
                writer,
                compression,
                flate2::Compression::new(opts.level),
            )),
            closed: None,
            compression,
            poisoned: false,
        }
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Write `value` as a root with the given name.
    ///
    /// A failure can leave part of the value in the stream. The writer is
    /// then poisoned and every later write fails with
    /// [`ErrorKind::Poisoned`][crate::error::ErrorKind::Poisoned]. Closing
    /// still works, to recover the underlying writer.
    pub fn write_named(&mut self, name: &str, value: &Value) -> Result<()> {
        if self.poisoned {
            return Err(Error::poisoned());
        }
        let sink = self.sink.as_mut().ok_or_else(Error::closed)?;

        let result = sink
            .write_tag(value.tag())
            .and_then(|_| sink.write_size_prefixed_str(name))
            .and_then(|_| sink.write_payload(value));
        if let Err(e) = &result {
            warn!("nbt writer poisoned by failed write: {}", e);
            self.poisoned = true;
        }
        result
    }

    /// Whether an earlier write failed part way through.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Finish the compression framing and flush. Any later write fails.
    /// Closing twice is fine.
    pub fn close(&mut self) -> Result<()> {
        if let Some(sink) = self.sink.take() {
            debug!("closing {:?} nbt writer", self.compression);
            self.closed = Some(sink.finish()?);
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.sink.is_none()
    }

    /// Close the writer and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.close()?;
        // close either succeeded or this writer was already closed.
        self.closed.take().ok_or_else(Error::closed)
    }
}

impl<W: Write> Drop for Writer<W> {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.take() {
            if let Err(e) = sink.finish() {
                warn!("nbt writer dropped without close, finishing failed: {}", e);
            }
        }
    }
}

pub(crate) trait WriteNbt: Write {
    fn write_tag(&mut self, tag: Tag) -> Result<()> {
        self.write_u8(tag.into())?;
        Ok(())
    }

    fn write_size_prefixed_str(&mut self, key: &str) -> Result<()> {
        let key = cesu8::to_java_cesu8(key);
        let len_bytes: u16 = key
            .len()
            .try_into()
            .map_err(|_| Error::string_too_long(key.len()))?;
        self.write_u16::<BigEndian>(len_bytes)?;
        self.write_all(&key)?;
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        let len: i32 = len
            .try_into()
            .map_err(|_| Error::seq_too_long(len, i32::MAX as usize))?;
        self.write_i32::<BigEndian>(len)?;
        Ok(())
    }

    /// Write the payload of `value`. Containers are walked with an explicit
    /// stack, so deep trees do not grow the call stack.
    fn write_payload(&mut self, value: &Value) -> Result<()> {
        let mut open = Vec::new();
        self.start_payload(value, &mut open)?;

        while let Some(top) = open.last_mut() {
            match top {
                Open::List(items) => match items.next() {
                    Some(item) => self.start_payload(item, &mut open)?,
                    None => {
                        open.pop();
                    }
                },
                Open::Compound(entries) => match entries.next() {
                    Some((name, item)) => {
                        self.write_tag(item.tag())?;
                        self.write_size_prefixed_str(name)?;
                        self.start_payload(item, &mut open)?;
                    }
                    None => {
                        self.write_tag(Tag::End)?;
                        open.pop();
                    }
                },
            }
        }
        Ok(())
    }

    /// Write a leaf payload in full, or the header of a container whose
    /// children are then left on `open`.
    fn start_payload<'a>(&mut self, value: &'a Value, open: &mut Vec<Open<'a>>) -> Result<()> {
        match value {
            Value::Byte(v) => self.write_i8(*v)?,
            Value::Short(v) => self.write_i16::<BigEndian>(*v)?,
            Value::Int(v) => self.write_i32::<BigEndian>(*v)?,
            Value::Long(v) => self.write_i64::<BigEndian>(*v)?,
            Value::Float(v) => self.write_f32::<BigEndian>(*v)?,
            Value::Double(v) => self.write_f64::<BigEndian>(*v)?,
            Value::String(v) => self.write_size_prefixed_str(v)?,
            Value::ByteArray(v) => {
                self.write_len(v.len())?;
                let bytes: Vec<u8> = v.iter().map(|&b| b as u8).collect();
                self.write_all(&bytes)?;
            }
            Value::IntArray(v) => {
                self.write_len(v.len())?;
                let mut buf = vec![0; v.len() * 4];
                BigEndian::write_i32_into(v, &mut buf);
                self.write_all(&buf)?;
            }
            Value::LongArray(v) => {
                self.write_len(v.len())?;
                let mut buf = vec![0; v.len() * 8];
                BigEndian::write_i64_into(v, &mut buf);
                self.write_all(&buf)?;
            }
            Value::List(list) => {
                self.write_tag(list.element_tag())?;
                self.write_len(list.len())?;
                open.push(Open::List(list.iter()));
            }
            Value::Compound(compound) => open.push(Open::Compound(compound.into_iter())),
        }
        Ok(())
    }
}

/// Children of a container still to be written.
pub(crate) enum Open<'a> {
    List(std::slice::Iter<'a, Value>),
    Compound(indexmap::map::Iter<'a, String, Value>),
}

impl<T> WriteNbt for T where T: Write {}
