//! Binary decoding of value trees. See [`Reader`].

use std::io::{BufRead, Read};

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};
use log::debug;

use crate::compression::{detect_buffered, Compression, Source};
use crate::error::{Error, Result};
use crate::{ByteArray, Compound, CompoundBuilder, IntArray, List, LongArray, Tag, Value};

/// Limits applied while reading. The defaults accept anything the game
/// itself would write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOpts {
    pub(crate) max_depth: usize,
    pub(crate) max_seq_len: usize,
}

impl ReadOpts {
    pub fn new() -> Self {
        Default::default()
    }

    /// Maximum number of nested compounds and lists, counting the root.
    /// Deeper input fails with [`ErrorKind::TooDeep`][crate::error::ErrorKind::TooDeep].
    pub fn max_depth(mut self, value: usize) -> Self {
        self.max_depth = value;
        self
    }

    /// Maximum number of elements in any list or array.
    pub fn max_seq_len(mut self, value: usize) -> Self {
        self.max_seq_len = value;
        self
    }
}

impl Default for ReadOpts {
    fn default() -> Self {
        Self {
            max_depth: 512,
            max_seq_len: i32::MAX as usize,
        }
    }
}

/// Reads named values from an underlying reader, decompressing the stream if
/// asked to.
///
/// Declared lengths are never trusted for allocation up front, so truncated or
/// hostile input fails with an error rather than exhausting memory. After an
/// error the position in the stream is unspecified and further reads are not
/// meaningful.
pub struct Reader<R: Read> {
    source: Source<R>,
    compression: Compression,
    opts: ReadOpts,
}

impl<R: Read> Reader<R> {
    pub fn new(reader: R, compression: Compression) -> Self {
        Self::with_opts(reader, compression, ReadOpts::default())
    }

    pub fn with_opts(reader: R, compression: Compression, opts: ReadOpts) -> Self {
        debug!("opening {:?} nbt reader", compression);
        Self {
            source: Source::new(reader, compression),
            compression,
            opts,
        }
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Consumes this reader, returning the underlying stream.
    pub fn into_inner(self) -> Source<R> {
        self.source
    }

    /// Read the next root tag, returning its name and value.
    pub fn read_named(&mut self) -> Result<(String, Value)> {
        let tag = self.read_tag()?;
        if tag == Tag::End {
            return Err(Error::unexpected_end("at root"));
        }

        let name = self.read_size_prefixed_string()?;
        let value = self.read_payload(tag)?;
        Ok((name, value))
    }

    fn read_tag(&mut self) -> Result<Tag> {
        let tag = self.source.read_u8()?;
        Tag::try_from(tag).map_err(|_| Error::invalid_tag(tag))
    }

    fn read_size_prefixed_string(&mut self) -> Result<String> {
        let len = self.source.read_u16::<BigEndian>()? as usize;

        let mut buf = vec![0; len];
        self.source.read_exact(&mut buf)?;

        Ok(cesu8::from_java_cesu8(&buf)
            .map_err(|_| Error::nonunicode_string(&buf))?
            .into_owned())
    }

    fn read_len(&mut self) -> Result<usize> {
        let len = self.source.read_i32::<BigEndian>()?;
        if len < 0 {
            return Err(Error::negative_length(len));
        }

        let len = len as usize;
        if len > self.opts.max_seq_len {
            return Err(Error::seq_too_long(len, self.opts.max_seq_len));
        }
        Ok(len)
    }

    /// Read exactly `len` bytes, growing the buffer only as data arrives.
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut self.source).take(len as u64).read_to_end(&mut buf)?;
        if buf.len() != len {
            return Err(Error::unexpected_eof());
        }
        Ok(buf)
    }

    /// Read the payload of a value with the given tag. Containers are tracked
    /// on an explicit stack, so nesting depth costs heap rather than call
    /// stack.
    fn read_payload(&mut self, tag: Tag) -> Result<Value> {
        let mut open: Vec<Open> = Vec::new();
        let mut next = tag;

        loop {
            let mut value = match next {
                Tag::List | Tag::Compound => {
                    if open.len() >= self.opts.max_depth {
                        return Err(Error::too_deep(self.opts.max_depth));
                    }
                    open.push(self.open_container(next)?);
                    None
                }
                leaf => Some(self.read_leaf(leaf)?),
            };

            // Hand finished values to their parents until a parent wants
            // another child, or the outermost value is done.
            loop {
                let top = match open.last_mut() {
                    Some(top) => top,
                    None => {
                        return value
                            .ok_or_else(|| Error::unexpected_end("where a value was expected"));
                    }
                };
                if let Some(v) = value.take() {
                    top.push(v);
                }

                match self.next_child(top)? {
                    Some(tag) => {
                        next = tag;
                        break;
                    }
                    None => value = open.pop().map(Open::finish).transpose()?,
                }
            }
        }
    }

    fn open_container(&mut self, tag: Tag) -> Result<Open> {
        if tag == Tag::Compound {
            return Ok(Open::Compound {
                builder: Compound::builder(),
                name: None,
            });
        }

        let element_tag = self.read_tag()?;
        let remaining = self.read_len()?;
        if element_tag == Tag::End && remaining > 0 {
            return Err(Error::unexpected_end("as the element tag of a non-empty list"));
        }

        Ok(Open::List {
            element_tag,
            remaining,
            // Capacity is capped, the length has not been proven yet.
            items: Vec::with_capacity(remaining.min(1024)),
        })
    }

    /// The tag of the next child of `container`, or `None` once it is
    /// complete. For compounds this consumes the entry's tag and name.
    fn next_child(&mut self, container: &mut Open) -> Result<Option<Tag>> {
        match container {
            Open::List {
                element_tag,
                remaining,
                ..
            } => {
                if *remaining == 0 {
                    return Ok(None);
                }
                *remaining -= 1;
                Ok(Some(*element_tag))
            }
            Open::Compound { name, .. } => {
                let tag = self.read_tag()?;
                if tag == Tag::End {
                    return Ok(None);
                }
                *name = Some(self.read_size_prefixed_string()?);
                Ok(Some(tag))
            }
        }
    }

    fn read_leaf(&mut self, tag: Tag) -> Result<Value> {
        Ok(match tag {
            Tag::Byte => Value::Byte(self.source.read_i8()?),
            Tag::Short => Value::Short(self.source.read_i16::<BigEndian>()?),
            Tag::Int => Value::Int(self.source.read_i32::<BigEndian>()?),
            Tag::Long => Value::Long(self.source.read_i64::<BigEndian>()?),
            Tag::Float => Value::Float(self.source.read_f32::<BigEndian>()?),
            Tag::Double => Value::Double(self.source.read_f64::<BigEndian>()?),
            Tag::String => Value::String(self.read_size_prefixed_string()?),
            Tag::ByteArray => {
                let len = self.read_len()?;
                let buf = self.read_bytes(len)?;
                Value::ByteArray(buf.into_iter().map(|b| b as i8).collect::<ByteArray>())
            }
            Tag::IntArray => {
                let len = self.read_len()?;
                let buf = self.read_bytes(byte_len(len, 4)?)?;
                let mut data = vec![0; len];
                BigEndian::read_i32_into(&buf, &mut data);
                Value::IntArray(IntArray::new(data))
            }
            Tag::LongArray => {
                let len = self.read_len()?;
                let buf = self.read_bytes(byte_len(len, 8)?)?;
                let mut data = vec![0; len];
                BigEndian::read_i64_into(&buf, &mut data);
                Value::LongArray(LongArray::new(data))
            }
            Tag::End | Tag::List | Tag::Compound => {
                return Err(Error::unexpected_end("where a value was expected"))
            }
        })
    }
}

/// A container that has been started but not yet completed.
enum Open {
    List {
        element_tag: Tag,
        remaining: usize,
        items: Vec<Value>,
    },
    Compound {
        builder: CompoundBuilder,
        // Name of the entry currently being read.
        name: Option<String>,
    },
}

impl Open {
    fn push(&mut self, value: Value) {
        match self {
            Open::List { items, .. } => items.push(value),
            Open::Compound { builder, name } => {
                builder.insert(name.take().unwrap_or_default(), value);
            }
        }
    }

    fn finish(self) -> Result<Value> {
        Ok(match self {
            Open::List {
                element_tag, items, ..
            } => Value::List(List::new(element_tag, items)?),
            Open::Compound { builder, .. } => Value::Compound(builder.build()),
        })
    }
}

fn byte_len(len: usize, width: usize) -> Result<usize> {
    len.checked_mul(width)
        .ok_or_else(|| Error::seq_too_long(len, usize::MAX / width))
}

impl<R: BufRead> Reader<R> {
    /// Create a reader, working out the compression from the start of the
    /// stream. See [`Compression::detect`].
    pub fn detect(mut reader: R) -> Result<Self> {
        let compression = detect_buffered(&mut reader)?;
        Ok(Self::new(reader, compression))
    }
}
