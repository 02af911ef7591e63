//! Stream framing. NBT is usually stored gzip compressed, region files use
//! zlib, and network data is often sent raw. The framing covers a whole
//! stream, the codec in [`Reader`][crate::Reader] and
//! [`Writer`][crate::Writer] never sees it.

use std::io::{self, BufRead, BufReader, Read, Write};

use flate2::bufread::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};

/// How a stream of NBT is wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Compression {
    /// Bytes are passed through unchanged.
    #[default]
    None,
    /// RFC 1952 gzip, as used by level.dat and player data.
    Gzip,
    /// RFC 1950 zlib, as used inside region files.
    Zlib,
}

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

impl Compression {
    /// Guess the framing from the first bytes of a stream. Anything that is
    /// not recognisably gzip or zlib is assumed to be raw.
    ///
    /// Raw NBT nearly always starts with a Compound tag (10), which can never
    /// be mistaken for either header.
    pub fn detect(head: &[u8]) -> Compression {
        match head {
            [a, b, ..] if [*a, *b] == GZIP_MAGIC => Compression::Gzip,
            [cmf, flg, ..] if is_zlib_header(*cmf, *flg) => Compression::Zlib,
            _ => Compression::None,
        }
    }
}

// CMF must say deflate with at most a 32K window, and CMF and FLG read as a
// big-endian u16 must be a multiple of 31.
fn is_zlib_header(cmf: u8, flg: u8) -> bool {
    cmf & 0x0f == 8 && cmf >> 4 <= 7 && (u16::from(cmf) << 8 | u16::from(flg)) % 31 == 0
}

/// Output side of a stream. Compresses on the way through when needed.
pub(crate) enum Sink<W: Write> {
    Raw(W),
    Gzip(GzEncoder<W>),
    Zlib(ZlibEncoder<W>),
}

impl<W: Write> Sink<W> {
    pub(crate) fn new(inner: W, compression: Compression, level: flate2::Compression) -> Self {
        match compression {
            Compression::None => Sink::Raw(inner),
            Compression::Gzip => Sink::Gzip(GzEncoder::new(inner, level)),
            Compression::Zlib => Sink::Zlib(ZlibEncoder::new(inner, level)),
        }
    }

    /// Write out any trailer and flush, handing back the inner writer.
    pub(crate) fn finish(self) -> io::Result<W> {
        match self {
            Sink::Raw(mut w) => {
                w.flush()?;
                Ok(w)
            }
            Sink::Gzip(enc) => {
                let mut w = enc.finish()?;
                w.flush()?;
                Ok(w)
            }
            Sink::Zlib(enc) => {
                let mut w = enc.finish()?;
                w.flush()?;
                Ok(w)
            }
        }
    }
}

impl<W: Write> Write for Sink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Raw(w) => w.write(buf),
            Sink::Gzip(w) => w.write(buf),
            Sink::Zlib(w) => w.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Sink::Raw(w) => w.write_all(buf),
            Sink::Gzip(w) => w.write_all(buf),
            Sink::Zlib(w) => w.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Raw(w) => w.flush(),
            Sink::Gzip(w) => w.flush(),
            Sink::Zlib(w) => w.flush(),
        }
    }
}

/// Input side of a stream. Decompresses on the way through when needed.
pub enum Source<R: Read> {
    Raw(R),
    Gzip(GzDecoder<BufReader<R>>),
    Zlib(ZlibDecoder<BufReader<R>>),
}

impl<R: Read> Source<R> {
    pub(crate) fn new(inner: R, compression: Compression) -> Self {
        match compression {
            Compression::None => Source::Raw(inner),
            Compression::Gzip => Source::Gzip(GzDecoder::new(BufReader::new(inner))),
            Compression::Zlib => Source::Zlib(ZlibDecoder::new(BufReader::new(inner))),
        }
    }

    /// The raw stream underneath any decompression. Buffered input that was
    /// read ahead but not yet decompressed is lost.
    pub fn into_inner(self) -> R {
        match self {
            Source::Raw(r) => r,
            Source::Gzip(d) => d.into_inner().into_inner(),
            Source::Zlib(d) => d.into_inner().into_inner(),
        }
    }
}

impl<R: Read> Read for Source<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Source::Raw(r) => r.read(buf),
            Source::Gzip(r) => r.read(buf),
            Source::Zlib(r) => r.read(buf),
        }
    }
}

/// Sniff the framing of a buffered stream without consuming anything.
pub fn detect_buffered<R: BufRead>(reader: &mut R) -> io::Result<Compression> {
    let head = reader.fill_buf()?;
    Ok(Compression::detect(head))
}
