use std::io::Write;

use crate::compression::Sink;
use crate::error::Result;
use crate::{
    from_bytes, to_bytes, ByteArray, Compound, Compression, IntArray, List, LongArray, Tag, Value,
};

const MODES: [Compression; 3] = [Compression::None, Compression::Gzip, Compression::Zlib];

fn assert_round_trip(name: &str, value: Value) -> Result<()> {
    for compression in MODES {
        let bytes = to_bytes(name, &value, compression)?;
        let (read_name, read_value) = from_bytes(&bytes, compression)?;

        assert_eq!(read_name, name, "{:?}", compression);
        assert_eq!(read_value, value, "{:?}", compression);
    }
    Ok(())
}

fn every_kind() -> Compound {
    Compound::builder()
        .put("byteArray", ByteArray::from([1, 2, 3]))
        .put("byte", 0x42i8)
        .put("double", 0.5)
        .put("string", "ABC")
        .put("float", 0.25f32)
        .put("int", 4567)
        .put("intArray", IntArray::from([42, 42, 25464, 454, -10]))
        .put("long", 30000000000i64)
        .put(
            "longArray",
            LongArray::from([30000000000, -30000000000, 130000000000]),
        )
        .put("short", -10i16)
        .build()
}

#[test]
fn primitives() -> Result<()> {
    assert_round_trip("a", Value::Byte(-0x42))?;
    assert_round_trip("a", Value::Short(i16::MIN))?;
    assert_round_trip("a", Value::Int(i32::MAX))?;
    assert_round_trip("a", Value::Long(i64::MIN))?;
    assert_round_trip("a", Value::Float(f32::MIN_POSITIVE))?;
    assert_round_trip("a", Value::Double(-1.5e300))?;
    assert_round_trip("a", Value::from("hello 😈 world"))?;
    assert_round_trip("a", Value::from(""))?;
    Ok(())
}

#[test]
fn arrays() -> Result<()> {
    assert_round_trip("", ByteArray::from([i8::MIN, 0, i8::MAX]).into())?;
    assert_round_trip("", IntArray::default().into())?;
    assert_round_trip("", LongArray::from((0..1000).collect::<Vec<i64>>()).into())?;
    Ok(())
}

#[test]
fn lists() -> Result<()> {
    let strings = List::new(Tag::String, vec!["A".into(), "B".into()])?;
    let compounds = List::new(Tag::Compound, vec![every_kind().into(), Compound::new().into()])?;
    let nested = List::new(
        Tag::List,
        vec![strings.clone().into(), List::empty(Tag::End).into()],
    )?;

    assert_round_trip("strings", strings.into())?;
    assert_round_trip("compounds", compounds.into())?;
    assert_round_trip("nested", nested.into())?;
    assert_round_trip("end", List::empty(Tag::End).into())?;
    assert_round_trip("empty ints", List::empty(Tag::Int).into())?;
    Ok(())
}

#[test]
fn end_to_end_compound() -> Result<()> {
    assert_round_trip("", every_kind().into())
}

#[test]
fn nested_compounds() -> Result<()> {
    let leaf = every_kind();
    let middle = Compound::builder()
        .put("leaf", leaf.clone())
        .put("list", List::new(Tag::Compound, vec![leaf.into()])?)
        .put("empty", Compound::new())
        .build();
    let root = Compound::builder()
        .put("middle", middle)
        .put("name with spaces and ünïcödé", true)
        .build();

    assert_round_trip("root", root.into())
}

#[test]
fn insertion_order_survives() -> Result<()> {
    let c: Compound = vec![("z", 1), ("y", 2), ("x", 3)].into_iter().collect();

    let bytes = to_bytes("", &Value::from(c), Compression::Gzip)?;
    let (_, value) = from_bytes(&bytes, Compression::Gzip)?;

    let keys: Vec<_> = value.as_compound().unwrap().keys().collect();
    assert_eq!(keys, ["z", "y", "x"]);
    Ok(())
}

#[test]
fn truncation_is_rejected_in_every_mode() -> Result<()> {
    let value = Value::from(every_kind());

    for compression in MODES {
        let raw = to_bytes("", &value, Compression::None)?;

        // Re-frame the stream minus its last byte, which is the compound's End.
        let mut sink = Sink::new(Vec::new(), compression, flate2::Compression::default());
        sink.write_all(&raw[..raw.len() - 1])?;
        let truncated = sink.finish()?;

        let err = from_bytes(&truncated, compression).unwrap_err();
        assert!(err.is_malformed(), "{:?}: {:?}", compression, err);
    }
    Ok(())
}

#[test]
fn nan_round_trips() -> Result<()> {
    assert_round_trip("f", Value::Float(f32::NAN))?;
    assert_round_trip("d", Value::Double(f64::NAN))?;

    // A payload-carrying NaN keeps its exact bits.
    let odd_nan = f64::from_bits(0x7ff8_0000_dead_beef);
    assert_round_trip("d", Value::Double(odd_nan))?;

    let c = Compound::builder()
        .put("nan", f32::NAN)
        .put("list", List::new(Tag::Double, vec![Value::Double(f64::NAN)])?)
        .build();
    assert_round_trip("c", c.into())
}

#[test]
fn negative_zero_round_trips() -> Result<()> {
    assert_round_trip("f", Value::Float(-0.0))?;
    assert_round_trip("d", Value::Double(-0.0))?;

    let bytes = to_bytes("", &Value::Double(-0.0), Compression::None)?;
    let (_, value) = from_bytes(&bytes, Compression::None)?;
    assert_ne!(value, Value::Double(0.0));
    Ok(())
}
