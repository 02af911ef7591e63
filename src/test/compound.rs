use crate::{ByteArray, Compound, IntArray, List, LongArray, Tag, Value};

fn single(value: impl Into<Value>) -> Compound {
    Compound::build(|map| {
        map.insert("a", value);
    })
}

#[test]
fn set_string() {
    let nbt = single("hi");

    assert_eq!(nbt.len(), 1);
    assert!(matches!(nbt.get("a"), Some(Value::String(_))));
    assert_eq!(nbt.get_string("a"), Some("hi"));
}

#[test]
fn set_scalars() {
    assert_eq!(single(42i16).get_short("a"), Some(42));
    assert_eq!(single(0xCAu8 as i8).get_byte("a"), Some(0xCAu8 as i8));
    assert_eq!(single(0xBABE).get_int("a"), Some(0xBABE));
    assert_eq!(single(0xCAFEBABEi64).get_long("a"), Some(0xCAFEBABE));
    assert_eq!(single(0.5f32).get_float("a"), Some(0.5));
    assert_eq!(single(0.25).get_double("a"), Some(0.25));
}

#[test]
fn set_arrays() {
    let nbt = single(ByteArray::from([1, 2, 3]));
    assert_eq!(nbt.get_byte_array("a"), Some(&ByteArray::new(vec![1, 2, 3])));

    let nbt = single(IntArray::from([1, 2, 3]));
    assert_eq!(nbt.get_int_array("a"), Some(&IntArray::new(vec![1, 2, 3])));

    let nbt = single(LongArray::from([1, 2, 3]));
    assert_eq!(nbt.get_long_array("a"), Some(&LongArray::new(vec![1, 2, 3])));
}

#[test]
fn set_containers() {
    let list = List::new(Tag::Int, vec![1.into(), 2.into()]).unwrap();
    let inner = single(true);

    let nbt = Compound::builder()
        .put("list", list.clone())
        .put("inner", inner.clone())
        .build();

    assert_eq!(nbt.get_list("list"), Some(&list));
    assert_eq!(nbt.get_compound("inner"), Some(&inner));
    assert_eq!(nbt.get_compound("inner").unwrap().get_bool("a"), Some(true));
}

#[test]
fn exact_getters_are_strict() {
    let nbt = single(42);

    assert_eq!(nbt.get_int("a"), Some(42));
    assert_eq!(nbt.get_long("a"), None);
    assert_eq!(nbt.get_byte("a"), None);
    assert_eq!(nbt.get_double("a"), None);
    assert_eq!(nbt.get_string("a"), None);
    assert_eq!(nbt.get_list("a"), None);
    assert_eq!(nbt.get_int("missing"), None);
}

#[test]
fn get_as_widens_int() {
    let nbt = single(42);

    assert_eq!(nbt.get_as_long("a"), Some(42));
    assert_eq!(nbt.get_as_byte("a"), Some(42));
    assert_eq!(nbt.get_as_short("a"), Some(42));
    assert_eq!(nbt.get_as_double("a"), Some(42.0));
    assert_eq!(nbt.get_as_float("a"), Some(42.0));
}

#[test]
fn get_as_narrows_long() {
    let nbt = single(42i64);

    assert_eq!(nbt.get_int("a"), None);
    assert_eq!(nbt.get_as_int("a"), Some(42));
    assert_eq!(nbt.get_short("a"), None);
    assert_eq!(nbt.get_as_short("a"), Some(42));
    assert_eq!(nbt.get_as_byte("a"), Some(42));
}

#[test]
fn get_as_truncates_like_twos_complement() {
    assert_eq!(single(300i64).get_as_byte("a"), Some(44));
    assert_eq!(single(0x1_0000_0080i64).get_as_int("a"), Some(128));
    assert_eq!(single(0x1_0000_0080i64).get_as_byte("a"), Some(-128));
    assert_eq!(single(-1i32).get_as_short("a"), Some(-1));
    assert_eq!(single(0xFFFFi32).get_as_short("a"), Some(-1));
}

#[test]
fn get_as_from_floating_point() {
    assert_eq!(single(300.7f64).get_as_byte("a"), Some(44));
    assert_eq!(single(-2.9f32).get_as_int("a"), Some(-2));
    assert_eq!(single(1e20f64).get_as_int("a"), Some(i32::MAX));
    assert_eq!(single(1e20f64).get_as_long("a"), Some(i64::MAX));
    assert_eq!(single(f64::NAN).get_as_long("a"), Some(0));
}

#[test]
fn get_as_non_numeric_is_none() {
    let nbt = Compound::builder()
        .put("s", "42")
        .put("arr", IntArray::from([42]))
        .build();

    assert_eq!(nbt.get_as_int("s"), None);
    assert_eq!(nbt.get_as_int("arr"), None);
    assert_eq!(nbt.get_as_int("missing"), None);
}

#[test]
fn remove_tag() {
    let nbt = single("value");
    assert_eq!(nbt.len(), 1);

    let nbt = nbt.with_removed_keys(["a"]);
    assert_eq!(nbt.len(), 0);
    assert_eq!(nbt.get("a"), None);

    let nbt = nbt.with_entries([
        ("b", Value::Int(1)),
        ("c", LongArray::from([5, 4, 3, 2, 1]).into()),
    ]);

    assert_eq!(nbt.len(), 2);
    assert_eq!(nbt.get("a"), None);
    assert_eq!(nbt.get_as_int("b"), Some(1));
    assert_eq!(nbt.get_long_array("c"), Some(&LongArray::from([5, 4, 3, 2, 1])));
}

#[test]
fn derived_compounds_leave_original_alone() {
    let c = Compound::builder().put("a", 1).build();

    let removed = c.with_removed_keys(["a"]);
    let added = c.with_entries([("b", 2), ("c", 3)]);

    assert_eq!(c.len(), 1);
    assert_eq!(c.get_int("a"), Some(1));
    assert!(!c.contains_key("b"));

    assert!(removed.is_empty());
    assert_eq!(added.len(), 3);
    assert_eq!(added.get_int("a"), Some(1));
    assert_eq!(added.get_int("b"), Some(2));
    assert_eq!(added.get_int("c"), Some(3));
}

#[test]
fn remove_unknown_key_is_noop() {
    let c = Compound::builder().put("a", 1).put("b", 2).build();
    let same = c.with_removed_keys(["x", "y"]);
    assert_eq!(same, c);

    let partly = c.with_removed_keys(vec!["x".to_owned(), "b".to_owned()]);
    assert_eq!(partly.keys().collect::<Vec<_>>(), ["a"]);
}

#[test]
fn with_entries_overwrites_in_place() {
    let c = Compound::builder()
        .put("a", 1)
        .put("b", 2)
        .put("c", 3)
        .build();

    let d = c.with_entries([("b", Value::from("two")), ("d", Value::from(4))]);

    assert_eq!(d.keys().collect::<Vec<_>>(), ["a", "b", "c", "d"]);
    assert_eq!(d.get_string("b"), Some("two"));
    assert_eq!(c.get_int("b"), Some(2));
}

#[test]
fn builder_replaces_duplicate_keys() {
    let c = Compound::builder().put("a", 1).put("a", "x").build();

    assert_eq!(c.len(), 1);
    assert_eq!(c.get_string("a"), Some("x"));
}

#[test]
fn equality_ignores_order() {
    let ab = Compound::builder().put("a", 1).put("b", 2).build();
    let ba = Compound::builder().put("b", 2).put("a", 1).build();

    assert_eq!(ab, ba);
    assert_ne!(ab, ab.with_entries([("b", 3)]));
}

#[test]
fn iterates_in_insertion_order() {
    let c: Compound = vec![("z", 1), ("a", 2), ("m", 3)].into_iter().collect();

    let pairs: Vec<_> = c.iter().map(|(k, v)| (k, v.as_i64())).collect();
    assert_eq!(pairs, [("z", Some(1)), ("a", Some(2)), ("m", Some(3))]);
}

#[test]
fn to_builder_starts_from_current_entries() {
    let c = Compound::builder().put("a", 1).build();

    let mut b = c.to_builder();
    assert_eq!(b.len(), 1);
    b.insert("b", 2);
    assert_eq!(b.remove("a"), Some(Value::Int(1)));

    let d = b.build();
    assert_eq!(d.keys().collect::<Vec<_>>(), ["b"]);
    assert_eq!(c.keys().collect::<Vec<_>>(), ["a"]);
}

#[test]
fn float_equality_is_bitwise() {
    let c = single(f64::NAN);
    assert_eq!(c, c.clone());
    assert_eq!(Value::Float(f32::NAN), Value::Float(f32::NAN));

    assert_ne!(Value::Double(0.0), Value::Double(-0.0));
    assert_ne!(single(0.0f32), single(-0.0f32));
    assert_ne!(Value::Float(1.0), Value::Double(1.0));
}
