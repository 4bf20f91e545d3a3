// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use jsonrw::{Encode, Error, IoSink, Writer};

fn encode<T: Encode + ?Sized>(value: &T) -> String {
    let mut writer = Writer::new(String::new());
    writer.write(value).unwrap();
    writer.into_inner()
}

struct Item {
    product_id: i32,
    quantity: i32,
}

struct Order {
    id: i32,
    items: Vec<Item>,
}

impl Encode for Item {
    fn encode<W: core::fmt::Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        writer.write_object(|obj| {
            obj.field("product_id", &self.product_id)?;
            obj.field("quantity", &self.quantity)
        })
    }
}

impl Encode for Order {
    fn encode<W: core::fmt::Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        writer.write_object(|obj| {
            obj.field("id", &self.id)?;
            obj.field("items", &self.items)
        })
    }
}

#[test]
fn test_simple_values() {
    assert_eq!(encode(&true), "true");
    assert_eq!(encode(&false), "false");
    assert_eq!(encode(&-17i32), "-17");
    assert_eq!(encode("a\u{1}b"), r#""a\u0001b""#);
    assert_eq!(encode(&None::<i32>), "null");
    assert_eq!(encode(&Some("x")), r#""x""#);
}

#[test]
fn test_sequences_with_absent_values() {
    let (a, b) = (1, 2);
    let values = vec![Some(&a), Some(&b), None];
    assert_eq!(encode(&values), "[1,2,null]");
    assert_eq!(encode(&vec![String::from("x"), String::from("y")]), r#"["x","y"]"#);
}

#[test]
fn test_maps() {
    let map = BTreeMap::from([(String::from("x"), 1), (String::from("y"), 2)]);
    assert_eq!(encode(&map), r#"{"x":1,"y":2}"#);

    let map = BTreeMap::from([
        (String::from("x"), Some(1)),
        (String::from("y"), Some(2)),
        (String::from("z"), None),
    ]);
    assert_eq!(encode(&map), r#"{"x":1,"y":2,"z":null}"#);
}

#[test]
fn test_records_in_field_order() {
    let orders = vec![
        Order {
            id: 1,
            items: vec![
                Item {
                    product_id: 1,
                    quantity: 100,
                },
                Item {
                    product_id: 2,
                    quantity: 200,
                },
            ],
        },
        Order {
            id: 2,
            items: vec![
                Item {
                    product_id: 3,
                    quantity: 300,
                },
                Item {
                    product_id: 4,
                    quantity: 400,
                },
            ],
        },
    ];
    assert_eq!(
        encode(&orders),
        r#"[{"id":1,"items":[{"product_id":1,"quantity":100},{"product_id":2,"quantity":200}]},{"id":2,"items":[{"product_id":3,"quantity":300},{"product_id":4,"quantity":400}]}]"#
    );
}

#[test]
fn test_closure_driven_writes() {
    let mut writer = Writer::new(String::new());
    writer
        .write_map([("b", vec![1.5]), ("a", vec![])], |w, values| {
            w.write_seq(values, Writer::write_f64)
        })
        .unwrap();
    assert_eq!(writer.get_ref(), r#"{"b":[1.5],"a":[]}"#);
}

#[test]
fn test_writes_to_io_sink() {
    let mut writer = Writer::new(IoSink::new(Vec::new()));
    writer
        .write_object(|obj| {
            obj.field("ok", &true)?;
            obj.field_with("list", |w| w.write_seq(1..=3, |w, i| w.write_i64(i)))
        })
        .unwrap();
    let bytes = writer.into_inner().into_inner();
    assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"ok":true,"list":[1,2,3]}"#);
}
