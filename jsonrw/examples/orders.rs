// SPDX-License-Identifier: Apache-2.0

// Encodes a list of orders, then decodes it back from a chunked stream

use core::fmt::Write;

use jsonrw::{ByteSource, ChunkReader, Decode, Encode, Error, Reader, Writer};

#[derive(Debug, Default, PartialEq)]
struct OrderItem {
    product_id: u32,
    quantity: u32,
}

#[derive(Debug, Default, PartialEq)]
struct Order {
    id: u32,
    items: Vec<OrderItem>,
}

impl Encode for OrderItem {
    fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        writer.write_object(|obj| {
            obj.field("product_id", &self.product_id)?;
            obj.field("quantity", &self.quantity)
        })
    }
}

impl Encode for Order {
    fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        writer.write_object(|obj| {
            obj.field("id", &self.id)?;
            obj.field("items", &self.items)
        })
    }
}

impl Decode for OrderItem {
    fn decode<S: ByteSource>(reader: &mut Reader<S>) -> Result<Self, Error> {
        let mut item = OrderItem::default();
        reader.read_object(|r, key| match key {
            "product_id" => r.read().map(|v| item.product_id = v),
            "quantity" => r.read().map(|v| item.quantity = v),
            _ => Err(Error::UnknownKey),
        })?;
        Ok(item)
    }
}

impl Decode for Order {
    fn decode<S: ByteSource>(reader: &mut Reader<S>) -> Result<Self, Error> {
        let mut order = Order::default();
        reader.read_object(|r, key| match key {
            "id" => r.read().map(|v| order.id = v),
            "items" => r.read_vec_into(&mut order.items, OrderItem::decode),
            // Unknown fields are ignored, unlike items
            _ => r.skip_value(),
        })?;
        Ok(order)
    }
}

fn main() -> Result<(), Error> {
    let orders = vec![
        Order {
            id: 1,
            items: vec![
                OrderItem {
                    product_id: 1,
                    quantity: 100,
                },
                OrderItem {
                    product_id: 2,
                    quantity: 200,
                },
            ],
        },
        Order {
            id: 2,
            items: vec![
                OrderItem {
                    product_id: 3,
                    quantity: 300,
                },
                OrderItem {
                    product_id: 4,
                    quantity: 400,
                },
            ],
        },
    ];

    let mut writer = Writer::new(String::new());
    writer.write(&orders)?;
    let json = writer.into_inner();
    println!("Encoded: {}", json);

    // Four-byte chunks through an eight-byte buffer
    let mut buffer = [0u8; 8];
    let mut reader = Reader::from_stream(ChunkReader::new(json.as_bytes(), 4), &mut buffer);
    let decoded: Vec<Order> = reader.read()?;
    for order in &decoded {
        println!("Order {} has {} items", order.id, order.items.len());
    }
    assert_eq!(decoded, orders);

    let extended = r#"[{"id": 9, "note": "gift", "items": [{"product_id": 5, "quantity": 1}]}]"#;
    let decoded: Vec<Order> = Reader::from_slice(extended).read()?;
    println!("Decoded with an unknown field skipped: {:?}", decoded);

    let strict = r#"[{"id": 9, "items": [{"product_id": 5, "colour": "red"}]}]"#;
    match Reader::from_slice(strict).read::<Vec<Order>>() {
        Err(e) => println!("Strict item decode failed as expected: {}", e),
        Ok(_) => println!("Strict item decode unexpectedly succeeded"),
    }
    Ok(())
}
