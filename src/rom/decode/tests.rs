use std::rc::Rc;

use crate::rom::bytes::Cursor;
use crate::rom::schema::{Discriminant, LabelPolicy, LengthFrom, ScalarKind, TypeDef};
use crate::rom::value::{FieldValue, PtrValue, StructValue, Value};
use crate::rom::{DecodeOptions, FieldPath, Registry, RomError, RomImage, decode_rom, decode_value};

fn record_registry() -> Registry {
	let mut registry = Registry::new();
	registry
		.define("rec", TypeDef::structure([("x", "s16"), ("cnt", "u8"), ("items", "rec.items")]))
		.expect("rec defines");
	registry
		.define("rec.items", TypeDef::array("u8", LengthFrom::Field(FieldPath::fields(["cnt"]))))
		.expect("rec.items defines");
	registry
}

fn decode_rec(bytes: &[u8]) -> crate::rom::Result<Value> {
	let registry = record_registry();
	let mut cursor = Cursor::new(bytes);
	decode_value(&registry, "rec", &mut cursor, &DecodeOptions::default())
}

#[test]
fn struct_with_counted_array_decodes() {
	let value = decode_rec(&[0x05, 0x00, 0x02, 0xAA, 0xBB]).expect("rec decodes");

	let expected = Value::Struct(StructValue {
		type_name: "rec".into(),
		fields: vec![
			FieldValue {
				name: "x".into(),
				value: Value::Int(5),
			},
			FieldValue {
				name: "cnt".into(),
				value: Value::UInt(2),
			},
			FieldValue {
				name: "items".into(),
				value: Value::Array(vec![Value::UInt(0xAA), Value::UInt(0xBB)]),
			},
		],
	});
	assert_eq!(value, expected);
}

#[test]
fn zero_count_decodes_empty_array() {
	let value = decode_rec(&[0x05, 0x00, 0x00]).expect("rec decodes");

	let Value::Struct(item) = value else {
		panic!("expected struct");
	};
	assert_eq!(item.field("items"), Some(&Value::Array(Vec::new())));
}

#[test]
fn negative_count_is_rejected() {
	let mut registry = Registry::new();
	registry
		.define("rec", TypeDef::structure([("cnt", "s8"), ("items", "rec.items")]))
		.expect("rec defines");
	registry
		.define("rec.items", TypeDef::array("u8", LengthFrom::Field(FieldPath::fields(["cnt"]))))
		.expect("rec.items defines");

	let mut cursor = Cursor::new(&[0xFF]);
	let err = decode_value(&registry, "rec", &mut cursor, &DecodeOptions::default()).expect_err("negative count fails");
	assert!(matches!(err, RomError::NegativeLength { len: -1, .. }));
}

#[test]
fn scalar_eof_fails_without_consuming() {
	let registry = Registry::new();
	let mut cursor = Cursor::new(&[0x01, 0x02, 0x03]);

	let err = decode_value(&registry, "u32", &mut cursor, &DecodeOptions::default()).expect_err("u32 over 3 bytes fails");
	assert!(matches!(err, RomError::UnexpectedEof { need: 4, rem: 3, .. }));
	assert_eq!(cursor.pos(), 0);
}

#[test]
fn bitfield_subfields_unpack_low_bits_first() {
	let mut registry = Registry::new();
	registry
		.define("bf", TypeDef::bitfield(ScalarKind::U8, [("a", 3), ("b", 5)]))
		.expect("bf defines");

	let mut cursor = Cursor::new(&[0b1010_0101]);
	let value = decode_value(&registry, "bf", &mut cursor, &DecodeOptions::default()).expect("bf decodes");

	let Value::Struct(item) = value else {
		panic!("expected struct");
	};
	assert_eq!(item.field("a"), Some(&Value::UInt(5)));
	assert_eq!(item.field("b"), Some(&Value::UInt(20)));
}

#[test]
fn oversubscribed_bitfield_is_rejected() {
	let mut registry = Registry::new();
	registry
		.define("bf", TypeDef::bitfield(ScalarKind::U8, [("a", 6), ("b", 3)]))
		.expect("bf defines");

	let mut cursor = Cursor::new(&[0x00]);
	let err = decode_value(&registry, "bf", &mut cursor, &DecodeOptions::default()).expect_err("9 bits in a u8 fails");
	assert!(matches!(err, RomError::BitfieldOverflow { declared: 9, backing: 8, .. }));
}

fn post_registry() -> Registry {
	let mut registry = Registry::new();
	registry
		.define("post", TypeDef::structure([("type", "u8"), ("value", "post.value")]))
		.expect("post defines");
	registry
		.define(
			"post.value",
			TypeDef::union(
				[("item", "u32"), ("script", "u32")],
				Discriminant::Threshold {
					path: FieldPath::fields(["type"]),
					threshold: 5,
					below: "script".into(),
					at_or_above: "item".into(),
				},
			),
		)
		.expect("post.value defines");
	registry
}

#[test]
fn union_discriminant_thresholds() {
	let registry = post_registry();
	for (type_byte, expected) in [(0_u8, "script"), (4, "script"), (5, "item"), (9, "item")] {
		let bytes = [type_byte, 0x78, 0x56, 0x34, 0x12];
		let mut cursor = Cursor::new(&bytes);
		let value = decode_value(&registry, "post", &mut cursor, &DecodeOptions::default()).expect("post decodes");

		let Value::Struct(item) = value else {
			panic!("expected struct");
		};
		let Some(Value::Union(selected)) = item.field("value") else {
			panic!("expected union value");
		};
		assert_eq!(selected.variant.as_ref(), expected, "type={type_byte}");
		assert_eq!(*selected.value, Value::UInt(0x1234_5678));
	}
}

#[test]
fn undeclared_variant_selection_is_rejected() {
	let mut registry = Registry::new();
	registry
		.define("only", TypeDef::union([("item", "u8")], Discriminant::Const("missing".into())))
		.expect("only defines");

	let mut cursor = Cursor::new(&[0x00]);
	let err = decode_value(&registry, "only", &mut cursor, &DecodeOptions::default()).expect_err("undeclared variant fails");
	assert!(matches!(err, RomError::UnknownVariant { .. }));
}

#[test]
fn shallow_pointers_keep_their_address() {
	let mut registry = Registry::new();
	registry
		.define("p", TypeDef::pointer("u16", LabelPolicy::Address))
		.expect("p defines");

	let bytes = 0x0800_0010_u32.to_le_bytes();
	let mut cursor = Cursor::new(&bytes);
	let value = decode_value(&registry, "p", &mut cursor, &DecodeOptions::default()).expect("p decodes");
	assert_eq!(value, Value::Ptr(PtrValue::Address(0x0800_0010)));
}

fn pair_registry() -> Registry {
	let mut registry = Registry::new();
	registry
		.define("pair", TypeDef::structure([("a", "p"), ("b", "p")]))
		.expect("pair defines");
	registry
		.define("p", TypeDef::pointer("u16", LabelPolicy::Address))
		.expect("p defines");
	registry
}

fn pair_image() -> RomImage {
	let mut bytes = vec![0_u8; 0x20];
	bytes[0x00..0x04].copy_from_slice(&0x0800_0010_u32.to_le_bytes());
	bytes[0x04..0x08].copy_from_slice(&0x0800_0010_u32.to_le_bytes());
	bytes[0x10..0x12].copy_from_slice(&0x1234_u16.to_le_bytes());
	RomImage::from_bytes(bytes)
}

#[test]
fn shared_targets_decode_to_one_object() {
	let registry = pair_registry();
	let image = pair_image();

	let value = decode_rom(&registry, &image, "pair", 0x0800_0000, &DecodeOptions::deep()).expect("pair decodes");
	let Value::Struct(item) = value else {
		panic!("expected struct");
	};

	let targets: Vec<&Rc<Value>> = ["a", "b"]
		.into_iter()
		.map(|name| {
			let Some(Value::Ptr(PtrValue::Resolved { target, .. })) = item.field(name) else {
				panic!("expected resolved pointer for {name}");
			};
			target
		})
		.collect();

	assert!(Rc::ptr_eq(targets[0], targets[1]), "equal offsets should share one target");
	assert_eq!(**targets[0], Value::UInt(0x1234));
}

#[test]
fn target_cache_does_not_outlive_one_decode() {
	let registry = pair_registry();
	let image = pair_image();

	let first = decode_rom(&registry, &image, "pair", 0x0800_0000, &DecodeOptions::deep()).expect("first decode");
	let second = decode_rom(&registry, &image, "pair", 0x0800_0000, &DecodeOptions::deep()).expect("second decode");
	assert_eq!(first, second);

	let target_of = |value: &Value| -> Rc<Value> {
		let Value::Struct(item) = value else {
			panic!("expected struct");
		};
		let Some(Value::Ptr(PtrValue::Resolved { target, .. })) = item.field("a") else {
			panic!("expected resolved pointer");
		};
		Rc::clone(target)
	};
	assert!(!Rc::ptr_eq(&target_of(&first), &target_of(&second)), "separate decodes keep separate caches");
}

#[test]
fn null_pointer_stays_null_in_deep_mode() {
	let registry = pair_registry();
	let image = RomImage::from_bytes(vec![0_u8; 8]);

	let value = decode_rom(&registry, &image, "p", 0x0800_0000, &DecodeOptions::deep()).expect("null decodes");
	assert_eq!(value, Value::Ptr(PtrValue::Null));
}

#[test]
fn untranslatable_target_is_rejected_in_deep_mode() {
	let registry = pair_registry();
	let mut bytes = vec![0_u8; 8];
	bytes[0..4].copy_from_slice(&0x0200_0000_u32.to_le_bytes());
	let image = RomImage::from_bytes(bytes);

	let err = decode_rom(&registry, &image, "p", 0x0800_0000, &DecodeOptions::deep()).expect_err("address outside image fails");
	assert!(matches!(err, RomError::UnresolvedAddress { address: 0x0200_0000 }));
}

#[test]
fn instance_pointer_cycle_is_depth_bounded() {
	let mut registry = Registry::new();
	registry
		.define("node", TypeDef::structure([("next", "node.ptr")]))
		.expect("node defines");
	registry
		.define("node.ptr", TypeDef::pointer("node", LabelPolicy::Address))
		.expect("node.ptr defines");

	// A node whose next pointer leads back to itself.
	let image = RomImage::from_bytes(0x0800_0000_u32.to_le_bytes().to_vec());

	let err = decode_rom(&registry, &image, "node", 0x0800_0000, &DecodeOptions::deep()).expect_err("self cycle fails");
	assert!(matches!(err, RomError::DepthExceeded { .. }));
}

#[test]
fn oversized_constant_length_is_rejected() {
	let mut registry = Registry::new();
	registry
		.define("big", TypeDef::array("u8", LengthFrom::Const(5000)))
		.expect("big defines");

	let mut cursor = Cursor::new(&[0_u8; 16]);
	let err = decode_value(&registry, "big", &mut cursor, &DecodeOptions::default()).expect_err("5000 elements over the default cap fails");
	assert!(matches!(err, RomError::ArrayTooLarge { count: 5000, max: 4096 }));
}
