use crate::rom::registry::Registry;
use crate::rom::schema::{Discriminant, LabelPolicy, LengthFrom, ScalarKind, TypeDef};
use crate::rom::{FieldPath, Result};

/// Registered name of the map event header type.
pub const EVENT_HEADER: &str = "event.event_header";

/// Register the map event model under the `event.*` namespace.
///
/// The model describes the in-ROM event tables of one map: a header of
/// four counts followed by four pointers, each leading to a
/// count-sized array of person, warp, trigger, or signpost records.
pub fn install_event_model(registry: &mut Registry) -> Result<()> {
	// Script payloads are interpreted bytecode with no fixed layout;
	// the pointer stays opaque and round-trips its raw address.
	registry.define("ow_script_pointer", TypeDef::opaque_pointer(LabelPolicy::Address))?;

	registry.define(
		"event.person",
		TypeDef::structure([
			("target_index", "u8"),
			("picture", "u8"),
			("field_2", "u8"),
			("field_3", "u8"),
			("x", "s16"),
			("y", "s16"),
			("level", "u8"),
			("behaviour", "u8"),
			("behaviour_range", "u8"),
			("field_B", "u8"),
			("is_trainer", "u8"),
			("field_D", "u8"),
			("alert_radius", "u16"),
			("script", "ow_script_pointer"),
			("flag", "u16"),
			("field_16", "u16"),
		]),
	)?;

	registry.define(
		"event.trigger",
		TypeDef::structure([
			("x", "s16"),
			("y", "s16"),
			("level", "u8"),
			("field_5", "u8"),
			("var", "u16"),
			("value", "u16"),
			("field_A", "u8"),
			("field_B", "u8"),
			("script", "ow_script_pointer"),
		]),
	)?;

	registry.define(
		"event.warp",
		TypeDef::structure([
			("x", "s16"),
			("y", "s16"),
			("level", "u8"),
			("target_warp_idx", "u8"),
			("target_map", "u8"),
			("target_bank", "u8"),
		]),
	)?;

	registry.define(
		"event.signpost_item",
		TypeDef::bitfield(ScalarKind::U32, [("item", 16), ("flag", 8), ("amount", 8)]),
	)?;

	// Signpost types 0..4 are script posts, 5 and up hide items.
	registry.define(
		"event.signpost_value",
		TypeDef::union(
			[("item", "event.signpost_item"), ("script", "ow_script_pointer")],
			Discriminant::Threshold {
				path: FieldPath::fields(["type"]),
				threshold: 5,
				below: "script".into(),
				at_or_above: "item".into(),
			},
		),
	)?;

	registry.define(
		"event.signpost",
		TypeDef::structure([
			("x", "s16"),
			("y", "s16"),
			("level", "u8"),
			("type", "u8"),
			("field_6", "u8"),
			("field_7", "u8"),
			("value", "event.signpost_value"),
		]),
	)?;

	registry.define(
		"event.person_array",
		TypeDef::array("event.person", LengthFrom::Field(FieldPath::fields(["person_cnt"]))),
	)?;
	registry.define(
		"event.warp_array",
		TypeDef::array("event.warp", LengthFrom::Field(FieldPath::fields(["warp_cnt"]))),
	)?;
	registry.define(
		"event.trigger_array",
		TypeDef::array("event.trigger", LengthFrom::Field(FieldPath::fields(["trigger_cnt"]))),
	)?;
	registry.define(
		"event.signpost_array",
		TypeDef::array("event.signpost", LengthFrom::Field(FieldPath::fields(["signpost_cnt"]))),
	)?;

	// One event table of each kind per map, so each pointer type keeps
	// a single fixed label, 2-aligned and file-local.
	registry.define(
		"event.person_array_pointer",
		TypeDef::pointer("event.person_array", fixed_label("persons")),
	)?;
	registry.define(
		"event.warp_array_pointer",
		TypeDef::pointer("event.warp_array", fixed_label("warps")),
	)?;
	registry.define(
		"event.trigger_array_pointer",
		TypeDef::pointer("event.trigger_array", fixed_label("triggers")),
	)?;
	registry.define(
		"event.signpost_array_pointer",
		TypeDef::pointer("event.signpost_array", fixed_label("signposts")),
	)?;

	registry.define(
		EVENT_HEADER,
		TypeDef::structure([
			("person_cnt", "u8"),
			("warp_cnt", "u8"),
			("trigger_cnt", "u8"),
			("signpost_cnt", "u8"),
			("persons", "event.person_array_pointer"),
			("warps", "event.warp_array_pointer"),
			("triggers", "event.trigger_array_pointer"),
			("signposts", "event.signpost_array_pointer"),
		]),
	)?;

	Ok(())
}

/// Build a registry holding the scalar prelude and the event model.
pub fn event_registry() -> Result<Registry> {
	let mut registry = Registry::new();
	install_event_model(&mut registry)?;
	Ok(registry)
}

fn fixed_label(label: &str) -> LabelPolicy {
	LabelPolicy::Fixed {
		label: label.into(),
		align: 2,
		global: false,
	}
}
