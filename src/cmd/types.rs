use agbdoc::rom::{Discriminant, LabelPolicy, LengthFrom, Registry, TypeDef, event_registry};

/// List registered event model types, or describe one by name.
pub fn run(type_name: Option<&str>) -> agbdoc::rom::Result<()> {
	let registry = event_registry()?;

	let Some(name) = type_name else {
		for name in registry.names() {
			let def = registry.resolve(name)?;
			println!("{name} ({})", def.kind());
		}
		return Ok(());
	};

	describe(&registry, name)
}

fn describe(registry: &Registry, name: &str) -> agbdoc::rom::Result<()> {
	match registry.resolve(name)? {
		TypeDef::Scalar(kind) => {
			let sign = if kind.is_signed() { "signed" } else { "unsigned" };
			println!("{name}: {sign} {}-byte scalar", kind.width());
		}
		TypeDef::Struct(def) => {
			println!("{name}: struct");
			for field in &def.fields {
				println!("  {}: {}", field.name, field.type_name);
			}
		}
		TypeDef::Bitfield(def) => {
			println!("{name}: bitfield over {}", def.backing.name());
			for sub in &def.subfields {
				println!("  {}: {} bits", sub.name, sub.bits);
			}
		}
		TypeDef::Union(def) => {
			println!("{name}: union");
			for variant in &def.variants {
				println!("  {}: {}", variant.name, variant.type_name);
			}
			match &def.discriminant {
				Discriminant::Const(variant) => println!("  selected: always {variant}"),
				Discriminant::Threshold {
					path,
					threshold,
					below,
					at_or_above,
				} => println!("  selected: {below} while {path} < {threshold}, else {at_or_above}"),
			}
		}
		TypeDef::Array(def) => {
			println!("{name}: array of {}", def.element);
			match &def.length {
				LengthFrom::Const(count) => println!("  length: {count}"),
				LengthFrom::Field(path) => println!("  length: from {path}"),
			}
		}
		TypeDef::Pointer(def) => {
			match &def.target {
				Some(target) => println!("{name}: pointer to {target}"),
				None => println!("{name}: opaque pointer"),
			}
			match &def.label {
				LabelPolicy::Fixed { label, align, global } => {
					println!("  label: {label} (align {align}, {})", if *global { "global" } else { "local" });
				}
				LabelPolicy::Address => println!("  label: raw address"),
			}
		}
	}
	Ok(())
}
