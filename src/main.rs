#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "agbdoc", about = "GBA ROM event-structure inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Info {
		path: PathBuf,
		#[arg(long)]
		json: bool,
	},
	Types {
		#[arg(long = "type")]
		type_name: Option<String>,
	},
	Decode {
		path: PathBuf,
		#[arg(long = "type")]
		type_name: String,
		#[arg(long)]
		addr: String,
		#[arg(long)]
		deep: bool,
		#[arg(long)]
		json: bool,
	},
	Events {
		path: PathBuf,
		#[arg(long)]
		addr: String,
		#[arg(long)]
		json: bool,
	},
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> agbdoc::rom::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info { path, json } => cmd::info::run(path, json),
		Commands::Types { type_name } => cmd::types::run(type_name.as_deref()),
		Commands::Decode {
			path,
			type_name,
			addr,
			deep,
			json,
		} => cmd::decode::run(path, &type_name, &addr, deep, json),
		Commands::Events { path, addr, json } => cmd::events::run(path, &addr, json),
	}
}
