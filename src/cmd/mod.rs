/// Generic type decode command.
pub mod decode;
/// Event table decode command.
pub mod events;
/// Cartridge header information command.
pub mod info;
/// Schema listing command.
pub mod types;

mod print;
mod util;
