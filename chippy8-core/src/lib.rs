//! Core of a CHIP-8 interpreter: the machine state and the
//! fetch-decode-execute engine that drives it one cycle at a time.
//!
//! Windowing, real input devices, audio output and ROM files live with the
//! host. The host talks to this crate through [`Machine::load_program`],
//! [`Machine::set_key`], the [`Framebuffer`] dirty flag and the tone flag
//! on each [`Cycle`], or hands boundary implementations to a [`Runner`].

mod beeper;
pub mod config;
mod display;
mod error;
mod instruction;
mod interpreter;
mod keyboard;
pub mod memory;
mod registers;
mod stack;
mod state;
mod timers;

pub use beeper::{Beeper, Silent};
pub use config::{Config, FlagBehavior, SpriteEdges};
pub use display::{Framebuffer, Headless, Renderer, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use error::MachineError;
pub use instruction::Instruction;
pub use interpreter::{Chip8Interpreter, Cycle, Runner, Step};
pub use keyboard::{KeySource, KeypadState, NoKeys, KEY_COUNT};
pub use memory::MemoryBank;
pub use registers::{RegisterFile, FLAG_REGISTER};
pub use stack::{CallStack, STACK_DEPTH};
pub use state::Machine;
pub use timers::TimerBank;
