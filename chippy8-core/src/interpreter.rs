use std::{
    thread,
    time::{Duration, Instant},
};

use rand::{rngs::ThreadRng, thread_rng, Rng, RngCore};

use crate::{
    config::FlagBehavior, memory::FONT_GLYPH_SIZE, Beeper, Config, Instruction, KeySource,
    Machine, MachineError, RegisterFile, Renderer, FLAG_REGISTER,
};

/// What the instruction at PC did this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Executed(Instruction),
    /// `LD Vx, K` with no key press observed yet. PC was not advanced.
    AwaitingKey,
    /// Undecodable word. PC was not advanced.
    Unknown(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub step: Step,
    /// The sound timer ran out on this cycle.
    pub tone: bool,
}

/// Fetch-decode-execute engine. Holds no machine state of its own, only the
/// configuration and the randomness source for `RND`.
pub struct Chip8Interpreter<R: RngCore = ThreadRng> {
    pub config: Config,
    rng: R,
}

impl Chip8Interpreter<ThreadRng> {
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, thread_rng())
    }
}

impl<R: RngCore> Chip8Interpreter<R> {
    pub fn with_rng(config: Config, rng: R) -> Self {
        Self { config, rng }
    }

    /// Runs one instruction, then ticks both timers.
    ///
    /// Fatal conditions (stack overflow/underflow) come back as `Err` and leave
    /// the machine untouched. Unknown opcodes are not errors here: the cycle
    /// completes with [`Step::Unknown`] and the host decides what to do.
    pub fn cycle(&mut self, machine: &mut Machine) -> Result<Cycle, MachineError> {
        let address = machine.registers.program_counter;
        let word = machine.memory.read_word(address);

        let step = match Instruction::decode(word, address) {
            Ok(instruction) => {
                log::trace!("{:#05X}: {:04X} {}", address, word, instruction);
                self.execute(instruction, machine)?
            }
            Err(err @ MachineError::UnknownOpcode { .. }) => {
                log::warn!("{}", err);
                Step::Unknown(word)
            }
            Err(err) => return Err(err),
        };

        let tone = machine.timers.tick();
        if tone {
            log::debug!("sound timer expired");
        }
        Ok(Cycle { step, tone })
    }

    pub fn execute(
        &mut self,
        instruction: Instruction,
        machine: &mut Machine,
    ) -> Result<Step, MachineError> {
        use Instruction::*;

        let state = &mut machine.registers;
        let flags = self.config.flags;

        match instruction {
            //clear display
            ClearScreen => {
                machine.display.clear();
                state.advance();
            }
            //return
            Return => {
                let address = state.program_counter;
                let call_site = machine
                    .stack
                    .pop()
                    .ok_or(MachineError::StackUnderflow { address })?;
                state.program_counter = call_site;
                state.advance();
            }
            //jump to address
            Jump { nnn } => state.program_counter = nnn,
            //call subroutine
            Call { nnn } => {
                machine.stack.push(state.program_counter)?;
                state.program_counter = nnn;
            }
            //skip if Vx == NN
            SkipIfEqualImmediate { x, kk } => state.skip_if(state.register(x) == kk),
            //skip if Vx != NN
            SkipIfNotEqualImmediate { x, kk } => state.skip_if(state.register(x) != kk),
            //skip if Vx == Vy
            SkipIfEqual { x, y } => state.skip_if(state.register(x) == state.register(y)),
            //Vx = value
            LoadImmediate { x, kk } => {
                *state.register_mut(x) = kk;
                state.advance();
            }
            //Vx += value
            AddImmediate { x, kk } => {
                *state.register_mut(x) = state.register(x).wrapping_add(kk);
                state.advance();
            }
            //Vx = Vy
            Load { x, y } => {
                *state.register_mut(x) = state.register(y);
                state.advance();
            }
            //Vx |= Vy
            Or { x, y } => {
                *state.register_mut(x) |= state.register(y);
                state.advance();
            }
            //Vx &= Vy
            And { x, y } => {
                *state.register_mut(x) &= state.register(y);
                state.advance();
            }
            //Vx ^= Vy
            Xor { x, y } => {
                *state.register_mut(x) ^= state.register(y);
                state.advance();
            }
            //Vx += Vy
            Add { x, y } => {
                let (vx, vy) = (state.register(x), state.register(y));
                let carry = vy > 0xFF - vx;
                flagged(state, flags, x, y, carry as u8, u8::wrapping_add);
                state.advance();
            }
            //Vx -= Vy
            Sub { x, y } => {
                let (vx, vy) = (state.register(x), state.register(y));
                let no_borrow = match flags {
                    FlagBehavior::Compatible => !(vy > 0xFF - vx),
                    FlagBehavior::Canonical => vx >= vy,
                };
                flagged(state, flags, x, y, no_borrow as u8, u8::wrapping_sub);
                state.advance();
            }
            //Vx >>= 1
            ShiftRight { x } => {
                let lsb = state.register(x) & 0x1;
                flagged(state, flags, x, x, lsb, |vx, _| vx >> 1);
                state.advance();
            }
            //Vx = Vy - Vx
            SubNegated { x, y } => {
                let (vx, vy) = (state.register(x), state.register(y));
                let no_borrow = match flags {
                    FlagBehavior::Compatible => !(vy > 0xFF - vx),
                    FlagBehavior::Canonical => vy >= vx,
                };
                flagged(state, flags, x, y, no_borrow as u8, |vx, vy| vy.wrapping_sub(vx));
                state.advance();
            }
            //Vx <<= 1
            ShiftLeft { x } => {
                let flag = match flags {
                    FlagBehavior::Compatible => state.register(x) & 0x7,
                    FlagBehavior::Canonical => state.register(x) >> 7,
                };
                flagged(state, flags, x, x, flag, |vx, _| vx << 1);
                state.advance();
            }
            //skip if Vx != Vy
            SkipIfNotEqual { x, y } => state.skip_if(state.register(x) != state.register(y)),
            //I = address
            LoadIndex { nnn } => {
                state.index_register = nnn;
                state.advance();
            }
            //jump to NNN + V0
            JumpOffset { nnn } => state.program_counter = nnn + state.register(0x0) as u16,
            //Vx = rand() & NN
            Random { x, kk } => {
                *state.register_mut(x) = self.rng.gen::<u8>() & kk;
                state.advance();
            }
            //display sprite
            Draw { x, y, n } => {
                let vx = state.register(x);
                let vy = state.register(y);
                state.set_flag(false);
                let data: Vec<u8> = (0..n as u16)
                    .map(|j| machine.memory.read(state.index_register.wrapping_add(j)))
                    .collect();
                if machine.display.draw(vx, vy, &data, self.config.edges) {
                    state.set_flag(true);
                }
                state.advance();
            }
            //skip if key()
            SkipIfKeyDown { x } => state.skip_if(machine.keypad.is_key_down(state.register(x))),
            //skip if !key()
            SkipIfKeyUp { x } => state.skip_if(!machine.keypad.is_key_down(state.register(x))),
            //Vx = delay timer
            LoadDelayTimer { x } => {
                *state.register_mut(x) = machine.timers.delay_timer;
                state.advance();
            }
            //Vx = get_key()
            WaitForKey { x } => match machine.keypad.take_last_key_pressed() {
                Some(key) => {
                    *state.register_mut(x) = key;
                    state.advance();
                }
                None => return Ok(Step::AwaitingKey),
            },
            //delay timer = Vx
            SetDelayTimer { x } => {
                machine.timers.delay_timer = state.register(x);
                state.advance();
            }
            //sound timer = Vx
            SetSoundTimer { x } => {
                machine.timers.sound_timer = state.register(x);
                state.advance();
            }
            //I += Vx
            AddIndex { x } => {
                state.index_register = state.index_register.wrapping_add(state.register(x) as u16);
                state.advance();
            }
            //I = Vx'th character
            LoadFontGlyph { x } => {
                state.index_register = (state.register(x) & 0xF) as u16 * FONT_GLYPH_SIZE;
                state.advance();
            }
            //store Vx as decimal
            StoreBcd { x } => {
                let value = state.register(x);
                let index = state.index_register;
                machine.memory.write(index, value / 100);
                machine.memory.write(index.wrapping_add(1), value / 10 % 10);
                machine.memory.write(index.wrapping_add(2), value % 10);
                state.advance();
            }
            //store V0..=Vx
            StoreRegisters { x } => {
                for i in 0..=x {
                    let address = state.index_register.wrapping_add(i as u16);
                    machine.memory.write(address, state.register(i));
                }
                state.advance();
            }
            //load V0..=Vx
            LoadRegisters { x } => {
                for i in 0..=x {
                    let address = state.index_register.wrapping_add(i as u16);
                    *state.register_mut(i) = machine.memory.read(address);
                }
                state.advance();
            }
        }

        Ok(Step::Executed(instruction))
    }
}

/// Writes `Vx = op(Vx, Vy)` and `VF = flag`. Compatible mode writes VF first
/// and reads the operands afterwards, so a VF operand sees the new flag.
/// Canonical mode works on the old values and writes VF last, so VF always
/// ends up holding the flag.
fn flagged(
    state: &mut RegisterFile,
    flags: FlagBehavior,
    x: u8,
    y: u8,
    flag: u8,
    op: impl Fn(u8, u8) -> u8,
) {
    match flags {
        FlagBehavior::Compatible => {
            *state.register_mut(FLAG_REGISTER) = flag;
            *state.register_mut(x) = op(state.register(x), state.register(y));
        }
        FlagBehavior::Canonical => {
            *state.register_mut(x) = op(state.register(x), state.register(y));
            *state.register_mut(FLAG_REGISTER) = flag;
        }
    }
}

/// Fixed-interval pacing for the host loop.
struct Pacer {
    interval: Option<Duration>,
    next_tick: Instant,
}

impl Pacer {
    fn new(clock_hz: u32) -> Self {
        let interval = (clock_hz > 0).then(|| Duration::from_secs_f64(1. / clock_hz as f64));
        Self {
            interval,
            next_tick: Instant::now(),
        }
    }

    fn wait(&mut self) {
        if let Some(interval) = self.interval {
            self.next_tick += interval;
            let time_left = self.next_tick.saturating_duration_since(Instant::now());
            if time_left > Duration::ZERO {
                thread::sleep(time_left);
            }
        }
    }
}

/// Host loop wiring a machine to its external collaborators.
pub struct Runner<D: Renderer, K: KeySource, B: Beeper, R: RngCore = ThreadRng> {
    pub interpreter: Chip8Interpreter<R>,
    pub display: D,
    pub keyboard: K,
    pub beeper: B,
}

impl<D: Renderer, K: KeySource, B: Beeper> Runner<D, K, B> {
    pub fn new(config: Config, display: D, keyboard: K, beeper: B) -> Self {
        Self::with_interpreter(Chip8Interpreter::new(config), display, keyboard, beeper)
    }
}

impl<D: Renderer, K: KeySource, B: Beeper, R: RngCore> Runner<D, K, B, R> {
    pub fn with_interpreter(
        interpreter: Chip8Interpreter<R>,
        display: D,
        keyboard: K,
        beeper: B,
    ) -> Self {
        Self {
            interpreter,
            display,
            keyboard,
            beeper,
        }
    }

    /// Cycles at `config.clock_hz` (unpaced when zero) until a fatal error
    /// or until `max_cycles` have run. Returns the number of cycles run.
    pub fn run(
        &mut self,
        machine: &mut Machine,
        max_cycles: Option<u64>,
    ) -> Result<u64, MachineError> {
        let mut pacer = Pacer::new(self.interpreter.config.clock_hz);
        let mut cycles = 0;

        while max_cycles.map_or(true, |max| cycles < max) {
            for (key, pressed) in self.keyboard.poll()? {
                machine.set_key(key, pressed);
            }

            let cycle = match self.interpreter.cycle(machine) {
                Ok(cycle) => cycle,
                Err(err) => {
                    log::error!("halting after {} cycles: {}", cycles, err);
                    return Err(err);
                }
            };
            cycles += 1;

            if cycle.tone {
                self.beeper.tone();
            }
            if machine.display.is_dirty() {
                self.display.present(&machine.display)?;
                machine.display.clear_dirty();
            }

            pacer.wait();
        }

        Ok(cycles)
    }
}
