use std::io::{self, stdout, Write};

use chippy8_core::{
    Beeper, Config, Framebuffer, Machine, MachineError, NoKeys, Renderer, Runner,
};

/// Draws the framebuffer as text, two characters per pixel.
struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn present(&mut self, frame: &Framebuffer) -> io::Result<()> {
        for row in frame.rows() {
            let line: String = row
                .iter()
                .map(|&lit| if lit { "██" } else { "  " })
                .collect();
            writeln!(self.out, "{}", line.trim_end())?;
        }
        writeln!(self.out, "{}", "-".repeat(128))?;
        self.out.flush()
    }
}

struct LogBeeper;

impl Beeper for LogBeeper {
    fn tone(&mut self) {
        log::info!("beep");
    }
}

/// Writes "C8" with the resident font, beeps, then spins.
const DEMO: [u16; 13] = [
    0x00E0, // CLS
    0x600C, // LD V0, 0x0C
    0xF029, // LD F, V0
    0x6118, // LD V1, 0x18
    0x620C, // LD V2, 0x0C
    0xD125, // DRW V1, V2, 5
    0x6008, // LD V0, 0x08
    0xF029, // LD F, V0
    0x6122, // LD V1, 0x22
    0xD125, // DRW V1, V2, 5
    0x6304, // LD V3, 0x04
    0xF318, // LD ST, V3
    0x1218, // JP 0x218
];

fn main() -> Result<(), MachineError> {
    env_logger::init();

    let program: Vec<u8> = DEMO.iter().flat_map(|word| word.to_be_bytes()).collect();
    let mut machine = Machine::with_program(&program)?;

    let mut runner = Runner::new(
        Config::default(),
        TextRenderer { out: stdout() },
        NoKeys,
        LogBeeper,
    );
    let cycles = runner.run(&mut machine, Some(32))?;
    log::info!("ran {} cycles, PC {:#05X}", cycles, machine.program_counter());
    Ok(())
}
