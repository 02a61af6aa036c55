use crate::MachineError;

pub const MEMORY_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
pub const FONT_START: u16 = 0x000;
pub const FONT_GLYPH_SIZE: u16 = 5;

const ADDRESS_MASK: u16 = 0x0FFF;

pub const FONT: [u8; 16 * 5] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Flat 4KB address space. Every address is taken modulo 4096.
#[derive(Clone)]
pub struct MemoryBank {
    ram: [u8; MEMORY_SIZE],
}

impl Default for MemoryBank {
    fn default() -> Self {
        let mut memory = Self {
            ram: [0; MEMORY_SIZE],
        };
        memory.load_font_data(&FONT);
        memory
    }
}

impl MemoryBank {
    pub fn load_font_data(&mut self, fonts: &[u8]) {
        for (i, byte) in fonts.iter().enumerate() {
            self.write(FONT_START + i as u16, *byte);
        }
    }

    /// Copies a program image verbatim to 0x200.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), MachineError> {
        let max_size = MEMORY_SIZE - PROGRAM_START as usize;
        if program.len() > max_size {
            return Err(MachineError::ProgramTooLarge {
                size: program.len(),
                max_size,
            });
        }
        let start = PROGRAM_START as usize;
        self.ram[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read(&self, address: u16) -> u8 {
        self.ram[(address & ADDRESS_MASK) as usize]
    }

    pub fn write(&mut self, address: u16, value: u8) {
        self.ram[(address & ADDRESS_MASK) as usize] = value;
    }

    /// Big-endian instruction word at `address`.
    pub fn read_word(&self, address: u16) -> u16 {
        (self.read(address) as u16) << 8 | self.read(address.wrapping_add(1)) as u16
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.ram
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_is_resident_and_rest_is_zeroed() {
        let memory = MemoryBank::default();
        assert_eq!(&memory.as_slice()[..80], &FONT[..]);
        assert!(memory.as_slice()[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn program_lands_at_0x200() {
        let mut memory = MemoryBank::default();
        memory.load_program(&[0x00, 0xE0, 0x12, 0x00]).unwrap();
        assert_eq!(memory.read_word(0x200), 0x00E0);
        assert_eq!(memory.read_word(0x202), 0x1200);
    }

    #[test]
    fn program_filling_memory_exactly_is_accepted() {
        let mut memory = MemoryBank::default();
        let program = vec![0xAB; MEMORY_SIZE - 0x200];
        memory.load_program(&program).unwrap();
        assert_eq!(memory.read(0xFFF), 0xAB);
    }

    #[test]
    fn oversized_program_is_rejected() {
        let mut memory = MemoryBank::default();
        let program = vec![0; MEMORY_SIZE - 0x200 + 1];
        match memory.load_program(&program) {
            Err(MachineError::ProgramTooLarge { size, max_size }) => {
                assert_eq!(size, 3585);
                assert_eq!(max_size, 3584);
            }
            other => panic!("expected ProgramTooLarge, got {:?}", other),
        }
        assert_eq!(memory.read(0x200), 0);
    }

    #[test]
    fn addresses_wrap_at_4k() {
        let mut memory = MemoryBank::default();
        memory.write(0x1005, 0x42);
        assert_eq!(memory.read(0x005), 0x42);
        memory.write(0xFFF, 0x12);
        memory.write(0x000, 0x34);
        assert_eq!(memory.read_word(0xFFF), 0x1234);
    }
}
