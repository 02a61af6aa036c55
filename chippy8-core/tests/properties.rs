use chippy8_core::{Chip8Interpreter, Config, Machine, MachineError, Step, STACK_DEPTH};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn interpreter() -> Chip8Interpreter<StdRng> {
    Chip8Interpreter::with_rng(Config::default(), StdRng::seed_from_u64(0xC8))
}

fn machine(program: &[u16]) -> Machine {
    let bytes: Vec<u8> = program.iter().flat_map(|word| word.to_be_bytes()).collect();
    Machine::with_program(&bytes).unwrap()
}

proptest! {
    #[test]
    fn load_then_add_doubles(r in 0u8..16, k in any::<u8>()) {
        let ld = 0x6000 | (r as u16) << 8 | k as u16;
        let add = 0x7000 | (r as u16) << 8 | k as u16;
        let mut m = machine(&[ld, add]);
        let mut i = interpreter();
        i.cycle(&mut m).unwrap();
        i.cycle(&mut m).unwrap();
        prop_assert_eq!(m.register(r), k.wrapping_add(k));
        prop_assert_eq!(m.program_counter(), 0x204);
    }

    #[test]
    fn draw_after_clear_never_collides(x in any::<u8>(), y in any::<u8>(), rows in proptest::collection::vec(any::<u8>(), 1..16)) {
        let mut m = machine(&[0x00E0, 0xD010 | rows.len() as u16]);
        *m.registers.register_mut(0) = x;
        *m.registers.register_mut(1) = y;
        m.registers.index_register = 0x300;
        for (offset, row) in rows.iter().enumerate() {
            m.memory.write(0x300 + offset as u16, *row);
        }
        let mut i = interpreter();
        i.cycle(&mut m).unwrap();
        i.cycle(&mut m).unwrap();
        prop_assert_eq!(m.register(0xF), 0);
    }

    #[test]
    fn double_draw_restores_framebuffer(x in any::<u8>(), y in any::<u8>(), rows in proptest::collection::vec(any::<u8>(), 1..16), noise in proptest::collection::vec((0usize..64, 0usize..32), 0..40)) {
        let n = rows.len() as u16;
        let mut m = machine(&[0xD010 | n, 0xD010 | n]);
        for (col, row) in noise {
            m.display.toggle(col, row);
        }
        let before = m.display.snapshot().to_vec();
        *m.registers.register_mut(0) = x;
        *m.registers.register_mut(1) = y;
        m.registers.index_register = 0x300;
        for (offset, row) in rows.iter().enumerate() {
            m.memory.write(0x300 + offset as u16, *row);
        }
        let mut i = interpreter();
        i.cycle(&mut m).unwrap();
        i.cycle(&mut m).unwrap();
        // the second pass collides wherever the first pass lit a pixel
        let lit_by_first_pass = rows.iter().enumerate().any(|(j, &bits)| {
            (0..8).any(|bit| {
                let col = (x as usize + bit) % 64;
                let row = (y as usize + j) % 32;
                bits & (0x80 >> bit) != 0 && !before[row * 64 + col]
            })
        });
        prop_assert_eq!(m.register(0xF), lit_by_first_pass as u8);
        prop_assert_eq!(m.display.snapshot().to_vec(), before);
    }

    #[test]
    fn delay_timer_reaches_zero_after_exactly_v_cycles(v in 1u8..=255) {
        // JP 0x200 forever
        let mut m = machine(&[0x1200]);
        m.timers.delay_timer = v;
        let mut i = interpreter();
        for cycle in 1..=v as u32 {
            i.cycle(&mut m).unwrap();
            prop_assert_eq!(m.timers.delay_timer as u32, v as u32 - cycle);
        }
        for _ in 0..8 {
            i.cycle(&mut m).unwrap();
            prop_assert_eq!(m.timers.delay_timer, 0);
        }
    }
}

#[test]
fn call_then_return_restores_pc_and_depth() {
    // 0x200 JP 0x300; 0x300 CALL 0x400; 0x400 RET
    let mut m = machine(&[0x1300]);
    m.memory.write(0x300, 0x24);
    m.memory.write(0x301, 0x00);
    m.memory.write(0x400, 0x00);
    m.memory.write(0x401, 0xEE);
    let mut i = interpreter();
    i.cycle(&mut m).unwrap();
    let depth = m.stack.depth();
    i.cycle(&mut m).unwrap();
    i.cycle(&mut m).unwrap();
    assert_eq!(m.program_counter(), 0x302);
    assert_eq!(m.stack.depth(), depth);
}

#[test]
fn sixteen_calls_succeed_and_the_seventeenth_overflows() {
    // every CALL targets the next word, so the calls nest
    let program: Vec<u16> = (0..=STACK_DEPTH as u16)
        .map(|n| 0x2000 | (0x202 + n * 2))
        .collect();
    let mut m = machine(&program);
    let mut i = interpreter();
    for _ in 0..STACK_DEPTH {
        i.cycle(&mut m).unwrap();
    }
    assert_eq!(m.stack.depth(), STACK_DEPTH);
    let pc = m.program_counter();
    let err = i.cycle(&mut m).unwrap_err();
    assert!(matches!(err, MachineError::StackOverflow { address } if address == pc));
    assert!(err.is_fatal());
    assert_eq!(m.program_counter(), pc);
}

#[test]
fn sound_tone_fires_exactly_once() {
    let mut m = machine(&[0x1200]);
    m.timers.sound_timer = 1;
    let mut i = interpreter();
    let tones: Vec<bool> = (0..5).map(|_| i.cycle(&mut m).unwrap().tone).collect();
    assert_eq!(tones, [true, false, false, false, false]);
}

#[test]
fn ld_then_add_scenario() {
    let mut m = machine(&[0x6006, 0x7004]);
    *m.registers.register_mut(0) = 6;
    let mut i = interpreter();
    i.cycle(&mut m).unwrap();
    i.cycle(&mut m).unwrap();
    assert_eq!(m.register(0), 10);
    assert_eq!(m.program_counter(), 0x204);
}

#[test]
fn load_index_scenario() {
    let mut m = machine(&[0xA210]);
    interpreter().cycle(&mut m).unwrap();
    assert_eq!(m.registers.index_register, 0x210);
    assert_eq!(m.program_counter(), 0x202);
}

#[test]
fn unknown_opcode_is_reported_and_pc_holds() {
    let mut m = machine(&[0xFFFF]);
    let mut i = interpreter();
    for _ in 0..3 {
        let cycle = i.cycle(&mut m).unwrap();
        assert_eq!(cycle.step, Step::Unknown(0xFFFF));
        assert_eq!(m.program_counter(), 0x200);
    }
}

#[test]
fn oversized_program_is_rejected_before_running() {
    let image = vec![0u8; 4096 - 0x200 + 2];
    assert!(matches!(
        Machine::with_program(&image),
        Err(MachineError::ProgramTooLarge { size: 3586, max_size: 3584 })
    ));
}
