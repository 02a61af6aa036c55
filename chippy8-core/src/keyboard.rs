use std::io;

pub const KEY_COUNT: usize = 16;

/// Polls a host input device and reports key transitions as
/// `(key, pressed)` pairs, key in `0..16`.
pub trait KeySource {
    fn poll(&mut self) -> io::Result<Vec<(u8, bool)>>;
}

/// Key source with nothing plugged in.
#[derive(Debug, Default)]
pub struct NoKeys;

impl KeySource for NoKeys {
    fn poll(&mut self) -> io::Result<Vec<(u8, bool)>> {
        Ok(Vec::new())
    }
}

/// Down state of the 16-key pad plus the last key that went down, which
/// the key-wait instruction consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeypadState {
    keys: [bool; KEY_COUNT],
    last_key_pressed: Option<u8>,
}

impl KeypadState {
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        let key = key & 0xF;
        if pressed && !self.keys[key as usize] {
            self.last_key_pressed = Some(key);
        }
        self.keys[key as usize] = pressed;
    }

    pub fn is_key_down(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }

    pub fn take_last_key_pressed(&mut self) -> Option<u8> {
        self.last_key_pressed.take()
    }
}
