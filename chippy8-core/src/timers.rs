/// Delay and sound countdowns, ticked once per cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerBank {
    pub delay_timer: u8,
    pub sound_timer: u8,
}

impl TimerBank {
    /// Decrements both timers, flooring at zero. Returns true exactly when
    /// the sound timer goes from 1 to 0.
    pub fn tick(&mut self) -> bool {
        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }
        if self.sound_timer > 0 {
            let tone = self.sound_timer == 1;
            self.sound_timer -= 1;
            tone
        } else {
            false
        }
    }
}
