/// Receives the one-shot tone emitted when the sound timer runs out.
pub trait Beeper {
    fn tone(&mut self);
}

#[derive(Debug, Default)]
pub struct Silent;

impl Beeper for Silent {
    fn tone(&mut self) {}
}
