/// How 8xy5, 8xy7 and 8xyE compute VF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlagBehavior {
    /// VF = !(Vy > 255 - Vx) for both subtractions and VF = Vx & 0x7 for the
    /// left shift, as the reference interpreter does.
    #[default]
    Compatible,
    /// VF = no borrow (Vx >= Vy, Vy >= Vx) and VF = bit 7 before a left shift.
    Canonical,
}

/// What a sprite does when it crosses the right or bottom edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpriteEdges {
    #[default]
    Wrap,
    Clip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Cycles per second when driven by a `Runner`.
    pub clock_hz: u32,
    pub flags: FlagBehavior,
    pub edges: SpriteEdges,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clock_hz: 700,
            flags: FlagBehavior::default(),
            edges: SpriteEdges::default(),
        }
    }
}
