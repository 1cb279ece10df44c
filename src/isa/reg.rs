use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The eight general-purpose registers.
///
/// On the wire a register is identified by a one-hot byte mask (bit *i* set
/// means register *i*), never by its index. `mask` and `from_mask` are the
/// two directions of that mapping; everything outside the eight one-hot
/// values fails to resolve.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Reg {
    Gp0 = 0,
    Gp1,
    Gp2,
    Gp3,
    Gp4,
    Gp5,
    Gp6,
    Gp7,
}

impl Reg {
    pub const COUNT: usize = 8;

    pub const ALL: [Reg; Reg::COUNT] = [
        Reg::Gp0,
        Reg::Gp1,
        Reg::Gp2,
        Reg::Gp3,
        Reg::Gp4,
        Reg::Gp5,
        Reg::Gp6,
        Reg::Gp7,
    ];

    #[must_use]
    pub fn mask(self) -> u8 {
        1 << u8::from(self)
    }

    /// Resolves a one-hot wire mask. Any byte that is not exactly one of
    /// `{1, 2, 4, 8, 16, 32, 64, 128}` is rejected.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_mask(mask: u8) -> Option<Reg> {
        if mask.count_ones() != 1 {
            return None;
        }
        Reg::try_from(mask.trailing_zeros() as u8).ok()
    }

    #[must_use]
    pub fn index(self) -> usize {
        usize::from(u8::from(self))
    }

    pub fn name(self) -> &'static str {
        use Reg::*;

        match self {
            Gp0 => "gp0",
            Gp1 => "gp1",
            Gp2 => "gp2",
            Gp3 => "gp3",
            Gp4 => "gp4",
            Gp5 => "gp5",
            Gp6 => "gp6",
            Gp7 => "gp7",
        }
    }

    /// Assembly names are case-sensitive: `gp0` resolves, `GP0` does not.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Reg> {
        use Reg::*;

        Some(match name {
            "gp0" => Gp0,
            "gp1" => Gp1,
            "gp2" => Gp2,
            "gp3" => Gp3,
            "gp4" => Gp4,
            "gp5" => Gp5,
            "gp6" => Gp6,
            "gp7" => Gp7,
            _ => return None,
        })
    }
}
