//! Common tools

/// The state of a bit,
/// It's either [`BitState::Clear`] to represent a 0
/// or [`BitState::Set`] to represent a 1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitState {
    /// Bit is 0
    Clear,
    /// Bit is 1
    Set,
}

/// Simple bit ops used to build instruction bytes and split them on a 4-bit bus
pub trait BitOps: Sized {
    /// Set bit at `pos`, and return the updated value
    fn set_bit(&mut self, pos: u8) -> Self;
    /// Clear bit at `pos`, and return the updated value
    fn clear_bit(&mut self, pos: u8) -> Self;
    /// Read bit at `pos`
    fn check_bit(&self, pos: u8) -> BitState;
    /// Split into (high nibble, low nibble), both right aligned
    fn nibbles(&self) -> (Self, Self);
}

impl BitOps for u8 {
    fn set_bit(&mut self, pos: u8) -> Self {
        debug_assert!(pos <= 7, "bit offset larger than 7");
        *self |= 1u8 << pos;
        *self
    }

    fn clear_bit(&mut self, pos: u8) -> Self {
        debug_assert!(pos <= 7, "bit offset larger than 7");
        *self &= !(1u8 << pos);
        *self
    }

    fn check_bit(&self, pos: u8) -> BitState {
        debug_assert!(pos <= 7, "bit offset larger than 7");

        match (*self >> pos) & 1 == 1 {
            true => BitState::Set,
            false => BitState::Clear,
        }
    }

    fn nibbles(&self) -> (Self, Self) {
        (*self >> 4, *self & 0b1111)
    }
}
