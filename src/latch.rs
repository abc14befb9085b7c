/// One-time gate over a repeating event stream.
///
/// The first `accept` passes; every later one is dropped. A fresh mount gets a
/// fresh latch, `reset` exists for owners that recycle their state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Latch {
    fired: bool,
}

impl Latch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept(&mut self) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn is_fired(&self) -> bool {
        self.fired
    }

    pub fn reset(&mut self) {
        self.fired = false;
    }
}
