#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Click,
    Touch,
    KeyPress,
}

/// One-shot subscription to the first user interaction of the page.
#[derive(Debug, Clone, Default)]
pub struct InteractionGate {
    consumed: bool,
}

impl InteractionGate {
    pub fn new() -> Self {
        InteractionGate { consumed: false }
    }

    /// True for the first interaction only, later calls are ignored.
    pub fn consume(&mut self, _interaction: Interaction) -> bool {
        if self.consumed {
            return false;
        }
        self.consumed = true;
        true
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}
