/// A discrete, edge-triggered request produced by input events.
///
/// Held keys are polled through [`crate::InputSource`]; actions are one-shot
/// and handed back to whoever pumps events, which decides what they do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Fire one projectile.
    Fire,
    /// Speed up simulation time.
    TimeFaster,
    /// Slow down simulation time.
    TimeSlower,
    /// Nothing to do for this event.
    Noop,
}

impl Action {
    pub fn is_noop(self) -> bool {
        self == Action::Noop
    }
}
