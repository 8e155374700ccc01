use super::Action;

/// Translates raw host events into actions.
///
/// Returning `None` means the event carries no intent (unmapped key, resize,
/// focus change); the engine then leaves all state untouched.
pub trait EventHandler {
    type Event;

    fn dispatch(&mut self, event: &Self::Event) -> Option<Action>;
}

/// Blocking supplier of host events.
///
/// `wait` is the loop's only suspension point. It returns at least one event
/// unless the backend failed.
pub trait EventSource {
    type Event;
    type Error;

    fn wait(&mut self) -> Result<Vec<Self::Event>, Self::Error>;
}

impl<H: EventHandler + ?Sized> EventHandler for &mut H {
    type Event = H::Event;

    fn dispatch(&mut self, event: &Self::Event) -> Option<Action> {
        (**self).dispatch(event)
    }
}
