use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick interval elapsed.
    Tick,
    /// The screen needs redrawing.
    Render,
    /// Key input, mouse, resize.
    Crossterm(CrosstermEvent),
}
