/// Errors that can occur when working with station state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateError {
    /// Demo scene index is out of bounds (must be < DEMO_SCENE_COUNT).
    InvalidSceneIndex,
}
