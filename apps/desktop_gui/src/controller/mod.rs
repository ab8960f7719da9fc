//! Controller layer: UI events, navigation state, and command orchestration.

pub mod events;
pub mod navigation;
pub mod orchestration;
