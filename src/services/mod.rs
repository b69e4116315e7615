//! Core services: relatedness ranking and the modal state machine.

mod modal;
mod relatedness;

pub use modal::ModalController;
pub use relatedness::{RelatednessConfig, RelatednessEngine};
