//! Terminal wizard: five guided steps from repository URL to exported deck,
//! plus a full-screen pitch mode.

pub mod deck;
pub mod pitch;
pub mod theme;
pub mod wizard;

pub use wizard::{run_wizard, WizardOptions};
