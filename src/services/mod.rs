//! Service layer for the notifier.
//!
//! This module contains the external collaborators:
//! - Status fetching (`PracticumClient`)
//! - Message delivery (`TelegramMessenger`, wrapped by `Notifier`)

mod notifier;
mod status;

pub use notifier::{Messenger, Notifier, TelegramMessenger};
pub use status::{PracticumClient, StatusSource};
