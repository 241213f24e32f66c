pub mod components;
mod error;
mod events;
mod input;
pub mod popup;
mod state;

pub use components::{
    AcceptFilter, COUNTRIES, Country, Decorations, VariantComponent, country_index,
};
pub use error::SubmitError;
pub use events::FieldEvent;
pub use input::{ChangeCallback, InputField, ValidateCallback};
pub use popup::{ListenerId, PointerListeners, PopupHit};
pub use state::FormState;
