//! Sign-in form state machine.
//!
//! The form follows an Elm-like split: [`update`] is a pure reducer over
//! [`FormState`] that returns [`FormEffect`]s, [`runtime::FormRuntime`]
//! executes them, and [`view::FormView`] is what front ends render.

pub mod common;
pub mod effects;
pub mod events;
pub mod runtime;
pub mod state;
pub mod update;
pub mod view;

pub use effects::FormEffect;
pub use events::FormEvent;
pub use runtime::FormRuntime;
pub use state::{Banner, FormPhase, FormState};
pub use view::{FieldView, FormView, InputKind};
