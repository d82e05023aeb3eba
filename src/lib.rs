//! Multi-box one-time-passcode input.
//!
//! An [`OtpGroup`] binds a row of single-character fields and keeps them
//! consistent as one numeric value: typing advances focus, pastes spread
//! across the boxes, non-digits are rolled back, and Backspace, Delete and
//! the arrow keys move between boxes. The logical value is mirrored into an
//! optional [`Sink`] after every change.

pub mod error;
pub mod field;
pub mod form;
pub mod group;
pub mod settings;
pub mod sink;
pub mod tui;

pub use error::{OtpError, Result};
pub use field::{Field, FieldKind, InputField};
pub use form::{ContainerSpec, Form, FormSpec};
pub use group::{Cell, KeyAction, OtpConfig, OtpGroup, SinkTarget, Target};
pub use sink::{Sink, SinkField};
