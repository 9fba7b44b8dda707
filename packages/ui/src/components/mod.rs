//! Small form primitives shared by the screens.

mod button;
pub use button::{Button, ButtonVariant};

mod input;
pub use input::{Input, TextArea};

mod label;
pub use label::Label;
