pub mod callback_url;
pub mod layout;
pub mod text_input;

pub use callback_url::{parse_callback_params, CallbackParams};
pub use layout::create_standard_layout;
pub use text_input::TextInput;
