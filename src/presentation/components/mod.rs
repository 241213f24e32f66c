mod fields;
mod footer;
mod layout;
mod popup;

pub use fields::{FIELD_HEIGHT, render_fields, state_color, value_box};
pub use footer::render_footer;
pub use layout::anchored_rect;
pub use popup::{MAX_OPTION_ROWS, option_rows, render_popup};
