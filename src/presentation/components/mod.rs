mod fields;
mod footer;

pub use fields::render_fields;
pub use footer::render_footer;
