mod category_handler;

pub use category_handler::{
    create_category, create_category_form, list_categories, toggle_active,
};
