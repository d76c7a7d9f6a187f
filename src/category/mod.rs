//! Categories group transactions by what the money was earned or spent on.
//!
//! Categories are administered out of band (see the `seed_db` binary), so this
//! module only exposes reads and the insert used for seeding.

mod api;
mod core;
mod db;

pub use api::get_categories_endpoint;
pub use core::{Category, NewCategory};
pub use db::{create_category, create_category_table, get_all_categories, get_category_by_name};
