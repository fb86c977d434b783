pub mod check;
pub mod create;
pub mod delete;
pub mod evaluate;
pub mod export;
pub mod import;
pub mod list;
pub mod shortcode;
pub mod show;
pub mod state;

pub use check::handle_check;
pub use create::handle_create;
pub use delete::handle_delete;
pub use evaluate::handle_evaluate;
pub use export::handle_export;
pub use import::handle_import;
pub use list::handle_list;
pub use shortcode::handle_shortcode;
pub use show::handle_show;
pub use state::handle_set_active;
