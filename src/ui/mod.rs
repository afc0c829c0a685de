//! Ratatui front-end: a numbered main menu whose entries open list screens or
//! small input popups. All persistence goes through the `Store` owned by
//! [`App`].

mod app;
mod forms;
mod helpers;
mod menu;
mod screens;
mod terminal;

pub use app::App;
pub use menu::{MenuInputError, MenuSelection};
pub use terminal::run_app;
