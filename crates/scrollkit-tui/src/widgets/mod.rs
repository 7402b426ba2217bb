mod back_to_top;
mod document_view;
mod navbar;
mod status_bar;

pub use back_to_top::BackToTopWidget;
pub use document_view::DocumentWidget;
pub use navbar::NavbarWidget;
pub use status_bar::StatusBarWidget;
