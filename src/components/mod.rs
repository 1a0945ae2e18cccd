//! UI Components
//!
//! Reusable Leptos components.

mod kanban_column;
mod job_card;
mod toast;
mod delete_confirm_button;

pub use kanban_column::KanbanColumn;
pub use job_card::JobCard;
pub use toast::ToastContainer;
pub use delete_confirm_button::DeleteConfirmButton;
