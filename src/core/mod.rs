//! Client-side state of the task board
//!
//! This module contains:
//! - The task record and its pre-insert form
//! - Filtering and pagination over the loaded list
//! - The add-task submission workflow and image attachments
//! - Transient notifications

mod filter;
mod image;
mod notification;
mod pagination;
mod submission;
mod task;
mod task_list;

pub use filter::*;
pub use image::*;
pub use notification::*;
pub use pagination::*;
pub use submission::*;
pub use task::*;
pub use task_list::*;
