mod constants;
pub mod impose;
pub mod layout;
pub mod marks;
mod options;
pub mod render;
mod stats;
mod types;

pub use impose::{Face, PageRef, Sheet, SheetPlan, Slot, impose};
pub use options::*;
pub use render::{render_proof, save_pdf};
pub use stats::calculate_statistics;
pub use types::*;
