//! PDF rendering for sheet plans
//!
//! This module handles all PDF-specific operations:
//! - Drawing proof pages for each sheet face
//! - Building the page tree and catalog
//! - Writing the document to disk

mod io;
mod proof;

pub use io::save_pdf;
pub use proof::render_proof;
