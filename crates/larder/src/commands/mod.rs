//! Command dispatch: bridges CLI args -> facade calls -> output formatting.

pub mod config_cmd;
pub mod items;
pub mod util;

use std::sync::Arc;

use larder_core::ContentFacade;

use crate::cli::OutputFormat;
use crate::router::ViewRouter;

/// Everything a backend-bound command handler needs.
pub struct Context {
    pub facade: ContentFacade,
    pub router: Arc<ViewRouter>,
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
}
