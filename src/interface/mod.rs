pub mod prompts;
pub mod render;
pub mod session;

pub use prompts::{confirm_delete, prompt_yes_no};
pub use render::{display_report, display_report_list};
pub use session::run_interactive;
