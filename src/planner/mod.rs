pub mod aggregation;
pub mod selection;
pub mod workflow;

pub use aggregation::{BreakdownEntry, IngredientSummary, aggregate, parse_amount};
pub use selection::{Selection, SelectionTracker};
pub use workflow::{ArchiveStep, CustomStep, EventStep, Mode, QueryStep, Screen, Workflow};
