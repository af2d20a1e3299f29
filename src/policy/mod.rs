pub mod condition;
pub mod individual;
pub mod inference;
pub mod rule;

pub use condition::Condition;
pub use individual::{Individual, Population};
pub use inference::infer_action;
pub use rule::Rule;
