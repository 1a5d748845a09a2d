//! Message routing for CampusChat.
//!
//! A message is answered by the first matching entry of an ordered static
//! rule table. Anything unmatched is wrapped in a prompt and sent to the
//! remote provider. The router never returns an error: provider failures
//! become a fixed reply.

pub mod predicate;
pub mod prompt;
pub mod router;
pub mod rules;

pub use predicate::{NormalizedInput, Predicate};
pub use prompt::PromptTemplate;
pub use router::{MessageRouter, Route, Routed};
pub use rules::{RuleEntry, RuleTable, Shadowing};
