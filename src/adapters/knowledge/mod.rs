//! Knowledge search adapters.
//!
//! - `LexicalKnowledgeSearch` - term-overlap scorer for local deployments
//! - `MockKnowledgeSearch` - fixed-verdict mock for tests

mod lexical;
mod mock;

pub use lexical::LexicalKnowledgeSearch;
pub use mock::MockKnowledgeSearch;
