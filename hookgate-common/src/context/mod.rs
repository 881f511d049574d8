//! Context Resolver: advisory text injected from markdown files.

mod discovery;
mod resolver;

pub use discovery::{
    candidate_paths, discover_agent_context_file, discover_context_file, strip_namespace,
    ContextRoots,
};
pub use resolver::{context_key, ContextResolver};
