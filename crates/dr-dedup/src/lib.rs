//! Product-name cleanup core.
//!
//! - `dedup`: collapse duplicate and nested word fragments in one pass
//! - `converge`: repeat passes until a fixed point or the iteration cap
//! - `tag`: prefix a field with a tag when the category matches
//! - `pipeline`: both, in sequence

pub mod converge;
pub mod dedup;
pub mod field;
pub mod pipeline;
pub mod tag;

pub use converge::{stabilize, StabilizeReport, Stabilizer};
pub use dedup::{deduplicate, deduplicate_tokens, DedupPass, Reduction, ReductionKind};
pub use field::{MemoryField, TextField};
pub use pipeline::{Pipeline, PipelineResult};
pub use tag::{apply_tag, TagRule};
