//! bonScript front-end driver.
//!
//! Loads an already parsed model from its JSON interchange form, validates it
//! and resolves every data type once per generation run.
//!
//! ```text
//! model.json
//!     │  interchange::load_model
//!     ▼
//! Model ──► GenerationRun::check ──► Vec<Diagnostic>
//!     │
//!     ▼
//! GenerationRun::resolved_fields ──► descriptor table
//! ```

pub mod interchange;
pub mod run;
pub mod table;
pub mod tracing_setup;

pub use interchange::{load_model, LoadError};
pub use run::{GenerationRun, ResolvedField};
pub use tracing_setup::init_tracing;
