//! Engine services: safety classification, hedging, combination, surface
//! edits, citation handling, and the document pipeline that sequences them.

pub mod citations;
pub mod combine;
pub mod hedging;
pub mod pipeline;
pub mod safety;
pub mod surface;

pub use citations::CitationVault;
pub use combine::{CombineLimits, Combiner};
pub use hedging::{HedgeOutcome, Hedger};
pub use pipeline::Rewriter;
pub use safety::SafetyClassifier;
pub use surface::SurfaceEditor;
