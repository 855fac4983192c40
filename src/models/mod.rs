pub mod flags;
pub mod outcome;
pub mod sentence;
pub mod token;

pub use flags::ProtectionFlags;
pub use outcome::{AppliedRule, HedgeStrategy, RelationshipType, RewriteOutcome, TransformResult};
pub use sentence::Sentence;
pub use token::{Dep, Pos, Tag, Token};
