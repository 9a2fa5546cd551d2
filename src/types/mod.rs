mod affix;
mod alphabet;
mod condition;
mod derivation;
mod error;
mod form_potential;
mod morpheme;
mod operation;
mod rule;
mod single;
mod store;
mod text;

pub use affix::{Affix, Interfix, Polarity};
pub use alphabet::{Alphabet, By, Side};
pub use condition::{Cond, CondSpec, Condition, ConditionSpec, MultiCond, Then, ThenSpec, When};
pub use derivation::Derivation;
pub use error::{ConditionError, GrammarError, PositionalError};
pub use form_potential::{BasicForm, FormPotential, Forms};
pub use morpheme::Morpheme;
pub use operation::{
    Anchor, BasicCondition, Branch, ComplexCondition, Operation, OperationKind, RuleStructure,
    SameOrderGroup,
};
pub use rule::{Rule, RuleBuilder, StageBuilder};
pub use single::SingleMorpheme;
pub use store::{Candidate, FeatureStore, MemoryStore, Unit};
