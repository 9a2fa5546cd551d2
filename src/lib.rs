mod apply;
mod compile;
mod error;
mod interpret;
pub mod parse;
mod types;

pub use error::MorphoError;
pub use interpret::interpret;
pub use parse::{parse, Node, ParseError, ParseTree, Tag};
pub use types::{
    Affix, Alphabet, Anchor, BasicCondition, BasicForm, Branch, By, Candidate, ComplexCondition,
    Cond, CondSpec, Condition, ConditionError, ConditionSpec, Derivation, FeatureStore, FormPotential,
    Forms, GrammarError, Interfix, MemoryStore, Morpheme, MultiCond, Operation, OperationKind,
    Polarity, PositionalError, Rule, RuleBuilder, RuleStructure, SameOrderGroup, Side,
    SingleMorpheme, StageBuilder, Then, ThenSpec, Unit, When,
};
