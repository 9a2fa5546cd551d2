use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

/// The capability the condition engine needs from whatever keeps track of
/// linguistic units and their features.
pub trait FeatureStore {
    fn has_feature(&self, unit: &str, feature: &str) -> bool;

    /// The unit's current literal form, if the unit is known.
    fn form_of(&self, unit: &str) -> Option<String>;
}

/// Anything a condition can be evaluated against.
pub trait Candidate {
    fn form(&self) -> Cow<'_, str>;

    /// Plain strings carry no features.
    fn has_feature(&self, _feature: &str) -> bool {
        false
    }
}

impl Candidate for str {
    fn form(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Candidate for String {
    fn form(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

/// A unit looked up in a [`FeatureStore`].
#[derive(Debug)]
pub struct Unit<'s, S: ?Sized> {
    store: &'s S,
    id: &'s str,
}

impl<'s, S: FeatureStore + ?Sized> Unit<'s, S> {
    pub fn new(store: &'s S, id: &'s str) -> Self {
        Self { store, id }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        self.id
    }
}

impl<S: FeatureStore + ?Sized> Candidate for Unit<'_, S> {
    fn form(&self) -> Cow<'_, str> {
        Cow::Owned(self.store.form_of(self.id).unwrap_or_default())
    }

    fn has_feature(&self, feature: &str) -> bool {
        self.store.has_feature(self.id, feature)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Entry {
    form: String,
    features: HashSet<String>,
}

/// A [`FeatureStore`] kept in memory.
///
/// # Example
///
/// ```
/// use morpho::{Candidate, MemoryStore};
///
/// let store = MemoryStore::new()
///     .with_unit("kot", "kot")
///     .with_feature("kot", "animate");
/// assert!(store.unit("kot").has_feature("animate"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    units: HashMap<String, Entry>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit, replacing its form if it already exists.
    #[must_use]
    pub fn with_unit(mut self, id: &str, form: &str) -> Self {
        self.insert_unit(id, form);
        self
    }

    /// Tag a unit with a feature, registering it with an empty form if needed.
    #[must_use]
    pub fn with_feature(mut self, id: &str, feature: &str) -> Self {
        self.add_feature(id, feature);
        self
    }

    pub fn insert_unit(&mut self, id: &str, form: &str) {
        self.units.entry(id.to_owned()).or_default().form = form.to_owned();
    }

    pub fn add_feature(&mut self, id: &str, feature: &str) {
        self.units
            .entry(id.to_owned())
            .or_default()
            .features
            .insert(feature.to_owned());
    }

    #[must_use]
    pub fn unit<'s>(&'s self, id: &'s str) -> Unit<'s, Self> {
        Unit::new(self, id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl FeatureStore for MemoryStore {
    fn has_feature(&self, unit: &str, feature: &str) -> bool {
        self.units
            .get(unit)
            .is_some_and(|entry| entry.features.contains(feature))
    }

    fn form_of(&self, unit: &str) -> Option<String> {
        self.units.get(unit).map(|entry| entry.form.clone())
    }
}
