use std::fmt;
use std::time::Duration;

/// Step-by-step record of a rule application, returned by
/// [`Rule::apply_detailed()`](super::rule::Rule::apply_detailed).
///
/// Holds the input word, the joined word after every stage, the final stems
/// and the wall-clock duration of the application.
#[derive(Debug, Clone)]
#[must_use]
pub struct Derivation {
    input: String,
    steps: Vec<String>,
    stems: Vec<String>,
    duration: Duration,
}

impl Derivation {
    pub(crate) fn new(
        input: String,
        steps: Vec<String>,
        stems: Vec<String>,
        duration: Duration,
    ) -> Self {
        Self {
            input,
            steps,
            stems,
            duration,
        }
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The word after each stage, in stage order.
    #[must_use]
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// The final word, same as [`Rule::apply()`](super::rule::Rule::apply).
    #[must_use]
    pub fn output(&self) -> String {
        self.stems.concat()
    }

    #[must_use]
    pub fn stems(&self) -> &[String] {
        &self.stems
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.input)?;
        for step in &self.steps {
            write!(f, " -> {step}")?;
        }
        write!(f, " ({:?})", self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derivation() -> Derivation {
        Derivation::new(
            "mach".into(),
            vec!["gemach".into(), "gemacht".into()],
            vec!["gemacht".into()],
            Duration::from_nanos(300),
        )
    }

    #[test]
    fn derivation_accessors() {
        let derivation = derivation();
        assert_eq!(derivation.input(), "mach");
        assert_eq!(derivation.steps(), &["gemach", "gemacht"]);
        assert_eq!(derivation.output(), "gemacht");
        assert_eq!(derivation.stems(), &["gemacht"]);
        assert_eq!(derivation.duration(), Duration::from_nanos(300));
    }

    #[test]
    fn derivation_display() {
        assert_eq!(
            derivation().to_string(),
            "mach -> gemach -> gemacht (300ns)"
        );
    }

    #[test]
    fn no_stages_display() {
        let derivation = Derivation::new(
            "kot".into(),
            vec![],
            vec!["kot".into()],
            Duration::ZERO,
        );
        assert_eq!(derivation.to_string(), "kot (0ns)");
        assert_eq!(derivation.output(), "kot");
    }
}
