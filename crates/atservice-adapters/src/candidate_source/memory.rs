//! In-memory candidate source for programmatic hosts and tests.

use atservice_core::{
    application::ports::CandidateSource, domain::TypeDescriptor, error::AtserviceResult,
};

/// Candidate source holding descriptors supplied up front.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCandidateSource {
    candidates: Vec<TypeDescriptor>,
}

impl InMemoryCandidateSource {
    pub fn new(candidates: Vec<TypeDescriptor>) -> Self {
        Self { candidates }
    }

    pub fn push(&mut self, candidate: TypeDescriptor) {
        self.candidates.push(candidate);
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl FromIterator<TypeDescriptor> for InMemoryCandidateSource {
    fn from_iter<I: IntoIterator<Item = TypeDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl CandidateSource for InMemoryCandidateSource {
    fn describe(&self) -> String {
        format!("in-memory ({} candidates)", self.candidates.len())
    }

    fn candidates(&self) -> AtserviceResult<Vec<TypeDescriptor>> {
        Ok(self.candidates.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_candidates_in_insertion_order() {
        let mut source: InMemoryCandidateSource =
            [TypeDescriptor::named("a.Impl")].into_iter().collect();
        source.push(TypeDescriptor::named("b.Impl"));

        let names: Vec<_> = source
            .candidates()
            .unwrap()
            .iter()
            .filter_map(|t| t.name().map(str::to_string))
            .collect();
        assert_eq!(names, ["a.Impl", "b.Impl"]);
        assert_eq!(source.describe(), "in-memory (2 candidates)");
    }
}
