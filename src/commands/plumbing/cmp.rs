use crate::areas::comparison::{Comparison, Outcome};
use std::path::Path;

impl Comparison {
    pub fn cmp(&self, a: &Path, b: &Path) -> anyhow::Result<Outcome> {
        let equal = self.normalizer().is_binary_identical(a, b)?;

        Ok(Outcome::from_equal(equal))
    }
}
