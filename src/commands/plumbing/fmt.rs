use crate::areas::comparison::Comparison;
use crate::artifacts::format::normalizer::CanonicalContent;
use std::path::Path;

impl Comparison {
    /// Print the canonical form of one file; opaque files are printed as is
    pub fn fmt(&self, file: &Path) -> anyhow::Result<()> {
        let (_, content) = self.normalizer().normalize(file)?;

        match content {
            CanonicalContent::Text(text) => write!(self.writer(), "{text}")?,
            CanonicalContent::Binary(bytes) => self.writer().write_all(&bytes)?,
        }

        Ok(())
    }
}
