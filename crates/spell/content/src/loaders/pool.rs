//! Token pool loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use spell_core::{Token, TokenCatalog};

use crate::loaders::{LoadResult, read_file};

/// Token pool structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPool {
    pub tokens: Vec<Token>,
}

/// Loader for synthesis token pools from RON files.
pub struct TokenPoolLoader;

impl TokenPoolLoader {
    /// Load a token pool, dropping repeated kinds.
    pub fn load(path: &Path) -> LoadResult<TokenCatalog> {
        let content = read_file(path)?;
        let pool: TokenPool = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse token pool RON: {}", e))?;

        if pool.tokens.is_empty() {
            anyhow::bail!("Token pool {} is empty", path.display());
        }
        Ok(TokenCatalog::from_tokens(pool.tokens))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use spell_core::{Material, ScaleTier};

    use super::*;

    #[test]
    fn loads_and_dedups() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "(tokens: [BallOf, MadeOf(Fire), Scale(Small), MadeOf(Fire), SpecificTarget])"
        )
        .unwrap();

        let catalog = TokenPoolLoader::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 4);
        assert!(catalog.contains(&Token::MadeOf(Material::Fire)));
        assert!(catalog.contains(&Token::Scale(ScaleTier::Small)));
    }

    #[test]
    fn empty_pool_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(tokens: [])").unwrap();
        assert!(TokenPoolLoader::load(file.path()).is_err());
    }
}
