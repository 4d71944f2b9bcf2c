use twig_types::ObjectId;

/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag (e.g. `"twig-blob-v1"`) that is
/// prepended to every hash computation.
#[derive(Debug)]
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for blob objects.
    pub const BLOB: Self = Self::new("twig-blob-v1");
    /// Hasher for committed tree objects.
    pub const TREE: Self = Self::new("twig-tree-v1");
    /// Hasher for commit objects.
    pub const COMMIT: Self = Self::new("twig-commit-v1");
    /// Hasher for staging-area trees.
    pub const STAGE: Self = Self::new("twig-stage-v1");

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> ObjectId {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        ObjectId::from_hash(*hasher.finalize().as_bytes())
    }
}
