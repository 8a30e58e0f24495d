// ID Provider Port (for deterministic testing)

/// ID provider interface (allows deterministic IDs in tests)
pub trait IdProvider: Send + Sync {
    /// Generate a new unique, unguessable identifier (session tokens)
    fn generate_id(&self) -> String;
}

/// UUID v4 provider (production)
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn generate_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

/// Sequential provider: `prefix-1`, `prefix-2`, ... (tests only)
pub struct SequentialIdProvider {
    prefix: String,
    counter: std::sync::atomic::AtomicU64,
}

impl SequentialIdProvider {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: std::sync::atomic::AtomicU64::new(1),
        }
    }
}

impl IdProvider for SequentialIdProvider {
    fn generate_id(&self) -> String {
        let n = self
            .counter
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        format!("{}-{}", self.prefix, n)
    }
}
