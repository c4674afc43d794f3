use uuid::Uuid;

/// Opaque single-use token value for email verification and password reset.
///
/// The value carries no structure the client can inspect; binding to a user,
/// expiry, and single-use consumption are the store's responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTimeToken(String);

impl OneTimeToken {
    /// Generate a fresh random token.
    pub fn generate() -> Self {
        let a = Uuid::new_v4().simple();
        let b = Uuid::new_v4().simple();
        Self(format!("{a}{b}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for OneTimeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
