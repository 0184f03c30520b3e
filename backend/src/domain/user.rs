//! User records and paging primitives.

use chrono::{DateTime, Utc};

/// Stored user record as returned by the persistence collaborator.
///
/// ## Invariants
/// - `id` is the opaque key the record store was queried with; it is never
///   interpreted by the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: String,
    name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Build a user from stored fields.
    pub fn new(
        id: impl Into<String>,
        name: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name,
            created_at,
            updated_at,
        }
    }

    /// Record key.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Optional display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Fields accepted when creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
}

impl NewUser {
    /// Wrap an already validated name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Name to store.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Sort order applied to user listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserOrder {
    /// Oldest first, ties broken by id.
    #[default]
    CreatedAtAsc,
}

/// One-based page request.
///
/// # Examples
/// ```
/// use pfj_backend::domain::Page;
///
/// let page = Page::new(3, 10).expect("positive values");
/// assert_eq!(page.skip(), 20);
/// assert_eq!(page.take(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    limit: u32,
}

impl Page {
    /// Page number used when the caller gives none.
    pub const DEFAULT_NUMBER: u32 = 1;
    /// Page size used when the caller gives none.
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Build a page request; both values must be at least one.
    pub fn new(number: u32, limit: u32) -> Option<Self> {
        (number >= 1 && limit >= 1).then_some(Self { number, limit })
    }

    /// One-based page number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Maximum records per page.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Records to skip before this page starts.
    pub fn skip(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.limit)
    }

    /// Records to take.
    pub fn take(&self) -> u64 {
        u64::from(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: Self::DEFAULT_NUMBER,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

crate::define_service_error! {
    /// Raised when no user exists for the requested identifier.
    pub struct UserNotFoundError(id: &str) {
        module: "UserService",
        code: "USER_NOT_FOUND",
        message: "User with id {id} not found",
    }
}
