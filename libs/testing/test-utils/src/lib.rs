//! Test support shared by the fleet domain crates.
//!
//! - [`TestDatabase`]: a throwaway PostgreSQL container with every migration applied
//!   (feature `postgres`, on by default)
//! - [`TestDataBuilder`]: usernames that stay stable per test and never collide across tests
//! - [`assertions`]: assertion helpers with context in the failure message
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn trips_survive_a_round_trip() {
//!     let db = TestDatabase::new().await;
//!     let owner_id = db
//!         .create_test_user(&TestDataBuilder::from_test_name("round_trip").username("main"))
//!         .await;
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Derives per-test values from the test's name.
///
/// Each test gets its own container, but one test may create several drivers
/// and `users.username` is unique.
#[derive(Debug, Clone, Copy)]
pub struct TestDataBuilder {
    tag: u32,
}

impl TestDataBuilder {
    pub fn from_test_name(name: &str) -> Self {
        // FNV-1a; stable across runs and toolchains
        let tag = name.bytes().fold(0x811c_9dc5_u32, |hash, byte| {
            (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
        });
        Self { tag }
    }

    /// A driver login unique to this test, e.g. `driver-1a2b3c4d-alice`
    pub fn username(&self, who: &str) -> String {
        format!("driver-{:08x}-{}", self.tag, who)
    }
}

pub mod assertions {
    use uuid::Uuid;

    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(actual, expected, "{}: expected {}, got {}", context, expected, actual);
    }

    /// Unwraps `value`, failing the test with `context` when it is `None`
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        match value {
            Some(value) => value,
            None => panic!("{}: expected Some, got None", context),
        }
    }
}
