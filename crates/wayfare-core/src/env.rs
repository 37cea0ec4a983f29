//! Environment abstraction for deterministic testing.
//!
//! Decouples controller logic from system time. Production code uses
//! [`SystemEnv`] (real clock, tokio sleep); tests drive the controller with a
//! virtual clock so retry and backgrounding behavior is reproducible.

use std::time::{Duration, Instant};

/// Abstract environment providing monotonic time and async sleep.
///
/// Implementations MUST guarantee that `now()` never goes backwards within a
/// single execution context.
pub trait Environment: Clone + Send + Sync + 'static {
    /// The specific instant type used by this environment.
    ///
    /// Production environments use `std::time::Instant`, while test
    /// environments use virtual time.
    type Instant: Copy + Ord + Send + Sync + std::ops::Sub<Output = Duration>;

    /// Current time (monotonic).
    fn now(&self) -> Self::Instant;

    /// Sleeps for the specified duration.
    ///
    /// This is the ONLY async method in the trait, and it should only be used
    /// by driver/runtime code (not controller logic).
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

/// Production environment backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl Environment for SystemEnv {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

pub mod test_utils {
    //! Mock environment with a virtual clock.
    //!
    //! `sleep` advances the clock instead of waiting, so retry backoff is
    //! observable and instantaneous in tests.

    use std::sync::{Arc, Mutex, PoisonError};
    use std::time::Duration;

    use super::Environment;

    /// Virtual instant: offset from the mock clock's origin.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub struct MockInstant(Duration);

    impl std::ops::Sub for MockInstant {
        type Output = Duration;

        fn sub(self, rhs: Self) -> Duration {
            self.0 - rhs.0
        }
    }

    /// Deterministic environment backed by a shared virtual clock.
    ///
    /// Clones share the same clock, so time observed by the runtime and by
    /// the test stays consistent.
    #[derive(Debug, Clone, Default)]
    pub struct MockEnv {
        now: Arc<Mutex<Duration>>,
    }

    impl MockEnv {
        /// Mock environment with the clock at origin.
        pub fn new() -> Self {
            Self::default()
        }

        /// Advance the virtual clock.
        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
            *now += by;
        }

        /// Virtual time elapsed since the clock's origin.
        pub fn elapsed(&self) -> Duration {
            *self.now.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    impl Environment for MockEnv {
        type Instant = MockInstant;

        fn now(&self) -> MockInstant {
            MockInstant(self.elapsed())
        }

        fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
            let env = self.clone();
            async move { env.advance(duration) }
        }
    }
}
