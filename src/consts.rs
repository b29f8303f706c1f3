pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains all configuration constants for the dashboard,
    //! organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of event buffer size for worker tasks
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // FEED CONFIGURATION
    // =============================================================================

    /// Live feed configuration
    pub mod feeds {
        use std::time::Duration;

        /// Page size of the community-wide donation feed
        pub const GLOBAL_FEED_LIMIT: usize = 6;

        /// Page size of the signed-in user's recent donations
        pub const USER_FEED_LIMIT: usize = 3;

        /// Interval between refreshes when the service has no push signal (milliseconds)
        pub const POLL_INTERVAL_MS: u64 = 5_000;

        /// Helper function to get the polling interval
        pub const fn poll_interval() -> Duration {
            Duration::from_millis(POLL_INTERVAL_MS)
        }
    }

    // =============================================================================
    // IMPACT ESTIMATES
    // =============================================================================

    /// Factors used to turn donated kilograms into impact estimates
    pub mod impact {
        /// Estimated meals provided per kilogram of food
        pub const MEALS_PER_KG: f64 = 3.0;

        /// Estimated kilograms of CO2 avoided per kilogram of food
        pub const CO2_KG_PER_KG: f64 = 2.3;
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// HTTP client configuration
    pub mod http {
        use std::time::Duration;

        /// Connection and request timeout (seconds)
        pub const TIMEOUT_SECS: u64 = 10;

        /// Helper function to get the timeout duration
        pub const fn timeout() -> Duration {
            Duration::from_secs(TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    /// How long the splash screen is shown before the dashboard (seconds)
    pub const SPLASH_DURATION_SECS: u64 = 2;

    /// Key-poll timeout of the UI loop (milliseconds)
    pub const UI_TICK_MS: u64 = 100;
}
