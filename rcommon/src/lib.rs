//! Small shared types used across the repolens crates.
//!
//! ```rust
//! use rcommon::{ExchangeId, GenerationOptions};
//!
//! let exchange = ExchangeId::from("exchange-1");
//! let options = GenerationOptions::default().with_temperature(0.3);
//!
//! assert_eq!(exchange.as_str(), "exchange-1");
//! assert_eq!(options.temperature, Some(0.3));
//! assert!(options.max_tokens.is_none());
//! ```

pub mod future {
    //! Boxed future alias for object-safe async traits.
    //!
    //! ```rust
    //! use rcommon::BoxFuture;
    //!
    //! fn fetch_len<'a>(path: &'a str) -> BoxFuture<'a, Option<usize>> {
    //!     Box::pin(async move { (!path.is_empty()).then_some(path.len()) })
    //! }
    //!
    //! let _pending = fetch_len("README.md");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod ids {
    //! Exchange identifiers carried through logs, metrics, and requests.

    use std::fmt::{Display, Formatter};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(0);

    /// Identifies one exchange: a summary generation or a single chat turn.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct ExchangeId(String);

    impl ExchangeId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        /// Process-unique id from the wall clock plus a sequence number.
        pub fn generate() -> Self {
            let millis = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_millis())
                .unwrap_or_default();
            let sequence = NEXT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
            Self(format!("ex-{millis:x}-{sequence}"))
        }

        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    impl Display for ExchangeId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for ExchangeId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for ExchangeId {
        fn from(value: &str) -> Self {
            Self::new(value)
        }
    }
}

pub mod options {
    //! Sampling settings forwarded to the model backend.

    /// Unset fields leave the backend's own defaults in place.
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct GenerationOptions {
        pub temperature: Option<f32>,
        pub max_tokens: Option<u32>,
    }

    impl GenerationOptions {
        pub fn with_temperature(self, temperature: f32) -> Self {
            Self {
                temperature: Some(temperature),
                ..self
            }
        }

        pub fn with_max_tokens(self, max_tokens: u32) -> Self {
            Self {
                max_tokens: Some(max_tokens),
                ..self
            }
        }
    }
}

pub use future::BoxFuture;
pub use ids::ExchangeId;
pub use options::GenerationOptions;

#[cfg(test)]
mod tests {
    use super::{ExchangeId, GenerationOptions};

    #[test]
    fn exchange_id_displays_its_value() {
        let exchange = ExchangeId::new("exchange-1");

        assert_eq!(exchange.to_string(), "exchange-1");
        assert_eq!(ExchangeId::from(String::from("exchange-1")), exchange);
    }

    #[test]
    fn generated_exchange_ids_never_repeat() {
        let ids = (0..32).map(|_| ExchangeId::generate()).collect::<Vec<_>>();

        for (index, id) in ids.iter().enumerate() {
            assert!(id.as_str().starts_with("ex-"));
            assert!(!ids[index + 1..].contains(id));
        }
    }

    #[test]
    fn generation_options_keep_earlier_settings() {
        let options = GenerationOptions::default()
            .with_max_tokens(123)
            .with_temperature(0.3);

        assert_eq!(options.temperature, Some(0.3));
        assert_eq!(options.max_tokens, Some(123));
    }
}
