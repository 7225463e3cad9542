//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use rcommon::{CallerId, preview};
//!
//! let caller = CallerId::from("user-7");
//! assert_eq!(caller.as_str(), "user-7");
//! assert_eq!(preview("hello world", 5), "hello");
//! ```

pub mod future {
    //! Boxed-future alias used by the workspace's object-safe async traits.
    //!
    //! ```rust
    //! use rcommon::BoxFuture;
    //!
    //! fn shout<'a>(prompt: &'a str) -> BoxFuture<'a, String> {
    //!     Box::pin(async move { prompt.to_uppercase() })
    //! }
    //!
    //! let _future = shout("draw me a fox");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Caller identity newtype shared across the workspace.
    //!
    //! ```rust
    //! use rcommon::CallerId;
    //!
    //! let caller = CallerId::new("chat-42");
    //! assert_eq!(caller.to_string(), "chat-42");
    //! ```

    use std::fmt::{Display, Formatter};

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct CallerId(String);

    impl CallerId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for CallerId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for CallerId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for CallerId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub mod text {
    //! Text helpers shared by previews and log excerpts.

    /// Truncates `value` to at most `max_chars` characters, always on a char
    /// boundary.
    pub fn preview(value: &str, max_chars: usize) -> String {
        value.chars().take(max_chars).collect()
    }
}

pub use context::CallerId;
pub use future::BoxFuture;
pub use text::preview;
