//! # cinerate
//!
//! Client-side helpers for the movie pages: a half-step star-rating widget
//! layered over a plain numeric `<input>`, and an asynchronous
//! login/registration submitter that carries the page's CSRF token.
//!
//! Nothing in this crate touches the browser directly. The DOM, the network and
//! user notifications sit behind small traits ([`bootstrap::PageProbe`],
//! [`widget::RatingField`], [`widget::StarSurface`], [`auth::AuthPage`],
//! [`auth::CredentialTransport`]) so every rule can be unit-tested on the host.
//! The `cinerate_web` crate implements those traits over `web-sys`.
//!
//! ## Quick Start
//!
//! ```
//! use cinerate::prelude::*;
//!
//! let glyphs = render(2.5, 5);
//! assert_eq!(glyphs[1], StarGlyph::Full);
//! assert_eq!(glyphs[2], StarGlyph::Half);
//! assert_eq!(glyphs[3], StarGlyph::Empty);
//!
//! let r = Rating::from_pointer(3, 4.0, 20.0);
//! assert_eq!(r.to_input_string(), "2.5");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): JSON config loading and server response decoding.
//!   Without it, [`auth`] and the JSON half of [`config`] are unavailable.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod rating;
pub mod stars;
pub mod widget;

#[cfg(feature = "serde")]
pub mod auth;

/// Common imports for the browser binding and tests.
pub mod prelude {
    pub use crate::bootstrap::{evaluate, BootDecision, PageProbe, SkipReason};
    pub use crate::config::{AuthConfig, ClientConfig, WidgetConfig};
    pub use crate::error::{ConfigError, TransportError, ValidationError};
    pub use crate::rating::{parse_rating_input, Rating};
    pub use crate::stars::{parse_star_position, render, StarGlyph};
    pub use crate::widget::{RatingField, StarHit, StarSurface, StarWidget, WidgetMode};

    #[cfg(feature = "serde")]
    pub use crate::auth::{
        submit_credentials, AuthAction, AuthPage, AuthResponse, CredentialTransport, Credentials,
        SubmitOutcome,
    };
}
