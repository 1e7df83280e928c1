//! Browser binding for the rating widget and the login/register submitter.
//!
//! This crate is a stub by default so the workspace builds and tests on native
//! targets without a wasm toolchain.
//!
//! Enable the real binding with: `--features web` (and a wasm32 target), e.g.
//! `wasm-pack build crates/cinerate_web --target web -- --features web`.
//! The page loads the generated module once; it enhances `#rating` and
//! installs `window.login()` / `window.register()` for the auth buttons.

/// Placeholder function for non-web (or non-wasm) builds.
#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
pub fn placeholder() {
    // No-op.
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;
