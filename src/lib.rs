// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive black-hole hero scene rendered with wgpu.
//!
//! A black event-horizon sphere, a tilted glowing accretion disk, a soft
//! halo and a slowly drifting starfield, turned by pointer parallax and
//! drag. Runs in the browser (WebGPU or WebGL2) and in a native preview
//! window.
//!
//! # Key entry points
//!
//! - [`hero::HeroScene`] - one hero instance: input, motion, rendering
//! - [`hero::bootstrap`] - mounting into a host page, with an explicit
//!   [`InitOutcome`] when the environment cannot run the hero
//! - [`options::Options`] - runtime configuration (camera, motion, scene)
//! - `web::mount_hero` - the browser entry point (feature `web`)
//! - `Viewer` - the native preview window (feature `viewer`)
//!
//! # Architecture
//!
//! Each display frame the [`animation::HeroMotion`] state advances one
//! step toward the pointer target published by the [`input::InputTracker`],
//! the [`scene::HeroGroup`] transforms are derived from it, and the
//! [`renderer::HeroRenderer`] draws stars, horizon, disk and halo in a
//! single pass over a transparent clear so the page shows through.

pub mod animation;
pub mod camera;
pub mod error;
pub mod gpu;
pub mod hero;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use error::{HorizonError, Unavailable};
pub use hero::bootstrap::InitOutcome;
pub use hero::HeroScene;
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
