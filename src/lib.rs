//! Library to calculate strain-based difficulty ratings for rhythm-game
//! charts.
//!
//! ## Description
//!
//! A chart is a time-ordered sequence of hit objects. `chart-strain` folds
//! that sequence through per-skill evaluators into exponentially decaying
//! strain values, keeps one peak per 400 ms section, and combines the peak
//! sequences into a single star rating.
//!
//! Two rulesets are supported:
//!   - [`cursor`]: a 2D pointer ruleset (circles, sliders, spinners) with
//!     aim, speed, and flashlight skills.
//!   - [`drum`]: a two-tone lane ruleset (rim/center notes) with colour,
//!     rhythm, and stamina skills, including detection of patterns that can
//!     be cheesed via rolling or single-hand tapping.
//!
//! Decoding chart files, approximating slider curves, and anything related
//! to scores is the caller's business; this crate only consumes an already
//! built [`Chart`].
//!
//! ## Usage
//!
//! ```
//! use chart_strain::{Chart, Difficulty, HitObject, HitObjectKind, Pos};
//!
//! let chart = Chart {
//!     cs: 4.0,
//!     ar: 9.0,
//!     od: 8.0,
//!     hit_objects: (0..64)
//!         .map(|i| HitObject {
//!             pos: Pos::new(i as f32 * 7.0, 192.0),
//!             start_time: f64::from(i) * 150.0,
//!             kind: HitObjectKind::Circle,
//!         })
//!         .collect(),
//! };
//!
//! let attrs = chart_strain::cursor::difficulty(&Difficulty::new(), &chart).unwrap();
//!
//! println!("Stars: {}", attrs.stars);
//! ```
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | No features |
//! | `serde` | Derive `serde::{Deserialize, Serialize}` for the chart model and attributes | [`serde`]
//! | `tracing` | Emit events with the per-skill ratings of each calculation | [`tracing`]
//!
//! [`serde`]: https://docs.rs/serde
//! [`tracing`]: https://docs.rs/tracing

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::match_same_arms,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::explicit_iter_loop,
    clippy::similar_names,
    clippy::cast_possible_wrap
)]

#[doc(inline)]
pub use self::{
    any::{Difficulty, InvalidConfig},
    model::{Chart, Checkpoint, CheckpointKind, HitObject, HitObjectKind, Note, Slider, Spinner},
    util::pos::Pos,
};

/// Configuration types shared by all rulesets.
pub mod any;

/// Types for cursor ruleset calculations.
pub mod cursor;

/// Types for drum ruleset calculations.
pub mod drum;

/// The chart model consumed by the calculations.
pub mod model;

mod util;
