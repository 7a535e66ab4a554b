//! Uniform, order-preserving reservoir sampling over delimited record streams.
//!
//! ```
//! use line_sampler::rng::seeded;
//! use line_sampler::sample::Reservoir;
//!
//! let mut reservoir = Reservoir::new(3, seeded(42));
//! for line in ["a", "b", "c", "d", "e", "f"] {
//!     reservoir.offer(line);
//! }
//! let sample = reservoir.items();
//! assert_eq!(sample.len(), 3);
//! ```

pub mod input;
pub mod progress;
pub mod records;
pub mod rng;
pub mod sample;
