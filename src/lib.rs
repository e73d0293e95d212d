//! Rust SDK for the RegexSolver API.
//!
//! RegexSolver lets you manipulate regular expressions as sets: compute
//! intersections, unions and subtractions, check equivalence and inclusion,
//! analyze cardinality and length, and generate matching strings.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use regexsolver::{Client, Term};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), regexsolver::Error> {
//!     let client = Client::builder("your-api-token").build()?;
//!
//!     let term1 = Term::regex("(abc|de|fg){2,}");
//!     let term2 = Term::regex("de.*");
//!     let term3 = Term::regex(".*abc");
//!
//!     let result = term1.intersection(&client, &[term2, term3]).await?;
//!     println!("{}", result);
//!
//!     let details = result.get_details(&client).await?;
//!     println!("{}", details);
//!     Ok(())
//! }
//! ```
//!
//! Terms can be stored as text with [`Term::serialize_str`] and restored
//! with [`Term::deserialize_str`].

mod client;
mod error;
mod term;
mod types;
mod version;

pub use client::{Client, ClientBuilder};
pub use error::{Error, Result};
pub use term::{Term, TermType};
pub use types::*;
pub use version::SDK_VERSION;
