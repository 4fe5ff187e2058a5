//! Energy system lexicon: spelling resolution and component identity.
//!
//! One internal energy-system representation, fed unmodified into
//! third-party optimization back-ends that each use their own naming and
//! identity conventions. Two independent components make that work:
//!
//! - [`SpellingRegistry`] maps the open, multi-sourced vocabulary of
//!   parameter spellings onto one canonical key set, partitioned into
//!   disjoint [`Category`] namespaces. Unknown spellings fail loudly;
//!   nothing is guessed.
//! - [`Uid`] is a composite component identifier whose rendering, equality
//!   and hashing are relative to a [`UidStyle`] and separator, so the same
//!   components can be unique-by-name in a small model and
//!   unique-by-full-detail in a large one.
//!
//! ```
//! use eslex::{Category, SpellingRegistry, Uid, UidStyle};
//!
//! let registry = SpellingRegistry::builtin();
//! assert_eq!(
//!     registry
//!         .resolve(Category::SingularParameter, "Variable-Cost")
//!         .unwrap(),
//!     "flow_costs"
//! );
//!
//! let a = Uid::new("Pipeline").unwrap().with_region("north");
//! let b = Uid::new("Pipeline").unwrap().with_region("south");
//! assert!(a.eq_under(&b, UidStyle::Name));
//! assert!(!a.eq_under(&b, UidStyle::Qualname));
//! assert_eq!(a.render(UidStyle::Region, "_"), "Pipeline_north");
//! ```

pub mod config;
pub mod error;
pub mod spellings;
pub mod uid;

pub use config::NamingConfig;
pub use error::{Error, Result};
pub use spellings::{Category, SpellingRegistry, SpellingTable};
pub use uid::{Uid, UidField, UidStyle};
