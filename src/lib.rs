//! Command-line parsing and binding onto typed object graphs
//!
//! An argument list goes through four stages: it is tokenized under a
//! [`CustomizationProfile`], quoted runs are folded back together, the
//! parameters are allocated to the keys they follow, and each declared
//! binding converts its parameters and writes them into the target.
//!
//! ```
//! use optbind::{Field, MappingResult, Parser, Path};
//!
//! #[derive(Default)]
//! struct Settings {
//!     name: String,
//!     values: Vec<i32>,
//! }
//!
//! let mut parser = Parser::<Settings>::default();
//! parser.bind(Path::root().field(Field::new("name", |s: &mut Settings, v: String| s.name = v)), &["name", "n"]);
//! parser.bind(Path::root().field(Field::new("values", |s: &mut Settings, v: Vec<i32>| s.values = v)), &["x"]);
//!
//! let mut settings = Settings::default();
//! let outcome = parser.parse(&["-n", "\"two", "words\"", "-x", "1", "2", "3"], &mut settings);
//! assert_eq!(outcome.result, MappingResult::SUCCESS);
//! assert_eq!(settings.name, "two words");
//! assert_eq!(settings.values, vec![1, 2, 3]);
//! ```

pub mod allocator;
pub mod app;
pub mod binding;
pub mod convert;
pub mod core;
pub mod option;
pub mod parser;
pub mod profile;
pub mod tokenizer;

pub use allocator::{allocate, allocate_with_switches, AllocationEntry, AllocationResult};
pub use binding::{ErrorLog, ErrorRecord, Field, MappingResult, Member, Path, Phase, PropertyPath};
pub use convert::{BindTarget, ConversionError, Convertible, ConverterRegistry, EnumRegistration, Precedence};
pub use option::{ArgOption, OptionInfo, OptionStyle};
pub use parser::{BindingReport, ParseOutcome, Parser};
pub use profile::{Convention, CustomizationProfile, ProfileError, TextComparison};
pub use tokenizer::{tokenize, CleanupError, CleanupPipeline, Token, TokenKind};
