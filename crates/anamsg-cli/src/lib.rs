//! # anamsg-cli — Command Modules
//!
//! One module per subcommand family: codec operations, key generation,
//! cipher operations, and natural-language interpretation. `main.rs`
//! assembles the clap command tree and dispatches here.

pub mod cipher;
pub mod codec;
pub mod interpret;
pub mod keys;
