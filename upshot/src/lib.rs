//! Typed success and failure.
//!
//! `upshot` gathers the workspace crates behind one import:
//!
//! - outcome shapes and sync combinators ([`Verdict`], [`Outcome`], [`Fallible`]),
//! - async lifting over futures ([`Eventual`], [`EventualOutcome`], [`EventualVerdict`],
//!   [`Completion`]),
//! - element-wise combinators over iterators (see [`prelude`]),
//! - the optional config file that sets the fault policy ([`UpshotConfig`]).
//!
//! ```
//! use upshot::prelude::*;
//! use upshot::{Fallible, Verdict};
//!
//! let parsed: Vec<Fallible<u8, String>> = ["1", "x", "3"]
//!     .into_iter()
//!     .map(|s| Fallible::from(s.parse::<u8>().map_err(|e| e.to_string())))
//!     .collect();
//!
//! assert_eq!(parsed.iter().cloned().values().collect::<Vec<_>>(), [1, 3]);
//! assert_eq!(parsed.into_iter().verdict(), Verdict::Denied);
//! ```

pub use upshot_collections::{Tally, tally};
pub use upshot_config::{AlreadyInstalled, CONFIG_ENV, ConfigError, UpshotConfig, config_path};
pub use upshot_tasks::{
    Completion, Eventual, EventualOutcome, EventualVerdict, Interrupted, Settled, SettledOutcome,
    attempt_call, attempt_call2, attempt_call3, attempt_task, attempt_task_fault, primitive,
};
pub use upshot_types::{
    AsVerdict, Cancelled, Fallible, Fault, FaultLogLevel, FaultPolicy, Outcome, ValueAbsent,
    ValueOutcome, Verdict, attempt, attempt_with, attempt1, attempt1_with, attempt2,
    attempt2_with, attempt3, attempt3_with, capture, combine, zip, zip3,
};

/// Extension traits, for glob import.
pub mod prelude {
    pub use upshot_collections::{
        AttemptIterExt, EventualIterExt, FallibleIterExt, OutcomeIterExt, TaskIterExt,
    };
    pub use upshot_tasks::Lift;
    pub use upshot_types::{AsVerdict, ValueOutcome};
}

/// Load the config file, if any, and install its fault policy.
///
/// Returns the loaded config. A policy that cannot be installed because one is already in place
/// is logged and otherwise ignored.
pub fn init() -> Result<Option<UpshotConfig>, ConfigError> {
    let Some(config) = UpshotConfig::load()? else {
        return Ok(None);
    };
    if let Err(err) = config.clone().install() {
        tracing::warn!(log = ?err.rejected.log, "{err}");
    }
    Ok(Some(config))
}
