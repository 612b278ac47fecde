mod blacklist;
pub use self::blacklist::{BlacklistLookup, BlacklistReport};

mod scan;
pub use self::scan::{EvaluationMode, ScanRequest};
