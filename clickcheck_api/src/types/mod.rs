mod timestamp;
pub use self::timestamp::parse_timestamp;

mod scan;
pub use self::scan::{ScanResult, ScanStatus};

mod blacklist;
pub use self::blacklist::{BlacklistStatus, ReportResult, ReportStatus};

mod balance;
pub use self::balance::Balance;

mod response;
pub use self::response::ApiResponse;
