use std::time::Duration;

pub const COMMAND_PREFIX: char = ':';

pub const CMD_ENDPOINT: &str = "endpoint";
pub const CMD_LIMIT: &str = "limit";
pub const CMD_SUBMIT: &str = "submit";
pub const CMD_CLEAR: &str = "clear";
pub const CMD_FILTER: &str = "filter";
pub const CMD_HELP: &str = "help";
pub const CMD_QUIT: &str = "quit";

/// How long the app loop waits for input before emitting a tick.
pub const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Notices kept under the table.
pub const MAX_NOTICES: usize = 3;

/// Widest the video column may grow before titles are cut.
pub const VIDEO_COLUMN_MAX: usize = 48;
pub const COLUMN_MAX: usize = 24;

pub const HELP_LINES: &[&str] = &[
    "Paste video URLs, one per line or as a JSON array, then:",
    "  :submit            send the pending URLs to the crawler",
    "  :clear             discard the pending URLs",
    "  :endpoint <url>    change the crawler base URL",
    "  :limit <n>         set the comment limit for the next submission",
    "  :filter [text]     show only matching rows (no text clears)",
    "  :help              show this help",
    "  :quit              leave",
];
