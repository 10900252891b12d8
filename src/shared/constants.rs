/// Rows per page on the ticket list
pub const TICKET_PAGE_SIZE: i64 = 10;

// =============================================================================
// TICKET STATUS
// =============================================================================

/// Status given to every newly created ticket
pub const STATUS_OPEN: &str = "Open";

/// Status that blocks new comments (compared case-insensitively)
pub const STATUS_CLOSED: &str = "Closed";

/// Maximum length of the free-text status column
pub const MAX_STATUS_LENGTH: usize = 50;

// =============================================================================
// ROUTES
// =============================================================================

/// Where the session guard sends anonymous visitors
pub const LOGIN_PATH: &str = "/Account/Login";

/// Landing page after a successful login
pub const HOME_PATH: &str = "/";
