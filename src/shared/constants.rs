// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin - oversees every lot, tickets, inventory, materials and attendance
pub const ROLE_ADMIN: &str = "admin";

/// Manager - triages client tickets and requests materials
pub const ROLE_MANAGER: &str = "manager";

/// Inventory worker - records physical stock
pub const ROLE_INVENTORY_WORKER: &str = "inventory_worker";

/// Client - files tickets and follows them
pub const ROLE_CLIENT: &str = "client";

/// Employee of a lot - tasks, damage reports, attendance for their own lot
pub const ROLE_EMPLOYEE: &str = "employee";

/// Fixed account usernames
pub const ADMIN_USERNAME: &str = "admin";
pub const MANAGER_USERNAME: &str = "manager";
pub const INVENTORY_USERNAME: &str = "inventory";

/// Prefix carried by every client account username
pub const CLIENT_USERNAME_PREFIX: &str = "client_";

/// Minimum length for any password set through the API
pub const MIN_PASSWORD_LENGTH: u64 = 6;

// =============================================================================
// LIMITS
// =============================================================================

/// Widest date range accepted by history and overview queries
pub const MAX_DATE_RANGE_DAYS: i64 = 366;

/// Number of material requests shown on the manager dashboard
pub const MANAGER_RECENT_MATERIALS: i64 = 10;

/// Buffered change events per realtime feed before slow subscribers lag
pub const CHANGE_FEED_CAPACITY: usize = 256;

/// Largest photo accepted for damage reports and tickets
pub const MAX_PHOTO_SIZE: usize = 10 * 1024 * 1024; // 10MB
