//! Constants Module - Single Source of Truth
//!
//! Endpoint, score thresholds and every piece of user-facing copy live here
//! so the console and the API say exactly the same thing.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "AccountSentry";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for outbound HTTP requests
pub const USER_AGENT: &str = concat!("AccountSentry/", env!("CARGO_PKG_VERSION"));

// ============================================
// LOOKUP CONSTANTS
// ============================================

/// Public users-by-name endpoint
pub const USERS_BY_NAME_URL: &str = "https://users.roblox.com/v1/usernames/users";

// ============================================
// SCORING CONSTANTS
// ============================================

/// Scores are clamped to this ceiling
pub const MAX_SCORE: u8 = 100;

/// Lowest score that counts as Medium risk
pub const MEDIUM_THRESHOLD: u8 = 35;

/// Lowest score that counts as High risk
pub const HIGH_THRESHOLD: u8 = 70;

/// Advice shown for every score, in display order
pub const BASE_ADVICE: [&str; 3] = [
    "Change your password to something unique (not used anywhere else).",
    "Enable 2-Step Verification and generate backup codes.",
    "Avoid 'free Robux' sites and never share cookies or 2FA codes.",
];

/// Prepended to the base advice for Medium risk
pub const MEDIUM_ADVICE: &str = "Log out of all other sessions from Roblox Security settings.";

/// Prepended to the base advice for High risk, in display order
pub const HIGH_ADVICE: [&str; 2] = [
    "Secure your email account first (change email password + enable 2FA).",
    "If you can’t log in or your email/password changed: contact Roblox Support immediately.",
];

// ============================================
// UI COPY
// ============================================

pub const MSG_EMPTY_USERNAME: &str = "Enter a username first.";
pub const MSG_LOOKUP_PENDING: &str = "Looking up public info… (may fail due to CORS/rate limits)";
pub const MSG_LOOKUP_FOUND: &str = "Found user. This is public info only (not proof of hacking).";
pub const MSG_LOOKUP_NOT_FOUND: &str = "No user found for that username.";
pub const MSG_PROXY_HINT: &str =
    "If you want lookup to always work, route it through a server-side proxy (account_sentry_api).";
pub const MSG_NO_HITS: &str = "No major compromise signs selected.";
pub const MSG_HEURISTIC: &str = "Heuristic (not proof)";

/// Message for a non-2xx lookup response
pub fn lookup_status_message(status: u16) -> String {
    format!(
        "Lookup failed (HTTP {}). This may be CORS or rate limiting.",
        status
    )
}
