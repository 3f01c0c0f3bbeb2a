//! A set of constants used by the library.

/// The default base URL of the versioned REST API.
pub const API_BASE: &str = "https://discord.com/api/v10";

/// The `User-Agent` sent along with every request.
pub const USER_AGENT: &str = concat!(
    "DiscordBot (https://github.com/riposte-rs/riposte, ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// The message id accepted by the webhook message endpoints in place of a real id, addressing
/// the message created by the initial interaction response.
///
/// Requests using it fail for ephemeral responses, which cannot be addressed this way.
pub const ORIGINAL_MESSAGE: &str = "@original";

/// The largest number of explicit role or user ids an allowed-mentions object may list.
pub const MAX_ALLOWED_MENTIONS: usize = 100;

/// How long an interaction token stays valid after the interaction is created, in seconds.
pub const INTERACTION_TOKEN_LIFETIME_SECS: u64 = 15 * 60;

/// How long Discord waits for the initial interaction response, in seconds.
pub const INITIAL_RESPONSE_DEADLINE_SECS: u64 = 3;
