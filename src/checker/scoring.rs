use crate::checker::resolver::ResolutionStatus;

pub const SCORE_INVALID_FORMAT: u8 = 100;
pub const SCORE_WHITELISTED: u8 = 0;
pub const SCORE_BLACKLISTED: u8 = 85;
pub const SCORE_BLACKLISTED_UNKNOWN: u8 = 88;
pub const SCORE_BLACKLISTED_UNRESOLVABLE: u8 = 100;
pub const SCORE_UNLISTED_RESOLVABLE: u8 = 10;
pub const SCORE_UNLISTED_UNKNOWN: u8 = 50;
pub const SCORE_UNLISTED_UNRESOLVABLE: u8 = 75;

/// The four signals the scorer consumes. Everything else about an address is
/// irrelevant to its score.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs {
    pub format_valid: bool,
    pub blacklisted: bool,
    pub whitelisted: bool,
    pub resolution: ResolutionStatus,
}

/// Computes the 0..=100 risk score. Pure: no I/O, no clock, same inputs give
/// the same score.
///
/// Precedence: invalid format dominates everything, then whitelist membership
/// (which also beats a simultaneous blacklist hit), then blacklist membership
/// compounded by resolvability, then resolvability alone. An unresolvable
/// blacklisted domain maxes out the scale; an unknown resolution is always
/// scored more cautiously than a confirmed one and less than a confirmed
/// failure.
pub fn risk_score(inputs: ScoreInputs) -> u8 {
    if !inputs.format_valid {
        return SCORE_INVALID_FORMAT;
    }
    if inputs.whitelisted {
        return SCORE_WHITELISTED;
    }

    match (inputs.blacklisted, inputs.resolution) {
        (true, ResolutionStatus::NotResolvable) => SCORE_BLACKLISTED_UNRESOLVABLE,
        (true, ResolutionStatus::Unknown) => SCORE_BLACKLISTED_UNKNOWN,
        (true, ResolutionStatus::Resolvable) => SCORE_BLACKLISTED,
        (false, ResolutionStatus::NotResolvable) => SCORE_UNLISTED_UNRESOLVABLE,
        (false, ResolutionStatus::Unknown) => SCORE_UNLISTED_UNKNOWN,
        (false, ResolutionStatus::Resolvable) => SCORE_UNLISTED_RESOLVABLE,
    }
}
