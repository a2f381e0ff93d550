use uav_follower_select::SelectError;

/// Failure reported by a collaborator round-trip.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("malformed reply: {0}")]
    MalformedReply(String),
}

/// Why a depth reading was rejected.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthRejection {
    #[error("no valid pixels in region")]
    NoValidPixels,
    #[error("reading not finite")]
    NotFinite,
    #[error("reading beyond plausible range")]
    OutOfRange,
}

/// Errors produced while turning a detection batch into a goal pose.
///
/// Everything except [`FollowError::Select`] is a bad-detection condition:
/// the pipeline signals the notifier and skips the batch, and the producer
/// decides whether to resend. `Select` marks an internal consistency
/// failure — a programming defect, not a data condition.
#[derive(thiserror::Error, Debug)]
pub enum FollowError {
    /// The batch carried no detections at all.
    #[error("no detections in batch")]
    NoDetections,
    /// Internal consistency failure in clustering input.
    #[error(transparent)]
    Select(#[from] SelectError),
    /// Every cluster was rejected, or the vote produced no winner.
    #[error("no candidate cluster survived")]
    InsufficientCandidates,
    /// The box region held no usable depth, or the value was implausible.
    #[error("invalid depth ({reason})")]
    InvalidDepth { reason: DepthRejection },
    /// The pose service reported failure.
    #[error("robot pose unavailable")]
    TransformUnavailable,
    /// The displacement has no horizontal component.
    #[error("zero horizontal displacement, heading undefined")]
    UndefinedHeading,
    /// A collaborator round-trip failed at the transport level.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl FollowError {
    /// Whether this failure should signal the bad-detection notifier rather
    /// than abort silently.
    pub fn is_bad_detection(&self) -> bool {
        !matches!(self, FollowError::Select(_))
    }
}
