use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::course::Course;

/// Links the current user to a course.
///
/// Carries its own identity, distinct from the course id; the withdraw
/// endpoint is addressed by enrollment id, not course id.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Enrollment {
    /// The unique identifier for the enrollment.
    pub id: i64,
    /// The full embedded course record.
    pub course: Course,
    /// When the enrollment was created.
    pub enrolled_at: DateTime<Utc>,
}
