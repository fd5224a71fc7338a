use std::sync::{Arc, Mutex, PoisonError};

use crate::error::Result;
use crate::gateway::ApiGateway;
use crate::models::course::{Course, CourseFilterPatch, CourseFilters};
use crate::models::enrollment::Enrollment;
use crate::services::courses;

/// A snapshot of the catalog/enrollment cache.
///
/// Invariants: `my_courses` is always exactly the ordered course projection
/// of `my_enrollments`; `total_count` reflects the last successful catalog
/// fetch's `count`, never the locally cached array length (they diverge
/// under pagination).
#[derive(Clone, Debug, Default)]
pub struct EnrollmentState {
    pub courses: Vec<Course>,
    pub total_count: u64,
    pub my_enrollments: Vec<Enrollment>,
    pub my_courses: Vec<Course>,
    pub filters: CourseFilters,
    pub loading: bool,
    pub error: Option<String>,
}

impl EnrollmentState {
    /// The ids of every course the user is enrolled in.
    pub fn enrolled_course_ids(&self) -> Vec<i64> {
        self.my_enrollments
            .iter()
            .map(|enrollment| enrollment.course.id)
            .collect()
    }

    /// The credit total across the user's courses.
    pub fn total_credits(&self) -> u32 {
        self.my_courses.iter().map(|course| course.credit).sum()
    }
}

/// Owns the course catalog and the user's enrollment set.
///
/// Enrollment capacity and ordering are server-authoritative (seat counts,
/// races between concurrent enrollers), so enroll/withdraw never mutate the
/// cache speculatively: every successful mutation is followed by a full
/// re-read of the enrollment list and the catalog under the current filters.
pub struct EnrollmentStore {
    gateway: Arc<ApiGateway>,
    state: Mutex<EnrollmentState>,
}

impl EnrollmentStore {
    /// Creates a new `EnrollmentStore` over the shared gateway.
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self {
            gateway,
            state: Mutex::new(EnrollmentState::default()),
        }
    }

    /// Returns the current state snapshot.
    pub fn snapshot(&self) -> EnrollmentState {
        self.lock().clone()
    }

    /// Fetches one catalog page with the stored filters plus `patch`.
    ///
    /// `patch` is shallow-merged: given keys overwrite, unspecified keys
    /// persist. The merged filters are committed together with the results,
    /// so a failed fetch leaves the previous filter state intact.
    pub async fn fetch_courses(&self, patch: &CourseFilterPatch) -> Result<()> {
        let merged = {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
            let mut merged = state.filters.clone();
            merged.merge(patch);
            merged
        };
        tracing::debug!("📚 Loading courses: {:?}", merged);

        let result = courses::get_courses(&self.gateway, &merged).await;

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(page) => {
                tracing::info!("✅ Courses loaded: {} of {}", page.results.len(), page.count);
                state.courses = page.results;
                state.total_count = page.count;
                state.filters = merged;
                Ok(())
            }
            Err(error) => {
                state.error = Some(error.detail().unwrap_or("Failed to load courses").to_string());
                tracing::warn!("❌ Course load failed: {}", error);
                Err(error)
            }
        }
    }

    /// Replaces the enrollment set wholesale and recomputes the course
    /// projection.
    pub async fn fetch_my_enrollments(&self) -> Result<()> {
        {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
        }
        tracing::debug!("📋 Loading enrollments");

        let result = courses::get_my_enrollments(&self.gateway).await;

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(enrollments) => {
                tracing::info!("✅ Enrollments loaded: {}", enrollments.len());
                state.my_courses = enrollments
                    .iter()
                    .map(|enrollment| enrollment.course.clone())
                    .collect();
                state.my_enrollments = enrollments;
                Ok(())
            }
            Err(error) => {
                state.error = Some(error.detail().unwrap_or("Failed to load schedule").to_string());
                tracing::warn!("❌ Enrollment load failed: {}", error);
                Err(error)
            }
        }
    }

    /// Enrolls in a course, then pulls authoritative post-mutation state.
    ///
    /// On mutation failure no resynchronization is attempted and the error
    /// propagates.
    pub async fn enroll_course(&self, course_id: i64) -> Result<Enrollment> {
        tracing::info!("🎓 Enrolling in course {}", course_id);
        {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
        }

        let result = self.enroll_and_resync(course_id).await;

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(enrollment) => {
                tracing::info!("✅ Enrolled: {}", enrollment.id);
                Ok(enrollment)
            }
            Err(error) => {
                state.error = Some(error.detail().unwrap_or("Enrollment failed").to_string());
                tracing::warn!("❌ Enrollment failed: {}", error);
                Err(error)
            }
        }
    }

    /// Withdraws an enrollment, then pulls authoritative post-mutation state.
    pub async fn withdraw_course(&self, enrollment_id: i64) -> Result<()> {
        tracing::info!("🚪 Withdrawing enrollment {}", enrollment_id);
        {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
        }

        let result = self.withdraw_and_resync(enrollment_id).await;

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(()) => {
                tracing::info!("✅ Withdrawn: {}", enrollment_id);
                Ok(())
            }
            Err(error) => {
                state.error = Some(error.detail().unwrap_or("Withdrawal failed").to_string());
                tracing::warn!("❌ Withdrawal failed: {}", error);
                Err(error)
            }
        }
    }

    /// Pure lookup over the cached enrollment set; first match wins.
    pub fn find_enrollment_by_course_id(&self, course_id: i64) -> Option<Enrollment> {
        self.lock()
            .my_enrollments
            .iter()
            .find(|enrollment| enrollment.course.id == course_id)
            .cloned()
    }

    /// Resets to the initial snapshot.
    pub fn reset(&self) {
        tracing::debug!("Enrollment state reset");
        *self.lock() = EnrollmentState::default();
    }

    async fn enroll_and_resync(&self, course_id: i64) -> Result<Enrollment> {
        let enrollment = courses::enroll_course(&self.gateway, course_id).await?;
        // Strictly after the mutation's acknowledgement, never concurrent
        // with it: a parallel read could observe pre-mutation state.
        self.resync().await?;
        Ok(enrollment)
    }

    async fn withdraw_and_resync(&self, enrollment_id: i64) -> Result<()> {
        courses::withdraw_course(&self.gateway, enrollment_id).await?;
        self.resync().await?;
        Ok(())
    }

    /// Full resynchronization: the enrollment list for the user's schedule
    /// and the catalog under the current filters for updated seat counts.
    async fn resync(&self) -> Result<()> {
        self.fetch_my_enrollments().await?;
        self.fetch_courses(&CourseFilterPatch::default()).await?;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, EnrollmentState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
