use serde::Serialize;

use crate::error::Result;
use crate::gateway::ApiGateway;
use crate::models::course::{Course, CourseFilters, CoursePage};
use crate::models::enrollment::Enrollment;

/// The request payload for enrolling in a course.
#[derive(Serialize, Debug)]
struct EnrollRequest {
    course_id: i64,
}

/// Fetches one page of the course catalog.
pub async fn get_courses(gateway: &ApiGateway, filters: &CourseFilters) -> Result<CoursePage> {
    gateway.get_with_query("/courses/", filters).await
}

/// Fetches a single course.
pub async fn get_course(gateway: &ApiGateway, id: i64) -> Result<Course> {
    gateway.get(&format!("/courses/{id}/")).await
}

/// Fetches the current user's enrollments.
pub async fn get_my_enrollments(gateway: &ApiGateway) -> Result<Vec<Enrollment>> {
    gateway.get("/enrollments/").await
}

/// Enrolls the current user in a course, returning the new enrollment.
pub async fn enroll_course(gateway: &ApiGateway, course_id: i64) -> Result<Enrollment> {
    gateway
        .post("/enrollments/", &EnrollRequest { course_id })
        .await
}

/// Withdraws an enrollment by its own id. The response body is opaque.
pub async fn withdraw_course(gateway: &ApiGateway, enrollment_id: i64) -> Result<()> {
    gateway.delete(&format!("/enrollments/{enrollment_id}/")).await
}

/// Fetches the current user's course list from the dedicated endpoint.
pub async fn get_my_courses(gateway: &ApiGateway) -> Result<Vec<Course>> {
    gateway.get("/enrollments/my-courses/").await
}
