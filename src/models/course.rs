use serde::{Deserialize, Serialize};

/// Represents a course offering.
///
/// Immutable from the client's perspective; seat counts are
/// server-authoritative and only change through a re-fetch.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Course {
    /// The unique identifier for the course.
    pub id: i64,
    /// The course's display name.
    pub name: String,
    /// The course's credit weight.
    pub credit: u32,
    /// The course type (lecture, seminar, lab, ...).
    #[serde(rename = "type")]
    pub course_type: String,
    /// The semester the course is offered in.
    pub semester: String,
    /// The maximum number of seats.
    pub capacity: u32,
    /// The number of currently enrolled students.
    pub enrolled_count: u32,
}

/// One page of the course catalog, as returned by the list endpoint.
#[derive(Deserialize, Clone, Debug)]
pub struct CoursePage {
    pub results: Vec<Course>,
    /// Total matching courses across all pages; may diverge from
    /// `results.len()` under pagination.
    pub count: u64,
}

/// The catalog filter state, also serialized as the list query string.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CourseFilters {
    pub search: String,
    #[serde(rename = "type")]
    pub course_type: String,
    pub semester: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl Default for CourseFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            course_type: String::new(),
            semester: String::new(),
            page: None,
        }
    }
}

/// A partial filter update. `Some` fields overwrite the stored filters,
/// `None` fields leave them untouched (shallow merge).
#[derive(Clone, Debug, Default)]
pub struct CourseFilterPatch {
    pub search: Option<String>,
    pub course_type: Option<String>,
    pub semester: Option<String>,
    pub page: Option<u32>,
}

impl CourseFilterPatch {
    pub fn search(value: impl Into<String>) -> Self {
        Self {
            search: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn course_type(value: impl Into<String>) -> Self {
        Self {
            course_type: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn semester(value: impl Into<String>) -> Self {
        Self {
            semester: Some(value.into()),
            ..Self::default()
        }
    }
}

impl CourseFilters {
    /// Merges a partial update into the stored filters.
    pub fn merge(&mut self, patch: &CourseFilterPatch) {
        if let Some(search) = &patch.search {
            self.search = search.clone();
        }
        if let Some(course_type) = &patch.course_type {
            self.course_type = course_type.clone();
        }
        if let Some(semester) = &patch.semester {
            self.semester = semester.clone();
        }
        if let Some(page) = patch.page {
            self.page = Some(page);
        }
    }
}
