//! The courses slice
//!
//! The course list for the logged-in teacher, plus which course the
//! dashboard currently has selected. Selection is a local action; only
//! the list fetch goes to the backend.

use tracing::warn;

use crate::api::CoursesApi;
use crate::error::ApiError;
use crate::session::SessionStore;
use crate::store::Dispatcher;
use crate::types::Course;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoursesState {
    pub courses: Vec<Course>,
    /// Course id the dashboard is focused on.
    pub selected: Option<String>,
    pub loading: bool,
    pub error: Option<ApiError>,
    /// Highest request sequence issued against this slice.
    pub issued: u64,
}

impl CoursesState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected course, when it is in the list.
    pub fn selected_course(&self) -> Option<&Course> {
        let id = self.selected.as_deref()?;
        self.courses.iter().find(|c| c.id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CoursesAction {
    FetchPending { seq: u64 },
    FetchFulfilled { seq: u64, courses: Vec<Course> },
    FetchRejected { seq: u64, error: ApiError },

    /// Local action; no request involved.
    CourseSelected { course_id: String },
}

pub fn reduce(state: CoursesState, action: CoursesAction) -> CoursesState {
    match action {
        CoursesAction::FetchPending { seq } => CoursesState {
            issued: state.issued.max(seq),
            loading: true,
            error: None,
            ..state
        },

        CoursesAction::FetchFulfilled { seq, courses } => {
            let state = CoursesState { courses, ..state };
            if seq == state.issued {
                CoursesState {
                    loading: false,
                    ..state
                }
            } else {
                state
            }
        }

        CoursesAction::FetchRejected { seq, error } => {
            if seq == state.issued {
                CoursesState {
                    loading: false,
                    error: Some(error),
                    ..state
                }
            } else {
                state
            }
        }

        CoursesAction::CourseSelected { course_id } => CoursesState {
            selected: Some(course_id),
            ..state
        },
    }
}

/// Replace the list with the courses of the teacher in the session cache.
pub async fn fetch_courses<A>(dispatcher: &Dispatcher, api: &A, session: &SessionStore) -> u64
where
    A: CoursesApi + ?Sized,
{
    let seq = dispatcher.issue_courses_seq();
    dispatcher.dispatch(CoursesAction::FetchPending { seq });

    let teacher_id = match session.teacher_id() {
        Some(id) => id,
        None => {
            warn!(seq, "no teacher identity in session; refusing to fetch courses");
            dispatcher.dispatch(CoursesAction::FetchRejected {
                seq,
                error: ApiError::MissingTeacherId,
            });
            return seq;
        }
    };

    match api.courses_by_teacher(&teacher_id).await {
        Ok(courses) => dispatcher.dispatch(CoursesAction::FetchFulfilled { seq, courses }),
        Err(error) => {
            warn!(seq, %error, "course fetch failed");
            dispatcher.dispatch(CoursesAction::FetchRejected { seq, error });
        }
    }
    seq
}
