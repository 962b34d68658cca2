//! Error type for course-topology misuse.

use crate::CourseNode;

/// Errors raised when course data is used inconsistently.
///
/// # Example
///
/// ```
/// use course_types::{CourseError, CourseNode};
///
/// let error = CourseError::DegenerateEdge(CourseNode::Node4);
/// assert!(error.to_string().contains("NODE4"));
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CourseError {
    /// An edge was given with identical endpoints, so no direction of
    /// travel can be derived from it.
    #[error("degenerate edge at {0}: from and to must differ")]
    DegenerateEdge(CourseNode),
}
