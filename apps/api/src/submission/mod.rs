// Submission Endpoint: validation, orchestration of the scoring core and
// report builder, persistence through `SubmissionStore`, and the best-effort
// notification that follows a successful insert.

pub mod contact;
pub mod handlers;
pub mod store;
pub mod validate;
