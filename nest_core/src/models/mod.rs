pub mod response;
pub mod submission;

pub use response::ContactResponse;
pub use submission::{Submission, SubmissionPayload};
