// Job applications: apply, list the caller's own, list applicants for a job,
// and recruiter/admin status decisions with feedback.

pub mod handlers;
pub mod status;
