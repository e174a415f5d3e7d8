// Resume analyzer: keyword match of pasted resume text against a job's requirements.

pub mod analyzer;
pub mod handlers;
