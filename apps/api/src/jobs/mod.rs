// Job postings: create (approved recruiters only), fetch by id, and keyword/location search.

pub mod handlers;
pub mod validation;
