// Admin review of recruiter accounts. Every route here requires the admin role.

pub mod handlers;
