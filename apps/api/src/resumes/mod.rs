// Resume intake and storage API.
// Upload modes, pipeline normalization and CRUD over stored resumes.

pub mod handlers;
pub mod ingest;
