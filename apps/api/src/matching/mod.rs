// Resume-to-job match scoring.
// Pure scoring lives in `scoring`; handlers only load jobs and shape requests.

pub mod handlers;
pub mod scoring;
