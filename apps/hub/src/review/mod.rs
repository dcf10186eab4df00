// Review and jobs views: score bands, category breakdown, job search and applications.

pub mod jobs;
pub mod score;
