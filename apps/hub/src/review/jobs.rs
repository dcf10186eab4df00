use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::storage::cache::read_json;
use crate::storage::{KeyValueStore, StoreError, APPLIED_JOBS_KEY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: &'static str,
    pub title: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub salary: &'static str,
    #[serde(rename = "type")]
    pub employment_type: &'static str,
    pub match_score: u32,
    pub logo: char,
    pub posted_ago: &'static str,
    pub skills: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchBand {
    Strong,
    Good,
    Fair,
}

impl MatchBand {
    pub fn for_score(match_score: u32) -> Self {
        match match_score {
            85.. => MatchBand::Strong,
            70..=84 => MatchBand::Good,
            _ => MatchBand::Fair,
        }
    }
}

impl Job {
    pub fn match_band(&self) -> MatchBand {
        MatchBand::for_score(self.match_score)
    }

    /// Case-insensitive substring match on title, company or any skill.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.company.to_lowercase().contains(&query)
            || self
                .skills
                .iter()
                .any(|skill| skill.to_lowercase().contains(&query))
    }
}

/// Listing shown on the jobs view until real suggestions are wired in.
pub static SAMPLE_JOBS: [Job; 5] = [
    Job {
        id: "1",
        title: "Senior Frontend Developer",
        company: "TechCorp Inc.",
        location: "San Francisco, CA",
        salary: "$140K - $180K",
        employment_type: "Full-time",
        match_score: 92,
        logo: 'T',
        posted_ago: "2 days ago",
        skills: &["React", "TypeScript", "Next.js", "Tailwind CSS", "GraphQL"],
    },
    Job {
        id: "2",
        title: "Full Stack Engineer",
        company: "StartupXYZ",
        location: "Remote",
        salary: "$120K - $160K",
        employment_type: "Full-time",
        match_score: 88,
        logo: 'S',
        posted_ago: "1 week ago",
        skills: &["Node.js", "React", "PostgreSQL", "AWS", "Docker"],
    },
    Job {
        id: "3",
        title: "Software Engineer II",
        company: "BigTech Solutions",
        location: "New York, NY",
        salary: "$130K - $170K",
        employment_type: "Full-time",
        match_score: 85,
        logo: 'B',
        posted_ago: "3 days ago",
        skills: &["Java", "Spring Boot", "React", "Kubernetes", "CI/CD"],
    },
    Job {
        id: "4",
        title: "UI/UX Developer",
        company: "DesignHub",
        location: "Austin, TX",
        salary: "$100K - $130K",
        employment_type: "Full-time",
        match_score: 78,
        logo: 'D',
        posted_ago: "5 days ago",
        skills: &["Figma", "React", "CSS", "Animation", "Prototyping"],
    },
    Job {
        id: "5",
        title: "React Developer",
        company: "WebAgency Pro",
        location: "Chicago, IL",
        salary: "$90K - $120K",
        employment_type: "Contract",
        match_score: 75,
        logo: 'W',
        posted_ago: "1 day ago",
        skills: &["React", "JavaScript", "Redux", "REST APIs", "Testing"],
    },
];

/// Keeps fixture order; an empty query returns everything.
pub fn filter_jobs<'a>(jobs: &'a [Job], query: &str) -> Vec<&'a Job> {
    jobs.iter().filter(|job| job.matches(query)).collect()
}

pub fn find_job<'a>(jobs: &'a [Job], id: &str) -> Option<&'a Job> {
    jobs.iter().find(|job| job.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Submitted,
    AlreadyApplied,
}

/// Job ids the user has applied to, kept in the local store.
#[derive(Clone)]
pub struct AppliedJobs {
    store: Arc<dyn KeyValueStore>,
}

impl AppliedJobs {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(read_json::<Vec<String>>(self.store.as_ref(), APPLIED_JOBS_KEY)?.unwrap_or_default())
    }

    pub fn contains(&self, job_id: &str) -> Result<bool, StoreError> {
        Ok(self.list()?.iter().any(|id| id == job_id))
    }

    pub fn apply(&self, job_id: &str) -> Result<ApplyOutcome, StoreError> {
        let mut applied = self.list()?;
        if applied.iter().any(|id| id == job_id) {
            return Ok(ApplyOutcome::AlreadyApplied);
        }
        applied.push(job_id.to_string());
        self.store
            .set(APPLIED_JOBS_KEY, serde_json::to_string(&applied)?)?;
        info!("Recorded application to job {job_id}");
        Ok(ApplyOutcome::Submitted)
    }
}

pub fn render(jobs: &[&Job], applied: &[String]) -> String {
    if jobs.is_empty() {
        return "No jobs found matching your search.\n".to_string();
    }
    let mut out = format!("Showing {} matching jobs\n\n", jobs.len());
    for job in jobs {
        let status = if applied.iter().any(|id| id == job.id) {
            " [applied]"
        } else {
            ""
        };
        out.push_str(&format!(
            "[{}] {} at {} ({}% match, {:?}){}\n    {} | {} | {} | posted {}\n    {}\n",
            job.id,
            job.title,
            job.company,
            job.match_score,
            job.match_band(),
            status,
            job.location,
            job.salary,
            job.employment_type,
            job.posted_ago,
            job.skills.join(", "),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn ids(jobs: &[&Job]) -> Vec<&'static str> {
        jobs.iter().map(|j| j.id).collect()
    }

    #[test]
    fn test_empty_query_returns_all() {
        assert_eq!(filter_jobs(&SAMPLE_JOBS, "").len(), 5);
    }

    #[test]
    fn test_react_query_matches_title_company_or_skill() {
        let found = filter_jobs(&SAMPLE_JOBS, "react");
        let expected: Vec<&Job> = SAMPLE_JOBS
            .iter()
            .filter(|j| {
                j.title.to_lowercase().contains("react")
                    || j.company.to_lowercase().contains("react")
                    || j.skills.iter().any(|s| s.to_lowercase().contains("react"))
            })
            .collect();
        assert_eq!(ids(&found), ids(&expected));
        // Every sample lists React as a skill.
        assert_eq!(found.len(), 5);
    }

    #[test]
    fn test_query_is_case_insensitive_and_excludes_others() {
        assert_eq!(ids(&filter_jobs(&SAMPLE_JOBS, "KUBERNETES")), vec!["3"]);
        assert_eq!(ids(&filter_jobs(&SAMPLE_JOBS, "startup")), vec!["2"]);
        assert_eq!(ids(&filter_jobs(&SAMPLE_JOBS, "developer")), vec!["1", "4", "5"]);
        assert!(filter_jobs(&SAMPLE_JOBS, "cobol").is_empty());
    }

    #[test]
    fn test_match_bands() {
        assert_eq!(MatchBand::for_score(92), MatchBand::Strong);
        assert_eq!(MatchBand::for_score(85), MatchBand::Strong);
        assert_eq!(MatchBand::for_score(78), MatchBand::Good);
        assert_eq!(MatchBand::for_score(69), MatchBand::Fair);
    }

    #[test]
    fn test_apply_twice_is_reported() {
        let applied = AppliedJobs::new(Arc::new(MemoryStore::new()));
        assert_eq!(applied.apply("2").unwrap(), ApplyOutcome::Submitted);
        assert_eq!(applied.apply("2").unwrap(), ApplyOutcome::AlreadyApplied);
        assert!(applied.contains("2").unwrap());
        assert_eq!(applied.list().unwrap(), vec!["2".to_string()]);
    }

    #[test]
    fn test_render_marks_applied_and_empty_results() {
        let jobs = filter_jobs(&SAMPLE_JOBS, "figma");
        let text = render(&jobs, &["4".to_string()]);
        assert!(text.starts_with("Showing 1 matching jobs"));
        assert!(text.contains("UI/UX Developer at DesignHub (78% match, Good) [applied]"));

        assert_eq!(render(&[], &[]), "No jobs found matching your search.\n");
    }
}
