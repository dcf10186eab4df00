use serde::Serialize;

/// Headline label for an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsWork,
}

impl ScoreBand {
    pub fn for_score(score: u32) -> Self {
        match score {
            80.. => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            _ => ScoreBand::NeedsWork,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::NeedsWork => "Needs Work",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryScore {
    pub label: &'static str,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Improvement {
    pub text: String,
    pub positive: bool,
}

/// Everything the review view shows for one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub score: u32,
    pub band: ScoreBand,
    pub categories: Vec<CategoryScore>,
    pub improvements: Vec<Improvement>,
}

/// Sample breakdown shown until the backend returns per-category scores.
pub fn sample_categories() -> Vec<CategoryScore> {
    vec![
        CategoryScore {
            label: "Format & Layout",
            score: 85,
        },
        CategoryScore {
            label: "Work Experience",
            score: 78,
        },
        CategoryScore {
            label: "Skills & Education",
            score: 72,
        },
        CategoryScore {
            label: "ATS Compatibility",
            score: 88,
        },
    ]
}

fn sample_strengths() -> Vec<Improvement> {
    ["Strong work experience section", "Good keyword optimization"]
        .into_iter()
        .map(|text| Improvement {
            text: text.to_string(),
            positive: true,
        })
        .collect()
}

/// Builds the review for `score`. Backend suggestions become the negative
/// items; the sample strengths are always listed first.
pub fn build_report(score: u32, suggestions: &[String]) -> ScoreReport {
    let mut improvements = sample_strengths();
    improvements.extend(suggestions.iter().map(|s| Improvement {
        text: s.clone(),
        positive: false,
    }));

    ScoreReport {
        score,
        band: ScoreBand::for_score(score),
        categories: sample_categories(),
        improvements,
    }
}

/// Plain-text rendering for the terminal.
pub fn render(report: &ScoreReport) -> String {
    let mut out = format!(
        "Your Resume Score: {}/100 ({})\n\n",
        report.score,
        report.band.label()
    );
    for category in &report.categories {
        out.push_str(&format!("  {:<20} {:>3}%\n", category.label, category.score));
    }
    out.push_str("\nImprovement Suggestions\n");
    for item in &report.improvements {
        let marker = if item.positive { "+" } else { "!" };
        out.push_str(&format!("  {marker} {}\n", item.text));
    }
    out
}
