use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::api_client::{base_url, BackendClient};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::UploadedFile;
use crate::review::jobs::{self, AppliedJobs, ApplyOutcome, SAMPLE_JOBS};
use crate::review::score;
use crate::routes::build_router;
use crate::shell::{Shell, Tab};
use crate::state::ServeVariant;
use crate::storage::{AnalysisCache, JsonFileStore, KeyValueStore};
use crate::upload::{InputSource, ResumeAnalyzer, SimulatedAnalyzer, UploadState, UploadWorkflow};

#[derive(Debug, Parser)]
#[command(name = "hub", version, about = "Resume review front end")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the built front end (or the lite source tree with --lite)
    Serve {
        #[arg(long)]
        lite: bool,
    },
    /// Upload one or more résumés in turn and show each score
    Upload {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Use the simulated analyzer instead of the backend
        #[arg(long)]
        offline: bool,
        /// Treat the file as dropped rather than picked
        #[arg(long)]
        dropped: bool,
    },
    /// Show the last analysis
    Review,
    /// Search the job list by title, company or skill
    Jobs {
        #[arg(short, long, default_value = "")]
        query: String,
        /// List the backend's jobs instead of the sample listing
        #[arg(long)]
        remote: bool,
    },
    /// Apply to a job; forwards to the backend when a résumé id is given
    Apply {
        job_id: String,
        #[arg(long)]
        resume_id: Option<String>,
    },
    /// Ask the backend for job suggestions for a score
    Suggestions { score: u32 },
    /// Manage résumé records on the backend
    Resumes {
        #[command(subcommand)]
        action: ResumeAction,
    },
    /// Check whether the backend is reachable
    Health,
    /// Forget the last analysis
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum ResumeAction {
    List,
    Get { id: String },
    UpdateScore { id: String, score: u32 },
    Delete { id: String },
}

/// Everything a command may need, built once per process.
struct Session {
    config: Config,
    client: BackendClient,
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    fn new(config: Config) -> Result<Self> {
        if !base_url::is_absolute(&config.api_base_url) {
            tracing::warn!(
                "Backend base URL '{}' is relative; set API_BASE_URL to reach the backend",
                config.api_base_url
            );
        }
        let store = JsonFileStore::open(&config.state_path)
            .with_context(|| format!("Failed to open {}", config.state_path.display()))?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            client: BackendClient::new(config.api_base_url.clone()),
            store,
            config,
        }
    }

    fn cache(&self) -> AnalysisCache {
        AnalysisCache::new(self.store.clone())
    }
}

pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let ctx = Session::new(config)?;

    match cli.command {
        Command::Serve { lite } => serve(&ctx.config, lite).await,
        Command::Upload {
            paths,
            offline,
            dropped,
        } => upload(&ctx, &paths, offline, dropped).await.map(|_| ()),
        Command::Review => review(&ctx),
        Command::Jobs { remote: true, .. } => print_json(&ctx.client.get_jobs().await?),
        Command::Jobs { query, .. } => list_jobs(&ctx, &query),
        Command::Apply { job_id, resume_id } => apply(&ctx, &job_id, resume_id.as_deref())
            .await
            .map(|_| ()),
        Command::Suggestions { score } => {
            print_json(&ctx.client.get_job_suggestions(score).await?)
        }
        Command::Resumes { action } => resumes(&ctx.client, action).await,
        Command::Health => {
            let healthy = ctx.client.check_backend_health().await;
            let status = if healthy { "healthy" } else { "unreachable" };
            println!("Backend at {} is {status}", ctx.client.base_url());
            Ok(())
        }
        Command::Reset => {
            ctx.cache().clear()?;
            println!("Cleared the last analysis");
            Ok(())
        }
    }
}

async fn serve(config: &Config, lite: bool) -> Result<()> {
    let variant = if lite {
        ServeVariant::Lite {
            root: config.lite_root.clone(),
        }
    } else {
        ServeVariant::Dist {
            dir: config.dist_dir.clone(),
        }
    };

    let app = build_router(variant.clone())?.layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");
    info!("Serving {} files from {}", variant.name(), variant.root().display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Uploads each file in turn. Between files the workflow is reset, the way
/// "Upload a different file" does, and the first failure stops the run.
async fn upload(ctx: &Session, paths: &[PathBuf], offline: bool, dropped: bool) -> Result<Shell> {
    let analyzer: Arc<dyn ResumeAnalyzer> = if offline {
        Arc::new(SimulatedAnalyzer::default())
    } else {
        Arc::new(ctx.client.clone())
    };
    let workflow = UploadWorkflow::new(analyzer, ctx.cache());
    let mut shell = Shell::new();
    let source = if dropped {
        InputSource::Drop
    } else {
        InputSource::Picker
    };

    for path in paths {
        if workflow.reset() {
            shell.select(Tab::Upload);
            println!();
        }
        let file = UploadedFile::from_path(path).await?;

        println!("{}\n", shell.render_nav());
        println!("Analyzing {}... This may take a few moments", file.name);

        match workflow.submit(file, source).await {
            Ok(result) => {
                shell.upload_completed();
                if let UploadState::Succeeded { file } = workflow.state() {
                    println!("{} uploaded successfully!\n", file.name);
                }
                println!("{}\n", shell.render_nav());
                print!("{}", score::render(&score::build_report(result.score, &result.suggestions)));
            }
            Err(e) if e.is_rejection() => {
                return Err(anyhow::Error::new(e).context("File rejected before upload"))
            }
            Err(e) => {
                debug!("Workflow ended in {:?}", workflow.state());
                return Err(anyhow::Error::new(e).context("Upload failed; submit the file again to retry"));
            }
        }
    }
    Ok(shell)
}

fn review(ctx: &Session) -> Result<()> {
    match ctx.cache().read()? {
        Some(result) => {
            print!("{}", score::render(&score::build_report(result.score, &result.suggestions)));
        }
        None => println!("No resume analyzed yet. Run `hub upload <file>` first."),
    }
    Ok(())
}

fn list_jobs(ctx: &Session, query: &str) -> Result<()> {
    let applied = AppliedJobs::new(ctx.store.clone()).list()?;
    let found = jobs::filter_jobs(&SAMPLE_JOBS, query);
    print!("{}", jobs::render(&found, &applied));
    Ok(())
}

/// Records the application only after the backend accepts it, so a failed
/// submission can be retried.
async fn apply(ctx: &Session, job_id: &str, resume_id: Option<&str>) -> Result<ApplyOutcome> {
    let job = jobs::find_job(&SAMPLE_JOBS, job_id)
        .ok_or_else(|| AppError::NotFound(format!("job {job_id}")))?;
    let applied = AppliedJobs::new(ctx.store.clone());

    if applied.contains(job_id)? {
        println!("You've already applied to this job");
        return Ok(ApplyOutcome::AlreadyApplied);
    }

    if let Some(resume_id) = resume_id {
        let record = ctx.client.apply_for_job(job_id, resume_id).await?;
        print_json(&record)?;
    }

    let outcome = applied.apply(job_id)?;
    if outcome == ApplyOutcome::Submitted {
        println!("Application to {} at {} submitted successfully!", job.title, job.company);
    }
    Ok(outcome)
}

async fn resumes(client: &BackendClient, action: ResumeAction) -> Result<()> {
    match action {
        ResumeAction::List => print_json(&client.get_resumes().await?),
        ResumeAction::Get { id } => match client.get_resume_by_id(&id).await {
            Ok(resume) => print_json(&resume),
            Err(e) if e.status() == Some(404) => Err(AppError::NotFound(format!("resume {id}")).into()),
            Err(e) => Err(e.into()),
        },
        ResumeAction::UpdateScore { id, score } => {
            print_json(&client.update_resume_score(&id, score).await?)
        }
        ResumeAction::Delete { id } => {
            client.delete_resume(&id).await?;
            println!("Deleted resume {id}");
            Ok(())
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
