use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    config::{load_settings, load_settings_from, Settings},
    controller::build_request,
    error::SubmitError,
    notify::{Navigator, Notification, NotificationLevel, Notifier},
    tags::load_tags,
    upload::{UploadEvent, UploadReconciler},
    validation::FieldCounter,
    ArticleBackend, DraftStore, HttpArticleBackend, IdentityProvider, StaticIdentity,
    SubmissionController,
};
use shared::{
    domain::UserId,
    protocol::{Session, SessionUser, UploadResult},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Compose and publish a news article")]
struct Args {
    /// Config file; defaults to ./newzio.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long, default_value = "")]
    headline: String,
    #[arg(long, default_value = "")]
    lead: String,
    /// Article body; read from a file with --body-file.
    #[arg(long, default_value = "", conflicts_with = "body_file")]
    body: String,
    #[arg(long)]
    body_file: Option<PathBuf>,
    #[arg(long, default_value = "")]
    tag: String,
    /// JSON array of upload widget results for the news cover.
    #[arg(long)]
    upload_json: Option<PathBuf>,
    #[arg(long)]
    user_id: Option<String>,
    #[arg(long)]
    user_name: Option<String>,
    #[arg(long)]
    user_image: Option<String>,
    /// Print the tags available to this user and exit.
    #[arg(long)]
    list_tags: bool,
    /// Validate and print the request without publishing.
    #[arg(long)]
    dry_run: bool,
}

struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => println!("{notification}"),
            NotificationLevel::Error => eprintln!("{notification}"),
        }
    }
}

struct ConsoleNavigator {
    site_url: String,
}

impl Navigator for ConsoleNavigator {
    fn push(&self, path: &str) {
        println!("{}{path}", self.site_url.trim_end_matches('/'));
    }
}

fn session_from_args(args: &Args) -> Option<Session> {
    if args.user_id.is_none() && args.user_name.is_none() && args.user_image.is_none() {
        return None;
    }
    Some(Session {
        user: SessionUser {
            id: args.user_id.as_deref().map(UserId::from),
            name: args.user_name.clone(),
            image: args.user_image.clone(),
        },
    })
}

fn settings_for(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => load_settings_from(path, |key| std::env::var(key).ok())?,
        None => load_settings()?,
    };
    if let Some(api_url) = &args.api_url {
        settings.api_base_url = api_url.clone();
    }
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();
    let settings = settings_for(&args)?;

    let backend: Arc<dyn ArticleBackend> =
        Arc::new(HttpArticleBackend::new(&settings.api_base_url)?);
    let identity = Arc::new(StaticIdentity(session_from_args(&args)));
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);

    let tags = load_tags(backend.as_ref(), args.list_tags || !args.tag.is_empty()).await?;
    info!(count = tags.len(), api = %settings.api_base_url, "loaded tag list");

    let draft = DraftStore::new();
    let controller = SubmissionController::new(
        draft.clone(),
        Arc::clone(&backend),
        identity.clone(),
        Arc::clone(&notifier),
        Arc::new(ConsoleNavigator {
            site_url: settings.site_url.clone(),
        }),
    )
    .with_tags(tags, settings.tag_policy.clone());

    if args.list_tags {
        for tag in controller.selectable_tags() {
            println!("{}", tag.tag);
        }
        return Ok(());
    }

    let body = match &args.body_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read body from {}", path.display()))?,
        None => args.body.clone(),
    };
    draft.set_headline(args.headline.as_str());
    draft.set_lead(args.lead.as_str());
    draft.set_body(body);
    draft.set_tag(args.tag.as_str());

    if let Some(path) = &args.upload_json {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read upload results from {}", path.display()))?;
        let results: Vec<UploadResult> =
            serde_json::from_str(&raw).context("malformed upload results")?;
        let uploads = UploadReconciler::new(
            draft.clone(),
            controller.activity(),
            Arc::clone(&backend),
            Arc::clone(&notifier),
        )
        .with_endpoint(settings.upload_endpoint.clone());
        uploads.handle(UploadEvent::Started)?;
        uploads.handle(UploadEvent::Completed(results))?;
    }

    let snapshot = draft.snapshot();
    println!(
        "headline {} | lead {} | body {}",
        FieldCounter::headline(&snapshot.headline),
        FieldCounter::lead(&snapshot.lead),
        FieldCounter::body(&snapshot.body),
    );

    if args.dry_run {
        if let Err(errors) = controller.validate() {
            for err in errors.iter() {
                eprintln!("{:?}: {err}", err.field());
            }
            bail!("draft is invalid");
        }
        let request = build_request(&snapshot, identity.current_session().as_ref());
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    println!("{}", controller.publish_label());
    match controller.submit().await {
        Ok(_) => Ok(()),
        Err(SubmitError::Validation(errors)) => {
            for err in errors.iter() {
                eprintln!("{:?}: {err}", err.field());
            }
            bail!("draft is invalid")
        }
        Err(err) => Err(err.into()),
    }
}
