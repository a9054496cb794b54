use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use arcplan_blueprint::{BlueprintItem, UploadResponse};
use arcplan_config::{CanvasConfig, ClientConfig};
use arcplan_layout::{Canvas, render, render_svg};
use arcplan_upload::{CandidateFile, HttpInferenceClient};
use arcplan_workflow::{
  ChannelNotifier, SubmitError, WorkflowController, WorkflowEvent, WorkflowState,
};

/// ArcPlan - turn a walkthrough video of a room into a floor plan
#[derive(Parser)]
#[command(name = "arcplan")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the config file (default: ~/.arcplan/config.json)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Upload a video and print the detected layout
  Upload {
    /// Path to the video file
    file: PathBuf,

    /// Declared media type (default: derived from the extension)
    #[arg(long)]
    media_type: Option<String>,

    /// Override the inference endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Also write the floor plan as SVG
    #[arg(long)]
    svg: Option<PathBuf>,
  },

  /// Render a saved success response without uploading
  Render {
    /// Path to the response JSON
    response_file: PathBuf,

    /// Also write the floor plan as SVG
    #[arg(long)]
    svg: Option<PathBuf>,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "arcplan=warn".into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let cli = Cli::parse();
  let mut config = load_config(cli.config.as_deref())?;

  match cli.command {
    Some(Commands::Upload {
      file,
      media_type,
      endpoint,
      svg,
    }) => {
      if let Some(endpoint) = endpoint {
        config.endpoint = endpoint;
        config.validate().context("invalid --endpoint")?;
      }
      let rt = tokio::runtime::Runtime::new()?;
      rt.block_on(upload(config, file, media_type, svg))?;
    }
    Some(Commands::Render { response_file, svg }) => {
      render_saved(&config, &response_file, svg.as_deref())?;
    }
    None => {
      println!("arcplan - use --help to see available commands");
    }
  }

  Ok(())
}

/// Load the config file, falling back to defaults when none exists.
///
/// An explicit `--config` path must exist; the default location is optional.
fn load_config(explicit: Option<&Path>) -> Result<ClientConfig> {
  let path = match explicit {
    Some(path) => Some(path.to_path_buf()),
    None => dirs::home_dir()
      .map(|home| home.join(".arcplan").join("config.json"))
      .filter(|path| path.exists()),
  };

  let Some(path) = path else {
    debug!("no config file, using defaults");
    return Ok(ClientConfig::default());
  };

  let content = std::fs::read_to_string(&path)
    .with_context(|| format!("failed to read config file: {}", path.display()))?;
  let config = ClientConfig::from_json(&content)
    .with_context(|| format!("invalid config file: {}", path.display()))?;
  debug!(path = %path.display(), "config_loaded");
  Ok(config)
}

enum Finish {
  Settled(WorkflowState),
  Interrupted,
}

async fn upload(
  config: ClientConfig,
  file: PathBuf,
  media_type: Option<String>,
  svg: Option<PathBuf>,
) -> Result<()> {
  let candidate = CandidateFile::from_path(&file, media_type)
    .await
    .with_context(|| format!("failed to read video file: {}", file.display()))?;
  let client =
    HttpInferenceClient::from_config(&config).context("failed to create inference client")?;
  eprintln!("Sending to {}", client.endpoint());

  let (tx, mut events) = mpsc::unbounded_channel();
  let mut controller = WorkflowController::with_notifier(
    Arc::new(client),
    config.progress.clone(),
    ChannelNotifier::new(tx),
  );

  match controller.submit(vec![candidate]) {
    Ok(_) => {}
    Err(SubmitError::Rejected(rejection)) => {
      let message = controller
        .failure()
        .map(|f| f.message.clone())
        .unwrap_or_else(|| rejection.to_string());
      bail!(message);
    }
    Err(e) => return Err(e.into()),
  }

  let finish = loop {
    tokio::select! {
      Some(event) = events.recv() => print_event(&event),
      state = controller.settle() => break Finish::Settled(state.clone()),
      _ = tokio::signal::ctrl_c() => break Finish::Interrupted,
    }
  };

  let state = match finish {
    Finish::Settled(state) => state,
    Finish::Interrupted => {
      controller.reset();
      bail!("upload cancelled");
    }
  };

  while let Ok(event) = events.try_recv() {
    print_event(&event);
  }

  match state {
    WorkflowState::Results { result, .. } => print_results(
      result.filename.as_deref(),
      &result.items,
      &config.canvas,
      svg.as_deref(),
    ),
    WorkflowState::Upload {
      failure: Some(failure),
    } => bail!(failure.message),
    other => bail!("upload ended in the {} state", other.kind()),
  }
}

fn print_event(event: &WorkflowEvent) {
  match event {
    WorkflowEvent::EpisodeStarted { file_name, .. } => eprintln!("Uploading {}", file_name),
    WorkflowEvent::StageAdvanced {
      index,
      total,
      label,
      ..
    } => eprintln!("[{}/{}] {}", index + 1, total, label),
    WorkflowEvent::AnimationComplete { .. } => eprintln!("Waiting for the server..."),
    WorkflowEvent::ResultsReady { items, .. } => eprintln!("Detected {} objects", items),
    WorkflowEvent::EpisodeFailed { .. }
    | WorkflowEvent::FileRejected { .. }
    | WorkflowEvent::Reset => {}
  }
}

fn render_saved(config: &ClientConfig, response_file: &Path, svg: Option<&Path>) -> Result<()> {
  let body = std::fs::read_to_string(response_file)
    .with_context(|| format!("failed to read response file: {}", response_file.display()))?;
  let response = UploadResponse::from_body(&body);
  print_results(
    response.filename.as_deref(),
    &response.blueprint,
    &config.canvas,
    svg,
  )
}

/// Print the layout as JSON and optionally write it as SVG.
fn print_results(
  filename: Option<&str>,
  items: &[BlueprintItem],
  canvas: &CanvasConfig,
  svg: Option<&Path>,
) -> Result<()> {
  let canvas = Canvas::from(canvas);
  let view = render(items, &canvas);

  let summary = serde_json::json!({
    "filename": filename,
    "layout": view,
  });
  println!("{}", serde_json::to_string_pretty(&summary)?);

  if let Some(path) = svg {
    std::fs::write(path, render_svg(&view, &canvas))
      .with_context(|| format!("failed to write svg: {}", path.display()))?;
    eprintln!("Wrote {}", path.display());
  }
  Ok(())
}
