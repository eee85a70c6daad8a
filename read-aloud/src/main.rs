//! read-aloud - Read web pages and selections aloud through a local TTS service

mod config;
mod envelope;
mod error;
mod extract;
mod page;
mod session;
mod voices;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::ReadAloudConfig;
use envelope::SpeechParams;
use extract::dom::Selector;
use extract::{ExtractedText, ExtractionMode};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use page::{Page, PageSource};
use session::{DispatchOutcome, ServiceHealth, SessionCoordinator};
use std::sync::Arc;
use std::time::Duration;
use tts_client::HttpTransport;
use voices::Gender;

#[derive(Parser, Debug)]
#[command(name = "read-aloud")]
#[command(about = "Read web pages and selections aloud through a local TTS service", long_about = None)]
#[command(version)]
struct Args {
    /// Enable debug output
    #[arg(short, long, default_value_t = false, global = true)]
    debug: bool,

    /// Subcommands
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read a page (or a selection) aloud
    Read {
        #[command(flatten)]
        page: PageArgs,

        /// Voice to speak with (e.g. af_bella)
        #[arg(long)]
        voice: Option<String>,

        /// Speed multiplier (e.g. 1.25)
        #[arg(long)]
        speed: Option<f32>,

        /// Language code (e.g. en-us)
        #[arg(long)]
        lang: Option<String>,
    },
    /// Print the text that would be read, without contacting the service
    Extract {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Check whether the TTS service is up
    Health {
        /// Print the service's health report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the voices available for a language
    Voices {
        /// Language code (default: configured language, then en-us)
        #[arg(long)]
        lang: Option<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args, Debug)]
struct PageArgs {
    /// HTML file, http(s) URL, or - for stdin (default: - unless --selection is given)
    source: Option<String>,

    /// Read this selected text instead of the page content
    #[arg(long)]
    selection: Option<String>,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set default voice
    SetVoice {
        /// Voice id (e.g. af_bella)
        voice: String,
    },
    /// Set default speed
    SetSpeed {
        /// Speed multiplier (greater than 0)
        value: f32,
    },
    /// Set default language
    SetLang {
        /// Language code (e.g. en-gb)
        lang: String,
    },
    /// Set TTS service URL
    SetServiceUrl {
        /// Base URL (e.g. http://localhost:5000)
        url: String,
    },
    /// Set the selector of the page's content container
    SetContentSelector {
        /// .class, #id or tag
        selector: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match args.command {
        Commands::Read {
            page,
            voice,
            speed,
            lang,
        } => {
            let params = SpeechParams { voice, speed, lang };
            read(&page, params).await
        }
        Commands::Extract { page } => extract_only(&page).await,
        Commands::Health { json } => health(json).await,
        Commands::Voices { lang } => list_voices(lang),
        Commands::Config { action } => handle_config_command(&action),
    }
}

/// Load the page and pick the extraction mode.
async fn load_page(args: &PageArgs) -> Result<(Page, ExtractionMode)> {
    match &args.selection {
        Some(selection) => {
            let page = match &args.source {
                Some(source) => PageSource::parse(source)
                    .load()
                    .await
                    .context("Failed to load page")?,
                None => Page::from_html(""),
            };
            Ok((page.with_selection(selection.clone()), ExtractionMode::Selection))
        }
        None => {
            let source = PageSource::parse(args.source.as_deref().unwrap_or("-"));
            let page = source.load().await.context("Failed to load page")?;
            Ok((page, ExtractionMode::FullPage))
        }
    }
}

async fn extract_text(config: &ReadAloudConfig, args: &PageArgs) -> Result<Option<ExtractedText>> {
    let extractor = config
        .extractor()
        .context("Invalid content_selector in configuration")?;
    let (page, mode) = load_page(args).await?;
    Ok(extractor.extract(&page, mode))
}

async fn extract_only(args: &PageArgs) -> Result<()> {
    let config = ReadAloudConfig::load().context("Failed to load configuration")?;
    let text = extract_text(&config, args)
        .await?
        .ok_or(error::ReadAloudError::NoText)?;
    println!("{}", text);
    Ok(())
}

async fn read(args: &PageArgs, params: SpeechParams) -> Result<()> {
    let config = ReadAloudConfig::load().context("Failed to load configuration")?;
    let text = extract_text(&config, args).await?;

    let params = params.or(&config.speech_params());
    if let Some(voice) = params.voice.as_deref() {
        if !voices::is_known_voice(voice) {
            warn!("Unknown voice '{}'; the service will use its default", voice);
        }
    }

    let paragraphs = text.as_ref().map_or(0, ExtractedText::paragraph_count);
    let request = envelope::build(text.as_ref(), &params)?;
    debug!(
        "voice={} speed={} lang={} session={}",
        request.voice, request.speed, request.lang, request.session_id
    );

    let transport = Arc::new(HttpTransport::new(&config.service_url));
    let coordinator = Arc::new(SessionCoordinator::new(transport));
    info!("Sending {} paragraph(s) to {}", paragraphs, coordinator.endpoint());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!(
        "Reading {} paragraph(s) with {}... (Ctrl-C to stop)",
        paragraphs, request.voice
    ));

    let handle = coordinator.spawn_dispatch(request);
    debug!("Dispatched session {}", handle.session_id());
    let outcome = handle.outcome();
    tokio::pin!(outcome);

    let finished = tokio::select! {
        outcome = &mut outcome => Some(outcome),
        _ = tokio::signal::ctrl_c() => None,
    };

    let outcome = match finished {
        Some(outcome) => outcome,
        None => {
            pb.set_message("Stopping playback...");
            debug!("Interrupted; active session {:?}", coordinator.active_session());
            match coordinator.stop().await {
                Ok(ack) => info!("{}", ack.message),
                Err(e) => warn!("Failed to stop playback: {}", e),
            }
            outcome.await
        }
    };
    pb.finish_and_clear();
    debug!("Session ended in phase {:?}", coordinator.phase());

    match outcome {
        DispatchOutcome::Completed(result) => {
            println!("{}", result.summary());
            if let Some(saved_as) = &result.saved_as {
                println!("Saved as {}", saved_as);
            }
            Ok(())
        }
        DispatchOutcome::Stopped { result, .. } => {
            match result {
                Some(result) => println!("Stopped ({})", result.summary()),
                None => println!("Stopped"),
            }
            Ok(())
        }
        DispatchOutcome::Failed(e) => Err(e.into()),
    }
}

async fn health(json: bool) -> Result<()> {
    let config = ReadAloudConfig::load().context("Failed to load configuration")?;
    let transport = Arc::new(HttpTransport::new(&config.service_url));
    let coordinator = SessionCoordinator::new(transport);

    let health = coordinator.health_check().await;
    let (label, report) = match &health {
        ServiceHealth::Online(report) => ("Online", report),
        ServiceHealth::Degraded(report) => ("Degraded", report),
        ServiceHealth::Offline(message) => anyhow::bail!("Offline: {}", message),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "{}: {} ({})",
        label,
        health.status().unwrap_or("unknown"),
        coordinator.endpoint()
    );
    if let Some(uptime) = report.uptime_seconds {
        println!("  uptime: {:.0}s", uptime);
    }
    if let Some(loaded) = report.model_loaded {
        println!("  model loaded: {}", loaded);
    }
    if let Some(model) = &report.model_file {
        println!("  model: {}", model);
    }
    if let Some(voices) = &report.voices_file {
        println!("  voices: {}", voices);
    }
    if let Some(idle) = report.idle_timeout_seconds {
        println!("  idle timeout: {}s", idle);
    }
    Ok(())
}

fn list_voices(lang: Option<String>) -> Result<()> {
    let config = ReadAloudConfig::load().context("Failed to load configuration")?;
    let lang = lang
        .or(config.lang)
        .unwrap_or_else(|| envelope::DEFAULT_LANG.to_string());

    if !voices::is_known_language(&lang) {
        warn!("Unknown language '{}', showing {}", lang, envelope::DEFAULT_LANG);
    }

    for (gender, heading) in [(Gender::Female, "Female"), (Gender::Male, "Male")] {
        println!("{}:", heading);
        for voice in voices::voices_for(&lang)
            .iter()
            .filter(|v| v.gender == gender)
        {
            println!("  {:<12} {}", voice.id, voice.label);
        }
    }
    Ok(())
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = ReadAloudConfig::load()?;
            println!("Configuration file: {:?}", ReadAloudConfig::config_path()?);
            println!();
            println!("service_url = \"{}\"", config.service_url);
            match &config.voice {
                Some(voice) => println!("voice = \"{}\"", voice),
                None => println!("voice = (default: {})", envelope::DEFAULT_VOICE),
            }
            match config.speed {
                Some(speed) => println!("speed = {}", speed),
                None => println!("speed = (default: {})", envelope::DEFAULT_SPEED),
            }
            match &config.lang {
                Some(lang) => println!("lang = \"{}\"", lang),
                None => println!("lang = (default: {})", envelope::DEFAULT_LANG),
            }
            println!("content_selector = \"{}\"", config.content_selector);
            println!("min_font_size_px = {}", config.min_font_size_px);
        }
        ConfigAction::SetVoice { voice } => {
            if !voices::is_known_voice(voice) {
                warn!("Unknown voice '{}'; the service will use its default", voice);
            }
            let mut config = ReadAloudConfig::load()?;
            config.voice = Some(voice.clone());
            config.save()?;
            println!("Default voice set to: {}", voice);
        }
        ConfigAction::SetSpeed { value } => {
            if !value.is_finite() || *value <= 0.0 {
                anyhow::bail!("Speed must be greater than 0, got {}", value);
            }
            let mut config = ReadAloudConfig::load()?;
            config.speed = Some(*value);
            config.save()?;
            println!("Default speed set to: {}", value);
        }
        ConfigAction::SetLang { lang } => {
            if !voices::is_known_language(lang) {
                warn!("Unknown language '{}'", lang);
            }
            let mut config = ReadAloudConfig::load()?;
            config.lang = Some(lang.clone());
            config.save()?;
            println!("Default language set to: {}", lang);
        }
        ConfigAction::SetServiceUrl { url } => {
            let mut config = ReadAloudConfig::load()?;
            config.service_url = url.trim_end_matches('/').to_string();
            config.save()?;
            println!("Service URL set to: {}", config.service_url);
        }
        ConfigAction::SetContentSelector { selector } => {
            let parsed: Selector = selector.parse()?;
            let mut config = ReadAloudConfig::load()?;
            config.content_selector = parsed.to_string();
            config.save()?;
            println!("Content selector set to: {}", parsed);
        }
    }
    Ok(())
}
