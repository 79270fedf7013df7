use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_tutor::cli::{Cli, Commands, Difficulty, OutputFormat, SummaryLevel};
use yt_tutor::config::Config;
use yt_tutor::extractors::youtube::YoutubeTranscriptFetcher;
use yt_tutor::extractors::{extract_video_id, TranscriptError, TranscriptFetcher};
use yt_tutor::flashcards::format_flashcards;
use yt_tutor::output::{self, format_quiz, format_quiz_answers};
use yt_tutor::quiz::{parse_quiz, QuizFormat, QuizQuestion};
use yt_tutor::session::{QuizRequest, StudyPipeline, StudySession};
use yt_tutor::{llm, utils, TutorError};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose { "yt_tutor=debug" } else { "yt_tutor=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let quiet = cli.quiet;

    match cli.command {
        Commands::VideoId { url } => match extract_video_id(&url) {
            Some(video_id) => println!("{}", video_id),
            None => {
                eprintln!("Invalid YouTube URL.");
                std::process::exit(1);
            }
        },
        Commands::ParseQuiz { file, format } => {
            let response = fs_err::read_to_string(&file)?;
            let questions = parse_quiz(format, &response);
            println!("{}", format_quiz(&questions, &OutputFormat::Json)?);

            if questions.is_empty() {
                eprintln!("{}", TutorError::NoQuestions);
                std::process::exit(1);
            }
        }
        Commands::Config { show } => {
            let config = Config::load().await?;
            if show {
                config.display();
            } else {
                config.show_location().await?;
            }
        }
        Commands::Transcript { url, output } => {
            let config = load_config_checked().await?;
            let Some(video_id) = extract_video_id(&url) else {
                eprintln!("{}", TutorError::InvalidUrl(url));
                std::process::exit(1);
            };

            let fetcher = YoutubeTranscriptFetcher::new(config.app.yt_dlp_path.clone());
            let result = with_spinner(quiet, "Fetching transcript...", fetcher.fetch(&video_id)).await;

            match result {
                Ok(transcript) => emit(&transcript.text, output, "Transcript")?,
                Err(TranscriptError::NotAvailable) => println!("{}", TranscriptError::NotAvailable),
                Err(err) => {
                    eprintln!("{}", err);
                    std::process::exit(1);
                }
            }
        }
        Commands::Summarize { url, level, output } => {
            let config = load_config_checked().await?;
            let pipeline = build_pipeline(&config, None)?;
            let mut session = StudySession::new();

            if !load_transcript(&pipeline, &mut session, &url, quiet).await? {
                return Ok(());
            }

            let level = level.unwrap_or(config.app.summary_level);
            let summary = with_spinner(quiet, "Generating summary...", pipeline.summarize(&mut session, level)).await?;
            emit(&summary.text, output, "Summary")?;
        }
        Commands::Quiz {
            url,
            level,
            difficulty,
            count,
            format,
            no_interactive,
            output,
            output_format,
        } => {
            let config = load_config_checked().await?;
            let pipeline = build_pipeline(&config, format)?;
            let mut session = StudySession::new();

            if !load_transcript(&pipeline, &mut session, &url, quiet).await? {
                return Ok(());
            }

            let level = level.unwrap_or(config.app.summary_level);
            with_spinner(quiet, "Generating summary...", pipeline.summarize(&mut session, level)).await?;

            let request = quiz_request(&config, difficulty, count);
            let questions = with_spinner(quiet, "Creating MCQs...", pipeline.generate_quiz(&mut session, request)).await?;

            if no_interactive {
                println!("{}", format_quiz(questions, &output_format)?);
            } else {
                run_quiz(&session)?;
            }

            if let Some(path) = output {
                let content = match output_format {
                    OutputFormat::Text => format_quiz_answers(session.quiz()),
                    OutputFormat::Json => format_quiz(session.quiz(), &OutputFormat::Json)?,
                };
                output::save_to_file(&content, &path)?;
                println!("Questions saved to: {}", path.display());
            }
        }
        Commands::Flashcards { url, level, count, output } => {
            let config = load_config_checked().await?;
            let pipeline = build_pipeline(&config, None)?;
            let mut session = StudySession::new();

            if !load_transcript(&pipeline, &mut session, &url, quiet).await? {
                return Ok(());
            }

            let level = level.unwrap_or(config.app.summary_level);
            with_spinner(quiet, "Generating summary...", pipeline.summarize(&mut session, level)).await?;
            let cards = with_spinner(quiet, "Creating flashcards...", pipeline.generate_flashcards(&mut session, count)).await?;

            emit(&format_flashcards(cards), output, "Flashcards")?;
        }
        Commands::Study {
            url,
            level,
            difficulty,
            count,
            flashcards,
            out_dir,
        } => {
            let config = load_config_checked().await?;
            let request = quiz_request(&config, difficulty, count);
            run_study(&config, &url, level, request, flashcards, out_dir, quiet).await?;
        }
    }

    Ok(())
}

async fn load_config_checked() -> Result<Config> {
    let config = Config::load().await?;

    // Check for required external dependencies (non-fatal)
    let missing_deps = utils::check_dependencies(&config.app.yt_dlp_path).await;
    if !missing_deps.is_empty() {
        eprintln!("⚠️  Dependency check warnings:");
        for dep in missing_deps {
            eprintln!("   • {}", dep);
        }
    }

    Ok(config)
}

fn build_pipeline(config: &Config, format: Option<QuizFormat>) -> Result<StudyPipeline> {
    let fetcher = YoutubeTranscriptFetcher::new(config.app.yt_dlp_path.clone());
    let generator = llm::build_generator(&config.llm)?;

    Ok(StudyPipeline::new(
        Box::new(fetcher),
        generator,
        format.unwrap_or(config.quiz.format),
        config.quiz.min_source_words,
    ))
}

fn quiz_request(config: &Config, difficulty: Option<Difficulty>, count: Option<u8>) -> QuizRequest {
    QuizRequest {
        count: count.unwrap_or(config.quiz.default_questions),
        difficulty: difficulty.unwrap_or(config.quiz.default_difficulty),
    }
}

/// Fetch the transcript into the session; `false` when the video has none
async fn load_transcript(pipeline: &StudyPipeline, session: &mut StudySession, url: &str, quiet: bool) -> Result<bool> {
    let result = with_spinner(quiet, "Fetching transcript...", pipeline.load_transcript(session, url)).await;

    match result {
        Ok(_) => Ok(true),
        Err(err) if matches!(err.downcast_ref::<TranscriptError>(), Some(TranscriptError::NotAvailable)) => {
            println!("{}", TranscriptError::NotAvailable);
            Ok(false)
        }
        Err(err) => match err.downcast_ref::<TranscriptError>() {
            Some(fetch_error) => {
                eprintln!("{}", fetch_error);
                std::process::exit(1);
            }
            None => Err(err),
        },
    }
}

async fn run_study(
    config: &Config,
    url: &str,
    level: Option<SummaryLevel>,
    request: QuizRequest,
    flashcard_count: u8,
    out_dir: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let pipeline = build_pipeline(config, None)?;
    let mut session = StudySession::new();

    if !load_transcript(&pipeline, &mut session, url, quiet).await? {
        return Ok(());
    }

    if let Some(transcript) = session.transcript() {
        heading("📜 Extracted Transcript");
        println!("{}\n", transcript.text);
    }

    let level = level.unwrap_or(config.app.summary_level);
    let summary = with_spinner(quiet, "Generating summary...", pipeline.summarize(&mut session, level)).await?;
    heading("📝 Summary");
    println!("{}\n", summary.text);

    let generated = with_spinner(quiet, "Creating MCQs...", pipeline.generate_quiz(&mut session, request))
        .await
        .map(|questions| questions.len());
    match generated {
        Ok(_) => run_quiz(&session)?,
        Err(err) => eprintln!("{} {:#}", style("Quiz skipped:").yellow(), err),
    }

    match with_spinner(quiet, "Creating flashcards...", pipeline.generate_flashcards(&mut session, flashcard_count)).await {
        Ok(cards) => {
            heading("🃏 Flashcards");
            println!("{}\n", format_flashcards(cards));
        }
        Err(err) => eprintln!("{} {:#}", style("Flashcards skipped:").yellow(), err),
    }

    let base_dir = match out_dir.or_else(|| config.app.output_dir.clone()) {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let video_id = session
        .transcript()
        .map(|t| t.video_id.clone())
        .context("Session has no transcript")?;
    let dir = base_dir.join(utils::session_dir_name(&video_id));

    let paths = output::write_artifacts(&session.artifacts(), &dir)?;
    heading("📥 Downloads");
    for path in paths {
        println!("  {}", path.display());
    }

    Ok(())
}

/// Ask every question interactively and print the score
fn run_quiz(session: &StudySession) -> Result<()> {
    use dialoguer::{theme::ColorfulTheme, Select};

    heading("✅ Multiple Choice Questions");

    let mut selections: Vec<Option<String>> = Vec::with_capacity(session.quiz().len());
    for (index, question) in session.quiz().iter().enumerate() {
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{}. {}", index + 1, question.prompt()))
            .items(question.options())
            .item("(skip)")
            .interact_opt()
            .context("Answer selection cancelled")?;

        selections.push(selection.and_then(|i| question.options().get(i).cloned()));
    }

    let report = session.score(&selections);
    println!();
    for (question, result) in session.quiz().iter().zip(&report.results) {
        print_result(question, result.is_correct(), &result.correct_option);
    }
    println!("\n{}", style(format!("🎉 {}", report)).green().bold());

    Ok(())
}

fn print_result(question: &QuizQuestion, correct: bool, correct_option: &str) {
    if correct {
        println!("  {} {}", style("✔").green(), question.prompt());
    } else {
        println!(
            "  {} {} (correct answer: {})",
            style("✘").red(),
            question.prompt(),
            correct_option
        );
    }
}

fn heading(title: &str) {
    println!("{}", style(title).bold().cyan());
}

/// Print text, or save it when an output path is given
fn emit(content: &str, output: Option<PathBuf>, label: &str) -> Result<()> {
    match output {
        Some(path) => {
            output::save_to_file(content, &path)?;
            println!("{} saved to: {}", label, path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Await a stage while showing a spinner
async fn with_spinner<F, T>(quiet: bool, message: &'static str, stage: F) -> T
where
    F: Future<Output = T>,
{
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        progress.set_style(spinner_style);
    }
    progress.set_message(message);
    progress.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = stage.await;
    progress.finish_and_clear();
    result
}
