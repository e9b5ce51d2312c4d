use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use profile_loader::{mock, CandidateId, ProfileIndex, Sender, UserProfile};
use rand::seq::SliceRandom;
use session::{
    ChatService, JsonFileStore, ProfileStore, RecordingNavigator, SessionConfig, SwipeOutcome,
    SwipeSession,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use swipe::{AdvanceOutcome, GestureVector, SwipeAction};

/// DEVMatch - swipe through developer profiles
#[derive(Parser)]
#[command(name = "devmatch")]
#[command(about = "Discover developers by swiping through their profiles", long_about = None)]
struct Cli {
    /// Directory with profiles.json and chats.json (bundled demo deck if omitted)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// File where your profile and favorites are kept
    #[arg(short, long, default_value = ".devmatch/state.json")]
    store: PathBuf,

    /// JSON session configuration (thresholds, animation timing)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List candidates in deck order
    Deck,

    /// Play drag gestures through a swipe session
    Swipe {
        /// Release offset as "x,y" (repeatable), e.g. -g 150,0 -g 0,-120
        #[arg(short, long = "gesture", required = true, allow_hyphen_values = true)]
        gestures: Vec<GestureVector>,

        /// Distance a drag must exceed to count as a swipe (px)
        #[arg(long)]
        threshold: Option<f64>,

        /// Shuffle the deck before swiping
        #[arg(long)]
        shuffle: bool,

        /// Skip animation timing
        #[arg(long)]
        instant: bool,
    },

    /// Show or change favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },

    /// Read and send chat messages
    Chats {
        #[command(subcommand)]
        action: ChatsCommand,
    },

    /// Show or edit your own profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },
}

#[derive(Subcommand)]
enum FavoritesCommand {
    List,
    Toggle {
        #[arg(long)]
        id: CandidateId,
    },
}

#[derive(Subcommand)]
enum ChatsCommand {
    List,
    Show {
        #[arg(long)]
        id: CandidateId,
    },
    Send {
        #[arg(long)]
        id: CandidateId,

        #[arg(long)]
        text: String,
    },
}

#[derive(Subcommand)]
enum ProfileCommand {
    Show,
    Edit(ProfileEdit),
}

#[derive(Args)]
struct ProfileEdit {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    nickname: Option<String>,
    #[arg(long)]
    age: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    summary: Option<String>,
    /// GitHub username or profile URL
    #[arg(long)]
    github: Option<String>,
    /// LinkedIn handle or profile URL
    #[arg(long)]
    linkedin: Option<String>,
    /// Interest tag to add (repeatable)
    #[arg(long = "interest")]
    interests: Vec<String>,
    /// Interest tag to remove (repeatable)
    #[arg(long = "remove-interest")]
    remove_interests: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let index = load_index(cli.data_dir.as_deref())?;
    let store = JsonFileStore::new(&cli.store);

    match cli.command {
        Commands::Deck => handle_deck(&index),
        Commands::Swipe {
            gestures,
            threshold,
            shuffle,
            instant,
        } => {
            let mut config = match &cli.config {
                Some(path) => SessionConfig::from_file(path)?,
                None => SessionConfig::default(),
            };
            if let Some(threshold) = threshold {
                config = config.with_threshold(threshold);
            }
            if instant {
                config.animation = config
                    .animation
                    .with_exit_duration(Duration::ZERO)
                    .with_entry_duration(Duration::ZERO);
                config.animation.frame_interval_ms = 1;
            }
            handle_swipe(&index, store, config, gestures, shuffle).await
        }
        Commands::Favorites { action } => handle_favorites(&index, store, action),
        Commands::Chats { action } => handle_chats(&index, action),
        Commands::Profile { action } => handle_profile(&store, action),
    }
}

fn load_index(data_dir: Option<&Path>) -> Result<ProfileIndex> {
    let Some(dir) = data_dir else {
        return Ok(mock::mock_index());
    };

    println!("Loading profiles from {}...", dir.display());
    let start = Instant::now();
    let index = ProfileIndex::load_from_files(dir).context("Failed to load profile data")?;
    println!("{} Loaded data in {:?}", "✓".green(), start.elapsed());
    Ok(index)
}

/// Handle the 'deck' command
fn handle_deck(index: &ProfileIndex) -> Result<()> {
    println!("{}", "Deck:".bold().blue());
    for (pos, candidate) in index.candidates().iter().enumerate() {
        println!(
            "{}. {} (id {}) - {}",
            (pos + 1).to_string().green(),
            candidate.name.bold(),
            candidate.id,
            candidate.summary
        );
        if !candidate.interests.is_empty() {
            println!("   {}", candidate.interests.join(", ").cyan());
        }
    }
    Ok(())
}

/// Handle the 'swipe' command
async fn handle_swipe(
    index: &ProfileIndex,
    store: JsonFileStore,
    config: SessionConfig,
    gestures: Vec<GestureVector>,
    shuffle: bool,
) -> Result<()> {
    let mut candidates = index.candidates().to_vec();
    if shuffle {
        candidates.shuffle(&mut rand::rng());
    }

    let navigator = Arc::new(RecordingNavigator::new());
    let mut session = SwipeSession::mount(candidates, config, Arc::new(store), navigator.clone())?;

    for vector in gestures {
        let name = session
            .current()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "-".to_string());
        if let Some(hint) = session.drag(vector) {
            println!("{} dragging {} shows {}", "•".dimmed(), name, hint.label().dimmed());
        }

        match session.swipe(vector).await {
            SwipeOutcome::Swiped { action, advance, .. } => {
                println!("{} {} {}", vector, action_label(action), name.bold());
                if let AdvanceOutcome::Advanced(cursor) = advance {
                    println!("   next card: #{}", cursor + 1);
                }
            }
            SwipeOutcome::Reset => println!("{} {} on {}", vector, "cancel".yellow(), name),
            SwipeOutcome::Ignored(reason) => {
                println!("{} {} ({:?})", vector, "ignored".dimmed(), reason)
            }
            SwipeOutcome::Discarded => println!("{} {}", vector, "discarded".dimmed()),
        }

        for feedback in session.drain_feedback() {
            println!("   {} {}", feedback.title.bold(), feedback.description);
        }
        for intent in navigator.take() {
            println!("   {} {}", "->".blue(), intent.route());
        }
    }

    session.teardown();
    println!(
        "{} {} of {} cards left",
        "✓".green(),
        session.deck().remaining(),
        session.deck().len()
    );
    Ok(())
}

fn action_label(action: SwipeAction) -> colored::ColoredString {
    match action {
        SwipeAction::Like => "like".green(),
        SwipeAction::Skip => "skip".red(),
        SwipeAction::Connect => "connect".blue(),
        SwipeAction::Cancel => "cancel".yellow(),
    }
}

/// Handle the 'favorites' command
fn handle_favorites(
    index: &ProfileIndex,
    store: JsonFileStore,
    action: FavoritesCommand,
) -> Result<()> {
    match action {
        FavoritesCommand::List => {
            let state = store.load()?;
            if state.favorites.is_empty() {
                println!("No favorites yet");
                return Ok(());
            }
            println!("{}", "Favorites:".bold().blue());
            for id in state.favorites {
                match index.get_candidate(id) {
                    Some(candidate) => println!("  - {} (id {})", candidate.name, id),
                    None => println!("  - unknown candidate {}", id),
                }
            }
        }
        FavoritesCommand::Toggle { id } => {
            index
                .get_candidate(id)
                .ok_or_else(|| anyhow!("Candidate {} not found", id))?;

            let mut session = SwipeSession::mount(
                index.candidates().to_vec(),
                SessionConfig::default(),
                Arc::new(store),
                Arc::new(RecordingNavigator::new()),
            )?;
            session.toggle_favorite(id);
            for feedback in session.drain_feedback() {
                println!("{} {}", feedback.title.bold(), feedback.description);
            }
            session.teardown();
        }
    }
    Ok(())
}

/// Handle the 'chats' command
fn handle_chats(index: &ProfileIndex, action: ChatsCommand) -> Result<()> {
    let mut chats = ChatService::from_index(index);

    match action {
        ChatsCommand::List => {
            println!("{}", "Chats:".bold().blue());
            for summary in chats.summaries() {
                let unread = if summary.unread > 0 {
                    format!(" [{}]", summary.unread).green().to_string()
                } else {
                    String::new()
                };
                println!(
                    "  {} (id {}){} {} - {}",
                    summary.name.bold(),
                    summary.id,
                    unread,
                    summary.time.dimmed(),
                    summary.preview
                );
            }
        }
        ChatsCommand::Show { id } => {
            let thread = chats
                .open(id)
                .ok_or_else(|| anyhow!("No chat with candidate {}", id))?;
            println!("{}", thread.name.bold().blue());
            for message in &thread.messages {
                let who = match message.sender {
                    Sender::You => "you".green(),
                    Sender::Them => thread.name.as_str().cyan(),
                };
                println!("  [{}] {}: {}", message.time.dimmed(), who, message.text);
            }
        }
        ChatsCommand::Send { id, text } => {
            let candidate = index
                .get_candidate(id)
                .ok_or_else(|| anyhow!("Candidate {} not found", id))?;
            chats.start_thread(candidate);
            let message = chats
                .send_message_now(id, &text)
                .ok_or_else(|| anyhow!("Message is empty"))?;
            println!(
                "{} sent to {} at {}: {}",
                "✓".green(),
                candidate.name,
                message.time,
                message.text
            );
        }
    }
    Ok(())
}

/// Handle the 'profile' command
fn handle_profile(store: &JsonFileStore, action: ProfileCommand) -> Result<()> {
    let mut state = store.load()?;

    match action {
        ProfileCommand::Show => match &state.profile {
            Some(profile) => print_profile(profile),
            None => println!("No profile saved yet. Create one with 'devmatch profile edit'."),
        },
        ProfileCommand::Edit(edit) => {
            let mut profile = state.profile.take().unwrap_or_default();
            apply_edit(&mut profile, edit);
            profile.validate().context("Profile is incomplete")?;

            state.profile = Some(profile);
            store.save(&state)?;
            println!("{} Profile saved to {}", "✓".green(), store.path().display());
            if let Some(profile) = &state.profile {
                print_profile(profile);
            }
        }
    }
    Ok(())
}

fn apply_edit(profile: &mut UserProfile, edit: ProfileEdit) {
    let fields = [
        (&mut profile.first_name, edit.first_name),
        (&mut profile.last_name, edit.last_name),
        (&mut profile.nickname, edit.nickname),
        (&mut profile.age, edit.age),
        (&mut profile.gender, edit.gender),
        (&mut profile.summary, edit.summary),
        (&mut profile.github, edit.github),
        (&mut profile.linkedin, edit.linkedin),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            *field = value;
        }
    }
    profile.normalize_socials();

    for interest in &edit.interests {
        profile.add_interest(interest);
    }
    for interest in &edit.remove_interests {
        profile.remove_interest(interest);
    }
}

fn print_profile(profile: &UserProfile) {
    println!("{}", profile.display_name().bold().blue());
    println!("{}Age: {}", "• ".green(), profile.age);
    println!("{}Gender: {}", "• ".green(), profile.gender);
    println!("{}Summary: {}", "• ".green(), profile.summary);
    if !profile.github.is_empty() {
        println!("{}GitHub: https://github.com/{}", "• ".cyan(), profile.github);
    }
    if !profile.linkedin.is_empty() {
        println!("{}LinkedIn: https://linkedin.com/in/{}", "• ".cyan(), profile.linkedin);
    }
    if !profile.interests.is_empty() {
        println!("{}Interests: {}", "• ".cyan(), profile.interests.join(", "));
    }
    if let Err(e) = profile.validate() {
        println!("{} {}", "!".yellow(), e);
    }
}
