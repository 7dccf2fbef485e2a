use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use spdlog::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use folio::content::ALL_CATEGORIES;
use folio::content::category::NavEntry;
use folio::filter::filter_posts;
use folio::i18n::{Language, Translator};
use folio::logger::configure_logger;
use folio::player::{Interaction, PlayerHandle, PlayerInput, PlayerSnapshot};
use folio::post::Post;
use folio::post_index::PostLookup;
use folio::site::SiteContext;
use folio::text_utils::format_progress;

use crate::config::open_config;
use crate::config_data::write_sample_cfg;

mod config;
mod config_data;

const CFG_FILE_NAME: &str = "folio.toml";
const PLAYER_TICK: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Display language, zh or en
    #[arg(short, long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List posts, optionally filtered
    List(ListArgs),
    /// Print one post
    Show {
        /// Slug of the post
        slug: String,
    },
    /// Print the category tree with post counts
    Categories,
    /// Interactive background music session
    Play,
    /// Write a sample configuration
    Init {
        /// Where to write it
        #[arg(short, long, default_value = CFG_FILE_NAME)]
        out: String,
    },
}

#[derive(ClapArgs, Debug)]
struct ListArgs {
    /// Category or category group, "All" for every post
    #[arg(short = 'C', long, default_value = ALL_CATEGORIES)]
    category: String,

    /// Keywords, all of them must match
    #[arg(short, long, default_value = "")]
    search: String,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Command::Init { out } = &args.command {
        let out = PathBuf::from(out);
        write_sample_cfg(&out)?;
        println!("Sample configuration written to {}", out.display());
        return Ok(());
    }

    let config = match open_config(args.config_path.map(PathBuf::from)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run folio --help");
            return Ok(());
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let mut site = SiteContext::new(config)?;
    if let Some(code) = args.lang {
        match Language::from_code(&code) {
            Some(language) => site.translator_mut().set_language(language),
            None => warn!("Unknown language {}, keeping {}", code, site.translator().language().code()),
        }
    }

    info!("Starting Folio =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");
    match args.command {
        Command::List(list_args) => list_cmd(&site, list_args).await,
        Command::Show { slug } => show_cmd(&site, &slug).await,
        Command::Categories => categories_cmd(&site).await,
        Command::Play => play_cmd(&site).await,
        Command::Init { .. } => Ok(()),
    }
}

fn translated_categories(translator: &Translator, post: &Post) -> String {
    post.categories.iter()
        .map(|c| translator.t(c))
        .collect::<Vec<_>>()
        .join(" / ")
}

async fn list_cmd(site: &SiteContext, args: ListArgs) -> Result<()> {
    let index = site.load_posts().await;
    let posts = filter_posts(index.posts(), site.registry(), &args.category, &args.search);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    let translator = site.translator();
    for post in posts {
        println!("{}  {}  [{}]  /post/{}", post.date, post.title, translated_categories(translator, post), post.slug);
        if !post.excerpt.is_empty() {
            println!("    {}", post.excerpt);
        }
    }
    Ok(())
}

async fn show_cmd(site: &SiteContext, slug: &str) -> Result<()> {
    let index = site.load_posts().await;
    let translator = site.translator();
    match index.lookup(slug) {
        PostLookup::Found(post) => {
            println!("# {}", post.title);
            println!("{} · {}", post.date, translated_categories(translator, post));
            println!();
            println!("{}", post.content);
        }
        PostLookup::NotFound { slug } => {
            eprintln!("{}: {}", translator.t("post.not_found"), slug);
        }
    }
    Ok(())
}

async fn categories_cmd(site: &SiteContext) -> Result<()> {
    let index = site.load_posts().await;
    let translator = site.translator();
    for entry in site.registry().navigation() {
        let count = filter_posts(index.posts(), site.registry(), entry.selection(), "").len();
        match entry {
            NavEntry::All => println!("{} ({})", translator.t("home.all"), count),
            NavEntry::Group(group) => println!("{} ({})", translator.t(&group.name), count),
            NavEntry::Item { label, .. } => println!("  {} ({})", translator.t(label), count),
        }
    }
    Ok(())
}

enum SessionCommand {
    Quit,
    Help,
    Status,
    Send(Vec<PlayerInput>),
}

const SESSION_HELP: &str = "p play/pause · n next · b previous · m mode · s <secs> seek · v <0-1> volume · mute · t <n> track · status · q quit";

fn parse_session_command(line: &str) -> Option<SessionCommand> {
    let mut parts = line.split_whitespace();
    let cmd = parts.next()?;
    let arg = parts.next();
    let command = match (cmd, arg) {
        ("q", _) | ("quit", _) => SessionCommand::Quit,
        ("h", _) | ("help", _) => SessionCommand::Help,
        ("status", _) => SessionCommand::Status,
        ("p", _) => SessionCommand::Send(vec![PlayerInput::TogglePlay]),
        ("n", _) => SessionCommand::Send(vec![PlayerInput::Next]),
        ("b", _) => SessionCommand::Send(vec![PlayerInput::Previous]),
        ("m", _) => SessionCommand::Send(vec![PlayerInput::CycleMode]),
        ("mute", _) => SessionCommand::Send(vec![PlayerInput::ToggleMute]),
        ("s", Some(secs)) => {
            let secs = secs.parse::<f64>().ok()?;
            SessionCommand::Send(vec![PlayerInput::SeekStart, PlayerInput::SeekMove(secs), PlayerInput::SeekCommit(secs)])
        }
        ("v", Some(volume)) => SessionCommand::Send(vec![PlayerInput::SetVolume(volume.parse().ok()?)]),
        // Tracks are numbered from 1 on screen
        ("t", Some(n)) => {
            let n = n.parse::<usize>().ok()?;
            SessionCommand::Send(vec![PlayerInput::Select(n.checked_sub(1)?)])
        }
        _ => return None,
    };
    Some(command)
}

/// The session's first key press, tracked here since the player snapshot
/// lags behind typed lines.
struct FirstKeyPress {
    autoplay: bool,
    pressed: bool,
}

impl FirstKeyPress {
    fn new(autoplay: bool) -> Self {
        FirstKeyPress { autoplay, pressed: false }
    }

    /// Registers a key press. True when `command` would only pause the track
    /// that this press autoplays.
    fn press(&mut self, command: Option<&SessionCommand>) -> bool {
        let first = !std::mem::replace(&mut self.pressed, true);
        first && self.autoplay && matches!(command, Some(SessionCommand::Send(inputs)) if inputs.as_slice() == [PlayerInput::TogglePlay])
    }
}

fn print_status(translator: &Translator, snapshot: &PlayerSnapshot) {
    let state = &snapshot.state;
    println!("{} {}/{} {} - {}  {}  [{}]  vol {:.0}%{}",
             if state.playing { "▶" } else { "⏸" },
             state.track_index + 1,
             snapshot.track_count,
             snapshot.track.title,
             snapshot.track.artist,
             format_progress(state.position, state.duration),
             translator.t(state.mode.label_key()),
             state.volume * 100.0,
             if state.muted { " (muted)" } else { "" });
}

async fn play_cmd(site: &SiteContext) -> Result<()> {
    let player = site.new_player(StdRng::from_entropy())?;
    let mut first_key_press = FirstKeyPress::new(site.config().player.autoplay);
    let translator = site.translator();
    let handle = PlayerHandle::spawn(player, PLAYER_TICK);
    let mut updates = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", SESSION_HELP);
    print_status(translator, &handle.snapshot());
    let mut shown = (handle.snapshot().state.track_index, handle.snapshot().state.playing);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = parse_session_command(&line);
                let autoplayed = first_key_press.press(command.as_ref());
                handle.send(PlayerInput::Interaction(Interaction::KeyPress)).await;

                match command {
                    Some(SessionCommand::Quit) => break,
                    Some(SessionCommand::Help) => println!("{}", SESSION_HELP),
                    Some(SessionCommand::Status) => print_status(translator, &handle.snapshot()),
                    // Autoplay already started the track on this key press
                    Some(SessionCommand::Send(_)) if autoplayed => {}
                    Some(SessionCommand::Send(inputs)) => {
                        for input in inputs {
                            if !handle.send(input).await {
                                return Ok(());
                            }
                        }
                    }
                    None => println!("{}", SESSION_HELP),
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                let current = (snapshot.state.track_index, snapshot.state.playing);
                if current != shown {
                    print_status(translator, &snapshot);
                    shown = current;
                }
            }
        }
    }

    info!("Leaving player session");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(line: &str) -> Vec<PlayerInput> {
        match parse_session_command(line) {
            Some(SessionCommand::Send(inputs)) => inputs,
            _ => vec![],
        }
    }

    #[test]
    fn test_session_commands() {
        assert_eq!(inputs("p"), vec![PlayerInput::TogglePlay]);
        assert_eq!(inputs(" n "), vec![PlayerInput::Next]);
        assert_eq!(inputs("s 42.5"), vec![PlayerInput::SeekStart, PlayerInput::SeekMove(42.5), PlayerInput::SeekCommit(42.5)]);
        assert_eq!(inputs("t 2"), vec![PlayerInput::Select(1)]);
        assert!(inputs("t 0").is_empty());
        assert!(inputs("v loud").is_empty());
        assert!(matches!(parse_session_command("q"), Some(SessionCommand::Quit)));
        assert!(parse_session_command("").is_none());
        assert!(parse_session_command("dance").is_none());
    }

    #[test]
    fn test_only_first_key_press_autoplays() {
        let toggle = parse_session_command("p");
        let mut presses = FirstKeyPress::new(true);
        assert!(presses.press(toggle.as_ref()));
        assert!(!presses.press(toggle.as_ref()));

        let mut presses = FirstKeyPress::new(true);
        assert!(!presses.press(parse_session_command("n").as_ref()));
        assert!(!presses.press(toggle.as_ref()));

        let mut presses = FirstKeyPress::new(true);
        assert!(!presses.press(None));
        assert!(!presses.press(toggle.as_ref()));

        let mut presses = FirstKeyPress::new(false);
        assert!(!presses.press(toggle.as_ref()));
    }
}
