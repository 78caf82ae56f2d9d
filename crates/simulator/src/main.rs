mod events;
mod firmware;
mod host;
mod settings;

use crate::host::TerminalHost;
use crate::self_test::self_test;
use crate::settings::Settings;
use anyhow::Context;
use board_library::board::SCREEN_WIDTH;
use board_library::font::{CELL_WIDTH, FIRST_CHAR, LAST_CHAR};
use board_library::{Board, Dispatch, Host, HostEvent, InputRouter};
use clap::Parser;
use config::Config;
use log::info;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

const TEXT_ROWS: usize = 8;

#[derive(Parser, Debug)]
#[clap(
    name = "Board simulator",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
)]
struct Args {
    #[clap(short, long, help = "Config file (see example_config.toml)")]
    config: Option<String>,

    #[clap(short, long, help = "Print text on the display (wraps every 16 chars) and exit")]
    text: Option<String>,
}

/// Display text on the OLED for a few seconds, 16 characters per row.
fn display_text<H: Host>(board: &Board<H>, text: &str) {
    let printable: Vec<char> = text
        .chars()
        .map(|c| if (FIRST_CHAR..=LAST_CHAR).contains(&c) { c } else { '?' })
        .collect();

    for (row, line) in printable
        .chunks(SCREEN_WIDTH / CELL_WIDTH)
        .take(TEXT_ROWS)
        .enumerate()
    {
        let line: String = line.iter().collect();
        board.draw_string(0, row, &line);
    }

    info!("Displaying text: {text}");
    thread::sleep(Duration::from_secs(3));
}

fn event_loop<H: Host>(router: &mut InputRouter<H>, events: &Receiver<HostEvent>) -> i32 {
    for event in events.iter() {
        if let Dispatch::Quit(code) = router.dispatch(event) {
            return code;
        }
    }
    0
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg = Config::builder();

    if let Some(config_fn) = args.config {
        cfg = cfg.add_source(config::File::with_name(config_fn.as_str()));
    }

    let settings: Settings = cfg
        .build()
        .context("Can't create settings")?
        .try_deserialize()
        .context("Can't parse settings")?;

    settings.validate().map_err(anyhow::Error::msg)?;

    info!("Running with settings: {settings:?}");

    let (tx, rx) = mpsc::channel();
    let window = TerminalHost::new(settings.title.clone(), tx.clone());
    window.clear_screen();

    let board = Arc::new(
        Board::new(window, &host::resources(), settings.board_options())
            .context("Can't set up the board")?,
    );

    // If --text is provided, just display the text and exit (no firmware)
    if let Some(text) = args.text {
        display_text(&board, &text);
        return Ok(());
    }

    if settings.self_test {
        self_test(&board);
    }
    board.set_paused(false);

    let mut router = InputRouter::new(Arc::clone(&board), host::user_button());
    events::spawn_stdin_reader(tx).context("Can't start input thread")?;
    info!("{}", events::HELP);

    // Spawn the firmware only once every display is bound
    let demo_frames = settings.demo_frames;
    thread::Builder::new()
        .name("firmware".to_string())
        .spawn({
            let board = Arc::clone(&board);
            move || firmware::run(&board, demo_frames)
        })
        .context("Can't start firmware thread")?;

    let code = event_loop(&mut router, &rx);
    info!("Exiting with {code}");
    std::process::exit(code);
}
