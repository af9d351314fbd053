//! Galton Board entry point
//!
//! Drives the simulation on a fixed cadence and shows it in the terminal.
//!
//! Usage: `galton-board [CONFIG.json] [--frames N]`

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use galton_board::consts::SPLASH_MS;
use galton_board::{
    BoardConfig, DisplayTarget, FrameBuffer, MiniFont, PcgCoin, Simulation, TerminalDisplay,
};

/// Command line options
#[derive(Debug, Default)]
struct Options {
    config_path: Option<PathBuf>,
    /// Stop after this many frames (runs forever when absent)
    frames: Option<u64>,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut options = Options::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--frames" => {
                    let value = args.next().ok_or("--frames needs a value")?;
                    let frames = value
                        .parse()
                        .map_err(|_| format!("invalid frame count: {}", value))?;
                    options.frames = Some(frames);
                }
                _ if arg.starts_with("--") => return Err(format!("unknown option: {}", arg)),
                _ => options.config_path = Some(PathBuf::from(arg)),
            }
        }
        Ok(options)
    }
}

/// Runner holding the simulation and its collaborators
struct Board {
    sim: Simulation<PcgCoin>,
    frame: FrameBuffer,
    font: MiniFont,
    display: TerminalDisplay<Stdout>,
    frame_interval: Duration,
}

impl Board {
    fn new(config: BoardConfig, seed: u64) -> Result<Self, galton_board::ConfigError> {
        let frame = FrameBuffer::new(config.width, config.height);
        let frame_interval = Duration::from_millis(config.frame_interval_ms);
        Ok(Self {
            sim: Simulation::new(config, PcgCoin::new(seed))?,
            frame,
            font: MiniFont,
            display: TerminalDisplay::new(io::stdout()),
            frame_interval,
        })
    }

    fn present(&mut self) {
        let area = self.frame.render_area();
        self.display.render_on_display(self.frame.as_bytes(), &area);
    }

    fn splash(&mut self) {
        self.sim.render_splash(&mut self.frame, &mut self.font);
        self.present();
        thread::sleep(Duration::from_millis(SPLASH_MS));
    }

    /// One frame: step, draw, transfer, wait
    fn tick(&mut self) {
        self.sim.step();
        self.sim.render(&mut self.frame, &mut self.font);
        self.present();
        thread::sleep(self.frame_interval);
    }

    fn run(&mut self, frames: Option<u64>) {
        self.splash();
        log::info!("Galton board running");

        match frames {
            Some(n) => (0..n).for_each(|_| self.tick()),
            None => loop {
                self.tick();
            },
        }

        log::info!(
            "Stopped after {} ticks, {} balls landed",
            self.sim.ticks(),
            self.sim.total()
        );
        match serde_json::to_string(&self.sim.snapshot()) {
            Ok(json) => log::debug!("Final state: {}", json),
            Err(e) => log::warn!("Could not serialize final state: {}", e),
        }
    }
}

fn main() {
    env_logger::init();

    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("usage: galton-board [CONFIG.json] [--frames N]");
            std::process::exit(2);
        }
    };

    let config = match &options.config_path {
        Some(path) => BoardConfig::load(path),
        None => Ok(BoardConfig::default()),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0);
    log::info!("Galton board starting with seed: {}", seed);

    let mut board = match Board::new(config, seed) {
        Ok(board) => board,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    board.run(options.frames);
}
