extern crate minical as lib;

use flexi_logger::{FileSpec, Logger};
use lib::calendar::MonthIndex;
use lib::config::load_suitable_config;
use lib::events::Dispatcher;
use lib::grid::CalendarGrid;
use lib::ui::{App, TerminalContainer, TextContainer};
use nix::sys::termios;
use std::io::stdout;
use std::path::PathBuf;
use structopt::StructOpt;
use termion::raw::IntoRawMode;
use termion::screen::AlternateScreen;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "minical",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "A small calendar to pick a date from."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only show calendar non-interactively"
    )]
    pub show: bool,

    #[structopt(long = "month", help = "month to show first, as YYYY-MM")]
    pub month: Option<MonthIndex>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    // Log lines on stderr would garble the interactive screen
    let log_level = if args.log_file.is_some() || args.show {
        DEFAULT_LOG_LEVEL
    } else {
        "warn"
    };

    let mut logger = Logger::try_with_env_or_str(log_level)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    let _logger = logger.start()?;

    let mut config = load_suitable_config(args.configfile.as_deref())?;

    if args.show && !termion::is_tty(&stdout()) {
        config.theme.styled = false;
    }

    let mut grid = CalendarGrid::new().with_theme(config.theme.clone());
    if let Some(month) = args.month {
        grid.show_month(month);
    }

    if args.show {
        let mut text = TextContainer::default();
        grid.mount(Some(&mut text))?;
        print!("{}", text);
        return Ok(());
    }

    const STDIN: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(
        termios::tcgetattr(STDIN).expect("Failed to get terminal attributes"),
    );

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        if let Ok(attr) = orig_attr.lock() {
            let _ = termios::tcsetattr(STDIN, termios::SetArg::TCSANOW, &attr);
        }

        println!("minical ran into a fatal error!");
        println!(
            "Consider filing an issue with a log file and the backtrace below at {}",
            env!("CARGO_PKG_REPOSITORY")
        );

        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let dispatcher = Dispatcher::from_config(&config);

    let mut app = App::new(&config, grid);

    let selected = {
        let screen = AlternateScreen::from(stdout().into_raw_mode()?);
        let mut term = TerminalContainer::new(screen)?;
        app.run(dispatcher, &mut term)?
    };

    if let Some(date) = selected {
        println!("{}", date.format("%Y-%m-%d"));
    }

    Ok(())
}
