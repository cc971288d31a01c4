mod app;
mod calendar;
mod clock;
mod help;
mod theme;
use crate::app::App;
use crate::calendar::{Clock, DatePicker, PickerEvent};
use crate::clock::LocalClock;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::OpenOptions;
use std::io::stdout;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use time::{format_description::FormatItem, macros::format_description, Date};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        logging: Option<Logging>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut log_file = None;
        let mut log_level = Level::INFO;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('l') | Arg::Long("log-file") => {
                    log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-level") => log_level = parser.value()?.parse()?,
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        let logging = log_file.map(|file| Logging {
            file,
            level: log_level,
        });
        Ok(Command::Run { date, logging })
    }

    fn run(self) -> anyhow::Result<ExitCode> {
        match self {
            Command::Run { date, logging } => {
                if let Some(logging) = logging {
                    logging.init()?;
                }
                let clock = LocalClock::detect().context("failed to determine local date")?;
                let today = clock.today();
                let mut picker = DatePicker::new(today);
                picker
                    .open(date, today)
                    .context("cannot display the requested month")?;
                let event = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(picker, clock)
                        .run(terminal)
                        .context("failed to run date picker")
                })?;
                match event {
                    PickerEvent::Committed(date) => {
                        println!("{date}");
                        Ok(ExitCode::SUCCESS)
                    }
                    PickerEvent::Cancelled => Ok(ExitCode::FAILURE),
                }
            }
            Command::Help => {
                println!("Usage: datepick [<options>] [YYYY-MM-DD]");
                println!();
                println!("Pick a date from a calendar in the terminal and print it");
                println!();
                println!("Exits with status 1 if the picker is closed without a date.");
                println!();
                println!("Options:");
                println!("  -l, --log-file <FILE>   Append log messages to <FILE>");
                println!("  --log-level <LEVEL>     Only log messages at <LEVEL> or higher [default: INFO]");
                println!("  -h, --help              Display this help message and exit");
                println!("  -V, --version           Show the program version and exit");
                Ok(ExitCode::SUCCESS)
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Logging {
    file: PathBuf,
    level: Level,
}

impl Logging {
    // The terminal belongs to the calendar, so logs can only go to a file.
    fn init(&self) -> anyhow::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file)
            .with_context(|| format!("failed to open log file {}", self.file.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(self.level)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .context("failed to install log subscriber")?;
        Ok(())
    }
}

fn main() -> anyhow::Result<ExitCode> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    if let Err(e) = execute!(stdout(), DisableMouseCapture) {
        tracing::warn!(error = %e, "failed to disable mouse capture");
    }
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse<const N: usize>(args: [&str; N]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(
            parse([]).ok(),
            Some(Command::Run {
                date: None,
                logging: None
            })
        );
    }

    #[test]
    fn test_date() {
        assert_eq!(
            parse(["2024-03-07"]).ok(),
            Some(Command::Run {
                date: Some(date!(2024 - 03 - 07)),
                logging: None
            })
        );
    }

    #[test]
    fn test_bad_date() {
        assert!(matches!(
            parse(["2024-02-30"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
        assert!(matches!(
            parse(["tomorrow"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
    }

    #[test]
    fn test_two_dates() {
        assert!(parse(["2024-03-07", "2024-03-08"]).is_err());
    }

    #[test]
    fn test_logging() {
        assert_eq!(
            parse(["--log-level", "debug", "-l", "picker.log", "2024-03-07"]).ok(),
            Some(Command::Run {
                date: Some(date!(2024 - 03 - 07)),
                logging: Some(Logging {
                    file: PathBuf::from("picker.log"),
                    level: Level::DEBUG,
                }),
            })
        );
        assert_eq!(
            parse(["--log-file=picker.log"]).ok(),
            Some(Command::Run {
                date: None,
                logging: Some(Logging {
                    file: PathBuf::from("picker.log"),
                    level: Level::INFO,
                }),
            })
        );
    }

    #[test]
    fn test_bad_log_level() {
        assert!(parse(["--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(["--help", "2024-03-07"]).ok(), Some(Command::Help));
        assert_eq!(parse(["-V"]).ok(), Some(Command::Version));
    }
}
