use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use monthgrid::{CalendarModel, DaySlot, Gregorian, SystemCalendar, YearWindow, DAYS_IN_WEEK};
use time::{format_description::FormatItem, macros::format_description, Date, Weekday};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Listing {
    Grid,
    Months,
    Years,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        monday: bool,
        before: i32,
        after: i32,
        listing: Listing,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut monday = false;
        let defaults = YearWindow::default();
        let mut before = defaults.before();
        let mut after = defaults.after();
        let mut listing = Listing::Grid;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('m') | Arg::Long("monday") => monday = true,
                Arg::Long("before") => before = parser.value()?.parse()?,
                Arg::Long("after") => after = parser.value()?.parse()?,
                Arg::Long("months") => listing = Listing::Months,
                Arg::Long("years") => listing = Listing::Years,
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
        Ok(Command::Run {
            date,
            monday,
            before,
            after,
            listing,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                monday,
                before,
                after,
                listing,
            } => {
                let mut calendar =
                    Gregorian::local().context("failed to determine local date")?;
                if monday {
                    calendar = calendar.with_first_weekday(Weekday::Monday);
                }
                let selected = match date {
                    Some(d) => d.midnight().assume_offset(calendar.offset()),
                    None => calendar.now(),
                };
                let window = YearWindow::new(before, after).context("invalid year window")?;
                let model = CalendarModel::new(calendar, selected, window)
                    .context("failed to build calendar")?;
                let lines = match listing {
                    Listing::Grid => grid_lines(&model),
                    Listing::Months => model
                        .picker()
                        .months()
                        .iter()
                        .map(|opt| format!("{:2}  {}", opt.index(), opt.title()))
                        .collect(),
                    Listing::Years => model
                        .picker()
                        .years()
                        .iter()
                        .map(|opt| opt.title().to_owned())
                        .collect(),
                };
                for ln in lines {
                    println!("{ln}");
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: monthgrid [<options>] [YYYY-MM-DD]");
                println!();
                println!("Show the month grid for a date, with that date selected");
                println!();
                println!("Options:");
                println!("  -m, --monday      Start weeks on Monday");
                println!("      --before N    Offer N years before this one in --years [default: 5]");
                println!("      --after N     Offer N years after this one in --years [default: 10]");
                println!("      --months      List the month picker options");
                println!("      --years       List the year picker options");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    Command::from_parser(Parser::from_env())?.run()
}

/// Renders the current grid of `model` as text: a title line, a weekday
/// header, and one line per week.  The selected day is bracketed and today
/// is starred.
fn grid_lines<C: SystemCalendar>(model: &CalendarModel<C>) -> Vec<String> {
    let calendar = model.calendar();
    let first = calendar.first_weekday();
    let header = (0..DAYS_IN_WEEK)
        .map(|i| {
            let wd = first.nth_next(u8::try_from(i).unwrap_or_default());
            let name = calendar
                .weekday_symbols()
                .get(usize::from(wd.number_days_from_sunday()))
                .map_or("", String::as_str);
            format!(" {:>2} ", name.chars().take(2).collect::<String>())
        })
        .collect::<String>();
    let mut lines = vec![
        format!("{:^width$}", model.title(), width = DAYS_IN_WEEK * 4)
            .trim_end()
            .to_owned(),
        header.trim_end().to_owned(),
    ];
    for row in model.current_grid().rows() {
        let ln = row
            .slots()
            .iter()
            .map(|slot| show(slot, calendar))
            .collect::<String>();
        lines.push(ln.trim_end().to_owned());
    }
    lines
}

fn show<C: SystemCalendar>(slot: &DaySlot, calendar: &C) -> String {
    match slot.number() {
        None => String::from("    "),
        Some(n) if slot.is_selected() => format!("[{n:2}]"),
        Some(n) if slot.is_today(calendar) => format!("*{n:2} "),
        Some(n) => format!(" {n:2} "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use time::macros::datetime;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        let args = args.iter().map(OsString::from).collect::<Vec<_>>();
        Command::from_parser(Parser::from_args(args))
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(
            parse(&[]).unwrap(),
            Command::Run {
                date: None,
                monday: false,
                before: 5,
                after: 10,
                listing: Listing::Grid,
            }
        );
    }

    #[test]
    fn test_parse_options() {
        assert_eq!(
            parse(&["-m", "--before", "2", "--after=3", "--years", "2024-02-29"]).unwrap(),
            Command::Run {
                date: Some(Date::from_calendar_date(2024, time::Month::February, 29).unwrap()),
                monday: true,
                before: 2,
                after: 3,
                listing: Listing::Years,
            }
        );
        assert_eq!(parse(&["--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_parse_bad_date() {
        assert!(parse(&["2023-02-29"]).is_err());
        assert!(parse(&["2024-01-01", "2024-01-02"]).is_err());
    }

    #[test]
    fn test_grid_lines() {
        let cal = Gregorian::new(datetime!(2024-01-15 09:00 UTC));
        let model =
            CalendarModel::new(cal, datetime!(2024-01-10 00:00 UTC), YearWindow::default())
                .unwrap();
        assert_eq!(
            grid_lines(&model),
            [
                "        January 2024",
                " Su  Mo  Tu  We  Th  Fr  Sa",
                "      1   2   3   4   5   6",
                "  7   8   9 [10] 11  12  13",
                " 14 *15  16  17  18  19  20",
                " 21  22  23  24  25  26  27",
                " 28  29  30  31",
            ]
        );
    }

    #[test]
    fn test_grid_lines_monday_first() {
        let cal =
            Gregorian::new(datetime!(2024-01-15 09:00 UTC)).with_first_weekday(Weekday::Monday);
        let model =
            CalendarModel::new(cal, datetime!(2024-01-31 00:00 UTC), YearWindow::default())
                .unwrap();
        let lines = grid_lines(&model);
        assert_eq!(lines[1], " Mo  Tu  We  Th  Fr  Sa  Su");
        assert_eq!(lines[2], "   1   2   3   4   5   6   7");
        assert_eq!(lines[6], " 29  30 [31]");
    }
}
