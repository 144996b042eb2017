//! court-calendar main entrypoint.

use court_calendar::run;
use court_calendar::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(e);
        std::process::exit(1);
    }
}
