use std::io::{self, Write};
use std::process::ExitCode;

use chaintable::ByteTable;
use htdump::{DumpError, config::Config, dump};
use log::{debug, error};

fn main() -> ExitCode {
    env_logger::builder().init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(target: "htdump", "{e}");
            eprintln!("htdump: {e}");
            if matches!(e, DumpError::InvalidArgs(_)) {
                eprintln!("{}", htdump::config::USAGE);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), DumpError> {
    let config = Config::from_args(std::env::args().skip(1))?;
    debug!(target: "htdump", "{config:?}");

    if config.help {
        println!("{}", htdump::config::USAGE);
        return Ok(());
    }

    let mut table = ByteTable::new_with_buckets(config.buckets)?;
    let inserted = if config.pairs.is_empty() {
        dump::load_reader(&mut table, io::stdin().lock())?
    } else {
        dump::load_pairs(&mut table, config.pairs.iter().map(String::as_str))?
    };
    debug!(target: "htdump", "inserted {inserted} pairs");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    dump::render(&table, &mut out)?;
    if config.stats {
        dump::render_stats(&table, &mut out)?;
    }
    out.flush()?;

    table.deinit();
    Ok(())
}
